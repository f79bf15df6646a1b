//! Azure DevOps wiki and work item REST types.

mod page;
mod wiki;
mod work_item;

pub use page::{PagesBatchRequest, WikiPage, WikiPageBatch, WikiPageDetail, WikiPageStat};
pub use wiki::{Wiki, WikiCreate, WikiList};
pub use work_item::{
    CommentList, ErrorPolicy, IdentityRef, PatchOp, PatchOperation, SearchProject, WiqlResult,
    WorkItem, WorkItemComment, WorkItemDetails, WorkItemExpand, WorkItemList,
    WorkItemQueryResult, WorkItemReference, WorkItemSearchHit, WorkItemSearchResponse,
    WorkItemSearchResult, WorkItemSummary,
};
