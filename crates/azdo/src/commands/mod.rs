//! CLI command implementations.

pub(crate) mod connection;
pub(crate) mod tools;
pub(crate) mod wiki;
pub(crate) mod work_item;

pub(crate) use connection::ConnectionArgs;
pub(crate) use tools::ToolsCommand;
pub(crate) use wiki::WikiCommand;
pub(crate) use work_item::WorkItemCommand;
