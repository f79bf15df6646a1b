//! Page addressing and path normalization.
//!
//! Wiki paths are logical, not file paths: they are rooted at `/` and carry
//! no `.md` suffix. Both forms are accepted from callers.

use crate::error::WikiError;

/// Markdown suffix stripped from page paths.
const MARKDOWN_SUFFIX: &str = ".md";

/// Normalize a page path.
///
/// Prepends `/` if absent and strips one trailing `.md` (any case).
///
/// ```
/// use azdo_client::normalize_page_path;
///
/// assert_eq!(normalize_page_path("Home.MD"), "/Home");
/// assert_eq!(normalize_page_path("/Docs/Setup"), "/Docs/Setup");
/// ```
pub fn normalize_page_path(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    let suffix_start = normalized.len().saturating_sub(MARKDOWN_SUFFIX.len());
    if normalized
        .get(suffix_start..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(MARKDOWN_SUFFIX))
    {
        normalized.truncate(suffix_start);
    }

    normalized
}

/// Identifies a wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPageRef {
    wiki: String,
    project: Option<String>,
    path: String,
}

impl WikiPageRef {
    /// Create a page reference with a normalized path.
    ///
    /// `project` of `None` means the client's default project.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::InvalidParams`] if `wiki` or `path` is empty.
    pub fn new(wiki: &str, project: Option<&str>, path: &str) -> Result<Self, WikiError> {
        if wiki.trim().is_empty() {
            return Err(WikiError::InvalidParams(
                "wiki identifier is required".to_owned(),
            ));
        }
        if path.trim().is_empty() {
            return Err(WikiError::InvalidParams("page path is required".to_owned()));
        }

        Ok(Self {
            wiki: wiki.to_owned(),
            project: project.filter(|p| !p.is_empty()).map(str::to_owned),
            path: normalize_page_path(path),
        })
    }

    /// Wiki name or ID.
    pub fn wiki(&self) -> &str {
        &self.wiki
    }

    /// Explicit project, if any.
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Normalized page path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_equivalent_forms() {
        for input in ["Home", "/Home", "/Home.md", "Home.MD"] {
            assert_eq!(normalize_page_path(input), "/Home", "input: {input}");
        }
    }

    #[test]
    fn test_normalize_nested_path() {
        assert_eq!(normalize_page_path("Docs/Guides/Setup.Md"), "/Docs/Guides/Setup");
    }

    #[test]
    fn test_normalize_strips_suffix_once() {
        assert_eq!(normalize_page_path("/Notes.md.md"), "/Notes.md");
    }

    #[test]
    fn test_normalize_keeps_md_inside_name() {
        assert_eq!(normalize_page_path("/cmd"), "/cmd");
        assert_eq!(normalize_page_path("/Readme.mdx"), "/Readme.mdx");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_page_path("/"), "/");
    }

    #[test]
    fn test_normalize_multibyte_tail() {
        assert_eq!(normalize_page_path("/Страница"), "/Страница");
    }

    #[test]
    fn test_new_normalizes_path() {
        let page = WikiPageRef::new("W", Some("Docs"), "Home.md").unwrap();
        assert_eq!(page.wiki(), "W");
        assert_eq!(page.project(), Some("Docs"));
        assert_eq!(page.path(), "/Home");
    }

    #[test]
    fn test_new_empty_project_means_default() {
        let page = WikiPageRef::new("W", Some(""), "/Home").unwrap();
        assert_eq!(page.project(), None);
    }

    #[test]
    fn test_new_requires_wiki() {
        let err = WikiPageRef::new("", None, "/Home").unwrap_err();
        assert!(matches!(err, WikiError::InvalidParams(_)));
    }

    #[test]
    fn test_new_requires_path() {
        let err = WikiPageRef::new("W", None, "").unwrap_err();
        assert!(matches!(err, WikiError::InvalidParams(_)));
    }
}
