use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::SearchRequest;

/// Optional operations and filters a source can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Homepage,
    Search,
    ViewMore,
    IncludeTags,
    ExcludeTags,
    Pagination,
}

/// Caller-facing promise of what a source meaningfully supports.
///
/// Flags are advertised, not enforced: an operation behind a `false` flag
/// may still work, or may fail with `NotImplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCapabilities {
    pub supports_homepage: bool,
    pub supports_search: bool,
    pub supports_view_more: bool,
    pub support_include_tags: bool,
    pub support_exclude_tags: bool,
    pub support_pagination: bool,
}

impl SourceCapabilities {
    pub fn all() -> Self {
        Self {
            supports_homepage: true,
            supports_search: true,
            supports_view_more: true,
            support_include_tags: true,
            support_exclude_tags: true,
            support_pagination: true,
        }
    }

    pub fn homepage_only() -> Self {
        Self {
            supports_homepage: true,
            ..Default::default()
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Homepage => self.supports_homepage,
            Capability::Search => self.supports_search,
            Capability::ViewMore => self.supports_view_more,
            Capability::IncludeTags => self.support_include_tags,
            Capability::ExcludeTags => self.support_exclude_tags,
            Capability::Pagination => self.support_pagination,
        }
    }

    /// Rejects tag filters the source cannot apply instead of dropping them.
    pub fn check_tags(&self, source_id: &str, request: &SearchRequest) -> Result<()> {
        if !request.included_tags.is_empty() && !self.support_include_tags {
            return Err(Error::not_implemented(source_id, "included tags"));
        }
        if !request.excluded_tags.is_empty() && !self.support_exclude_tags {
            return Err(Error::not_implemented(source_id, "excluded tags"));
        }
        Ok(())
    }
}
