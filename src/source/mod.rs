//! The contract every source adapter implements.

mod capabilities;
mod metadata;
mod registry;

pub use capabilities::{Capability, SourceCapabilities};
pub use metadata::{Field, FieldKind, FieldSet, FieldsMetadata};
pub use registry::SourceRegistry;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{
    Chapter, ChapterEntry, Manga, MangaEntry, PagedResults, SearchRequest, Section, SourceInfo, Tag,
};

/// A pluggable catalog source.
///
/// Adapters are built around an injected `RequestManager` and keep no
/// mutable state, so one instance can serve concurrent calls. Optional
/// operations default to [`Error::NotImplemented`].
#[async_trait]
pub trait Source: Send + Sync {
    fn info(&self) -> &SourceInfo;

    fn capabilities(&self) -> &SourceCapabilities;

    fn metadata(&self) -> &FieldsMetadata;

    fn not_implemented(&self, operation: &'static str) -> Error {
        Error::not_implemented(self.info().id.as_str(), operation)
    }

    /// Homepage shelves in display order.
    async fn get_homepage(&self) -> Result<Vec<Section>> {
        Err(self.not_implemented("get_homepage"))
    }

    async fn get_search_results(&self, _request: &SearchRequest) -> Result<PagedResults<MangaEntry>> {
        Err(self.not_implemented("get_search_results"))
    }

    /// Continues a homepage section. `page` is 1-based and only meaningful
    /// to the source that produced the section.
    async fn get_view_more_items(
        &self,
        _section_id: &str,
        _page: u32,
    ) -> Result<PagedResults<MangaEntry>> {
        Err(self.not_implemented("get_view_more_items"))
    }

    async fn get_manga_details(&self, id: &str) -> Result<Manga>;

    async fn get_chapters(&self, _manga_id: &str) -> Result<Vec<ChapterEntry>> {
        Err(self.not_implemented("get_chapters"))
    }

    async fn get_chapter_details(&self, _manga_id: &str, _chapter_id: &str) -> Result<Chapter> {
        Err(self.not_implemented("get_chapter_details"))
    }

    async fn get_search_tags(&self) -> Result<Vec<Tag>> {
        Err(self.not_implemented("get_search_tags"))
    }
}
