pub mod parser;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Chapter, ChapterEntry, Manga, Section, SourceInfo};
use crate::request::{AppRequest, RequestManager};
use crate::source::{FieldsMetadata, Source, SourceCapabilities};

pub const ID: &str = "mangalivre";
const BASE_URL: &str = "https://mangalivre.blog";

/// Manga Livre has no usable search or pagination; only the homepage and
/// drill-down pages are supported.
pub struct MangaLivre {
    info: SourceInfo,
    capabilities: SourceCapabilities,
    metadata: FieldsMetadata,
    requests: Arc<dyn RequestManager>,
}

impl MangaLivre {
    pub fn new(requests: Arc<dyn RequestManager>) -> Result<Self> {
        Ok(Self {
            info: SourceInfo {
                id: ID.to_string(),
                name: "Manga Livre".to_string(),
                icon_url: format!("{BASE_URL}/favicon.ico"),
                base_url: BASE_URL.to_string(),
                locale: Some(parser::LOCALE.to_string()),
            },
            capabilities: SourceCapabilities::homepage_only(),
            metadata: FieldsMetadata::default(),
            requests,
        })
    }

    fn page(&self, path: &str) -> AppRequest {
        AppRequest::get(format!("{}{}", self.info.base_url, path)).header("Referer", BASE_URL)
    }
}

#[async_trait]
impl Source for MangaLivre {
    fn info(&self) -> &SourceInfo {
        &self.info
    }

    fn capabilities(&self) -> &SourceCapabilities {
        &self.capabilities
    }

    fn metadata(&self) -> &FieldsMetadata {
        &self.metadata
    }

    async fn get_homepage(&self) -> Result<Vec<Section>> {
        let html = self.requests.fetch_text(self.page("")).await?;
        parser::parse_homepage(&html)
    }

    async fn get_manga_details(&self, id: &str) -> Result<Manga> {
        let html = self.requests.fetch_text(self.page(&format!("/manga/{id}"))).await?;
        parser::parse_manga_details(&html)
    }

    // The chapter list lives on the series page itself.
    async fn get_chapters(&self, manga_id: &str) -> Result<Vec<ChapterEntry>> {
        let html = self.requests.fetch_text(self.page(&format!("/manga/{manga_id}"))).await?;
        parser::parse_chapter_list(&html)
    }

    async fn get_chapter_details(&self, _manga_id: &str, chapter_id: &str) -> Result<Chapter> {
        let html = self
            .requests
            .fetch_text(self.page(&format!("/capitulo/{chapter_id}")))
            .await?;
        parser::parse_chapter_details(&html, chapter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::parser::fixtures;
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{SearchRequest, Tag};
    use crate::request::stub::StubRequestManager;

    fn source(stub: StubRequestManager) -> MangaLivre {
        MangaLivre::new(Arc::new(stub)).unwrap()
    }

    #[tokio::test]
    async fn test_homepage_uses_one_request() {
        let stub = Arc::new(StubRequestManager::new().route("https://mangalivre.blog", fixtures::HOME));
        let source = MangaLivre::new(stub.clone()).unwrap();

        let sections = source.get_homepage().await.unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_operations_are_not_implemented() {
        let source = source(StubRequestManager::new());
        assert!(!source.capabilities().supports_search);
        assert!(source.metadata().search.is_empty());

        let query = SearchRequest::new("").include(Tag::from_label("Ação"));
        let err = source.get_search_results(&query).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);

        let err = source.get_view_more_items("latest-updates-section", 2).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);

        let err = source.get_search_tags().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }

    #[tokio::test]
    async fn test_drilldown() {
        let source = source(
            StubRequestManager::new()
                .route("https://mangalivre.blog/manga/one-piece", fixtures::MANGA)
                .route("https://mangalivre.blog/capitulo/one-piece-1100", fixtures::CHAPTER),
        );

        let manga = source.get_manga_details("one-piece").await.unwrap();
        assert_eq!(manga.title, "One Piece");

        let chapters = source.get_chapters("one-piece").await.unwrap();
        assert_eq!(chapters[0].id, "one-piece-1100");

        let chapter = source.get_chapter_details("one-piece", "one-piece-1100").await.unwrap();
        assert_eq!(chapter.pages.len(), 2);
    }

    #[tokio::test]
    async fn test_site_error_is_transport() {
        let source = source(StubRequestManager::new().route_status("https://mangalivre.blog", 500));
        let err = source.get_homepage().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
