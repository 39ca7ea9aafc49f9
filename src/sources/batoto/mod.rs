pub mod parser;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Manga, Section, SourceInfo};
use crate::request::{AppRequest, RequestManager};
use crate::source::{FieldsMetadata, Source, SourceCapabilities};

pub const ID: &str = "batoto";
const BASE_URL: &str = "https://bato.to";

pub struct Batoto {
    info: SourceInfo,
    capabilities: SourceCapabilities,
    metadata: FieldsMetadata,
    requests: Arc<dyn RequestManager>,
}

impl Batoto {
    pub fn new(requests: Arc<dyn RequestManager>) -> Result<Self> {
        Ok(Self {
            info: SourceInfo {
                id: ID.to_string(),
                name: "Bato.to".to_string(),
                icon_url: format!("{BASE_URL}/favicon.ico"),
                base_url: BASE_URL.to_string(),
                locale: Some("en".to_string()),
            },
            capabilities: SourceCapabilities::homepage_only(),
            metadata: FieldsMetadata::default(),
            requests,
        })
    }
}

#[async_trait]
impl Source for Batoto {
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
        let request = AppRequest::get(BASE_URL).header("Referer", BASE_URL);
        let html = self.requests.fetch_text(request).await?;
        parser::parse_homepage(&html)
    }

    async fn get_manga_details(&self, id: &str) -> Result<Manga> {
        let request = AppRequest::get(format!("{BASE_URL}/series/{id}"));
        let html = self.requests.fetch_text(request).await?;
        parser::parse_manga_details(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::parser::fixtures;
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::stub::StubRequestManager;

    #[tokio::test]
    async fn test_homepage_and_details() {
        let stub = StubRequestManager::new()
            .route("https://bato.to", fixtures::HOME)
            .route("https://bato.to/series/81514", fixtures::SERIES);
        let source = Batoto::new(Arc::new(stub)).unwrap();

        let sections = source.get_homepage().await.unwrap();
        assert_eq!(sections.len(), 2);

        let manga = source.get_manga_details("81514").await.unwrap();
        assert_eq!(manga.authors.len(), 2);
    }

    #[tokio::test]
    async fn test_chapters_not_implemented() {
        let source = Batoto::new(Arc::new(StubRequestManager::new())).unwrap();
        let err = source.get_chapters("81514").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);

        let err = source.get_chapter_details("81514", "1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
}
