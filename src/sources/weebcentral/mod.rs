pub mod parser;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    Chapter, ChapterEntry, Manga, MangaEntry, PagedResults, SearchRequest, Section, SourceInfo, Tag,
};
use crate::request::{AppRequest, RequestManager};
use crate::source::{Field, FieldSet, FieldsMetadata, Source, SourceCapabilities};

pub const ID: &str = "weebcentral";
const BASE_URL: &str = "https://weebcentral.com";
const LOCALE: &str = "en-US";
const PAGE_SIZE: u32 = 32;

/// Query keys the adapter owns; caller extras never replace them.
const RESERVED_PARAMS: &[&str] = &["text", "limit", "offset", "included_tag", "excluded_tag"];

pub struct WeebCentral {
    info: SourceInfo,
    capabilities: SourceCapabilities,
    metadata: FieldsMetadata,
    requests: Arc<dyn RequestManager>,
}

fn search_fields() -> Result<FieldSet> {
    let any_true_false = ["Any", "True", "False"];
    FieldSet::new(vec![
        Field::select(
            "sort",
            "Sort",
            &[
                "Best Match",
                "Alphabet",
                "Popularity",
                "Subscribers",
                "Recently Added",
                "Latest Updates",
            ],
        )?
        .with_default("Best Match")?,
        Field::select("order", "Order", &["Ascending", "Descending"])?.with_default("Descending")?,
        Field::select("official", "Official Translation", &any_true_false)?.with_default("Any")?,
        Field::select("anime", "Anime Adaptation", &any_true_false)?.with_default("Any")?,
        Field::select("adult", "Adult Content", &any_true_false)?.with_default("Any")?,
        Field::select(
            "included_status",
            "Series Status",
            &["Canceled", "Ongoing", "Complete", "Hiatus"],
        )?,
        Field::select(
            "included_type",
            "Series Type",
            &["Manga", "Manhwa", "Manhua", "OEL"],
        )?,
    ])
}

impl WeebCentral {
    pub fn new(requests: Arc<dyn RequestManager>) -> Result<Self> {
        Ok(Self {
            info: SourceInfo {
                id: ID.to_string(),
                name: "WeebCentral".to_string(),
                icon_url: format!("{BASE_URL}/favicon.ico"),
                base_url: BASE_URL.to_string(),
                locale: Some(LOCALE.to_string()),
            },
            capabilities: SourceCapabilities::all(),
            metadata: FieldsMetadata::search_only(search_fields()?),
            requests,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.info.base_url, path)
    }

    fn search_request(&self, query: &SearchRequest) -> AppRequest {
        let offset = query.offset.unwrap_or(0);
        let mut request = AppRequest::get(self.url("/search/data")).param("text", query.title.as_str());

        for (key, value) in self.metadata.resolve_search(&query.parameters) {
            request = request.param(key, value);
        }
        request = request.param("display_mode", "Full Display");

        for (key, value) in &query.parameters {
            if self.metadata.search.get(key).is_none() && !RESERVED_PARAMS.contains(&key.as_str()) {
                request = request.param(key.as_str(), value.as_str());
            }
        }

        if !query.included_tags.is_empty() {
            let ids = query.included_tags.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
            request = request.param("included_tag", ids);
        }
        if !query.excluded_tags.is_empty() {
            let ids = query.excluded_tags.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
            request = request.param("excluded_tag", ids);
        }

        request.param("limit", PAGE_SIZE).param("offset", offset)
    }
}

#[async_trait]
impl Source for WeebCentral {
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
        let home = AppRequest::get(self.url("")).header("Referer", BASE_URL);
        let updates = AppRequest::get(self.url("/latest-updates/1")).header("Referer", BASE_URL);

        let (home_html, updates_html) = tokio::try_join!(
            self.requests.fetch_text(home),
            self.requests.fetch_text(updates),
        )?;

        Ok(vec![
            parser::parse_hot_updates(&home_html)?,
            parser::parse_latest_updates(&updates_html)?,
        ])
    }

    async fn get_search_results(&self, query: &SearchRequest) -> Result<PagedResults<MangaEntry>> {
        self.capabilities.check_tags(ID, query)?;
        self.metadata.validate_search(&query.parameters)?;

        let offset = query.offset.unwrap_or(0);
        let html = self.requests.fetch_text(self.search_request(query)).await?;
        let (results, cards) = parser::parse_search_results(&html)?;
        debug!(count = results.len(), cards, offset, "Search page parsed");

        Ok(PagedResults {
            total_count: results.len(),
            has_next_page: cards >= PAGE_SIZE as usize,
            has_previous_page: offset > 0,
            limit: PAGE_SIZE,
            offset: Some(offset),
            results,
        })
    }

    async fn get_view_more_items(&self, section_id: &str, page: u32) -> Result<PagedResults<MangaEntry>> {
        match section_id {
            parser::HOT_UPDATES => Err(self.not_implemented("get_view_more_items(hot-updates)")),
            parser::LATEST_UPDATES => {
                let page = page.max(1);
                let request = AppRequest::get(self.url(&format!("/latest-updates/{page}")))
                    .header("Referer", BASE_URL);
                let html = self.requests.fetch_text(request).await?;
                let results = parser::parse_latest_updates(&html)?.items;

                Ok(PagedResults {
                    total_count: results.len(),
                    has_next_page: !results.is_empty(),
                    has_previous_page: page > 1,
                    limit: PAGE_SIZE,
                    offset: Some((page - 1).saturating_mul(PAGE_SIZE)),
                    results,
                })
            }
            other => Err(Error::unknown_section(other)),
        }
    }

    async fn get_manga_details(&self, id: &str) -> Result<Manga> {
        let html = self
            .requests
            .fetch_text(AppRequest::get(self.url(&format!("/series/{id}"))))
            .await?;
        parser::parse_manga_details(&html)
    }

    async fn get_chapters(&self, manga_id: &str) -> Result<Vec<ChapterEntry>> {
        let request = AppRequest::get(self.url(&format!("/series/{manga_id}/full-chapter-list")));
        let html = self.requests.fetch_text(request).await?;
        parser::parse_chapter_list(&html)
    }

    async fn get_chapter_details(&self, _manga_id: &str, chapter_id: &str) -> Result<Chapter> {
        let details = AppRequest::get(self.url(&format!("/chapters/{chapter_id}")));
        let pages = AppRequest::get(self.url(&format!("/chapters/{chapter_id}/images")))
            .param("is_prev", "False")
            .param("current_page", 1u32)
            .param("reading_style", "long_strip");

        let (details_html, pages_html) = tokio::try_join!(
            self.requests.fetch_text(details),
            self.requests.fetch_text(pages),
        )?;

        let (title, number) = parser::parse_chapter_details(&details_html)?;
        Ok(Chapter {
            id: chapter_id.to_string(),
            title,
            number,
            pages: parser::parse_chapter_pages(&pages_html)?,
            locale: LOCALE.to_string(),
        })
    }

    async fn get_search_tags(&self) -> Result<Vec<Tag>> {
        let html = self.requests.fetch_text(AppRequest::get(self.url("/search"))).await?;
        parser::parse_tags(&html)
    }
}
