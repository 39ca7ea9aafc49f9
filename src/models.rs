use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lightweight reference to a series, as produced by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaEntry {
    pub id: String,
    pub title: String,
    pub image: String,
}

impl MangaEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: image.into(),
        }
    }

    /// Entries with an empty id cannot be drilled into and should be skipped.
    pub fn is_usable(&self) -> bool {
        !self.id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    Ongoing,
    Completed,
    Hiatus,
    Cancelled,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Value the source's filter endpoint expects
    pub id: String,
    pub label: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Tag whose filter value is its display text.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manga {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntry {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    /// Ordering key taken from the title; not guaranteed unique or monotonic
    pub number: f64,
    #[serde(default)]
    pub pages: Vec<String>,
    pub locale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    SingleRowNormal,
    SingleRowLarge,
}

/// A titled shelf of entries shown on a homepage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub items: Vec<MangaEntry>,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// Whether `get_view_more_items` is meaningful for this section id
    pub contains_more_items: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResults<T> {
    pub results: Vec<T>,
    /// May only be the size of the current page when the site exposes no total
    pub total_count: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl<T> PagedResults<T> {
    /// Results with no continuation in either direction.
    pub fn single_page(results: Vec<T>, limit: u32) -> Self {
        Self {
            total_count: results.len(),
            results,
            has_next_page: false,
            has_previous_page: false,
            limit,
            offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub title: String,
    #[serde(default)]
    pub included_tags: Vec<Tag>,
    #[serde(default)]
    pub excluded_tags: Vec<Tag>,
    /// Values keyed by the field keys advertised in the source's metadata
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl SearchRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn include(mut self, tag: Tag) -> Self {
        self.included_tags.push(tag);
        self
    }

    pub fn exclude(mut self, tag: Tag) -> Self {
        self.excluded_tags.push(tag);
        self
    }

    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Static identity of a source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub icon_url: String,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_is_unusable() {
        assert!(!MangaEntry::new("", "Title", "https://img").is_usable());
        assert!(MangaEntry::new("01J76", "Title", "https://img").is_usable());
    }

    #[test]
    fn test_section_serializes_contract_names() {
        let section = Section {
            id: "latest-updates".to_string(),
            title: "Latest Updates".to_string(),
            items: vec![],
            section_type: SectionType::SingleRowNormal,
            contains_more_items: true,
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["type"], "SingleRowNormal");
        assert_eq!(value["containsMoreItems"], true);
    }

    #[test]
    fn test_paged_results_single_page() {
        let page = PagedResults::single_page(vec![1, 2, 3], 32);
        assert_eq!(page.total_count, 3);
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalCount"], 3);
        assert!(value.get("offset").is_none());
    }

    #[test]
    fn test_search_request_builder() {
        let request = SearchRequest::new("solo")
            .include(Tag::from_label("Action"))
            .exclude(Tag::new("adult", "Adult"))
            .parameter("sort", "Popularity")
            .with_offset(32);

        assert_eq!(request.included_tags[0].id, "Action");
        assert_eq!(request.excluded_tags[0].id, "adult");
        assert_eq!(request.parameters["sort"], "Popularity");
        assert_eq!(request.offset, Some(32));
    }

    #[test]
    fn test_status_defaults_to_unknown() {
        assert_eq!(Status::default(), Status::Unknown);
        assert_eq!(Manga::default().status, Status::Unknown);
    }
}
