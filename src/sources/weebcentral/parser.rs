use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::models::{ChapterEntry, Manga, MangaEntry, Section, SectionType, Status, Tag};
use crate::sources::util::{capture_id, chapter_number};

pub const HOT_UPDATES: &str = "hot-updates";
pub const LATEST_UPDATES: &str = "latest-updates";

static SERIES_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/series/([^/?#]+)").unwrap());
static CHAPTER_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/chapters/([^/?#]+)").unwrap());

pub fn series_id_from_url(url: &str) -> String {
    capture_id(&SERIES_ID, url)
}

pub fn chapter_id_from_url(url: &str) -> String {
    capture_id(&CHAPTER_ID, url)
}

pub fn status_from_str(status: &str) -> Status {
    match status.trim() {
        "Complete" => Status::Completed,
        "Ongoing" => Status::Ongoing,
        "Hiatus" => Status::Hiatus,
        "Canceled" => Status::Cancelled,
        _ => Status::Unknown,
    }
}

/// The "Hot Updates" shelf on the front page. Entries come as pairs of
/// articles: the chapter card, then the series link.
pub fn parse_hot_updates(html: &str) -> Result<Section> {
    let doc = Document::parse(html);

    let section = doc
        .select("h2 > span > span")?
        .into_iter()
        .find(|span| span.text() == "Hot Updates")
        .and_then(|span| span.closest("section"))
        .ok_or_else(|| Error::extraction("Hot Updates section not found"))?;

    let articles = section.select("article")?;
    let mut items = Vec::new();

    for pair in articles.chunks(2) {
        let [chapter, series] = pair else { continue };

        let title = chapter.text_of("a > div:nth-of-type(2) > div")?;
        let image = chapter.attr_of("a > div > picture > img", "src")?;
        let url = series.attr_of("a", "href")?;

        let (Some(image), Some(url)) = (image, url) else {
            debug!("Skipping hot update without image or link");
            continue;
        };
        let id = series_id_from_url(url);
        if title.is_empty() || id.is_empty() {
            debug!(url, "Skipping hot update without title or id");
            continue;
        }

        items.push(MangaEntry::new(id, title, image));
    }

    debug!(count = items.len(), "Parsed hot updates");
    Ok(Section {
        id: HOT_UPDATES.to_string(),
        title: "Hot Updates".to_string(),
        items,
        section_type: SectionType::SingleRowLarge,
        contains_more_items: false,
    })
}

pub fn parse_latest_updates(html: &str) -> Result<Section> {
    let doc = Document::parse(html);
    let mut items = Vec::new();

    for article in doc.select("article")? {
        let links = article.select("a")?;
        let url = links.first().and_then(|a| a.attr("href"));
        let image = article.attr_of("a picture > img", "src")?;
        let title = match links.get(1) {
            Some(a) => a.text_of(".font-semibold")?,
            None => String::new(),
        };

        let (Some(url), Some(image)) = (url, image) else {
            warn!("Skipping latest update without link or image");
            continue;
        };
        if title.is_empty() {
            warn!(url, "Skipping latest update without title");
            continue;
        }
        let id = series_id_from_url(url);
        if id.is_empty() {
            warn!(url, "Skipping latest update with unrecognised link");
            continue;
        }

        items.push(MangaEntry::new(id, title, image));
    }

    debug!(count = items.len(), "Parsed latest updates");
    Ok(Section {
        id: LATEST_UPDATES.to_string(),
        title: "Latest Updates".to_string(),
        items,
        section_type: SectionType::SingleRowNormal,
        contains_more_items: true,
    })
}

pub fn parse_manga_details(html: &str) -> Result<Manga> {
    let doc = Document::parse(html);

    let title = doc.expect("h1.text-2xl")?.text();
    if title.is_empty() {
        return Err(Error::extraction("series title is empty"));
    }

    let image = doc
        .first("picture > source")?
        .and_then(|s| s.attr("srcset"))
        .unwrap_or_default()
        .to_string();

    let description = doc
        .select("ul > li > strong")?
        .into_iter()
        .find(|strong| strong.text() == "Description")
        .and_then(|strong| strong.next_element_sibling())
        .filter(|p| p.name() == "p")
        .map(|p| p.text())
        .unwrap_or_default();

    let mut manga = Manga {
        title,
        description,
        image,
        ..Default::default()
    };

    for item in doc.select("li")? {
        let label = item.text_of("strong")?;
        let links = || -> Result<Vec<String>> {
            Ok(item
                .select("a")?
                .into_iter()
                .map(|a| a.text())
                .filter(|t| !t.is_empty())
                .collect())
        };

        if label.starts_with("Author(s)") {
            manga.authors = links()?;
        } else if label.starts_with("Tags(s)") || label.starts_with("Tag(s)") {
            manga.tags = links()?.into_iter().map(Tag::from_label).collect();
        } else if label.starts_with("Status") {
            manga.status = status_from_str(&item.text_of("a")?);
        }
    }

    Ok(manga)
}

pub fn parse_chapter_list(html: &str) -> Result<Vec<ChapterEntry>> {
    let doc = Document::parse(html);
    let mut chapters = Vec::new();

    for item in doc.select(r#"div[x-data*="checkNewChapter"]"#)? {
        let id = item
            .attr_of("a", "href")?
            .map(chapter_id_from_url)
            .unwrap_or_default();
        if id.is_empty() {
            debug!("Skipping chapter row without id");
            continue;
        }

        let title = item.text_of("a > span:nth-of-type(2) > span")?;
        let timestamp = match item.first("time")? {
            Some(time) => time
                .attr("datetime")
                .map(str::to_string)
                .or_else(|| Some(time.text()))
                .filter(|t| !t.is_empty()),
            None => None,
        };

        chapters.push(ChapterEntry {
            id,
            title,
            timestamp,
        });
    }

    debug!(count = chapters.len(), "Parsed chapter list");
    Ok(chapters)
}

pub fn parse_chapter_pages(html: &str) -> Result<Vec<String>> {
    let doc = Document::parse(html);
    Ok(doc
        .select("img")?
        .into_iter()
        .filter_map(|img| img.attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect())
}

/// Title and ordering number from the reader page header.
pub fn parse_chapter_details(html: &str) -> Result<(String, f64)> {
    let doc = Document::parse(html);

    let title = match doc.first("section#nav-top > div > div")? {
        Some(header) => match header.first("button")? {
            Some(button) => button.text_of("span")?,
            None => String::new(),
        },
        None => String::new(),
    };

    if title.is_empty() {
        warn!("Could not find chapter title in reader header");
    }

    let number = chapter_number(&title);
    Ok((title, number))
}

/// Usable entries plus the number of result cards on the page, skipped
/// ones included. Pagination is decided on the card count.
pub fn parse_search_results(html: &str) -> Result<(Vec<MangaEntry>, usize)> {
    let doc = Document::parse(html);
    let articles = doc.select("article")?;
    let mut entries = Vec::new();

    for article in &articles {
        let title = article.text_of("a.line-clamp-1.link-hover")?;
        let id = article
            .attr_of("a", "href")?
            .map(series_id_from_url)
            .unwrap_or_default();
        let image = article
            .attr_of("picture source:first-of-type", "srcset")?
            .unwrap_or_default();

        if title.is_empty() || id.is_empty() || image.is_empty() {
            debug!(id = %id, "Skipping incomplete search result");
            continue;
        }

        entries.push(MangaEntry::new(id, title, image));
    }

    debug!(count = entries.len(), cards = articles.len(), "Parsed search results");
    Ok((entries, articles.len()))
}

pub fn parse_tags(html: &str) -> Result<Vec<Tag>> {
    let doc = Document::parse(html);

    let content = doc
        .select("div.collapse-title")?
        .into_iter()
        .find(|title| title.text() == "Tags")
        .and_then(|title| title.next_element_sibling())
        .filter(|next| {
            next.attr("class")
                .is_some_and(|class| class.split_whitespace().any(|c| c == "collapse-content"))
        })
        .ok_or_else(|| Error::extraction("Tags filter panel not found"))?;

    Ok(content
        .select("label > span")?
        .into_iter()
        .map(|span| span.text())
        .filter(|t| !t.is_empty())
        .map(Tag::from_label)
        .collect())
}
