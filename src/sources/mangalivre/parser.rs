use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::models::{Chapter, ChapterEntry, Manga, MangaEntry, Section, SectionType, Status, Tag};
use crate::sources::util::{capture_id, chapter_number, slugify, split_list, squash_whitespace};

pub const LOCALE: &str = "pt-BR";

static MANGA_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/manga/([^/?#]+)").unwrap());
static CHAPTER_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/capitulo/([^/?#]+)").unwrap());
static LEADING_SLASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\s*").unwrap());
static DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*").unwrap());

pub fn manga_id_from_url(url: &str) -> String {
    capture_id(&MANGA_ID, url)
}

pub fn chapter_id_from_url(url: &str) -> String {
    capture_id(&CHAPTER_ID, url)
}

pub fn status_from_str(status: &str) -> Status {
    match status.trim() {
        "Em Andamento" | "Em Lançamento" => Status::Ongoing,
        "Completo" => Status::Completed,
        "Hiato" => Status::Hiatus,
        _ => Status::Unknown,
    }
}

fn entry(card: &Node<'_>, title_css: &str, link_css: &str) -> Result<Option<MangaEntry>> {
    let title = card.text_of(title_css)?;
    let image = card.attr_of("img", "src")?.unwrap_or_default();
    let id = card.attr_of(link_css, "href")?.map(manga_id_from_url).unwrap_or_default();

    if id.is_empty() || title.is_empty() {
        debug!(title = %title, "Skipping card without id or title");
        return Ok(None);
    }
    Ok(Some(MangaEntry::new(id, title, image)))
}

fn shelf(id: &str, title: &str, items: Vec<MangaEntry>) -> Section {
    debug!(section = id, count = items.len(), "Parsed section");
    Section {
        id: id.to_string(),
        title: title.to_string(),
        items,
        section_type: SectionType::SingleRowNormal,
        contains_more_items: false,
    }
}

fn card_section(doc: &Document, section_css: &str) -> Result<Vec<MangaEntry>> {
    let mut items = Vec::new();
    for section in doc.select(section_css)? {
        for card in section.select("div > article.manga-card")? {
            items.extend(entry(&card, "h3", "a")?);
        }
    }
    Ok(items)
}

pub fn parse_popular_section(doc: &Document) -> Result<Section> {
    let mut items = Vec::new();
    for card in doc.select(".manga-carousel-item")? {
        items.extend(entry(&card, "h3.manga-title > a", "h3.manga-title > a")?);
    }
    Ok(shelf("popular-section", "Mangás Populares", items))
}

pub fn parse_featured_section(doc: &Document) -> Result<Section> {
    let items = card_section(doc, "section.featured-section")?;
    Ok(shelf("featured-section", "Mangás em Destaque", items))
}

pub fn parse_latest_updates(doc: &Document) -> Result<Section> {
    let items = card_section(doc, "section.latest-section")?;
    Ok(shelf("latest-updates-section", "Últimas Atualizações", items))
}

/// All homepage shelves from the single front page document.
pub fn parse_homepage(html: &str) -> Result<Vec<Section>> {
    let doc = Document::parse(html);
    let sections = vec![
        parse_popular_section(&doc)?,
        parse_featured_section(&doc)?,
        parse_latest_updates(&doc)?,
    ];

    if sections.iter().all(|s| s.items.is_empty()) {
        return Err(Error::extraction("no homepage sections found"));
    }
    Ok(sections)
}

pub fn parse_manga_details(html: &str) -> Result<Manga> {
    let doc = Document::parse(html);

    let title = doc.expect("h1.manga-title")?.text();
    let mut manga = Manga {
        title,
        description: doc.root().text_of("div.synopsis-content > p")?,
        image: doc.root().attr_of("img.manga-cover-image", "src")?.unwrap_or_default().to_string(),
        ..Default::default()
    };

    manga.tags = doc
        .select(".manga-tag")?
        .into_iter()
        .map(|t| t.text())
        .filter(|t| !t.is_empty())
        .map(|label| Tag::new(slugify(&label), label))
        .collect();

    for item in doc.select(".manga-meta-item")? {
        let label = item.text_of(".meta-label")?;
        let value = item.text_of(".meta-value")?;

        match label.as_str() {
            "Autor:" => manga.authors.extend(split_list(&value)),
            "Artista:" => manga.artists.extend(split_list(&value)),
            "Status:" => manga.status = status_from_str(&value),
            _ => {}
        }
    }

    Ok(manga)
}

pub fn parse_chapter_list(html: &str) -> Result<Vec<ChapterEntry>> {
    let doc = Document::parse(html);
    let mut chapters = Vec::new();

    for item in doc.select("li.chapter-item")? {
        let id = item
            .attr_of("a.chapter-link", "href")?
            .map(chapter_id_from_url)
            .unwrap_or_default();
        if id.is_empty() {
            debug!("Skipping chapter row without id");
            continue;
        }

        chapters.push(ChapterEntry {
            id,
            title: item.text_of("span.chapter-number")?,
            timestamp: None,
        });
    }

    debug!(count = chapters.len(), "Parsed chapter list");
    Ok(chapters)
}

pub fn parse_chapter_details(html: &str, chapter_id: &str) -> Result<Chapter> {
    let doc = Document::parse(html);

    let raw = doc.expect("h1.manga-title")?.text_excluding(&["a", "div"]);
    let title = LEADING_SLASH.replace(&raw, "");
    let title = DASH.replace(&title, " - ");
    let title = squash_whitespace(&title);

    let pages: Vec<String> = doc
        .select("img.chapter-image")?
        .into_iter()
        .filter_map(|img| img.attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Chapter {
        id: chapter_id.to_string(),
        number: chapter_number(&title),
        title,
        pages,
        locale: LOCALE.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_from_str("Em Andamento"), Status::Ongoing);
        assert_eq!(status_from_str("Em Lançamento"), Status::Ongoing);
        assert_eq!(status_from_str("Completo"), Status::Completed);
        assert_eq!(status_from_str("Hiato"), Status::Hiatus);
        assert_eq!(status_from_str("Cancelado"), Status::Unknown);
        assert_eq!(status_from_str("Complete"), Status::Unknown);
    }

    #[test]
    fn test_id_extraction() {
        assert_eq!(manga_id_from_url("https://mangalivre.blog/manga/one-piece/"), "one-piece");
        assert_eq!(chapter_id_from_url("https://mangalivre.blog/capitulo/one-piece-1100/"), "one-piece-1100");
        assert_eq!(manga_id_from_url("https://mangalivre.blog/"), "");
        assert_eq!(chapter_id_from_url(""), "");
    }

    #[test]
    fn test_homepage_sections() {
        let sections = parse_homepage(HOME).unwrap();
        let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["popular-section", "featured-section", "latest-updates-section"]);
        assert!(sections.iter().all(|s| !s.contains_more_items));

        assert_eq!(sections[0].items, vec![MangaEntry::new(
            "one-piece",
            "One Piece",
            "https://mangalivre.blog/covers/one-piece.jpg"
        )]);
        assert_eq!(sections[1].items[0].id, "berserk");
        let latest: Vec<_> = sections[2].items.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(latest, vec!["Vagabond", "Monster"]);
    }

    #[test]
    fn test_homepage_without_shelves_fails() {
        let err = parse_homepage("<html><body>Manutenção</body></html>").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Extraction);
    }

    #[test]
    fn test_manga_details() {
        let manga = parse_manga_details(MANGA).unwrap();
        assert_eq!(manga.title, "One Piece");
        assert_eq!(manga.image, "https://mangalivre.blog/covers/one-piece.jpg");
        assert_eq!(manga.description, "Monkey D. Luffy quer ser o Rei dos Piratas.");
        assert_eq!(manga.authors, vec!["Eiichiro Oda"]);
        assert_eq!(manga.artists, vec!["Eiichiro Oda", "Assistente"]);
        assert_eq!(manga.status, Status::Ongoing);
        assert_eq!(manga.tags, vec![
            Tag::new("ação", "Ação"),
            Tag::new("slice-of-life", "Slice of Life"),
        ]);
    }

    #[test]
    fn test_chapter_list() {
        let chapters = parse_chapter_list(MANGA).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].id, "one-piece-1099-5");
        assert_eq!(chapters[1].title, "Capítulo 1099.5");
        assert!(chapters.iter().all(|c| c.timestamp.is_none()));
    }

    #[test]
    fn test_chapter_details() {
        let chapter = parse_chapter_details(CHAPTER, "one-piece-1100").unwrap();
        assert_eq!(chapter.title, "Capítulo 1100 - O Fim");
        assert_eq!(chapter.number, 1100.0);
        assert_eq!(chapter.pages.len(), 2);
        assert_eq!(chapter.locale, "pt-BR");
        assert_eq!(chapter, parse_chapter_details(CHAPTER, "one-piece-1100").unwrap());
    }
}
