use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::document::{Document, Node};
use crate::error::{Error, Result};
use crate::models::{Manga, MangaEntry, Section, SectionType, Status, Tag};
use crate::sources::util::capture_id;

pub const POPULAR_UPDATES: &str = "popular-updates";
pub const LATEST_RELEASES: &str = "latest-releases";

static SERIES_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:series|title)/(\d+)").unwrap());

pub fn series_id_from_url(url: &str) -> String {
    capture_id(&SERIES_ID, url)
}

pub fn status_from_str(status: &str) -> Status {
    match status.trim().to_lowercase().as_str() {
        "ongoing" => Status::Ongoing,
        "completed" => Status::Completed,
        "hiatus" => Status::Hiatus,
        "cancelled" => Status::Cancelled,
        _ => Status::Unknown,
    }
}

fn entry(item: &Node<'_>, link_css: &str) -> Result<Option<MangaEntry>> {
    let id = item
        .attr_of(link_css, "href")?
        .map(series_id_from_url)
        .unwrap_or_default();
    let title = item.text_of("a.item-title")?;
    let image = item.attr_of("img", "src")?.unwrap_or_default();

    let entry = MangaEntry::new(id, title, image);
    if !entry.is_usable() || entry.title.is_empty() {
        debug!(title = %entry.title, "Skipping listing without id or title");
        return Ok(None);
    }
    Ok(Some(entry))
}

pub fn parse_popular_updates(doc: &Document) -> Result<Section> {
    let mut items = Vec::new();
    for section in doc.select("div.home-popular")? {
        for item in section.select("div.col")? {
            items.extend(entry(&item, "a.item-cover")?);
        }
    }

    debug!(count = items.len(), "Parsed popular updates");
    Ok(Section {
        id: POPULAR_UPDATES.to_string(),
        title: "Popular Updates".to_string(),
        items,
        section_type: SectionType::SingleRowLarge,
        contains_more_items: false,
    })
}

pub fn parse_latest_releases(doc: &Document) -> Result<Section> {
    let mut items = Vec::new();
    for item in doc.select("div.line-b")? {
        items.extend(entry(&item, "a")?);
    }

    debug!(count = items.len(), "Parsed latest releases");
    Ok(Section {
        id: LATEST_RELEASES.to_string(),
        title: "Latest Releases".to_string(),
        items,
        section_type: SectionType::SingleRowNormal,
        contains_more_items: false,
    })
}

pub fn parse_homepage(html: &str) -> Result<Vec<Section>> {
    let doc = Document::parse(html);
    if doc.first("div.home-popular")?.is_none() && doc.first("div.line-b")?.is_none() {
        return Err(Error::extraction("front page listings not found"));
    }
    Ok(vec![parse_popular_updates(&doc)?, parse_latest_releases(&doc)?])
}

pub fn parse_manga_details(html: &str) -> Result<Manga> {
    let doc = Document::parse(html);

    let title = doc.expect("h3.item-title > a")?.text();
    let mut manga = Manga {
        title,
        description: doc.root().text_of("div.limit-html")?,
        image: doc
            .root()
            .attr_of("div.attr-cover > img", "src")?
            .unwrap_or_default()
            .to_string(),
        ..Default::default()
    };

    for item in doc.select(".attr-item")? {
        let label = item.text_of("b.text-muted")?;
        let Some(content) = item.first("span")? else {
            continue;
        };

        let link_texts = || -> Result<Vec<String>> {
            Ok(content
                .select("a")?
                .into_iter()
                .map(|a| a.text())
                .filter(|t| !t.is_empty())
                .collect())
        };

        match label.as_str() {
            "Authors:" => manga.authors = link_texts()?,
            "Artists:" => manga.artists = link_texts()?,
            "Genres:" => {
                manga.tags = content
                    .select("span, u")?
                    .into_iter()
                    .map(|g| g.text())
                    .filter(|t| !t.is_empty() && t != ",")
                    .map(Tag::from_label)
                    .collect();
            }
            "Upload Status:" => manga.status = status_from_str(&content.text()),
            _ => {}
        }
    }

    Ok(manga)
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const HOME: &str = r#"
        <html><body>
        <div class="home-popular">
          <div class="col">
            <a class="item-cover" href="/series/81514/omniscient-reader"><img src="https://xfs-n.bato.to/thumb/81514.jpg"></a>
            <a class="item-title" href="/series/81514/omniscient-reader">Omniscient Reader</a>
          </div>
          <div class="col">
            <a class="item-cover" href="/login"><img src="https://xfs-n.bato.to/thumb/none.jpg"></a>
            <a class="item-title" href="/login">Sign in</a>
          </div>
        </div>
        <div id="series-list">
          <div class="line-b">
            <a href="/series/72315/the-beginning-after-the-end"><img src="https://xfs-n.bato.to/thumb/72315.jpg"></a>
            <a class="item-title" href="/series/72315/the-beginning-after-the-end">The Beginning After the End</a>
          </div>
          <div class="line-b">
            <a href="/title/110100-en-nano-machine"><img src="https://xfs-n.bato.to/thumb/110100.jpg"></a>
            <a class="item-title" href="/title/110100-en-nano-machine">Nano Machine</a>
          </div>
        </div>
        </body></html>
    "#;

    pub const SERIES: &str = r#"
        <html><body>
          <h3 class="item-title"><a href="/series/81514">Omniscient Reader</a></h3>
          <div class="attr-cover"><img src="https://xfs-n.bato.to/cover/81514.jpg"></div>
          <div class="attr-item"><b class="text-muted">Authors:</b><span><a>Sing-Shong</a>, <a>UMI</a></span></div>
          <div class="attr-item"><b class="text-muted">Artists:</b><span><a>Sleepy-C</a></span></div>
          <div class="attr-item"><b class="text-muted">Genres:</b><span><span>Action</span><span>,</span><u>Fantasy</u></span></div>
          <div class="attr-item"><b class="text-muted">Upload Status:</b><span>Ongoing</span></div>
          <div class="limit-html">Dokja was an average office worker.</div>
        </body></html>
    "#;
}
