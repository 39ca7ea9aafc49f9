mod cli;

use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mounter::config::{self, Config};
use mounter::models::{SearchRequest, Tag};
use mounter::request::{HttpRequestManager, RequestManager};
use mounter::source::{Capability, Source, SourceRegistry};
use mounter::Result;

use crate::cli::{Cli, Commands};

fn setup_logging(level: &str) -> Result<()> {
    let data_dir = config::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    let file_appender = tracing_appender::rolling::daily(&data_dir, "mounter.log");

    let directive = format!("mounter={level}").parse().unwrap_or_else(|_| {
        eprintln!("Warning: invalid log level {level:?}, using info");
        "mounter=info".parse().unwrap()
    });

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Operations behind a `false` flag still run; the flag is only a promise.
fn check_advertised(source: &dyn Source, capability: Capability) {
    if !source.capabilities().supports(capability) {
        let id = &source.info().id;
        warn!(source = %id, ?capability, "Calling operation the source does not advertise");
        eprintln!("Warning: {id} does not advertise {capability:?} support");
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceListing<'a> {
    #[serde(flatten)]
    info: &'a mounter::models::SourceInfo,
    capabilities: &'a mounter::SourceCapabilities,
    metadata: &'a mounter::source::FieldsMetadata,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // stdout carries the JSON output, so logs go to a file
    if let Err(e) = setup_logging(&config.general.log_level) {
        eprintln!("Warning: Could not set up logging: {}", e);
    }

    let manager: Arc<dyn RequestManager> = Arc::new(HttpRequestManager::new(&config.http)?);
    let registry = SourceRegistry::with_sources(&config.sources.enabled, manager)?;
    info!(sources = registry.len(), "Loaded sources");

    match cli.command {
        Commands::Sources => {
            let listing: Vec<_> = registry
                .iter()
                .map(|s| SourceListing {
                    info: s.info(),
                    capabilities: s.capabilities(),
                    metadata: s.metadata(),
                })
                .collect();
            print_json(&listing)
        }
        Commands::Homepage(args) => {
            let source = registry.get(&args.source)?;
            check_advertised(source.as_ref(), Capability::Homepage);
            print_json(&source.get_homepage().await?)
        }
        Commands::Search(args) => {
            let source = registry.get(&args.source)?;
            check_advertised(source.as_ref(), Capability::Search);
            if args.offset.is_some() {
                check_advertised(source.as_ref(), Capability::Pagination);
            }

            let mut request = SearchRequest::new(args.query.unwrap_or_default());
            for id in args.include {
                request = request.include(Tag::new(id.clone(), id));
            }
            for id in args.exclude {
                request = request.exclude(Tag::new(id.clone(), id));
            }
            for (key, value) in args.params {
                request = request.parameter(key, value);
            }
            if let Some(offset) = args.offset {
                request = request.with_offset(offset);
            }

            print_json(&source.get_search_results(&request).await?)
        }
        Commands::ViewMore(args) => {
            let source = registry.get(&args.source)?;
            check_advertised(source.as_ref(), Capability::ViewMore);
            print_json(&source.get_view_more_items(&args.section, args.page).await?)
        }
        Commands::Details(args) => {
            let source = registry.get(&args.source)?;
            print_json(&source.get_manga_details(&args.manga_id).await?)
        }
        Commands::Chapters(args) => {
            let source = registry.get(&args.source)?;
            print_json(&source.get_chapters(&args.manga_id).await?)
        }
        Commands::Chapter(args) => {
            let source = registry.get(&args.source)?;
            print_json(&source.get_chapter_details(&args.manga_id, &args.chapter_id).await?)
        }
        Commands::Tags(args) => {
            let source = registry.get(&args.source)?;
            print_json(&source.get_search_tags().await?)
        }
    }
}
