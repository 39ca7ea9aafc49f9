use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mounter")]
#[command(about = "Browse manga catalog sites through one interface", long_about = None)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List enabled sources with their capabilities and search fields
    Sources,
    /// Show a source's homepage sections
    Homepage(SourceArgs),
    /// Search a source
    Search(SearchArgs),
    /// Continue a homepage section
    ViewMore(ViewMoreArgs),
    /// Show a title's details
    Details(MangaArgs),
    /// List a title's chapters
    Chapters(MangaArgs),
    /// Show a chapter's pages
    Chapter(ChapterArgs),
    /// List the tags a source can search by
    Tags(SourceArgs),
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Source id, e.g. weebcentral
    pub source: String,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    pub source: String,

    /// Title text to search for
    pub query: Option<String>,

    /// Tag id that results must have (repeatable)
    #[arg(long = "include", value_name = "TAG")]
    pub include: Vec<String>,

    /// Tag id that results must not have (repeatable)
    #[arg(long = "exclude", value_name = "TAG")]
    pub exclude: Vec<String>,

    /// Search field value (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(clap::Args, Debug)]
pub struct ViewMoreArgs {
    pub source: String,

    /// Section id from the homepage
    pub section: String,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[derive(clap::Args, Debug)]
pub struct MangaArgs {
    pub source: String,
    pub manga_id: String,
}

#[derive(clap::Args, Debug)]
pub struct ChapterArgs {
    pub source: String,
    pub manga_id: String,
    pub chapter_id: String,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("sort=Best Match").unwrap(),
            ("sort".to_string(), "Best Match".to_string())
        );
        assert_eq!(parse_param("q=a=b").unwrap().1, "a=b");
        assert!(parse_param("sort").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::try_parse_from([
            "mounter",
            "search",
            "weebcentral",
            "one piece",
            "--include",
            "1",
            "--include",
            "2",
            "--param",
            "order=Ascending",
            "--offset",
            "32",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query.as_deref(), Some("one piece"));
        assert_eq!(args.include, vec!["1", "2"]);
        assert_eq!(args.params, vec![("order".to_string(), "Ascending".to_string())]);
        assert_eq!(args.offset, Some(32));
    }

    #[test]
    fn test_view_more_page_starts_at_one() {
        assert!(Cli::try_parse_from(["mounter", "view-more", "weebcentral", "latest-updates", "--page", "0"]).is_err());

        let cli = Cli::try_parse_from(["mounter", "view-more", "weebcentral", "latest-updates"]).unwrap();
        let Commands::ViewMore(args) = cli.command else {
            panic!("expected view-more command");
        };
        assert_eq!(args.page, 1);
    }
}
