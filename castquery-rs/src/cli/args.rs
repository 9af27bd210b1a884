//! CLI argument definitions using clap.

use crate::types::{SearchFilters, SearchInterval, SearchMode, SearchParams, SortType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "castquery")]
#[command(author, version, about = "Parse and run Farcaster cast search queries", long_about = None)]
pub struct Cli {
    /// Path to a config file (overrides the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Host serving /api/search (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a query into cleaned text and filters
    Parse(ParseArgs),

    /// Check query syntax
    Validate(ValidateArgs),

    /// Show the search operator reference
    #[command(name = "help-operators")]
    HelpOperators,

    /// Print the exact search URL a query would request (no network)
    Url(SearchArgs),

    /// Print the Postgres text-match condition for a term
    Sql(SqlArgs),

    /// Run a search
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Raw search query
    pub query: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Raw search query
    pub query: String,

    /// Also reject dates that are not real calendar days
    #[arg(long)]
    pub calendar_dates: bool,
}

#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Plain search term
    pub term: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Raw search query (may contain operators)
    pub query: String,

    /// Number of results (defaults to config)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Result offset
    #[arg(long)]
    pub offset: Option<u32>,

    /// FID of the viewing account (needed to resolve from:username)
    #[arg(long)]
    pub viewer_fid: Option<u64>,

    /// Matching mode
    #[arg(long, value_enum)]
    pub mode: Option<SearchMode>,

    /// Result ordering
    #[arg(long = "sort", value_enum)]
    pub sort_type: Option<SortType>,

    /// Lookback window
    #[arg(long, value_enum)]
    pub interval: Option<SearchInterval>,

    /// Restrict to an author FID (skips from:username lookup)
    #[arg(long)]
    pub author_fid: Option<u64>,

    /// Restrict to a channel id
    #[arg(long)]
    pub channel: Option<String>,

    /// Restrict to a parent URL
    #[arg(long)]
    pub parent: Option<String>,

    /// Fetch full cast bodies for the hits
    #[arg(long)]
    pub casts: bool,
}

impl SearchArgs {
    pub fn to_params(&self, default_limit: u32) -> SearchParams {
        let filters = SearchFilters {
            interval: self.interval,
            ..SearchFilters::default()
        };

        SearchParams {
            search_term: self.query.clone(),
            filters: Some(filters),
            limit: Some(self.limit.unwrap_or(default_limit)),
            offset: self.offset,
            viewer_fid: self.viewer_fid,
            q: None,
            mode: self.mode,
            sort_type: self.sort_type,
            author_fid: self.author_fid,
            parent_url: self.parent.clone(),
            channel_id: self.channel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_to_params() {
        let cli = Cli::parse_from([
            "castquery",
            "search",
            "cats from:alice",
            "--viewer-fid",
            "194",
            "--interval",
            "30d",
            "--sort",
            "algorithmic",
        ]);
        let Commands::Search(args) = cli.command else {
            panic!("Expected search command");
        };

        let params = args.to_params(10);
        assert_eq!(params.search_term, "cats from:alice");
        assert_eq!(params.limit, Some(10));
        assert_eq!(params.viewer_fid, Some(194));
        assert_eq!(params.sort_type, Some(SortType::Algorithmic));
        assert_eq!(
            params.filters.and_then(|f| f.interval),
            Some(SearchInterval::Month)
        );
    }

    #[test]
    fn test_output_format_flags() {
        let cli = Cli::parse_from(["castquery", "--yaml", "parse", "x"]);
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        let cli = Cli::parse_from(["castquery", "parse", "x"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }
}
