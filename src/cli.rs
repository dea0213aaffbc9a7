//! Command-line interface definitions for Caste News.
//!
//! Global options tune where state lives and how hard the acquisition run
//! pushes on the network. Paths can also be supplied through environment
//! variables.

use crate::config::AggregatorConfig;
use crate::models::Source;
use crate::outputs::Format;
use crate::view::{DEFAULT_DAYS_BACK, MAX_DAYS_BACK};
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Command-line arguments for the Caste News aggregator.
///
/// # Examples
///
/// ```sh
/// # Last week's stories from every outlet
/// caste_news feed
///
/// # Only Scroll, last 3 days, bypassing the cache
/// caste_news feed --source scroll --days 3 --refresh
///
/// # Keep the second story from that view
/// caste_news saved add 1 --source scroll --days 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Saved-items file
    #[arg(long, env = "CASTE_NEWS_SAVED_PATH", default_value = crate::store::DEFAULT_SAVE_PATH, global = true)]
    pub saved_path: String,

    /// Feed cache file
    #[arg(long, env = "CASTE_NEWS_CACHE_PATH", default_value = crate::cache::DEFAULT_CACHE_PATH, global = true)]
    pub cache_path: String,

    /// Seconds an assembled feed stays fresh in the cache
    #[arg(long, default_value_t = 3600, global = true)]
    pub cache_ttl_secs: u64,

    /// Per-request network timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Time budget for a single source in seconds
    #[arg(long, default_value_t = 180, global = true)]
    pub adapter_timeout_secs: u64,

    /// Extra attempts for transient network failures
    #[arg(long, default_value_t = 1, global = true)]
    pub retries: usize,

    /// Sources acquired concurrently (defaults to one per source)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the aggregated feed
    Feed {
        #[command(flatten)]
        view: ViewArgs,

        /// Ignore the cache and fetch every source again
        #[arg(long)]
        refresh: bool,

        /// Print extracted article text under each card
        #[arg(long)]
        full: bool,

        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Manage saved stories
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SavedAction {
    /// List saved stories
    List {
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Save a story by its position in a feed view
    Add {
        feed_index: usize,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Remove a saved story by its position
    Remove {
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },
}

/// The same filter `feed` uses, so indices line up between commands.
#[derive(Args, Debug, Clone, Copy)]
pub struct ViewArgs {
    /// Only show one outlet (e.g. "scroll", "the-wire")
    #[arg(long)]
    pub source: Option<Source>,

    /// How many days back to show
    #[arg(long, default_value_t = DEFAULT_DAYS_BACK,
          value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS_BACK as i64))]
    pub days: u32,
}

impl Cli {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            request_timeout: Duration::from_secs(self.timeout_secs),
            adapter_timeout: Duration::from_secs(self.adapter_timeout_secs),
            retries: self.retries,
            max_workers: self.workers,
            ..AggregatorConfig::default()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "caste_news",
            "feed",
            "--source",
            "scroll",
            "--days",
            "3",
            "--refresh",
            "--format",
            "json",
        ]);

        match cli.command {
            Command::Feed {
                view,
                refresh,
                full,
                format,
            } => {
                assert_eq!(view.source, Some(Source::ScrollIn));
                assert_eq!(view.days, 3);
                assert!(refresh);
                assert!(!full);
                assert_eq!(format, Format::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["caste_news", "feed"]);
        assert_eq!(cli.cache_ttl(), Duration::from_secs(3600));
        let config = cli.aggregator_config();
        assert_eq!(config.adapter_timeout, Duration::from_secs(180));
        assert_eq!(config.retries, 1);
        assert_eq!(config.max_workers, None);
        match cli.command {
            Command::Feed { view, format, .. } => {
                assert_eq!(view.source, None);
                assert_eq!(view.days, DEFAULT_DAYS_BACK);
                assert_eq!(format, Format::Text);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_days_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["caste_news", "feed", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["caste_news", "feed", "--days", "31"]).is_err());
        assert!(Cli::try_parse_from(["caste_news", "feed", "--source", "bbc"]).is_err());
    }

    #[test]
    fn test_saved_subcommands() {
        let cli = Cli::parse_from(["caste_news", "saved", "remove", "-1"]);
        assert!(matches!(
            cli.command,
            Command::Saved {
                action: SavedAction::Remove { index: -1 }
            }
        ));

        let cli = Cli::parse_from([
            "caste_news",
            "--workers",
            "2",
            "saved",
            "add",
            "4",
            "--source",
            "the-wire",
        ]);
        assert_eq!(cli.workers, Some(2));
        match cli.command {
            Command::Saved {
                action: SavedAction::Add { feed_index, view },
            } => {
                assert_eq!(feed_index, 4);
                assert_eq!(view.source, Some(Source::TheWire));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
