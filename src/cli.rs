// CLI module for argument parsing and configuration

use crate::domain::{DiscoveryOptions, SortBy, SwipeConfig};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// How many photos a load picks when no --limit is given
pub const DEFAULT_PICK_LIMIT: usize = 50;

/// pswp - swipe through your photos in the terminal
///
/// Drag a photo right to keep it or left to mark it for deletion.
/// Nothing is ever deleted: marked photos are listed at the end.
#[derive(Parser, Debug, Clone)]
#[command(name = "pswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Photo folder to review
    ///
    /// If not specified, defaults to the current directory.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Start straight away with the built-in demo photos
    #[arg(long = "demo", action = ArgAction::SetTrue)]
    pub demo: bool,

    /// Maximum number of photos picked per load
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_PICK_LIMIT)]
    pub limit: usize,

    /// Sort photos by specified criteria
    #[arg(short = 's', long = "sort", value_enum, default_value = "date")]
    pub sort_by: SortOrder,

    /// Reverse sort order
    #[arg(short = 'r', long = "reverse", action = ArgAction::SetTrue)]
    pub reverse: bool,

    /// Include hidden files (files starting with .)
    #[arg(long = "hidden", action = ArgAction::SetTrue)]
    pub show_hidden: bool,

    /// Columns a card must be dragged before a release commits
    #[arg(long = "threshold", default_value_t = SwipeConfig::DEFAULT_COMMIT_THRESHOLD)]
    pub threshold: f32,

    /// Never ring the terminal bell
    #[arg(long = "no-bell", action = ArgAction::SetTrue)]
    pub no_bell: bool,

    /// Show the welcome screen even if it was seen before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,

    /// Log at debug level
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Write logs here instead of the cache directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Sort order options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SortOrder {
    /// Sort by modification date (oldest first)
    #[default]
    Date,
    /// Sort by file name (alphabetical)
    Name,
    /// Sort by file size (smallest first)
    Size,
}

impl From<SortOrder> for SortBy {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Date => SortBy::Date,
            SortOrder::Name => SortBy::Name,
            SortOrder::Size => SortBy::Size,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        // The folder only matters when the user can pick "Load My Photos"
        if !self.demo {
            if !self.directory.exists() {
                return Err(format!(
                    "Directory does not exist: {}",
                    self.directory.display()
                ));
            }

            if !self.directory.is_dir() {
                return Err(format!(
                    "Path is not a directory: {}",
                    self.directory.display()
                ));
            }
        }

        if self.limit == 0 {
            return Err("limit must be at least 1".to_string());
        }

        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(format!(
                "Invalid threshold: {}. Use a positive number of columns",
                self.threshold
            ));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub demo: bool,
    pub limit: usize,
    pub sort_by: SortOrder,
    pub reverse: bool,
    pub show_hidden: bool,
    pub threshold: f32,
    pub bell: bool,
    pub show_welcome: bool,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Options handed to the photo library on every load
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            show_hidden: self.show_hidden,
            sort_by: self.sort_by.into(),
            reverse: self.reverse,
            limit: Some(self.limit),
        }
    }

    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig::with_threshold(self.threshold)
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            directory: args.directory,
            demo: args.demo,
            limit: args.limit,
            sort_by: args.sort_by,
            reverse: args.reverse,
            show_hidden: args.show_hidden,
            threshold: args.threshold,
            bell: !args.no_bell,
            show_welcome: args.show_welcome,
            verbose: args.verbose,
            log_file: args.log_file,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            directory: PathBuf::from("."),
            demo: false,
            limit: DEFAULT_PICK_LIMIT,
            sort_by: SortOrder::Date,
            reverse: false,
            show_hidden: false,
            threshold: SwipeConfig::DEFAULT_COMMIT_THRESHOLD,
            bell: true,
            show_welcome: false,
            verbose: false,
            log_file: None,
        }
    }
}
