//! Command-line surface.

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "go2web", version = env!("CARGO_PKG_VERSION"), about = "go2web - HTTP client", long_about = None)]
pub struct Args {
    /// URL to fetch
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Search term
    #[arg(short = 's', long = "search", value_name = "WORDS", num_args = 1..)]
    pub search: Option<Vec<String>>,

    /// Ask for application/json instead of text/html
    #[arg(long)]
    pub json: bool,

    /// Skip the on-disk cache for this run
    #[arg(long)]
    pub no_cache: bool,

    /// Delete every cached response and exit
    #[arg(long)]
    pub clear_cache: bool,
}

impl Args {
    /// True when no action flag was given.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.search.is_none() && !self.clear_cache
    }
}
