use clap::{Parser, Subcommand};
use url::Url;

use crate::DEFAULT_PAGE_SIZE;

#[derive(Parser)]
#[command(name = "georoster")]
#[command(about = "Paged directory client with layered map-marker export", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// List ambassadors from the directory service.
    Ambassadors {
        /// Base URL of the directory service
        #[arg(long)]
        endpoint: Url,
        /// Page size used while draining the listing
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Keep only rows whose searchable columns contain this text
        #[arg(long)]
        search: Option<String>,
        /// Output JSON (full collection)
        #[arg(long)]
        json: bool,
    },

    /// List merchants from the directory service.
    Merchants {
        /// Base URL of the directory service
        #[arg(long)]
        endpoint: Url,
        /// Page size used while draining the listing
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Keep only rows whose searchable columns contain this text
        #[arg(long)]
        search: Option<String>,
        /// Output JSON (full collection)
        #[arg(long)]
        json: bool,
    },

    /// Export layered map markers for an external renderer.
    Map {
        /// Base URL of the directory service
        #[arg(long)]
        endpoint: Url,
        /// Page size used while draining the listings
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// Leave the ambassador layer out of the export
        #[arg(long)]
        no_ambassadors: bool,
        /// Leave the merchant layer out of the export
        #[arg(long)]
        no_merchants: bool,
        /// Ambassador marker index to export with its popup open (repeatable)
        #[arg(long = "open-ambassador")]
        open_ambassadors: Vec<usize>,
        /// Merchant marker index to export with its popup open (repeatable)
        #[arg(long = "open-merchant")]
        open_merchants: Vec<usize>,
        /// Output JSON (default is a per-layer summary)
        #[arg(long)]
        json: bool,
    },

    /// Emit the single-marker preview behind a row's "show on map" action.
    Preview {
        /// Popup title, e.g. the ambassador's nickname
        #[arg(long)]
        title: String,
        /// Popup description, e.g. "City - Country"
        #[arg(long)]
        body: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
    },
}
