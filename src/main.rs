// Module declarations
mod cli;
mod error;
mod layers;
mod listing;
mod loader;
mod roster;
mod toggle;
mod types;
mod util;

// Re-export all module items at crate root so cross-module references work
// through a single namespace.
#[allow(unused_imports)]
pub(crate) use cli::*;
#[allow(unused_imports)]
pub(crate) use error::*;
#[allow(unused_imports)]
pub(crate) use layers::*;
#[allow(unused_imports)]
pub(crate) use listing::*;
#[allow(unused_imports)]
pub(crate) use loader::*;
#[allow(unused_imports)]
pub(crate) use roster::*;
#[allow(unused_imports)]
pub(crate) use toggle::*;
#[allow(unused_imports)]
pub(crate) use types::*;
#[allow(unused_imports)]
pub(crate) use util::*;

use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

async fn drain_listing<T: DeserializeOwned>(
    endpoint: &Url,
    service: &str,
    sort_key: &str,
    page_size: usize,
    label: &str,
) -> Result<Collection<T>, Box<dyn std::error::Error + Send + Sync>> {
    let client = HttpListingClient::for_service(endpoint, service)?;
    let mut directory: Directory<T> = Directory::new(sort_key);
    eprintln!("[listing] fetching {label} from {}", client.endpoint());
    directory.refresh(&client, page_size).await?;
    let collection = directory.collection();
    eprintln!(
        "[listing] loaded {} of {} {label}",
        collection.len(),
        collection.total
    );
    Ok(directory.into_collection())
}

async fn run_roster_command<T: DeserializeOwned + Serialize>(
    endpoint: &Url,
    service: &str,
    sort_key: &str,
    page_size: usize,
    search: Option<String>,
    json: bool,
    columns: &[&str],
    project: impl Fn(&T) -> RosterRow,
    label: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let collection = drain_listing::<T>(endpoint, service, sort_key, page_size, label).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    if collection.is_empty() {
        println!("{NO_DATA_FALLBACK}");
        return Ok(());
    }

    let rows: Vec<RosterRow> = collection.data.iter().map(project).collect();
    let rows = match search {
        Some(needle) => filter_rows(rows, &needle),
        None => rows,
    };
    if rows.is_empty() {
        println!("{NO_DATA_FALLBACK}");
    } else {
        println!("{}", render_table(columns, &rows));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ambassadors {
            endpoint,
            page_size,
            search,
            json,
        } => {
            run_roster_command::<Ambassador>(
                &endpoint,
                AMBASSADORS_SERVICE,
                AMBASSADOR_SORT_KEY,
                page_size,
                search,
                json,
                AMBASSADOR_COLUMNS,
                ambassador_row,
                "ambassadors",
            )
            .await
        }

        Command::Merchants {
            endpoint,
            page_size,
            search,
            json,
        } => {
            run_roster_command::<Merchant>(
                &endpoint,
                MERCHANTS_SERVICE,
                MERCHANT_SORT_KEY,
                page_size,
                search,
                json,
                MERCHANT_COLUMNS,
                merchant_row,
                "merchants",
            )
            .await
        }

        Command::Map {
            endpoint,
            page_size,
            no_ambassadors,
            no_merchants,
            open_ambassadors,
            open_merchants,
            json,
        } => {
            let mut layers = MapLayers::new(true, true);
            if no_ambassadors {
                layers.set_visible(LayerKind::Ambassadors, false);
            }
            if no_merchants {
                layers.set_visible(LayerKind::Merchants, false);
            }
            for index in open_ambassadors {
                layers.toggle_marker(LayerKind::Ambassadors, index);
            }
            for index in open_merchants {
                layers.toggle_marker(LayerKind::Merchants, index);
            }

            // A hidden layer is excluded outright, so its listing is not
            // even fetched.
            let amb_markers = if layers.is_visible(LayerKind::Ambassadors) {
                let collection = drain_listing::<Ambassador>(
                    &endpoint,
                    AMBASSADORS_SERVICE,
                    AMBASSADOR_SORT_KEY,
                    page_size,
                    "ambassadors",
                )
                .await?;
                ambassador_markers(&collection.data)
            } else {
                Vec::new()
            };

            let mer_markers = if layers.is_visible(LayerKind::Merchants) {
                let collection = drain_listing::<Merchant>(
                    &endpoint,
                    MERCHANTS_SERVICE,
                    MERCHANT_SORT_KEY,
                    page_size,
                    "merchants",
                )
                .await?;
                merchant_markers(&collection.data)
            } else {
                Vec::new()
            };

            let export = layers.export(&amb_markers, &mer_markers);
            if json {
                println!("{}", serde_json::to_string_pretty(&export)?);
            } else {
                for (name, layer) in [
                    ("ambassadors", &export.ambassadors),
                    ("merchants", &export.merchants),
                ] {
                    let state = if layer.visible { "visible" } else { "hidden" };
                    println!(
                        "{name}: {} markers, {} popups open ({state})",
                        layer.markers.len(),
                        layer.open_indices.len()
                    );
                }
            }
            Ok(())
        }

        Command::Preview {
            title,
            body,
            lat,
            lng,
        } => {
            let marker = preview_marker(&title, &body, lat, lng);
            println!("{}", serde_json::to_string_pretty(&marker)?);
            Ok(())
        }
    }
}
