//! Command-line interface for the Homestay recommendation engine.
//!
//! The binary is a thin adapter: it loads a JSON catalog, coerces each
//! record into a validated [`CatalogItem`](homestay_core::CatalogItem), runs
//! one engine operation, and prints the result as JSON.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod catalog;
mod error;
mod output;
mod predict;
mod recommend;
mod similar;

pub use error::CliError;

use predict::{PredictPriceArgs, run_predict_price};
use recommend::{RecommendArgs, run_recommend};
use similar::{SimilarArgs, run_similar};

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_ITEM: &str = "item";
pub(crate) const ARG_HISTORY: &str = "history";
pub(crate) const ARG_KIND: &str = "kind";
pub(crate) const ARG_CITY: &str = "city";
pub(crate) const ARG_BEDROOMS: &str = "bedrooms";
pub(crate) const ARG_GUESTS: &str = "guests";
pub(crate) const ENV_SIMILAR_CATALOG: &str = "HOMESTAY_CMDS_SIMILAR_CATALOG";
pub(crate) const ENV_SIMILAR_ITEM: &str = "HOMESTAY_CMDS_SIMILAR_ITEM";
pub(crate) const ENV_RECOMMEND_CATALOG: &str = "HOMESTAY_CMDS_RECOMMEND_CATALOG";
pub(crate) const ENV_PREDICT_CATALOG: &str = "HOMESTAY_CMDS_PREDICT_PRICE_CATALOG";
pub(crate) const ENV_PREDICT_KIND: &str = "HOMESTAY_CMDS_PREDICT_PRICE_KIND";
pub(crate) const ENV_PREDICT_CITY: &str = "HOMESTAY_CMDS_PREDICT_PRICE_CITY";
pub(crate) const ENV_PREDICT_BEDROOMS: &str = "HOMESTAY_CMDS_PREDICT_PRICE_BEDROOMS";
pub(crate) const ENV_PREDICT_GUESTS: &str = "HOMESTAY_CMDS_PREDICT_PRICE_GUESTS";

/// Run the Homestay CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// catalog cannot be loaded, or the response cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Similar(args) => run_similar(args, writer),
        Command::Recommend(args) => run_recommend(args, writer),
        Command::PredictPrice(args) => run_predict_price(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "homestay",
    about = "Similarity search, recommendations and price suggestions for homestay catalogs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Find listings similar to a given listing.
    Similar(SimilarArgs),
    /// Recommend listings from a guest's booking history.
    Recommend(RecommendArgs),
    /// Suggest a price for a new listing.
    PredictPrice(PredictPriceArgs),
}

#[cfg(test)]
mod tests;
