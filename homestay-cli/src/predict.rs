//! `predict-price` command: price suggestion for a listing draft.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use homestay_core::ListingDraft;
use homestay_scorer::Recommender;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_BEDROOMS, ARG_CATALOG, ARG_CITY, ARG_GUESTS, ARG_KIND, CliError, ENV_PREDICT_BEDROOMS,
    ENV_PREDICT_CATALOG, ENV_PREDICT_CITY, ENV_PREDICT_GUESTS, ENV_PREDICT_KIND,
    catalog::{load_catalog, require_existing},
    output::{PriceResponse, emit},
};

/// CLI arguments for the `predict-price` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Suggest a nightly price for a listing from comparable \
                 listings of the same category in the same city. Without \
                 comparables the stated price, or a fixed default, is \
                 returned unchanged.",
    about = "Suggest a price for a new listing"
)]
#[ortho_config(prefix = "HOMESTAY")]
pub(crate) struct PredictPriceArgs {
    /// Path to a JSON catalog.
    #[arg(value_name = "catalog")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Property category, for example `VILLA`.
    #[arg(long = ARG_KIND, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<String>,
    /// City the listing is in.
    #[arg(long = ARG_CITY, value_name = "city")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Number of bedrooms.
    #[arg(long = ARG_BEDROOMS, value_name = "count")]
    #[serde(default)]
    pub(crate) bedrooms: Option<u32>,
    /// Maximum number of guests.
    #[arg(long = ARG_GUESTS, value_name = "count")]
    #[serde(default)]
    pub(crate) guests: Option<u32>,
    /// Expected rating between 0 and 5.
    #[arg(long, value_name = "rating")]
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    /// Price to keep when no comparable listings exist.
    #[arg(long, value_name = "price")]
    #[serde(default)]
    pub(crate) price: Option<f64>,
    /// Write the response here instead of standard output.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PredictPriceArgs {
    pub(crate) fn into_config(self) -> Result<PredictPriceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PredictPriceConfig::try_from(merged)
    }
}

/// Resolved `predict-price` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PredictPriceConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) draft: ListingDraft,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PredictPriceArgs> for PredictPriceConfig {
    type Error = CliError;

    fn try_from(args: PredictPriceArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_PREDICT_CATALOG,
        })?;
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_PREDICT_KIND,
        })?;
        let city = args.city.ok_or(CliError::MissingArgument {
            field: ARG_CITY,
            env: ENV_PREDICT_CITY,
        })?;
        let bedrooms = args.bedrooms.ok_or(CliError::MissingArgument {
            field: ARG_BEDROOMS,
            env: ENV_PREDICT_BEDROOMS,
        })?;
        let guests = args.guests.ok_or(CliError::MissingArgument {
            field: ARG_GUESTS,
            env: ENV_PREDICT_GUESTS,
        })?;
        let mut draft = ListingDraft::new(kind, city, bedrooms, guests);
        draft.rating = args.rating;
        draft.price = args.price;
        Ok(Self {
            catalog,
            draft,
            output: args.output,
        })
    }
}

pub(crate) fn run_predict_price(
    args: PredictPriceArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_predict_price(&config, writer)
}

pub(crate) fn execute_predict_price(
    config: &PredictPriceConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.catalog, ARG_CATALOG)?;
    let catalog = load_catalog(&config.catalog)?;
    let estimate = Recommender::default().estimate_price(&config.draft, &catalog);
    emit(
        &PriceResponse::from(estimate),
        config.output.as_deref(),
        writer,
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PredictPriceConfig, CliError> {
    let merged = PredictPriceArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PredictPriceConfig::try_from(merged)
}
