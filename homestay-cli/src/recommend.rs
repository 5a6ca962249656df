//! `recommend` command: personalised ranking from a booking history.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use homestay_core::CatalogItem;
use homestay_scorer::{DEFAULT_PERSONALISED_LIMIT, RankingLimits, Recommender};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATALOG, ARG_HISTORY, CliError, ENV_RECOMMEND_CATALOG,
    catalog::{find_item, load_catalog, require_existing},
    output::{RankingResponse, emit},
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank catalog items for a guest from the listings they \
                 have already booked or viewed. Without a history the most \
                 popular listings are returned.",
    about = "Recommend listings from a guest's history"
)]
#[ortho_config(prefix = "HOMESTAY")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON catalog.
    #[arg(value_name = "catalog")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Comma-separated identifiers of previously booked or viewed items.
    #[arg(long = ARG_HISTORY, value_name = "ids", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) history: Vec<u64>,
    /// Maximum number of results.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Write the response here instead of standard output.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) history: Vec<u64>,
    pub(crate) limit: usize,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_RECOMMEND_CATALOG,
        })?;
        Ok(Self {
            catalog,
            history: args.history,
            limit: args.limit.unwrap_or(DEFAULT_PERSONALISED_LIMIT),
            output: args.output,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_recommend(&config, writer)
}

pub(crate) fn execute_recommend(
    config: &RecommendConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.catalog, ARG_CATALOG)?;
    let catalog = load_catalog(&config.catalog)?;
    let history = config
        .history
        .iter()
        .map(|&id| find_item(&catalog, id, ARG_HISTORY).cloned())
        .collect::<Result<Vec<CatalogItem>, _>>()?;
    let recommender = Recommender::default().with_limits(RankingLimits {
        personalised: config.limit,
        ..RankingLimits::default()
    });
    let ranked = recommender.recommend_scored(&history, &catalog);
    let response = if history.is_empty() {
        RankingResponse::popular(&ranked)
    } else {
        RankingResponse::personalised(&config.history, &ranked)
    };
    emit(&response, config.output.as_deref(), writer)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
