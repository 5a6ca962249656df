//! `similar` command: nearest neighbours of one catalog item.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use homestay_scorer::{DEFAULT_SIMILAR_LIMIT, RankingLimits, Recommender};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATALOG, ARG_ITEM, CliError, ENV_SIMILAR_CATALOG, ENV_SIMILAR_ITEM,
    catalog::{find_item, load_catalog, require_existing},
    output::{RankingResponse, emit},
};

/// CLI arguments for the `similar` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank catalog items by similarity to a reference item. \
                 The reference itself is never returned. Paths and limits \
                 can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Find listings similar to a given listing"
)]
#[ortho_config(prefix = "HOMESTAY")]
pub(crate) struct SimilarArgs {
    /// Path to a JSON catalog.
    #[arg(value_name = "catalog")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Identifier of the reference item.
    #[arg(long = ARG_ITEM, value_name = "id")]
    #[serde(default)]
    pub(crate) item: Option<u64>,
    /// Maximum number of results.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Write the response here instead of standard output.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SimilarArgs {
    pub(crate) fn into_config(self) -> Result<SimilarConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimilarConfig::try_from(merged)
    }
}

/// Resolved `similar` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimilarConfig {
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) item: u64,
    pub(crate) limit: usize,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<SimilarArgs> for SimilarConfig {
    type Error = CliError;

    fn try_from(args: SimilarArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_SIMILAR_CATALOG,
        })?;
        let item = args.item.ok_or(CliError::MissingArgument {
            field: ARG_ITEM,
            env: ENV_SIMILAR_ITEM,
        })?;
        Ok(Self {
            catalog,
            item,
            limit: args.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT),
            output: args.output,
        })
    }
}

pub(crate) fn run_similar(args: SimilarArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_similar(&config, writer)
}

pub(crate) fn execute_similar(
    config: &SimilarConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.catalog, ARG_CATALOG)?;
    let catalog = load_catalog(&config.catalog)?;
    let reference = find_item(&catalog, config.item, ARG_ITEM)?;
    let recommender = Recommender::default().with_limits(RankingLimits {
        similar: config.limit,
        ..RankingLimits::default()
    });
    let ranked = recommender.similar_scored(reference, &catalog);
    let response = RankingResponse::similar(reference.id, &ranked);
    emit(&response, config.output.as_deref(), writer)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SimilarConfig, CliError> {
    let merged = SimilarArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SimilarConfig::try_from(merged)
}
