//! JSON responses and where they are written.

use std::io::Write;

use camino::Utf8Path;
use homestay_core::CatalogItem;
use homestay_scorer::{PriceEstimate, ScoredCandidate};
use serde::Serialize;

use crate::CliError;

/// How a ranking was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Strategy {
    /// Item-to-item similarity against a reference.
    Similar,
    /// Profile match against a guest's history.
    Personalised,
    /// `rating × review_count`, used when there is no history.
    Popular,
}

/// One ranked listing.
#[derive(Debug, Serialize)]
pub(crate) struct RankedEntry<'a> {
    pub(crate) score: f64,
    pub(crate) item: &'a CatalogItem,
}

/// Response of the `similar` and `recommend` commands.
#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse<'a> {
    pub(crate) strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reference: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) history: Vec<u64>,
    pub(crate) results: Vec<RankedEntry<'a>>,
}

impl<'a> RankingResponse<'a> {
    pub(crate) fn similar(reference: u64, ranked: &[ScoredCandidate<'a>]) -> Self {
        Self {
            strategy: Strategy::Similar,
            reference: Some(reference),
            history: Vec::new(),
            results: entries(ranked),
        }
    }

    pub(crate) fn personalised(history: &[u64], ranked: &[ScoredCandidate<'a>]) -> Self {
        Self {
            strategy: Strategy::Personalised,
            reference: None,
            history: history.to_vec(),
            results: entries(ranked),
        }
    }

    pub(crate) fn popular(ranked: &[ScoredCandidate<'a>]) -> Self {
        Self {
            strategy: Strategy::Popular,
            reference: None,
            history: Vec::new(),
            results: entries(ranked),
        }
    }
}

fn entries<'a>(ranked: &[ScoredCandidate<'a>]) -> Vec<RankedEntry<'a>> {
    ranked
        .iter()
        .map(|candidate| RankedEntry {
            score: candidate.score,
            item: candidate.item,
        })
        .collect()
}

/// Source of a suggested price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PriceBasis {
    /// Derived from comparable listings.
    Comparables,
    /// The draft's own price or the configured default.
    Fallback,
}

/// Response of the `predict-price` command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PriceResponse {
    pub(crate) price: f64,
    pub(crate) basis: PriceBasis,
    pub(crate) comparables: usize,
}

impl From<PriceEstimate> for PriceResponse {
    fn from(estimate: PriceEstimate) -> Self {
        match estimate {
            PriceEstimate::Comparable { price, comparables } => Self {
                price,
                basis: PriceBasis::Comparables,
                comparables,
            },
            PriceEstimate::Fallback { price } => Self {
                price,
                basis: PriceBasis::Fallback,
                comparables: 0,
            },
        }
    }
}

/// Serialise `response` as pretty JSON to `output`, or to `writer` when no
/// path is given.
pub(crate) fn emit<T: Serialize>(
    response: &T,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    payload.push('\n');
    match output {
        Some(path) => homestay_fs::write_bytes(path, payload.as_bytes()).map_err(|source| {
            CliError::WriteOutput {
                target: path.to_string(),
                source,
            }
        }),
        None => writer
            .write_all(payload.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| CliError::WriteOutput {
                target: "stdout".to_owned(),
                source,
            }),
    }
}
