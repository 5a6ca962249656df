//! Shared test harness modules for the Homestay CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "fixture catalogs have a known length"
)]

use super::*;

mod catalog_unit;
mod command_steps;
mod helpers;
mod unit;
