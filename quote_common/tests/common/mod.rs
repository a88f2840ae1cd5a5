//! Shared helpers for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use quote_common::{Quote, QuoteGenerator};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Fixed "now" so generated dates are reproducible.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 30, 0).unwrap()
}

/// Seeded RNG.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `count` quotes generated with the default ranges from `seed`.
pub fn sample_quotes(count: usize, seed: u64) -> Vec<Quote> {
    QuoteGenerator::default().generate(count, &mut rng(seed), fixed_now())
}
