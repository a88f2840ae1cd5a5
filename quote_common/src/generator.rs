//! Synthetic quote generation.
//!
//! `QuoteGenerator` fills a collection with random but range-bounded quotes: every field
//! is drawn independently and uniformly from its range or catalog, ids run `1..=count`
//! in order, and the overall rating is derived from the three component ratings.
//!
//! The randomness source and the reference "now" are parameters, so a seeded RNG and a
//! fixed instant reproduce the same collection. `generate_quotes` is the shortcut that
//! uses the thread RNG and the current time.

use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::Rng;

use crate::catalog::{Company, Service};
use crate::config::{
    CREATION_LAG_DAYS, DATE_WINDOW_DAYS, LOCATION_JITTER, MAX_PRICE, MAX_VALIDITY_DAYS,
    MIN_PRICE, MIN_VALIDITY_DAYS, REFERENCE_LAT, REFERENCE_LNG,
};
use crate::quote::{GeoPoint, Quote, QuoteDraft, Ratings};

/// Ranges the generator draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Point the locations are scattered around.
    pub reference: GeoPoint,
    /// Maximum offset in degrees from `reference`, per axis.
    pub jitter: f64,
    /// Lowest price (inclusive).
    pub min_price: u32,
    /// Price upper bound (exclusive).
    pub max_price: u32,
    /// Shortest validity period in days (inclusive).
    pub min_validity_days: u8,
    /// Longest validity period in days (inclusive).
    pub max_validity_days: u8,
    /// Quote dates fall within this many days before "now".
    pub date_window_days: i64,
    /// Creation dates fall within this many days before the quote date.
    pub creation_lag_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            reference: GeoPoint {
                lat: REFERENCE_LAT,
                lng: REFERENCE_LNG,
            },
            jitter: LOCATION_JITTER,
            min_price: MIN_PRICE,
            max_price: MAX_PRICE,
            min_validity_days: MIN_VALIDITY_DAYS,
            max_validity_days: MAX_VALIDITY_DAYS,
            date_window_days: DATE_WINDOW_DAYS,
            creation_lag_days: CREATION_LAG_DAYS,
        }
    }
}

/// Random quote factory.
#[derive(Debug, Clone, Default)]
pub struct QuoteGenerator {
    config: GeneratorConfig,
}

impl QuoteGenerator {
    /// Create a generator drawing from the given ranges.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate exactly `count` quotes with ids `1..=count`, dated relative to `now`.
    ///
    /// Ids are `u32`, so generation stops at `u32::MAX` quotes.
    pub fn generate<R: Rng>(&self, count: usize, rng: &mut R, now: DateTime<Utc>) -> Vec<Quote> {
        let quotes: Vec<Quote> = (1..=count)
            .map_while(|id| u32::try_from(id).ok())
            .map(|id| self.generate_one(id, rng, now))
            .collect();
        debug!("Generated {} quotes", quotes.len());
        quotes
    }

    /// Generate a single quote with the given id.
    pub fn generate_one<R: Rng>(&self, id: u32, rng: &mut R, now: DateTime<Utc>) -> Quote {
        let cfg = &self.config;

        let service = Service::ALL[rng.random_range(0..Service::ALL.len())];
        let company = Company::ALL[rng.random_range(0..Company::ALL.len())];
        let price = if cfg.max_price > cfg.min_price {
            rng.random_range(cfg.min_price..cfg.max_price)
        } else {
            cfg.min_price
        };
        let ratings = Ratings::random(rng);
        let location = GeoPoint {
            lat: cfg.reference.lat + (rng.random::<f64>() - 0.5) * 2.0 * cfg.jitter,
            lng: cfg.reference.lng + (rng.random::<f64>() - 0.5) * 2.0 * cfg.jitter,
        };
        let date = days_before(now, random_offset(rng, cfg.date_window_days));
        let quote_creation_date = days_before(date, random_offset(rng, cfg.creation_lag_days));
        let validity_period = if cfg.max_validity_days > cfg.min_validity_days {
            rng.random_range(cfg.min_validity_days..=cfg.max_validity_days)
        } else {
            cfg.min_validity_days
        };

        Quote::assemble(QuoteDraft {
            id,
            service,
            company,
            price,
            ratings,
            location,
            date,
            quote_creation_date,
            validity_period,
        })
    }
}

/// Uniform offset in `[0, days)` at millisecond resolution.
///
/// Negative windows count as zero; windows longer than `Duration::MAX` saturate.
fn random_offset<R: Rng>(rng: &mut R, days: i64) -> Duration {
    let window_ms = Duration::try_days(days.max(0))
        .unwrap_or(Duration::MAX)
        .num_milliseconds();
    if window_ms == 0 {
        return Duration::zero();
    }
    Duration::try_milliseconds(rng.random_range(0..window_ms)).unwrap_or(Duration::MAX)
}

/// `from - offset`, saturating at the earliest representable instant.
fn days_before(from: DateTime<Utc>, offset: Duration) -> DateTime<Utc> {
    from.checked_sub_signed(offset)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Generate `count` quotes with the default ranges, the thread RNG and the current time.
pub fn generate_quotes(count: usize) -> Vec<Quote> {
    QuoteGenerator::default().generate(count, &mut rand::rng(), Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_day_window_keeps_dates_at_now() {
        let config = GeneratorConfig {
            date_window_days: 0,
            creation_lag_days: 0,
            ..GeneratorConfig::default()
        };
        let now = Utc::now();
        let quote = QuoteGenerator::new(config).generate_one(1, &mut StdRng::seed_from_u64(3), now);
        assert_eq!(quote.date(), now);
        assert_eq!(quote.quote_creation_date(), now);
    }

    #[test]
    fn degenerate_price_range_uses_the_minimum() {
        let config = GeneratorConfig {
            min_price: 4200,
            max_price: 4200,
            ..GeneratorConfig::default()
        };
        let quotes = QuoteGenerator::new(config).generate(5, &mut StdRng::seed_from_u64(9), Utc::now());
        assert!(quotes.iter().all(|q| q.price == 4200));
    }

    #[test]
    fn huge_date_windows_saturate_instead_of_overflowing() {
        let config = GeneratorConfig {
            date_window_days: i64::MAX / 1000,
            creation_lag_days: i64::MAX,
            ..GeneratorConfig::default()
        };
        let now = Utc::now();
        let quotes = QuoteGenerator::new(config).generate(4, &mut StdRng::seed_from_u64(21), now);
        assert_eq!(quotes.len(), 4);
        for quote in &quotes {
            assert!(quote.quote_creation_date() <= quote.date());
            assert!(quote.date() <= now);
        }
    }

    #[test]
    fn negative_windows_count_as_zero() {
        let config = GeneratorConfig {
            date_window_days: -5,
            creation_lag_days: -1,
            ..GeneratorConfig::default()
        };
        let now = Utc::now();
        let quote = QuoteGenerator::new(config).generate_one(1, &mut StdRng::seed_from_u64(4), now);
        assert_eq!(quote.date(), now);
        assert_eq!(quote.quote_creation_date(), now);
    }

    #[test]
    fn thread_rng_shortcut_returns_requested_count() {
        assert_eq!(generate_quotes(3).len(), 3);
    }
}
