//! Aggregates behind the price-history chart.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::catalog::Service;
use crate::quote::Quote;

/// Price statistics for one calendar month (UTC) of quote dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Quotes dated in this month.
    pub count: usize,
    /// Mean price.
    pub average_price: f64,
    /// Cheapest price.
    pub min_price: u32,
    /// Most expensive price.
    pub max_price: u32,
}

/// Quote count and mean price for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    /// Service the figures are for.
    pub service: Service,
    /// Number of quotes.
    pub count: usize,
    /// Mean price.
    pub average_price: f64,
}

/// Running totals while folding quotes.
#[derive(Default)]
struct Tally {
    count: usize,
    total: u64,
    min: u32,
    max: u32,
}

impl Tally {
    fn add(&mut self, price: u32) {
        if self.count == 0 {
            self.min = price;
            self.max = price;
        } else {
            self.min = self.min.min(price);
            self.max = self.max.max(price);
        }
        self.count += 1;
        self.total += u64::from(price);
    }

    fn average(&self) -> f64 {
        self.total as f64 / self.count as f64
    }
}

/// Monthly price series over `quotes`, oldest month first.
///
/// Months with no quotes are skipped.
pub fn price_history<'a, I>(quotes: I) -> Vec<PricePoint>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let mut months: BTreeMap<(i32, u32), Tally> = BTreeMap::new();
    for quote in quotes {
        let date = quote.date();
        months
            .entry((date.year(), date.month()))
            .or_default()
            .add(quote.price);
    }

    months
        .into_iter()
        .map(|((year, month), tally)| PricePoint {
            year,
            month,
            count: tally.count,
            average_price: tally.average(),
            min_price: tally.min,
            max_price: tally.max,
        })
        .collect()
}

/// Count and mean price per service, in catalog order; services without quotes are omitted.
pub fn service_summary<'a, I>(quotes: I) -> Vec<ServiceSummary>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let mut tallies: BTreeMap<Service, Tally> = BTreeMap::new();
    for quote in quotes {
        tallies.entry(quote.service).or_default().add(quote.price);
    }

    Service::ALL
        .iter()
        .filter_map(|service| {
            tallies.get(service).map(|tally| ServiceSummary {
                service: *service,
                count: tally.count,
                average_price: tally.average(),
            })
        })
        .collect()
}
