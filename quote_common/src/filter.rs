//! Filter selection over the service, price and rating dimensions.
//!
//! A `FilterSelection` holds exactly three keys. Each is either the `"all"` sentinel or a
//! concrete value:
//!
//! - `service`: one catalog `Service`;
//! - `price`: a `PriceBand`: `under-5000`, `5000-10000` or `over-10000`;
//! - `rating`: a `RatingFloor` from 1 to 5, matched as `overallRating >= floor`.
//!
//! The selection starts all-`"all"` and only changes by merging a partial `FilterUpdate`.
//! Matching lives here rather than in the store: consumers call `matches`/`apply` with
//! the selection they read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumString};

use crate::catalog::Service;
use crate::error::QuoteError;
use crate::quote::Quote;
use crate::result::Result;

/// Sentinel text for "no restriction".
pub const ALL: &str = "all";

/// Either no restriction or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    /// The `"all"` sentinel.
    All,
    /// Restrict to this value.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    /// Whether this selection lets `value` through according to `accept`.
    fn admits(&self, accept: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(value) => accept(value),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Selection::All)
        } else {
            trimmed.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Price bucket offered by the filters panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PriceBand {
    /// Below $5,000.
    #[strum(serialize = "under-5000")]
    Under5000,
    /// From $5,000 up to, not including, $10,000.
    #[strum(serialize = "5000-10000")]
    From5000To10000,
    /// $10,000 and above.
    #[strum(serialize = "over-10000")]
    Over10000,
}

impl PriceBand {
    /// Every band, cheapest first.
    pub const ALL: [PriceBand; 3] = [
        PriceBand::Under5000,
        PriceBand::From5000To10000,
        PriceBand::Over10000,
    ];

    /// Whether `price` falls in this band.
    pub fn contains(&self, price: u32) -> bool {
        match self {
            PriceBand::Under5000 => price < 5000,
            PriceBand::From5000To10000 => (5000..10000).contains(&price),
            PriceBand::Over10000 => price >= 10000,
        }
    }
}

/// Minimum overall rating, in whole stars from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatingFloor(u8);

impl RatingFloor {
    /// Lowest accepted floor.
    pub const MIN: u8 = 1;
    /// Highest accepted floor.
    pub const MAX: u8 = 5;

    /// Build a floor, rejecting values outside `1..=5`.
    pub fn new(stars: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(QuoteError::InvalidFilterValue {
                key: FilterKey::Rating.to_string(),
                value: stars.to_string(),
            })
        }
    }

    /// Whether an overall rating reaches this floor.
    pub fn admits(&self, overall: f64) -> bool {
        overall >= f64::from(self.0)
    }
}

impl fmt::Display for RatingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RatingFloor {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || QuoteError::InvalidFilterValue {
            key: FilterKey::Rating.to_string(),
            value: s.to_string(),
        };
        let stars: u8 = s.trim().parse().map_err(|_| invalid())?;
        RatingFloor::new(stars).map_err(|_| invalid())
    }
}

/// The three filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterKey {
    /// Service dimension.
    Service,
    /// Price dimension.
    Price,
    /// Rating dimension.
    Rating,
}

/// Current restriction over the quote collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSelection {
    /// Service restriction.
    pub service: Selection<Service>,
    /// Price band restriction.
    pub price: Selection<PriceBand>,
    /// Minimum overall rating.
    pub rating: Selection<RatingFloor>,
}

impl FilterSelection {
    /// Shallow-merge `update`: keys it leaves unset keep their current value.
    pub fn merge(&mut self, update: &FilterUpdate) {
        if let Some(service) = update.service {
            self.service = service;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }

    /// Whether every restricted dimension admits `quote`.
    pub fn matches(&self, quote: &Quote) -> bool {
        self.service.admits(|service| *service == quote.service)
            && self.price.admits(|band| band.contains(quote.price))
            && self.rating.admits(|floor| floor.admits(quote.overall_rating()))
    }

    /// Quotes admitted by this selection, in collection order.
    pub fn apply<'a>(&self, quotes: &'a [Quote]) -> Vec<&'a Quote> {
        quotes.iter().filter(|quote| self.matches(quote)).collect()
    }

    /// Whether no dimension is restricted.
    pub fn is_unrestricted(&self) -> bool {
        *self == FilterSelection::default()
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service={} price={} rating={}",
            self.service, self.price, self.rating
        )
    }
}

/// Partial filter change; `None` keeps the prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterUpdate {
    /// New service restriction, if changed.
    pub service: Option<Selection<Service>>,
    /// New price restriction, if changed.
    pub price: Option<Selection<PriceBand>>,
    /// New rating restriction, if changed.
    pub rating: Option<Selection<RatingFloor>>,
}

impl FilterUpdate {
    /// Update that puts every key back to `"all"`.
    pub fn reset() -> Self {
        FilterSelection::default().into()
    }

    /// Set one key from its text value.
    pub fn set(&mut self, key: FilterKey, value: &str) -> Result<()> {
        let invalid = || QuoteError::InvalidFilterValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            FilterKey::Service => self.service = Some(value.parse().map_err(|_| invalid())?),
            FilterKey::Price => self.price = Some(value.parse().map_err(|_| invalid())?),
            FilterKey::Rating => self.rating = Some(value.parse().map_err(|_| invalid())?),
        }
        Ok(())
    }

    /// Parse `key=value` pairs separated by whitespace.
    ///
    /// Values may contain spaces (`service=Solar Installation price=all`): a token without
    /// `=` continues the previous value.
    pub fn parse_pairs(text: &str) -> Result<Self> {
        let mut pairs: Vec<(FilterKey, String)> = Vec::new();

        for token in text.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) => {
                    let key: FilterKey = key
                        .parse()
                        .map_err(|_| QuoteError::UnknownFilterKey(key.to_string()))?;
                    pairs.push((key, value.to_string()));
                }
                None => match pairs.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(token);
                    }
                    None => {
                        return Err(QuoteError::Format(format!(
                            "expected key=value, got {:?}",
                            token
                        )));
                    }
                },
            }
        }

        let mut update = FilterUpdate::default();
        for (key, value) in pairs {
            update.set(key, &value)?;
        }
        Ok(update)
    }
}

impl From<FilterSelection> for FilterUpdate {
    fn from(selection: FilterSelection) -> Self {
        FilterUpdate {
            service: Some(selection.service),
            price: Some(selection.price),
            rating: Some(selection.rating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_all_sentinel_case_insensitively() {
        assert_eq!("ALL".parse::<Selection<PriceBand>>().unwrap(), Selection::All);
        assert_eq!(
            "over-10000".parse::<Selection<PriceBand>>().unwrap(),
            Selection::Only(PriceBand::Over10000)
        );
    }

    #[test]
    fn price_band_edges() {
        assert!(PriceBand::Under5000.contains(4999));
        assert!(!PriceBand::Under5000.contains(5000));
        assert!(PriceBand::From5000To10000.contains(5000));
        assert!(PriceBand::From5000To10000.contains(9999));
        assert!(!PriceBand::From5000To10000.contains(10000));
        assert!(PriceBand::Over10000.contains(10000));
    }

    #[test]
    fn rating_floor_bounds() {
        assert!(RatingFloor::new(0).is_err());
        assert!(RatingFloor::new(6).is_err());
        assert!("x".parse::<RatingFloor>().is_err());
        let floor = RatingFloor::new(3).unwrap();
        assert!(floor.admits(3.0));
        assert!(!floor.admits(2.99));
    }

    #[test]
    fn parse_pairs_joins_multi_word_values() {
        let update = FilterUpdate::parse_pairs("service=Solar Installation rating=4").unwrap();
        assert_eq!(update.service, Some(Selection::Only(Service::SolarInstallation)));
        assert_eq!(update.rating, Some(Selection::Only(RatingFloor::new(4).unwrap())));
        assert_eq!(update.price, None);
    }

    #[test]
    fn parse_pairs_rejects_unknown_keys_and_values() {
        assert!(matches!(
            FilterUpdate::parse_pairs("colour=red"),
            Err(QuoteError::UnknownFilterKey(_))
        ));
        assert!(matches!(
            FilterUpdate::parse_pairs("price=cheap"),
            Err(QuoteError::InvalidFilterValue { .. })
        ));
        assert!(matches!(
            FilterUpdate::parse_pairs("Solar"),
            Err(QuoteError::Format(_))
        ));
    }

    #[test]
    fn empty_text_is_an_empty_update() {
        assert_eq!(FilterUpdate::parse_pairs("   ").unwrap(), FilterUpdate::default());
    }

    #[test]
    fn selection_serializes_as_flat_strings() {
        let selection = FilterSelection {
            service: Selection::Only(Service::SolarInstallation),
            ..FilterSelection::default()
        };
        let value = serde_json::to_value(selection).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "service": "Solar Installation",
                "price": "all",
                "rating": "all",
            })
        );
        let back: FilterSelection = serde_json::from_value(value).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn selection_rejects_extra_keys() {
        let value = serde_json::json!({
            "service": "all",
            "price": "all",
            "rating": "all",
            "company": "all",
        });
        assert!(serde_json::from_value::<FilterSelection>(value).is_err());
    }
}
