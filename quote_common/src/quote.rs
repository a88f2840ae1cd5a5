//! Quote data model.
//!
//! A `Quote` is one installation price quote: the service and company, the quoted price,
//! three component ratings, a map location and its dating metadata. Two invariants are
//! enforced at construction and cannot be broken afterwards:
//!
//! - the overall rating is always derived from the three component ratings (`Ratings`
//!   keeps them private and computes `overall()` on read);
//! - the creation date never lies after the quote date.
//!
//! The serialized shape is `QuoteRecord` (camelCase, including `overallRating`). Reading a
//! record back recomputes the overall rating and re-checks the dates.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Company, Service};
use crate::config::{MAX_RATING, MIN_RATING};
use crate::error::QuoteError;
use crate::result::Result;

/// The three component ratings of a quote, each in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratings {
    sale_team: u8,
    installation_team: u8,
    cleanliness: u8,
}

impl Ratings {
    /// Build a rating triple, rejecting any value outside `1..=10`.
    pub fn new(sale_team: u8, installation_team: u8, cleanliness: u8) -> Result<Self> {
        for value in [sale_team, installation_team, cleanliness] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(QuoteError::RatingOutOfRange(value));
            }
        }
        Ok(Self {
            sale_team,
            installation_team,
            cleanliness,
        })
    }

    /// Draw a rating triple uniformly from `1..=10`.
    pub(crate) fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            sale_team: rng.random_range(MIN_RATING..=MAX_RATING),
            installation_team: rng.random_range(MIN_RATING..=MAX_RATING),
            cleanliness: rng.random_range(MIN_RATING..=MAX_RATING),
        }
    }

    /// Rating of the sales team.
    pub fn sale_team(&self) -> u8 {
        self.sale_team
    }

    /// Rating of the installation team.
    pub fn installation_team(&self) -> u8 {
        self.installation_team
    }

    /// Rating of the site cleanliness after installation.
    pub fn cleanliness(&self) -> u8 {
        self.cleanliness
    }

    /// Overall rating on a five-star scale: the mean of the three ratings, halved.
    pub fn overall(&self) -> f64 {
        let sum = u32::from(self.sale_team)
            + u32::from(self.installation_team)
            + u32::from(self.cleanliness);
        (f64::from(sum) / 3.0) / 2.0
    }
}

/// Map position of a quoted installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Everything needed to build a `Quote`, as filled in by the generator or the upload form.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    /// Identifier within the collection.
    pub id: u32,
    /// Quoted service.
    pub service: Service,
    /// Quoting company.
    pub company: Company,
    /// Quoted price in whole dollars.
    pub price: u32,
    /// Component ratings.
    pub ratings: Ratings,
    /// Installation location.
    pub location: GeoPoint,
    /// Date of the quote.
    pub date: DateTime<Utc>,
    /// Date the quote document was created; not after `date`.
    pub quote_creation_date: DateTime<Utc>,
    /// Days the quote stays valid after creation.
    pub validity_period: u8,
}

/// A single installation quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "QuoteRecord", try_from = "QuoteRecord")]
pub struct Quote {
    /// Identifier within the collection.
    pub id: u32,
    /// Quoted service.
    pub service: Service,
    /// Quoting company.
    pub company: Company,
    /// Quoted price in whole dollars.
    pub price: u32,
    /// Days the quote stays valid after creation.
    pub validity_period: u8,
    /// Component ratings; the overall rating is derived from these.
    pub ratings: Ratings,
    /// Installation location.
    pub location: GeoPoint,
    date: DateTime<Utc>,
    quote_creation_date: DateTime<Utc>,
}

impl Quote {
    /// Build a quote from a draft, rejecting a creation date after the quote date.
    pub fn new(draft: QuoteDraft) -> Result<Self> {
        if draft.quote_creation_date > draft.date {
            return Err(QuoteError::CreationAfterQuoteDate { id: draft.id });
        }
        Ok(Self::assemble(draft))
    }

    /// Build a quote from a draft whose creation date the caller already keeps at or
    /// before the quote date.
    pub(crate) fn assemble(draft: QuoteDraft) -> Self {
        debug_assert!(draft.quote_creation_date <= draft.date);
        Self {
            id: draft.id,
            service: draft.service,
            company: draft.company,
            price: draft.price,
            validity_period: draft.validity_period,
            ratings: draft.ratings,
            location: draft.location,
            date: draft.date,
            quote_creation_date: draft.quote_creation_date,
        }
    }

    /// Overall rating, recomputed from the component ratings.
    pub fn overall_rating(&self) -> f64 {
        self.ratings.overall()
    }

    /// Date of the quote.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Date the quote document was created.
    pub fn quote_creation_date(&self) -> DateTime<Utc> {
        self.quote_creation_date
    }

    /// Last instant the quote is valid: creation date plus the validity period.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.quote_creation_date + Duration::days(i64::from(self.validity_period))
    }

    /// Whether the validity period has run out at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}

/// Flat serialized shape of a `Quote`.
///
/// `overall_rating` is written on output and ignored on input.
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub id: u32,
    pub service: Service,
    pub company: Company,
    pub price: u32,
    pub sale_team_rating: u8,
    pub installation_team_rating: u8,
    pub cleanliness_rating: u8,
    #[serde(default)]
    pub overall_rating: Option<f64>,
    pub lat: f64,
    pub lng: f64,
    pub date: DateTime<Utc>,
    pub quote_creation_date: DateTime<Utc>,
    pub validity_period: u8,
}

impl From<Quote> for QuoteRecord {
    fn from(quote: Quote) -> Self {
        QuoteRecord {
            id: quote.id,
            service: quote.service,
            company: quote.company,
            price: quote.price,
            sale_team_rating: quote.ratings.sale_team(),
            installation_team_rating: quote.ratings.installation_team(),
            cleanliness_rating: quote.ratings.cleanliness(),
            overall_rating: Some(quote.overall_rating()),
            lat: quote.location.lat,
            lng: quote.location.lng,
            date: quote.date,
            quote_creation_date: quote.quote_creation_date,
            validity_period: quote.validity_period,
        }
    }
}

impl TryFrom<QuoteRecord> for Quote {
    type Error = QuoteError;

    fn try_from(record: QuoteRecord) -> Result<Self> {
        let ratings = Ratings::new(
            record.sale_team_rating,
            record.installation_team_rating,
            record.cleanliness_rating,
        )?;
        Quote::new(QuoteDraft {
            id: record.id,
            service: record.service,
            company: record.company,
            price: record.price,
            ratings,
            location: GeoPoint {
                lat: record.lat,
                lng: record.lng,
            },
            date: record.date,
            quote_creation_date: record.quote_creation_date,
            validity_period: record.validity_period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn draft() -> QuoteDraft {
        let date = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        QuoteDraft {
            id: 7,
            service: Service::SolarInstallation,
            company: Company::GreenPower,
            price: 8200,
            ratings: Ratings::new(6, 9, 3).unwrap(),
            location: GeoPoint {
                lat: -37.8,
                lng: 144.9,
            },
            date,
            quote_creation_date: date - Duration::days(4),
            validity_period: 14,
        }
    }

    #[test]
    fn overall_rating_is_half_the_mean() {
        let quote = Quote::new(draft()).unwrap();
        assert!((quote.overall_rating() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn ratings_outside_one_to_ten_are_rejected() {
        assert!(matches!(
            Ratings::new(0, 5, 5),
            Err(QuoteError::RatingOutOfRange(0))
        ));
        assert!(matches!(
            Ratings::new(5, 11, 5),
            Err(QuoteError::RatingOutOfRange(11))
        ));
    }

    #[test]
    fn random_ratings_stay_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let r = Ratings::random(&mut rng);
            assert!(Ratings::new(r.sale_team(), r.installation_team(), r.cleanliness()).is_ok());
        }
    }

    #[test]
    fn creation_after_quote_date_is_rejected() {
        let mut bad = draft();
        bad.quote_creation_date = bad.date + Duration::seconds(1);
        assert!(matches!(
            Quote::new(bad),
            Err(QuoteError::CreationAfterQuoteDate { id: 7 })
        ));
    }

    #[test]
    fn same_creation_and_quote_date_is_allowed() {
        let mut edge = draft();
        edge.quote_creation_date = edge.date;
        assert!(Quote::new(edge).is_ok());
    }

    #[test]
    fn expiry_counts_from_creation_date() {
        let quote = Quote::new(draft()).unwrap();
        let created = quote.quote_creation_date();
        assert_eq!(quote.expires_at(), created + Duration::days(14));
        assert!(!quote.is_expired(created + Duration::days(14)));
        assert!(quote.is_expired(created + Duration::days(15)));
    }

    #[test]
    fn json_carries_overall_rating_in_camel_case() {
        let quote = Quote::new(draft()).unwrap();
        let value: serde_json::Value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["overallRating"], 3.0);
        assert_eq!(value["saleTeamRating"], 6);
        assert_eq!(value["service"], "Solar Installation");
        assert!(value.get("quoteCreationDate").is_some());
    }

    #[test]
    fn supplied_overall_rating_is_recomputed_on_read() {
        let quote = Quote::new(draft()).unwrap();
        let mut value = serde_json::to_value(&quote).unwrap();
        value["overallRating"] = serde_json::json!(4.9);
        let back: Quote = serde_json::from_value(value).unwrap();
        assert!((back.overall_rating() - 3.0).abs() < 1e-9);
        assert_eq!(back, quote);
    }

    #[test]
    fn reading_a_record_checks_the_dates() {
        let quote = Quote::new(draft()).unwrap();
        let mut value = serde_json::to_value(&quote).unwrap();
        value["quoteCreationDate"] = serde_json::json!("2024-06-01T00:00:00Z");
        assert!(serde_json::from_value::<Quote>(value).is_err());
    }
}
