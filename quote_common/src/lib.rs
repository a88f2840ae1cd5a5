//!
//! Core of the home-energy quote explorer.
//!
//! This crate aggregates:
//! - `error`: unified error type `QuoteError` used across the workspace.
//! - `result`: handy `Result<T, QuoteError>` alias.
//! - `config`: default ranges and counts for generated data.
//! - `catalog`: the fixed service and company catalogs.
//! - `quote`: the `Quote` record and its invariants.
//! - `generator`: synthetic quote generation with an injected RNG.
//! - `filter`: filter selection, partial updates and matching.
//! - `store`: the in-memory owner of quotes and filters.
//! - `history`: price aggregates for the history chart.
#![warn(missing_docs)]
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod history;
pub mod quote;
pub mod result;
pub mod store;

pub use catalog::{Company, Service};
pub use error::QuoteError;
pub use filter::{FilterSelection, FilterUpdate, PriceBand, RatingFloor, Selection};
pub use generator::{GeneratorConfig, QuoteGenerator, generate_quotes};
pub use quote::{GeoPoint, Quote, QuoteDraft, Ratings};
pub use result::Result;
pub use store::{QuoteStore, StoreListener, StoreSnapshot};
