//! Default values for quote generation.

/// Number of quotes generated at startup.
pub const DEFAULT_QUOTE_COUNT: usize = 50;

/// Latitude the generated quotes are scattered around (Melbourne CBD).
pub const REFERENCE_LAT: f64 = -37.8136;
/// Longitude the generated quotes are scattered around.
pub const REFERENCE_LNG: f64 = 144.9631;
/// Maximum distance in degrees from the reference point, per axis.
pub const LOCATION_JITTER: f64 = 0.25;

/// Lowest generated price (inclusive).
pub const MIN_PRICE: u32 = 1000;
/// Upper bound of generated prices (exclusive).
pub const MAX_PRICE: u32 = 16000;

/// Lowest component rating.
pub const MIN_RATING: u8 = 1;
/// Highest component rating.
pub const MAX_RATING: u8 = 10;

/// Shortest validity period in days.
pub const MIN_VALIDITY_DAYS: u8 = 1;
/// Longest validity period in days.
pub const MAX_VALIDITY_DAYS: u8 = 30;

/// How far back quote dates reach from "now".
pub const DATE_WINDOW_DAYS: i64 = 90;
/// How far before the quote date the creation date may lie.
pub const CREATION_LAG_DAYS: i64 = 30;
