pub mod filter;
pub mod geo;
pub mod listing;

pub use filter::{filter_and_rank, FilterQuery, RankedListing};
pub use listing::{Category, GeoPoint, Listing, VerificationStatus};
