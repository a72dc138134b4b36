pub mod batch;
pub mod classify;
mod enrich_error;
pub mod fetch;
pub mod finalize;
pub mod models;
pub mod output;
pub mod places;
pub mod verify;
pub mod website;

pub use batch::{run_batch, BatchSummary, Outcome};
pub use enrich_error::EnrichError;
pub use places::{GooglePlacesClient, PlacesApi};
pub use website::{HttpPageFetcher, PageFetcher};
