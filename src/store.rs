// store.rs
use crate::domain::Listing;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse listings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate id '{0}'")]
    DuplicateId(String),
    #[error("duplicate slug '{0}'")]
    DuplicateSlug(String),
    #[error("listing '{id}' has invalid coordinates ({lat}, {lng})")]
    InvalidCoordinates { id: String, lat: f64, lng: f64 },
}

/// The read-only listing collection, loaded once at startup.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    by_id: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

impl ListingStore {
    /// Builds the store, checking id/slug uniqueness and coordinate ranges.
    pub fn new(listings: Vec<Listing>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(listings.len());
        let mut by_slug = HashMap::with_capacity(listings.len());

        for (idx, listing) in listings.iter().enumerate() {
            if !listing.coordinates.is_valid() {
                return Err(StoreError::InvalidCoordinates {
                    id: listing.id.clone(),
                    lat: listing.coordinates.lat,
                    lng: listing.coordinates.lng,
                });
            }
            if by_id.insert(listing.id.clone(), idx).is_some() {
                return Err(StoreError::DuplicateId(listing.id.clone()));
            }
            if by_slug.insert(listing.slug.clone(), idx).is_some() {
                return Err(StoreError::DuplicateSlug(listing.slug.clone()));
            }
        }

        Ok(Self {
            listings,
            by_id,
            by_slug,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        Self::new(listings)
    }

    /// Load the flat JSON data file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let store = Self::from_json(&json)?;
        info!("✅ Loaded {} listings from {}", store.len(), path.display());
        Ok(store)
    }

    pub fn all(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn by_slug(&self, slug: &str) -> Option<&Listing> {
        self.by_slug.get(slug).map(|&idx| &self.listings[idx])
    }

    pub fn by_id(&self, id: &str) -> Option<&Listing> {
        self.by_id.get(id).map(|&idx| &self.listings[idx])
    }
}
