//! Read access to the distributor/partner directory held by the hosted data API.
//!
//! One bulk read per request; every row passes through [`normalize`] so the
//! rest of the system only ever sees strictly typed
//! [`apfinder_core::LocationEntity`] values.

mod client;
mod error;
pub mod normalize;

use std::future::Future;

use apfinder_core::{EntityKind, LocationEntity};

pub use client::DirectoryClient;
pub use error::DirectoryError;

/// Source of directory entries for the ranking engine.
pub trait DirectorySource {
    /// Fetch every entry of `kind`, ordered by name.
    ///
    /// An empty directory is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] when the backing store cannot be read.
    fn fetch_directory(
        &self,
        kind: EntityKind,
    ) -> impl Future<Output = Result<Vec<LocationEntity>, DirectoryError>> + Send;
}
