//! Distance ranking for the distributor/partner locator.
//!
//! [`RankingEngine`] reads the directory once, geocodes every entry
//! concurrently, measures each against the reference point and returns the
//! entries inside the requested radius, nearest first.

mod address;
mod engine;
mod error;
mod locate;
pub mod view;

pub use address::build_full_address;
pub use engine::{RankingEngine, RankingOptions};
pub use error::RankingError;
pub use locate::{Listing, UnrankedReason};
