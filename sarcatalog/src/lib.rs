//! Radio catalog for SARadio
//!
//! This crate holds the immutable catalog the playlist generator draws from:
//! stations (songs plus categorized segments) and the advertisement pool
//! shared by every station.
//!
//! # Example
//!
//! ```no_run
//! use sarcatalog::{Catalog, SegmentType};
//!
//! # fn main() -> sarcatalog::Result<()> {
//! let catalog = Catalog::load("data.json", "ads.json")?;
//! let station = catalog.station("radio_los_santos")?;
//! println!(
//!     "{}: {} songs, {} jingles",
//!     station.name,
//!     station.songs.len(),
//!     station.segments(SegmentType::StationJingle).len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod models;

#[cfg(feature = "sarconfig")]
pub mod config_ext;

// Re-exports
pub use error::{Error, Result};
pub use models::{Advertisement, Catalog, Segment, SegmentType, Song, Station};

#[cfg(feature = "sarconfig")]
pub use config_ext::CatalogConfigExt;
