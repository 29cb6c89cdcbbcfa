//! Theater zones where cards are played.
//!
//! ## Key Types
//!
//! - `Theater`: Ordered played cards of one zone, with top-of-stack rules
//! - `PlayedCard`: A card plus orientation and owner
//! - `TheaterMap`: Per-theater storage indexed by `TheaterType`
//! - `TheaterOrder`: Rotating display order of the three theaters

pub mod theater;

pub use theater::{PlayedCard, Theater, TheaterMap, TheaterOrder};
