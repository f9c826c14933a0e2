//! Mock grid views derived from [`SeededRandom`](crate::rng::SeededRandom).
//!
//! Every function here builds a fresh generator from a stable id and reads
//! draws in a fixed order, so the same id always yields the same view.
//! Changing the order of reads changes every downstream value; the order is
//! part of each function's contract.

pub mod city;
pub mod sector;

pub use city::{CityOverview, CityTile, city_overview};
pub use sector::{
    DEFAULT_SECTOR_COUNT, GridSite, LayoutTotals, MAX_SECTOR_COUNT, SectorLayout, SectorReading,
    SiteKind, live_map, sector_layout, sector_reading,
};
