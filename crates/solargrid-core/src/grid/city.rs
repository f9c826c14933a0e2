use serde::{Deserialize, Serialize};

use crate::rng::SeededRandom;

/// Tiles in the 3x3 city overview.
pub const CITY_TILES: u8 = 9;

const HUB_INDEX: u8 = 4;
const SURPLUS_THRESHOLD: f64 = 0.4;

/// City-wide production in GW shown beside the overview.
pub const CITY_PRODUCTION_GW: f64 = 1.21;
/// City-wide grid load in GW shown beside the overview.
pub const CITY_CONSUMPTION_GW: f64 = 0.89;

/// One square of the city overview grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CityTile {
    /// The centre square, drawn as the grid hub.
    Hub { index: u8 },
    /// A neighbourhood square coloured by its surplus flag.
    Sector {
        index: u8,
        label: String,
        surplus: bool,
    },
}

impl CityTile {
    /// Position in row-major order, 0–8.
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Hub { index } | Self::Sector { index, .. } => *index,
        }
    }
}

/// The city overview card: a 3x3 tile grid plus fixed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityOverview {
    pub tiles: Vec<CityTile>,
    pub production_gw: f64,
    pub consumption_gw: f64,
}

impl CityOverview {
    /// Production minus consumption.
    #[must_use]
    pub fn surplus_gw(&self) -> f64 {
        self.production_gw - self.consumption_gw
    }

    /// Whether the city as a whole produces more than it consumes.
    #[must_use]
    pub fn is_surplus(&self) -> bool {
        self.surplus_gw() > 0.0
    }
}

// Labels skip the hub: S-1..S-4 before it, S-5..S-8 after.
fn tile_label(index: u8) -> String {
    let number = if index < HUB_INDEX { index + 1 } else { index };
    format!("S-{number}")
}

/// Build the city overview.
///
/// Tile `i` reads one draw from a generator seeded with `i + 1`; the hub
/// ignores its draw.
#[must_use]
pub fn city_overview() -> CityOverview {
    let tiles = (0..CITY_TILES)
        .map(|index| {
            let mut rng = SeededRandom::new(i64::from(index) + 1);
            let surplus = rng.chance_above(SURPLUS_THRESHOLD);
            if index == HUB_INDEX {
                CityTile::Hub { index }
            } else {
                CityTile::Sector {
                    index,
                    label: tile_label(index),
                    surplus,
                }
            }
        })
        .collect();

    CityOverview {
        tiles,
        production_gw: CITY_PRODUCTION_GW,
        consumption_gw: CITY_CONSUMPTION_GW,
    }
}
