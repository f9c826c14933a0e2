use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::rng::SeededRandom;

/// Sectors shown on the live map by default (a 5x5 grid).
pub const DEFAULT_SECTOR_COUNT: u32 = 25;

/// Largest live map the CLI and config accept.
pub const MAX_SECTOR_COUNT: u32 = 10_000;

/// Production and consumption figures for one live-map tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorReading {
    /// 1-based sector id, also the generator seed.
    pub sector_id: u32,
    /// Mock production in kW, in `[50, 150)`.
    pub production_kw: f64,
    /// Mock consumption in kW, in `[40, 120)`.
    pub consumption_kw: f64,
    /// `production_kw > consumption_kw`.
    pub surplus: bool,
}

impl SectorReading {
    /// Production minus consumption; negative when in deficit.
    #[must_use]
    pub fn balance_kw(&self) -> f64 {
        self.production_kw - self.consumption_kw
    }
}

/// Whether a site on the sector map is a house or a grid node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    House,
    GridNode,
}

impl SiteKind {
    const fn id_prefix(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::GridNode => "node",
        }
    }

    /// Translation key for the singular label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::GridNode => "grid_node",
        }
    }
}

/// A house or grid node placed on a sector map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSite {
    /// `house-{i}` or `node-{i}`, unique within the sector.
    pub id: String,
    pub kind: SiteKind,
    /// Horizontal position as a percentage, 5–94.
    pub x_pct: u8,
    /// Vertical position as a percentage, 5–94.
    pub y_pct: u8,
    /// Mock production in kW, in `[2, 7)`.
    pub production_kw: f64,
    /// Mock load in kW, in `[0.5, 3.5)`.
    pub load_kw: f64,
}

/// Houses and grid nodes for the sector detail map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorLayout {
    pub sector_id: u32,
    pub houses: Vec<GridSite>,
    pub nodes: Vec<GridSite>,
}

/// Aggregates shown under the sector detail map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutTotals {
    pub houses: usize,
    pub grid_nodes: usize,
    /// Summed house production; grid nodes do not produce.
    pub production_kw: f64,
    /// Summed load over houses and nodes.
    pub load_kw: f64,
}

// Each site is shown to one decimal, so totals add the shown figures.
fn shown_kw(kw: f64) -> f64 {
    format!("{kw:.1}").parse().unwrap_or(kw)
}

impl SectorLayout {
    /// Counts and summed figures for the layout.
    ///
    /// Figures are rounded to 0.1 kW per site before summing.
    #[must_use]
    pub fn totals(&self) -> LayoutTotals {
        LayoutTotals {
            houses: self.houses.len(),
            grid_nodes: self.nodes.len(),
            production_kw: self.houses.iter().map(|h| shown_kw(h.production_kw)).sum(),
            load_kw: self.sites().map(|s| shown_kw(s.load_kw)).sum(),
        }
    }

    /// Houses followed by nodes.
    pub fn sites(&self) -> impl Iterator<Item = &GridSite> {
        self.houses.iter().chain(&self.nodes)
    }
}

fn check_sector(sector_id: u32) -> Result<(), CoreError> {
    if sector_id == 0 {
        return Err(CoreError::InvalidSector(sector_id));
    }
    Ok(())
}

/// Live-map reading for one sector.
///
/// Draw order: production, consumption.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSector`] for sector id 0.
pub fn sector_reading(sector_id: u32) -> Result<SectorReading, CoreError> {
    check_sector(sector_id)?;
    Ok(read_sector(sector_id))
}

fn read_sector(sector_id: u32) -> SectorReading {
    let mut rng = SeededRandom::new(i64::from(sector_id));
    let production_kw = rng.next_in(50.0, 100.0);
    let consumption_kw = rng.next_in(40.0, 80.0);

    SectorReading {
        sector_id,
        production_kw,
        consumption_kw,
        surplus: production_kw > consumption_kw,
    }
}

/// Readings for sectors `1..=count`.
#[must_use]
pub fn live_map(count: u32) -> Vec<SectorReading> {
    debug!(count, "building live map");
    (1..=count).map(read_sector).collect()
}

fn place_sites(rng: &mut SeededRandom, count: u32, kind: SiteKind) -> Vec<GridSite> {
    (0..count)
        .map(|i| {
            let x_pct = percent_position(rng);
            let y_pct = percent_position(rng);
            let production_kw = rng.next_in(2.0, 5.0);
            let load_kw = rng.next_in(0.5, 3.0);
            GridSite {
                id: format!("{}-{i}", kind.id_prefix()),
                kind,
                x_pct,
                y_pct,
                production_kw,
                load_kw,
            }
        })
        .collect()
}

fn percent_position(rng: &mut SeededRandom) -> u8 {
    // next_below(90) < 90, so the sum is at most 94.
    u8::try_from(rng.next_below(90) + 5).unwrap_or(94)
}

/// Sector detail layout.
///
/// Draw order: house count, node count, then for every house and then every
/// node: x, y, production, load. Nodes draw a production figure too, so the
/// stream stays aligned even though it is never displayed for them.
///
/// # Errors
///
/// Returns [`CoreError::InvalidSector`] for sector id 0.
pub fn sector_layout(sector_id: u32) -> Result<SectorLayout, CoreError> {
    check_sector(sector_id)?;
    let mut rng = SeededRandom::new(i64::from(sector_id));
    let house_count = rng.next_below(10) + 10;
    let node_count = rng.next_below(3) + 2;
    debug!(sector_id, house_count, node_count, "laying out sector");

    let houses = place_sites(&mut rng, house_count, SiteKind::House);
    let nodes = place_sites(&mut rng, node_count, SiteKind::GridNode);

    Ok(SectorLayout {
        sector_id,
        houses,
        nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_zero_is_rejected() {
        assert_eq!(sector_reading(0), Err(CoreError::InvalidSector(0)));
        assert_eq!(sector_layout(0), Err(CoreError::InvalidSector(0)));
    }

    #[test]
    fn reading_is_stable_across_calls() {
        for id in 1..=DEFAULT_SECTOR_COUNT {
            assert_eq!(sector_reading(id), sector_reading(id));
        }
    }

    #[test]
    fn reading_matches_reference_values() {
        let one = sector_reading(1).expect("sector 1");
        assert!((one.production_kw - 50.000_78).abs() < 1e-3);
        assert!((one.consumption_kw - 50.523).abs() < 1e-3);
        assert!(!one.surplus);

        let eight = sector_reading(8).expect("sector 8");
        assert!((eight.consumption_kw - 44.184_2).abs() < 1e-3);
        assert!(eight.surplus);
    }

    #[test]
    fn live_map_agrees_with_single_readings() {
        let map = live_map(DEFAULT_SECTOR_COUNT);
        assert_eq!(map.len(), 25);
        for reading in &map {
            assert_eq!(Some(reading), sector_reading(reading.sector_id).ok().as_ref());
        }
        let surplus: Vec<u32> = map
            .iter()
            .filter(|r| r.surplus)
            .map(|r| r.sector_id)
            .collect();
        assert_eq!(surplus, vec![8, 16, 23]);
    }

    #[test]
    fn live_map_of_zero_is_empty() {
        assert!(live_map(0).is_empty());
    }

    #[test]
    fn balance_sign_follows_surplus() {
        for reading in live_map(50) {
            assert_eq!(reading.balance_kw() > 0.0, reading.surplus);
        }
    }

    #[test]
    fn layout_reference_sector_one() {
        let layout = sector_layout(1).expect("sector 1");
        assert_eq!(layout.houses.len(), 10);
        assert_eq!(layout.nodes.len(), 2);

        let first = &layout.houses[0];
        assert_eq!(first.id, "house-0");
        assert_eq!((first.x_pct, first.y_pct), (73, 46));
        assert!((first.production_kw - 4.664).abs() < 1e-3);
        assert!((first.load_kw - 1.157).abs() < 1e-3);

        let node = &layout.nodes[0];
        assert_eq!(node.id, "node-0");
        assert_eq!(node.kind, SiteKind::GridNode);
        assert_eq!((node.x_pct, node.y_pct), (70, 72));
    }

    #[test]
    fn layout_reference_sector_seven_has_four_nodes() {
        let layout = sector_layout(7).expect("sector 7");
        assert_eq!(layout.nodes.len(), 4);
        assert_eq!(layout.nodes[3].id, "node-3");
    }

    #[test]
    fn layout_bounds_hold_for_many_sectors() {
        for id in 1..=500 {
            let layout = sector_layout(id).expect("valid id");
            assert!((10..=19).contains(&layout.houses.len()));
            assert!((2..=4).contains(&layout.nodes.len()));
            for site in layout.sites() {
                assert!((5..=94).contains(&site.x_pct));
                assert!((5..=94).contains(&site.y_pct));
                assert!((2.0..7.0).contains(&site.production_kw));
                assert!((0.5..3.5).contains(&site.load_kw));
            }
        }
    }

    #[test]
    fn totals_sum_sites() {
        let layout = sector_layout(3).expect("sector 3");
        let totals = layout.totals();
        assert_eq!(totals.houses, layout.houses.len());
        assert_eq!(totals.grid_nodes, layout.nodes.len());
        let load: f64 = layout.sites().map(|s| s.load_kw).sum();
        // At most 23 sites, each off by no more than 0.05 kW.
        assert!((totals.load_kw - load).abs() < 1.2);
    }

    #[test]
    fn production_total_adds_displayed_house_figures() {
        let totals = sector_layout(1).expect("sector 1").totals();
        assert_eq!(format!("{:.1}", totals.production_kw), "47.8");

        for id in 1..=DEFAULT_SECTOR_COUNT {
            let layout = sector_layout(id).expect("valid id");
            let shown: f64 = layout
                .houses
                .iter()
                .map(|h| format!("{:.1}", h.production_kw).parse::<f64>().expect("number"))
                .sum();
            assert_eq!(
                format!("{:.1}", layout.totals().production_kw),
                format!("{shown:.1}"),
                "sector {id}"
            );
        }
    }

    #[test]
    fn layout_serializes_kind_in_snake_case() {
        let layout = sector_layout(2).expect("sector 2");
        let json = serde_json::to_value(&layout.nodes[0]).expect("serialize");
        assert_eq!(json["kind"], "grid_node");
    }
}
