//! `solargrid city` — the 3x3 city overview.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::grid::{self, CityOverview, CityTile};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Report payload for `solargrid city`.
#[derive(Debug, Serialize)]
pub struct CityReport {
    #[serde(flatten)]
    overview: CityOverview,
    surplus_gw: f64,
    #[serde(skip)]
    labels: [String; 4],
}

/// Execute `solargrid city`.
pub fn run_city(ctx: &AppContext, output: OutputMode) -> Result<()> {
    let overview = grid::city_overview();
    let report = CityReport {
        surplus_gw: overview.surplus_gw(),
        overview,
        labels: [
            ctx.t("city_overview").to_string(),
            ctx.t("total_production").to_string(),
            ctx.t("total_grid_load").to_string(),
            ctx.t("surplus_deficit").to_string(),
        ],
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn tile_cell(tile: &CityTile) -> String {
    match tile {
        CityTile::Hub { .. } => "HUB".to_string(),
        CityTile::Sector { label, surplus, .. } => {
            format!("{label}{}", if *surplus { '+' } else { '-' })
        }
    }
}

fn render_text(report: &CityReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "index\tkind\tlabel\tsurplus")?;
    for tile in &report.overview.tiles {
        match tile {
            CityTile::Hub { index } => writeln!(w, "{index}\thub\t-\t-")?,
            CityTile::Sector {
                index,
                label,
                surplus,
            } => writeln!(w, "{index}\tsector\t{label}\t{surplus}")?,
        }
    }
    Ok(())
}

fn render_pretty(report: &CityReport, w: &mut dyn Write) -> std::io::Result<()> {
    let [heading, production, load, balance] = &report.labels;
    pretty_section(w, heading)?;
    for row in report.overview.tiles.chunks(3) {
        let line = row
            .iter()
            .map(|tile| format!("[{:^6}]", tile_cell(tile)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(w, "{line}")?;
    }
    writeln!(w)?;
    pretty_kv(w, production, format!("{:.2} GW", report.overview.production_gw))?;
    pretty_kv(w, load, format!("{:.2} GW", report.overview.consumption_gw))?;
    pretty_kv(w, balance, format!("{:+.2} GW", report.surplus_gw))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_cell_is_marked() {
        assert_eq!(tile_cell(&CityTile::Hub { index: 4 }), "HUB");
        let cell = tile_cell(&CityTile::Sector {
            index: 0,
            label: "S-1".into(),
            surplus: false,
        });
        assert_eq!(cell, "S-1-");
    }
}
