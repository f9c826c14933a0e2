//! `solargrid map` — the live map of sector surplus/deficit tiles.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::grid::{self, MAX_SECTOR_COUNT, SectorReading};

use crate::output::{OutputMode, kw0, pretty_section, render_mode};

const TILES_PER_ROW: usize = 5;

/// Arguments for `solargrid map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Number of sectors to show (at most 10000). Defaults to `map.sectors`
    /// from config.
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_SECTOR_COUNT)))]
    pub sectors: Option<u32>,
}

/// Report payload for `solargrid map`.
#[derive(Debug, Serialize)]
pub struct MapReport {
    sectors: Vec<SectorReading>,
    surplus_count: usize,
    #[serde(skip)]
    title: String,
    #[serde(skip)]
    legend: [String; 2],
}

/// Execute `solargrid map`.
pub fn run_map(args: &MapArgs, ctx: &AppContext, output: OutputMode) -> Result<()> {
    let count = args.sectors.unwrap_or_else(|| ctx.config().sectors());
    let sectors = grid::live_map(count);
    let surplus_count = sectors.iter().filter(|s| s.surplus).count();

    let report = MapReport {
        sectors,
        surplus_count,
        title: ctx.t("live_map").to_string(),
        legend: [
            ctx.t("production").to_string(),
            ctx.t("load").to_string(),
        ],
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &MapReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "sector\tproduction_kw\tconsumption_kw\tsurplus")?;
    for s in &report.sectors {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            s.sector_id,
            kw0(s.production_kw),
            kw0(s.consumption_kw),
            s.surplus
        )?;
    }
    Ok(())
}

fn render_pretty(report: &MapReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "{} ({}/{} surplus)",
            report.title,
            report.surplus_count,
            report.sectors.len()
        ),
    )?;
    for row in report.sectors.chunks(TILES_PER_ROW) {
        let line = row
            .iter()
            .map(|s| format!("[{:>3}{}]", s.sector_id, if s.surplus { '+' } else { '-' }))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(w, "{line}")?;
    }
    writeln!(w)?;
    let [production, load] = &report.legend;
    for s in &report.sectors {
        writeln!(
            w,
            "{:>4}  {production}: {:>3} kW  {load}: {:>3} kW",
            s.sector_id,
            kw0(s.production_kw),
            kw0(s.consumption_kw),
        )?;
    }
    Ok(())
}
