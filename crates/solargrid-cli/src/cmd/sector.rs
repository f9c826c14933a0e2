//! `solargrid sector <id>` — the house and grid-node layout of one sector.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::grid::{self, GridSite, LayoutTotals, SiteKind};

use crate::output::{OutputMode, kw1, pretty_kv, pretty_section, render_mode};

/// Arguments for `solargrid sector`.
#[derive(Args, Debug)]
pub struct SectorArgs {
    /// Sector id, starting at 1.
    pub id: u32,
}

#[derive(Debug, Default)]
struct Labels {
    heading: String,
    houses: String,
    grid_nodes: String,
    production: String,
    load: String,
    house: String,
    grid_node: String,
}

/// Report payload for `solargrid sector`.
#[derive(Debug, Serialize)]
pub struct SectorReport {
    sector_id: u32,
    totals: LayoutTotals,
    houses: Vec<GridSite>,
    nodes: Vec<GridSite>,
    #[serde(skip)]
    labels: Labels,
}

/// Execute `solargrid sector`.
pub fn run_sector(args: &SectorArgs, ctx: &AppContext, output: OutputMode) -> Result<()> {
    let layout = grid::sector_layout(args.id)
        .with_context(|| format!("Failed to lay out sector {}", args.id))?;

    let labels = Labels {
        heading: sector_heading(ctx.t("sector_map"), args.id),
        houses: ctx.t("houses").to_string(),
        grid_nodes: ctx.t("grid_nodes").to_string(),
        production: ctx.t("production").to_string(),
        load: ctx.t("load").to_string(),
        house: ctx.t(SiteKind::House.label_key()).to_string(),
        grid_node: ctx.t(SiteKind::GridNode.label_key()).to_string(),
    };
    let report = SectorReport {
        sector_id: layout.sector_id,
        totals: layout.totals(),
        houses: layout.houses,
        nodes: layout.nodes,
        labels,
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn sector_heading(title: &str, sector_id: u32) -> String {
    format!("{title}: {sector_id}")
}

fn render_text(report: &SectorReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "id\tkind\tx_pct\ty_pct\tproduction_kw\tload_kw")?;
    for site in report.houses.iter().chain(&report.nodes) {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            site.id,
            site.kind.label_key(),
            site.x_pct,
            site.y_pct,
            kw1(site.production_kw),
            kw1(site.load_kw)
        )?;
    }
    Ok(())
}

fn render_pretty(report: &SectorReport, w: &mut dyn Write) -> std::io::Result<()> {
    let labels = &report.labels;
    pretty_section(w, &labels.heading)?;
    pretty_kv(w, &labels.houses, report.totals.houses.to_string())?;
    pretty_kv(w, &labels.grid_nodes, report.totals.grid_nodes.to_string())?;
    pretty_kv(w, &labels.production, format!("{} kW", kw1(report.totals.production_kw)))?;
    pretty_kv(w, &labels.load, format!("{} kW", kw1(report.totals.load_kw)))?;
    writeln!(w)?;

    for house in &report.houses {
        writeln!(
            w,
            "{:<8} {:<10} ({:>2}%, {:>2}%)  {}: {} kW  {}: {} kW",
            house.id,
            labels.house,
            house.x_pct,
            house.y_pct,
            labels.production,
            kw1(house.production_kw),
            labels.load,
            kw1(house.load_kw)
        )?;
    }
    for node in &report.nodes {
        writeln!(
            w,
            "{:<8} {:<10} ({:>2}%, {:>2}%)  {}: {} kW",
            node.id,
            labels.grid_node,
            node.x_pct,
            node.y_pct,
            labels.load,
            kw1(node.load_kw)
        )?;
    }
    Ok(())
}
