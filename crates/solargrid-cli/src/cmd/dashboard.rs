//! `solargrid dashboard` — headline figures, the weekly energy chart and the
//! recent trade feed.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::fixtures::{self, DailyEnergy, Kpi, RecentTrade};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct KpiRow {
    #[serde(flatten)]
    kpi: Kpi,
    title: String,
}

#[derive(Debug, Serialize)]
struct TradeRow {
    #[serde(flatten)]
    trade: RecentTrade,
    side_label: String,
}

/// Report payload for `solargrid dashboard`.
#[derive(Debug, Serialize)]
pub struct DashboardReport {
    kpis: Vec<KpiRow>,
    weekly_energy: Vec<DailyEnergy>,
    recent_trades: Vec<TradeRow>,
    #[serde(skip)]
    headings: [String; 3],
}

/// Execute `solargrid dashboard`.
pub fn run_dashboard(ctx: &AppContext, output: OutputMode) -> Result<()> {
    let kpis = fixtures::kpis()
        .into_iter()
        .map(|kpi| KpiRow {
            title: ctx.t(kpi.title_key).to_string(),
            kpi,
        })
        .collect();
    let recent_trades = fixtures::recent_trades()
        .into_iter()
        .map(|trade| TradeRow {
            side_label: ctx.t(trade.side.label_key()).to_string(),
            trade,
        })
        .collect();

    let report = DashboardReport {
        kpis,
        weekly_energy: fixtures::weekly_energy(),
        recent_trades,
        headings: [
            ctx.t("dashboard").to_string(),
            ctx.t("production_vs_consumption").to_string(),
            ctx.t("recent_market_activity").to_string(),
        ],
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &DashboardReport, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &report.kpis {
        writeln!(w, "kpi\t{}\t{}\t{}", row.kpi.title_key, row.kpi.value, row.kpi.change_pct)?;
    }
    for day in &report.weekly_energy {
        writeln!(w, "energy\t{}\t{}\t{}", day.day, day.production_kwh, day.consumption_kwh)?;
    }
    for row in &report.recent_trades {
        let t = &row.trade;
        writeln!(
            w,
            "trade\t{}\t{}\t{}\t{}\t{}",
            t.id,
            t.side.label_key(),
            t.energy_kwh,
            fixtures::format_inr(t.price_paise),
            t.minutes_ago
        )?;
    }
    Ok(())
}

fn render_pretty(report: &DashboardReport, w: &mut dyn Write) -> std::io::Result<()> {
    let [dashboard, chart, feed] = &report.headings;
    pretty_section(w, dashboard)?;
    for row in &report.kpis {
        pretty_kv(w, &row.title, format!("{} ({:+.1}%)", row.kpi.value, row.kpi.change_pct))?;
    }

    writeln!(w)?;
    pretty_section(w, chart)?;
    for day in &report.weekly_energy {
        writeln!(
            w,
            "{:<4} {:>5} kWh / {:>5} kWh",
            day.day, day.production_kwh, day.consumption_kwh
        )?;
    }

    writeln!(w)?;
    pretty_section(w, feed)?;
    for row in &report.recent_trades {
        let t = &row.trade;
        writeln!(
            w,
            "{:<8} {:<6} {:>4} kWh @ {:>8}/kWh  {} min",
            t.id,
            row.side_label,
            t.energy_kwh,
            fixtures::format_inr(t.price_paise),
            t.minutes_ago
        )?;
    }
    Ok(())
}
