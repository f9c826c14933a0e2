//! `solargrid portfolio` — owned assets, production history, forecast and
//! panel health.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::fixtures::{self, Asset, Forecast, MonthlyProduction, SolarHealth};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Default)]
struct Labels {
    assets: String,
    production: String,
    forecast: String,
    health: String,
    status: String,
    efficiency: String,
    maintenance: String,
    lifespan: String,
    status_value: String,
    maintenance_value: String,
    lifespan_value: String,
}

/// Report payload for `solargrid portfolio`.
#[derive(Debug, Serialize)]
pub struct PortfolioReport {
    assets: Vec<Asset>,
    monthly_production: Vec<MonthlyProduction>,
    forecast: Vec<Forecast>,
    health: SolarHealth,
    #[serde(skip)]
    labels: Labels,
}

/// Execute `solargrid portfolio`.
pub fn run_portfolio(ctx: &AppContext, output: OutputMode) -> Result<()> {
    let health = fixtures::solar_health();
    let labels = Labels {
        assets: ctx.t("my_assets").to_string(),
        production: ctx.t("my_production").to_string(),
        forecast: ctx.t("weather_forecast").to_string(),
        health: ctx.t("solar_health_prediction").to_string(),
        status: ctx.t("system_status").to_string(),
        efficiency: ctx.t("efficiency").to_string(),
        maintenance: ctx.t("next_maintenance").to_string(),
        lifespan: ctx.t("panel_lifespan").to_string(),
        status_value: ctx.t(health.status.label_key()).to_string(),
        maintenance_value: ctx.t(health.next_maintenance_key).to_string(),
        lifespan_value: ctx.t(health.lifespan_key).to_string(),
    };

    let report = PortfolioReport {
        assets: fixtures::assets(),
        monthly_production: fixtures::monthly_production(),
        forecast: fixtures::weather_forecast(),
        health,
        labels,
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &PortfolioReport, w: &mut dyn Write) -> std::io::Result<()> {
    for asset in &report.assets {
        writeln!(w, "asset\t{}\t{}\t{}\t{}", asset.id, asset.kind.label(), asset.capacity, asset.status)?;
    }
    for month in &report.monthly_production {
        writeln!(w, "production\t{}\t{}", month.month, month.kwh)?;
    }
    for day in &report.forecast {
        writeln!(w, "forecast\t{}\t{:?}\t{}", day.day, day.sky, day.temp_c)?;
    }
    writeln!(
        w,
        "health\t{}\t{}",
        report.health.status.label_key(),
        report.health.efficiency_pct
    )?;
    Ok(())
}

fn render_pretty(report: &PortfolioReport, w: &mut dyn Write) -> std::io::Result<()> {
    let labels = &report.labels;
    pretty_section(w, &labels.assets)?;
    for asset in &report.assets {
        writeln!(
            w,
            "{:<6} {:<15} {:<10} {}",
            asset.id,
            asset.kind.label(),
            asset.capacity,
            asset.status
        )?;
    }

    writeln!(w)?;
    pretty_section(w, &labels.production)?;
    for month in &report.monthly_production {
        writeln!(w, "{:<4} {:>5} kWh", month.month, month.kwh)?;
    }

    writeln!(w)?;
    pretty_section(w, &labels.forecast)?;
    for day in &report.forecast {
        writeln!(w, "{:<4} {:<14} {:>3}°C", day.day, format!("{:?}", day.sky), day.temp_c)?;
    }

    writeln!(w)?;
    pretty_section(w, &labels.health)?;
    pretty_kv(w, &labels.status, &labels.status_value)?;
    pretty_kv(w, &labels.efficiency, format!("{:.1}%", report.health.efficiency_pct))?;
    pretty_kv(w, &labels.maintenance, &labels.maintenance_value)?;
    pretty_kv(w, &labels.lifespan, &labels.lifespan_value)?;
    Ok(())
}
