//! `solargrid market` — open offers and the price-history chart.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::fixtures::{self, Offer, PricePoint, Timeframe};

use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `solargrid market`.
#[derive(Args, Debug)]
pub struct MarketArgs {
    /// Price-history window: `7d` (week) or `1m` (month).
    #[arg(long, short = 't', default_value = "7d")]
    pub timeframe: String,
}

#[derive(Debug, Serialize)]
struct OfferRow {
    #[serde(flatten)]
    offer: Offer,
    total_paise: i64,
    #[serde(skip)]
    side_label: String,
}

/// Report payload for `solargrid market`.
#[derive(Debug, Serialize)]
pub struct MarketReport {
    timeframe: Timeframe,
    price_history: Vec<PricePoint>,
    offers: Vec<OfferRow>,
    #[serde(skip)]
    headings: [String; 3],
}

/// Execute `solargrid market`.
pub fn run_market(args: &MarketArgs, ctx: &AppContext, output: OutputMode) -> Result<()> {
    let timeframe: Timeframe = args.timeframe.parse()?;

    let offers = fixtures::open_offers()
        .into_iter()
        .map(|offer| OfferRow {
            total_paise: offer.total_paise(),
            side_label: ctx.t(offer.side.label_key()).to_string(),
            offer,
        })
        .collect();

    let report = MarketReport {
        timeframe,
        price_history: fixtures::price_history(timeframe),
        offers,
        headings: [
            ctx.t("marketplace").to_string(),
            format!("{} ({})", ctx.t("price_history"), ctx.t(timeframe.label_key())),
            ctx.t("total_inr").to_string(),
        ],
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &MarketReport, w: &mut dyn Write) -> std::io::Result<()> {
    for point in &report.price_history {
        writeln!(w, "price\t{}\t{}", point.label, fixtures::format_inr(point.price_paise))?;
    }
    for row in &report.offers {
        let o = &row.offer;
        writeln!(
            w,
            "offer\t{}\t{}\t{}\t{}\t{}",
            o.id,
            o.side.label_key(),
            o.energy_kwh,
            fixtures::format_inr(o.price_paise),
            fixtures::format_inr(row.total_paise)
        )?;
    }
    Ok(())
}

fn render_pretty(report: &MarketReport, w: &mut dyn Write) -> std::io::Result<()> {
    let [market, history, total] = &report.headings;
    pretty_section(w, market)?;
    for row in &report.offers {
        let o = &row.offer;
        writeln!(
            w,
            "{:<8} {:<6} {:>4} kWh @ {:>8}  {total}: {}",
            o.id,
            row.side_label,
            o.energy_kwh,
            fixtures::format_inr(o.price_paise),
            fixtures::format_inr(row.total_paise)
        )?;
    }

    writeln!(w)?;
    pretty_section(w, history)?;
    for point in &report.price_history {
        writeln!(w, "{:<8} {:>8}", point.label, fixtures::format_inr(point.price_paise))?;
    }
    Ok(())
}
