//! `solargrid locales` — supported languages and table coverage.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::i18n::Locale;

use crate::output::{OutputMode, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct LocaleRow {
    code: &'static str,
    native_name: &'static str,
    keys: usize,
    missing: usize,
    active: bool,
}

/// Report payload for `solargrid locales`.
#[derive(Debug, Serialize)]
pub struct LocalesReport {
    fallback: Locale,
    locales: Vec<LocaleRow>,
    #[serde(skip)]
    heading: String,
}

/// Execute `solargrid locales`.
pub fn run_locales(ctx: &AppContext, output: OutputMode) -> Result<()> {
    let catalog = ctx.catalog();
    let locales = Locale::ALL
        .into_iter()
        .map(|locale| LocaleRow {
            code: locale.code(),
            native_name: locale.native_name(),
            keys: catalog.table(locale).map_or(0, |t| t.len()),
            missing: catalog.missing_keys(locale).len(),
            active: locale == ctx.locale(),
        })
        .collect();

    let report = LocalesReport {
        fallback: catalog.fallback(),
        locales,
        heading: ctx.t("language").to_string(),
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &LocalesReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "code\tkeys\tmissing\tactive")?;
    for row in &report.locales {
        writeln!(w, "{}\t{}\t{}\t{}", row.code, row.keys, row.missing, row.active)?;
    }
    Ok(())
}

fn render_pretty(report: &LocalesReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &report.heading)?;
    for row in &report.locales {
        let marker = if row.active { '*' } else { ' ' };
        let coverage = if row.missing == 0 {
            String::from("complete")
        } else {
            format!("{} missing, falls back to {}", row.missing, report.fallback)
        };
        writeln!(
            w,
            "{marker} {:<3} {:<10} {:>3} keys  {coverage}",
            row.code, row.native_name, row.keys
        )?;
    }
    Ok(())
}
