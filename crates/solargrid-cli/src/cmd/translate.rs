//! `solargrid translate` — look up one string in the active locale.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::i18n::{self, Locale};

use crate::output::{OutputMode, pretty_kv, render_mode};

/// Arguments for `solargrid translate`.
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Translation key, e.g. `sector_map`.
    pub key: String,

    /// Placeholder value as `name=value`; fills `{{name}}`. Repeatable.
    #[arg(long = "param", short = 'p')]
    pub params: Vec<String>,
}

/// Where the returned string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Active,
    Fallback,
    Key,
}

/// Report payload for `solargrid translate`.
#[derive(Debug, Serialize)]
pub struct TranslateReport {
    locale: Locale,
    key: String,
    value: String,
    source: Source,
}

fn source_of(ctx: &AppContext, key: &str) -> Source {
    let has = |locale: Locale| {
        ctx.catalog()
            .table(locale)
            .and_then(|t| t.get(key))
            .is_some_and(|v| !v.is_empty())
    };
    if has(ctx.locale()) {
        Source::Active
    } else if has(ctx.catalog().fallback()) {
        Source::Fallback
    } else {
        Source::Key
    }
}

/// Execute `solargrid translate`.
pub fn run_translate(args: &TranslateArgs, ctx: &AppContext, output: OutputMode) -> Result<()> {
    let params = args
        .params
        .iter()
        .map(|raw| i18n::parse_param(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let borrowed: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let report = TranslateReport {
        locale: ctx.locale(),
        key: args.key.clone(),
        value: ctx
            .catalog()
            .translate_with(ctx.locale(), &args.key, &borrowed),
        source: source_of(ctx, &args.key),
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &TranslateReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", report.value)
}

fn render_pretty(report: &TranslateReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_kv(w, "Key", &report.key)?;
    pretty_kv(w, "Locale", report.locale.code())?;
    pretty_kv(w, "Value", &report.value)?;
    let source = match report.source {
        Source::Active => "active locale",
        Source::Fallback => "fallback locale",
        Source::Key => "untranslated key",
    };
    pretty_kv(w, "Source", source)
}
