//! `solargrid wallet` — balance and transaction ledger.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solargrid_core::context::AppContext;
use solargrid_core::fixtures::{self, Transaction};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct TransactionRow {
    #[serde(flatten)]
    tx: Transaction,
    #[serde(skip)]
    status_label: String,
}

/// Report payload for `solargrid wallet`.
#[derive(Debug, Serialize)]
pub struct WalletReport {
    balance_paise: i64,
    balance: String,
    transactions: Vec<TransactionRow>,
    #[serde(skip)]
    headings: [String; 3],
}

/// Execute `solargrid wallet`.
pub fn run_wallet(ctx: &AppContext, output: OutputMode) -> Result<()> {
    let wallet = fixtures::wallet();
    let transactions = wallet
        .transactions
        .into_iter()
        .map(|tx| TransactionRow {
            status_label: ctx.t(tx.status.label_key()).to_string(),
            tx,
        })
        .collect();

    let report = WalletReport {
        balance_paise: wallet.balance_paise,
        balance: fixtures::format_inr(wallet.balance_paise),
        transactions,
        headings: [
            ctx.t("wallet").to_string(),
            ctx.t("current_balance").to_string(),
            ctx.t("recent_transactions").to_string(),
        ],
    };
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &WalletReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "balance\t{}", report.balance)?;
    for row in &report.transactions {
        let tx = &row.tx;
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            tx.id,
            tx.date,
            tx.kind.label(),
            fixtures::format_inr(tx.amount_paise),
            tx.status.label_key()
        )?;
    }
    Ok(())
}

fn render_pretty(report: &WalletReport, w: &mut dyn Write) -> std::io::Result<()> {
    let [wallet, balance, recent] = &report.headings;
    pretty_section(w, wallet)?;
    pretty_kv(w, balance, &report.balance)?;

    writeln!(w)?;
    pretty_section(w, recent)?;
    for row in &report.transactions {
        let tx = &row.tx;
        writeln!(
            w,
            "{:<6} {}  {:<14} {:>12}  {}",
            tx.id,
            tx.date.format("%d %b %Y"),
            tx.kind.label(),
            fixtures::format_inr(tx.amount_paise),
            row.status_label
        )?;
    }
    Ok(())
}
