//! Fixed demo datasets shown on the dashboard, market, wallet and portfolio
//! pages.
//!
//! None of these values come from a live source. Money is kept in paise
//! (1/100 INR) and energy in whole kWh so totals are exact.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CoreError;

/// A headline figure with its week-over-week change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    /// Translation key for the card title.
    pub title_key: &'static str,
    pub value: &'static str,
    /// Signed change in percent.
    pub change_pct: f64,
}

/// One day of the production vs. consumption chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyEnergy {
    pub day: &'static str,
    pub production_kwh: u32,
    pub consumption_kwh: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Translation key for the side.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// A recently matched trade on the dashboard feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTrade {
    pub id: &'static str,
    pub side: TradeSide,
    pub energy_kwh: u32,
    pub price_paise: i64,
    pub minutes_ago: u32,
}

/// An open order on the marketplace board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub id: &'static str,
    pub side: TradeSide,
    /// Price per kWh.
    pub price_paise: i64,
    pub energy_kwh: u32,
}

impl Offer {
    /// Price times quantity.
    #[must_use]
    pub fn total_paise(&self) -> i64 {
        self.price_paise * i64::from(self.energy_kwh)
    }
}

/// Window of the price-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Timeframe {
    /// Daily prices for the past week.
    #[default]
    #[serde(rename = "7d")]
    Week,
    /// Weekly prices for the past month.
    #[serde(rename = "1m")]
    Month,
}

impl Timeframe {
    /// Translation key for the toggle label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Week => "past_7_days",
            Self::Month => "past_1_month",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "1m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" | "week" => Ok(Self::Week),
            "1m" | "month" => Ok(Self::Month),
            _ => Err(CoreError::InvalidTimeframe(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricePoint {
    pub label: &'static str,
    pub price_paise: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TradeSell,
    TradeBuy,
}

impl TransactionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::TradeSell => "Trade (Sell)",
            Self::TradeBuy => "Trade (Buy)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl TransactionStatus {
    /// Translation key for the status badge.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Completed => "status_completed",
            Self::Pending => "status_pending",
        }
    }
}

/// A wallet ledger row. Outgoing trade payments carry a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: &'static str,
    pub kind: TransactionKind,
    pub amount_paise: i64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub balance_paise: i64,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    SolarPanel,
    Battery,
    EnergyCredits,
}

impl AssetKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SolarPanel => "Solar Panel",
            Self::Battery => "Battery",
            Self::EnergyCredits => "Energy Credits",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: &'static str,
    pub kind: AssetKind,
    pub capacity: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyProduction {
    pub month: &'static str,
    pub kwh: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Sunny,
    PartlyCloudy,
    Rain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Forecast {
    pub day: &'static str,
    pub sky: Sky,
    pub temp_c: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Normal,
    Degraded,
}

impl HealthStatus {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Normal => "all_systems_normal",
            Self::Degraded => "degraded_performance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarHealth {
    pub status: HealthStatus,
    pub efficiency_pct: f64,
    /// Translation key for the maintenance window.
    pub next_maintenance_key: &'static str,
    /// Translation key for the remaining panel lifespan.
    pub lifespan_key: &'static str,
}

#[must_use]
pub fn kpis() -> Vec<Kpi> {
    vec![
        Kpi {
            title_key: "energy_production",
            value: "1.21 GW",
            change_pct: 5.2,
        },
        Kpi {
            title_key: "energy_consumption",
            value: "890 MW",
            change_pct: 1.5,
        },
        Kpi {
            title_key: "credits_earned",
            value: "₹3,450",
            change_pct: 12.1,
        },
        Kpi {
            title_key: "market_activity",
            value: "189 Trades",
            change_pct: -2.0,
        },
    ]
}

#[must_use]
pub fn weekly_energy() -> Vec<DailyEnergy> {
    [
        ("Mon", 400, 500),
        ("Tue", 500, 450),
        ("Wed", 600, 550),
        ("Thu", 800, 700),
        ("Fri", 900, 750),
        ("Sat", 700, 800),
        ("Sun", 600, 700),
    ]
    .into_iter()
    .map(|(day, production_kwh, consumption_kwh)| DailyEnergy {
        day,
        production_kwh,
        consumption_kwh,
    })
    .collect()
}

#[must_use]
pub fn recent_trades() -> Vec<RecentTrade> {
    vec![
        RecentTrade {
            id: "T001",
            side: TradeSide::Buy,
            energy_kwh: 50,
            price_paise: 750,
            minutes_ago: 2,
        },
        RecentTrade {
            id: "T002",
            side: TradeSide::Sell,
            energy_kwh: 120,
            price_paise: 810,
            minutes_ago: 10,
        },
        RecentTrade {
            id: "T003",
            side: TradeSide::Buy,
            energy_kwh: 75,
            price_paise: 765,
            minutes_ago: 23,
        },
    ]
}

#[must_use]
pub fn open_offers() -> Vec<Offer> {
    vec![
        Offer {
            id: "S001",
            side: TradeSide::Sell,
            price_paise: 815,
            energy_kwh: 500,
        },
        Offer {
            id: "B001",
            side: TradeSide::Buy,
            price_paise: 810,
            energy_kwh: 1000,
        },
        Offer {
            id: "S002",
            side: TradeSide::Sell,
            price_paise: 820,
            energy_kwh: 200,
        },
    ]
}

#[must_use]
pub fn price_history(timeframe: Timeframe) -> Vec<PricePoint> {
    let points: &[(&'static str, i64)] = match timeframe {
        Timeframe::Week => &[
            ("Mon", 750),
            ("Tue", 765),
            ("Wed", 755),
            ("Thu", 780),
            ("Fri", 775),
            ("Sat", 800),
            ("Sun", 790),
        ],
        Timeframe::Month => &[("W1", 720), ("W2", 750), ("W3", 780), ("W4", 790)],
    };
    points
        .iter()
        .map(|&(label, price_paise)| PricePoint { label, price_paise })
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[must_use]
pub fn wallet() -> Wallet {
    let completed = TransactionStatus::Completed;
    Wallet {
        balance_paise: 1_245_000,
        transactions: vec![
            Transaction {
                id: "TX001",
                kind: TransactionKind::Deposit,
                amount_paise: 500_000,
                date: date(2025, 10, 28),
                status: completed,
            },
            Transaction {
                id: "TX002",
                kind: TransactionKind::Withdraw,
                amount_paise: 150_000,
                date: date(2025, 10, 25),
                status: completed,
            },
            Transaction {
                id: "TX003",
                kind: TransactionKind::TradeSell,
                amount_paise: 81_000,
                date: date(2025, 10, 24),
                status: completed,
            },
            Transaction {
                id: "TX004",
                kind: TransactionKind::TradeBuy,
                amount_paise: -40_750,
                date: date(2025, 10, 22),
                status: completed,
            },
            Transaction {
                id: "TX005",
                kind: TransactionKind::Deposit,
                amount_paise: 1_000_000,
                date: date(2025, 10, 20),
                status: completed,
            },
        ],
    }
}

#[must_use]
pub fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "A001",
            kind: AssetKind::SolarPanel,
            capacity: "5 kW",
            status: "Online",
        },
        Asset {
            id: "B002",
            kind: AssetKind::Battery,
            capacity: "10 kWh",
            status: "Charging",
        },
        Asset {
            id: "C003",
            kind: AssetKind::EnergyCredits,
            capacity: "1,250",
            status: "Available",
        },
    ]
}

#[must_use]
pub fn monthly_production() -> Vec<MonthlyProduction> {
    [
        ("Jan", 500),
        ("Feb", 600),
        ("Mar", 800),
        ("Apr", 700),
        ("May", 900),
        ("Jun", 800),
        ("Jul", 600),
        ("Aug", 700),
        ("Sep", 500),
        ("Oct", 800),
        ("Nov", 900),
        ("Dec", 1000),
    ]
    .into_iter()
    .map(|(month, kwh)| MonthlyProduction { month, kwh })
    .collect()
}

#[must_use]
pub fn weather_forecast() -> Vec<Forecast> {
    [
        ("Mon", Sky::PartlyCloudy, 28),
        ("Tue", Sky::Sunny, 30),
        ("Wed", Sky::Rain, 25),
        ("Thu", Sky::PartlyCloudy, 27),
        ("Fri", Sky::Sunny, 31),
    ]
    .into_iter()
    .map(|(day, sky, temp_c)| Forecast { day, sky, temp_c })
    .collect()
}

#[must_use]
pub const fn solar_health() -> SolarHealth {
    SolarHealth {
        status: HealthStatus::Normal,
        efficiency_pct: 98.5,
        next_maintenance_key: "in_3_months",
        lifespan_key: "years_remaining",
    }
}

/// Format paise as rupees with thousands separators, e.g. `₹12,450.00`.
#[must_use]
pub fn format_inr(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let abs = paise.unsigned_abs();
    let rupees = abs / 100;
    let fraction = abs % 100;
    format!("{sign}₹{}.{fraction:02}", group_thousands(rupees))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_totals_match_board() {
        let totals: Vec<String> = open_offers()
            .iter()
            .map(|o| format_inr(o.total_paise()))
            .collect();
        assert_eq!(totals, ["₹4,075.00", "₹8,100.00", "₹1,640.00"]);
    }

    #[test]
    fn inr_formatting() {
        assert_eq!(format_inr(0), "₹0.00");
        assert_eq!(format_inr(750), "₹7.50");
        assert_eq!(format_inr(1_245_000), "₹12,450.00");
        assert_eq!(format_inr(-40_750), "-₹407.50");
        assert_eq!(format_inr(123_456_789), "₹1,234,567.89");
    }

    #[test]
    fn timeframe_parses_codes_and_words() {
        assert_eq!("7d".parse::<Timeframe>(), Ok(Timeframe::Week));
        assert_eq!("1M".parse::<Timeframe>(), Ok(Timeframe::Month));
        assert_eq!("month".parse::<Timeframe>(), Ok(Timeframe::Month));
        assert_eq!(
            "1y".parse::<Timeframe>(),
            Err(CoreError::InvalidTimeframe("1y".into()))
        );
    }

    #[test]
    fn price_history_lengths() {
        assert_eq!(price_history(Timeframe::Week).len(), 7);
        assert_eq!(price_history(Timeframe::Month).len(), 4);
        assert_eq!(price_history(Timeframe::Month)[3].price_paise, 790);
    }

    #[test]
    fn wallet_is_newest_first_with_valid_dates() {
        let wallet = wallet();
        assert_eq!(wallet.transactions.len(), 5);
        assert!(
            wallet
                .transactions
                .windows(2)
                .all(|pair| pair[0].date > pair[1].date)
        );
        assert_eq!(wallet.transactions[3].amount_paise, -40_750);
        assert_eq!(wallet.transactions[0].date.to_string(), "2025-10-28");
    }

    #[test]
    fn weekly_series_covers_the_week() {
        let days: Vec<&str> = weekly_energy().iter().map(|d| d.day).collect();
        assert_eq!(days, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
        let deficit_days = weekly_energy()
            .iter()
            .filter(|d| d.consumption_kwh > d.production_kwh)
            .count();
        assert_eq!(deficit_days, 3);
    }

    #[test]
    fn monthly_production_total() {
        let total: u32 = monthly_production().iter().map(|m| m.kwh).sum();
        assert_eq!(total, 8_800);
    }

    #[test]
    fn timeframe_serializes_as_code() {
        let json = serde_json::to_value(Timeframe::Month).expect("serialize");
        assert_eq!(json, "1m");
    }
}
