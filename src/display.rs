//! Console rendering
//!
//! Styled terminal output for every panel state. Rendering never
//! inspects a panel's internals - it only pattern-matches the public
//! `FetchState`, so a panel failure draws a warning box and a retry
//! hint instead of tearing the dashboard down.

use crate::api::{MarketAnalytics, PoolMetrics, PricePrediction, TokenMetrics};
use crate::fetch::FetchState;
use crate::forecast::ForecastPoint;
use crate::sections::{Section, SectionTracker};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// ============================================
// NUMBER FORMATTING
// ============================================

/// Compact USD rendering: $1.23B, $45.67M, $8.90K, $123.45.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{sign}${:.2}B", magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{sign}${:.2}M", magnitude / 1e6)
    } else if magnitude >= 1e3 {
        format!("{sign}${:.2}K", magnitude / 1e3)
    } else {
        format!("{sign}${magnitude:.2}")
    }
}

/// Whole-number counts with thousands separators.
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Signed percentage with two decimals, e.g. "+4.20%".
pub fn format_change(value: f64) -> String {
    format!("{}{:.2}%", if value >= 0.0 { "+" } else { "" }, value)
}

fn styled_change(value: f64) -> String {
    if value >= 0.0 {
        style(format_change(value)).green().to_string()
    } else {
        style(format_change(value)).red().to_string()
    }
}

fn optional_usd(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| "N/A".to_string())
}

// ============================================
// CHROME
// ============================================

pub fn print_banner() {
    println!();
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!(
        "{}",
        style(" 📊 BLOCKPULSE - Market Analytics Dashboard").cyan().bold()
    );
    println!(
        "{}",
        style("    Tokens | Pools | Predictions | Staking Desk").cyan()
    );
    println!(
        "{}",
        style("═══════════════════════════════════════════════════════════════").cyan()
    );
    println!();
}

/// Navigation line with the active section highlighted.
pub fn print_nav(tracker: &SectionTracker) {
    let entries: Vec<String> = Section::ALL
        .iter()
        .map(|section| {
            if *section == tracker.active() {
                style(format!("▸ {section}")).cyan().bold().to_string()
            } else {
                style(section.to_string()).dim().to_string()
            }
        })
        .collect();
    println!("{}", entries.join("  |  "));
    println!();
}

pub fn section_header(section: Section) {
    println!();
    println!("{}", style(format!("═══ {} ═══", section.title())).blue().bold());
    println!();
}

/// Spinner shown while a panel is loading.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn print_error(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
    println!("  {}", style("(use `retry` to try again)").dim());
}

fn print_loading() {
    println!("{}", style("… loading").dim());
}

// ============================================
// PANEL RENDERERS
// ============================================

pub fn render_market(state: &FetchState<MarketAnalytics>) {
    match state {
        FetchState::Idle => println!("{}", style("Select a blockchain to begin.").dim()),
        FetchState::Loading => print_loading(),
        FetchState::Error(message) => print_error(message),
        FetchState::Success(report) => {
            println!(
                "Chain: {}  (updated {})",
                style(&report.blockchain).cyan(),
                report.updated_at
            );
            println!(
                "  Volume:       {:>12}  {}",
                format_usd(report.volume),
                styled_change(report.volume_change)
            );
            println!(
                "  Sales:        {:>12}  {}",
                format_count(report.sales),
                styled_change(report.sales_change)
            );
            println!(
                "  Transactions: {:>12}  {}",
                format_count(report.transactions),
                styled_change(report.transactions_change)
            );
            println!(
                "  Transfers:    {:>12}  {}",
                format_count(report.transfers),
                styled_change(report.transfers_change)
            );
        }
    }
}

pub fn render_token_metrics(state: &FetchState<TokenMetrics>) {
    match state {
        FetchState::Idle => println!(
            "{}",
            style("Enter your token address to analyze metrics.").dim()
        ),
        FetchState::Loading => print_loading(),
        FetchState::Error(message) => print_error(message),
        FetchState::Success(metrics) => {
            println!("Metrics for {}", style(metrics.display_name()).cyan().bold());
            println!(
                "  Current Price:      {:>12}",
                format_usd(metrics.current_price)
            );
            println!("  24h High:           {:>12}", format_usd(metrics.high_24hr));
            println!(
                "  24h Volume:         {:>12}",
                format_usd(metrics.trading_volume_24hr)
            );
            println!(
                "  Market Cap:         {:>12}",
                optional_usd(metrics.market_cap)
            );
            println!(
                "  Circulating Supply: {:>12}",
                format_count(metrics.circulating_supply)
            );
            println!(
                "  Total Supply:       {:>12}",
                format_count(metrics.total_supply)
            );
            println!(
                "  Holders:            {:>12}",
                format_count(metrics.holders as f64)
            );
            println!("  Token Age Score:    {:>12.1}", metrics.token_age_score);
            println!("  Traders Score:      {:>12.1}", metrics.traders_score);
        }
    }
}

pub fn render_pool_metrics(state: &FetchState<PoolMetrics>) {
    match state {
        FetchState::Idle => println!("{}", style("Enter a pair address to begin.").dim()),
        FetchState::Loading => print_loading(),
        FetchState::Error(message) => print_error(message),
        FetchState::Success(metrics) => {
            println!("Pool {}", style(metrics.pair_label()).cyan().bold());
            println!("  Total TVL:     {:>12}", format_usd(metrics.total_tvl));
            println!(
                "  {} reserve: {}  (TVL {})",
                metrics.token0,
                format_count(metrics.token0_reserve),
                format_usd(metrics.token0_tvl)
            );
            println!(
                "  {} reserve: {}  (TVL {})",
                metrics.token1,
                format_count(metrics.token1_reserve),
                format_usd(metrics.token1_tvl)
            );
            println!(
                "  24h Volume:    {:>12}  {}",
                format_usd(metrics.volume_24hrs),
                metrics
                    .volume_24hrs_change
                    .map(styled_change)
                    .unwrap_or_else(|| "N/A".to_string())
            );
            println!(
                "  24h Txns:      {:>12}  {}",
                format_count(metrics.transactions_24hrs),
                styled_change(metrics.transactions_24hrs_change)
            );
        }
    }
}

pub fn render_predictions(state: &FetchState<Vec<PricePrediction>>) {
    match state {
        FetchState::Idle => println!("{}", style("Enter a token address to begin.").dim()),
        FetchState::Loading => print_loading(),
        FetchState::Error(message) => print_error(message),
        FetchState::Success(rows) => {
            let symbol = rows
                .first()
                .map(|row| row.token_symbol.as_str())
                .unwrap_or("?");
            println!(
                "Prediction series for {} ({} rows)",
                style(symbol).cyan().bold(),
                rows.len()
            );
            println!("  {:<12} {:>10} {:>10} {:>10} {:>10}", "date", "open", "pred", "low", "high");
            for row in rows.iter().take(10) {
                println!(
                    "  {:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    row.block_date, row.open, row.prediction, row.prediction_lb, row.prediction_ub
                );
            }
            if rows.len() > 10 {
                println!("  {}", style(format!("… {} more rows", rows.len() - 10)).dim());
            }
        }
    }
}

pub fn render_forecast(state: &FetchState<Vec<ForecastPoint>>) {
    match state {
        FetchState::Idle => println!(
            "{}",
            style("Run `forecast` to generate the 10-day outlook.").dim()
        ),
        FetchState::Loading => print_loading(),
        FetchState::Error(message) => print_error(message),
        FetchState::Success(points) => {
            println!("{}", style("10-day model forecast").cyan().bold());
            for point in points {
                println!("  {:<12} {:>10}", point.date, format_usd(point.predicted_price));
            }
        }
    }
}

// ============================================
// TESTS
// ============================================
