//! blockpulse - Terminal Market Analytics Dashboard
//!
//! Run with: cargo run
//!
//! The default run renders every panel once as a report. With
//! `--interactive` the dashboard drops into a shell afterwards, where
//! panels can be re-queried, the staking desk exercised, and the
//! section navigation scrolled.

use clap::Parser;
use color_eyre::eyre::Result;
use console::style;
use std::io::Write as _;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockpulse::api::ApiClient;
use blockpulse::config::Config;
use blockpulse::display;
use blockpulse::forecast::ForecastRunner;
use blockpulse::panels::{
    ForecastPanel, MarketPanel, PoolMetricsPanel, PredictionPanel, StakingPanel, TokenMetricsPanel,
};
use blockpulse::sections::{Section, SectionTracker};
use blockpulse::staking::{StakeAction, MONTHLY_RATE};
use blockpulse::tokens;

#[derive(Parser, Debug)]
#[command(
    name = "blockpulse",
    about = "Terminal market analytics dashboard for crypto/NFT data"
)]
struct Cli {
    /// Path to a TOML config file (environment and .env otherwise)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Blockchain for the market analytics panel
    #[arg(long)]
    blockchain: Option<String>,

    /// Token address for the token metrics panel
    #[arg(long)]
    token: Option<String>,

    /// Pair address for the DeFi pool panel
    #[arg(long)]
    pair: Option<String>,

    /// Token address for the price prediction panel
    #[arg(long)]
    prediction_token: Option<String>,

    /// Also run the local forecast model during the report
    #[arg(long)]
    forecast: bool,

    /// Drop into the interactive shell after the first render
    #[arg(long, short)]
    interactive: bool,
}

// ============================================
// DASHBOARD
// ============================================

struct Dashboard {
    market: MarketPanel,
    token_metrics: TokenMetricsPanel,
    pool: PoolMetricsPanel,
    prediction: PredictionPanel,
    forecast: ForecastPanel,
    staking: StakingPanel,
    tracker: SectionTracker,
}

impl Dashboard {
    fn build(config: &Config, cli: &Cli) -> Result<Self> {
        let client = ApiClient::from_config(config);

        let blockchain = match &cli.blockchain {
            Some(name) => name.parse().map_err(|e| color_eyre::eyre::eyre!("{e}"))?,
            None => config.blockchain,
        };
        let pair = match &cli.pair {
            Some(input) => input
                .parse()
                .map_err(|_| color_eyre::eyre::eyre!("Invalid pair address: {input}"))?,
            None => config.pair_address()?,
        };
        let prediction_token = match &cli.prediction_token {
            Some(input) => input
                .parse()
                .map_err(|_| color_eyre::eyre::eyre!("Invalid prediction token: {input}"))?,
            None => config.prediction_token()?,
        };

        Ok(Self {
            market: MarketPanel::new(client.clone(), blockchain),
            token_metrics: TokenMetricsPanel::new(client.clone(), config.page_limit),
            pool: PoolMetricsPanel::new(client.clone(), pair, config.page_limit),
            prediction: PredictionPanel::new(client, prediction_token, config.page_limit),
            forecast: ForecastPanel::new(ForecastRunner::from_config(config)),
            staking: StakingPanel::new(),
            tracker: SectionTracker::new(),
        })
    }

    /// Wait for every in-flight fetch to settle.
    async fn settle_all(&mut self) {
        futures::join!(
            self.market.settled(),
            self.token_metrics.settled(),
            self.pool.settled(),
            self.prediction.settled(),
            self.forecast.settled(),
        );
    }

    /// Model scrolling a section into view: the target fills the
    /// viewport, its neighbours peek in, everything else is gone.
    fn scroll_to(&mut self, target: Section) {
        let samples: Vec<(Section, f64)> = Section::ALL
            .iter()
            .map(|section| {
                let position = Section::ALL.iter().position(|s| s == section).unwrap_or(0);
                let target_position = Section::ALL.iter().position(|s| *s == target).unwrap_or(0);
                let fraction = match position.abs_diff(target_position) {
                    0 => 1.0,
                    1 => 0.25,
                    _ => 0.0,
                };
                (*section, fraction)
            })
            .collect();
        self.tracker.observe_batch(&samples);
    }

    fn render_section(&self, section: Section) {
        display::section_header(section);
        match section {
            Section::Introduction => {
                println!("Market analytics, DeFi pool metrics, price predictions and a");
                println!("simulated staking desk, all from the terminal.");
            }
            Section::Market => display::render_market(&self.market.state()),
            Section::PoolMetrics => display::render_pool_metrics(&self.pool.state()),
            Section::PricePrediction => {
                println!(
                    "Token: {}",
                    tokens::format_token(&self.prediction.token_address())
                );
                display::render_predictions(&self.prediction.state());
                println!();
                display::render_forecast(&self.forecast.state());
            }
            Section::TokenMetrics => {
                if let Some(address) = self.token_metrics.address() {
                    println!("Token: {}", tokens::format_token(&address));
                }
                display::render_token_metrics(&self.token_metrics.state());
            }
            Section::Staking => self.render_staking(),
        }
    }

    fn render_staking(&self) {
        println!(
            "Staked Balance:    {}   ({})",
            style(display::format_usd(self.staking.balance())).cyan().bold(),
            self.staking.token()
        );
        println!(
            "Monthly Earnings:  {}   (at {:.0}% monthly)",
            display::format_usd(self.staking.monthly_earnings()),
            MONTHLY_RATE * 100.0
        );
        if self.staking.history().is_empty() {
            println!("{}", style("No staking activity yet.").dim());
            return;
        }
        println!();
        for entry in self.staking.history() {
            let action = match entry.action {
                StakeAction::Staked => style("Staked").green(),
                StakeAction::Unstaked => style("Unstaked").red(),
            };
            println!(
                "  {}  {:>8}  {:>10.2}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                action,
                entry.amount,
                entry.token
            );
        }
    }
}

// ============================================
// REPORT MODE
// ============================================

async fn run_report(dashboard: &mut Dashboard, cli: &Cli) -> Result<()> {
    info!("refreshing all panels");

    dashboard.market.refresh();
    dashboard.pool.refresh();
    dashboard.prediction.refresh();
    if let Some(token) = &cli.token {
        // Shown in the report as a validation error if malformed.
        let _ = dashboard.token_metrics.set_address(token);
    }
    if cli.forecast {
        dashboard.forecast.refresh();
    }

    let bar = display::spinner("fetching market data…");
    dashboard.settle_all().await;
    bar.finish_and_clear();

    display::print_nav(&dashboard.tracker);
    for section in Section::ALL {
        dashboard.render_section(section);
    }
    println!();
    Ok(())
}

// ============================================
// INTERACTIVE SHELL
// ============================================

fn print_help() {
    println!("Commands:");
    println!("  nav                    show the section navigation");
    println!("  goto <section>         scroll a section into view");
    println!("  chain <name>           switch the market analytics blockchain");
    println!("  token <address>        query token metrics");
    println!("  pool <address>         query DeFi pool metrics");
    println!("  predict <address>      query the price-prediction series");
    println!("  forecast               run the local forecast model");
    println!("  retry <panel>          retry market|token|pool|predict|forecast");
    println!("  stake <amount>         stake on the simulated desk");
    println!("  unstake <amount>       unstake from the simulated desk");
    println!("  use <token>            select the staking token");
    println!("  balance | history      inspect the staking desk");
    println!("  quit                   leave the dashboard");
}

fn section_from_arg(input: &str) -> Option<Section> {
    match input.trim().to_lowercase().as_str() {
        "intro" | "introduction" => Some(Section::Introduction),
        "market" | "dashboard" => Some(Section::Market),
        "pool" | "pools" => Some(Section::PoolMetrics),
        "predict" | "predictions" => Some(Section::PricePrediction),
        "token" | "tokens" => Some(Section::TokenMetrics),
        "stake" | "staking" => Some(Section::Staking),
        _ => None,
    }
}

fn parse_amount(input: Option<&str>) -> Option<f64> {
    input.and_then(|raw| raw.parse::<f64>().ok())
}

async fn run_shell(dashboard: &mut Dashboard) -> Result<()> {
    use tokio::io::AsyncBufReadExt;

    println!();
    println!(
        "{}",
        style("Interactive mode - type `help` for commands.").cyan()
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("blockpulse ❯").cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "nav" => display::print_nav(&dashboard.tracker),
            "goto" => match section_from_arg(&args.join(" ")) {
                Some(section) => {
                    dashboard.scroll_to(section);
                    display::print_nav(&dashboard.tracker);
                    dashboard.render_section(section);
                }
                None => println!("Unknown section. Try: intro, market, pools, predictions, tokens, staking."),
            },
            "chain" => {
                match dashboard.market.set_blockchain(&args.join(" ")) {
                    Ok(()) => {
                        let bar = display::spinner("fetching market analytics…");
                        dashboard.market.settled().await;
                        bar.finish_and_clear();
                    }
                    Err(error) => error!("{}", error),
                }
                dashboard.render_section(Section::Market);
            }
            "token" => {
                if dashboard
                    .token_metrics
                    .set_address(&args.join(" "))
                    .is_ok()
                {
                    let bar = display::spinner("fetching token metrics…");
                    dashboard.token_metrics.settled().await;
                    bar.finish_and_clear();
                }
                dashboard.render_section(Section::TokenMetrics);
            }
            "pool" => {
                if dashboard.pool.set_pair_address(&args.join(" ")).is_ok() {
                    let bar = display::spinner("fetching pool metrics…");
                    dashboard.pool.settled().await;
                    bar.finish_and_clear();
                }
                dashboard.render_section(Section::PoolMetrics);
            }
            "predict" => {
                if dashboard
                    .prediction
                    .set_token_address(&args.join(" "))
                    .is_ok()
                {
                    let bar = display::spinner("fetching prediction series…");
                    dashboard.prediction.settled().await;
                    bar.finish_and_clear();
                }
                display::render_predictions(&dashboard.prediction.state());
            }
            "forecast" => {
                dashboard.forecast.refresh();
                let bar = display::spinner("running forecast model…");
                dashboard.forecast.settled().await;
                bar.finish_and_clear();
                display::render_forecast(&dashboard.forecast.state());
            }
            "retry" => match args.first().copied() {
                Some("market") => {
                    dashboard.market.retry();
                    dashboard.market.settled().await;
                    dashboard.render_section(Section::Market);
                }
                Some("token") => {
                    dashboard.token_metrics.retry();
                    dashboard.token_metrics.settled().await;
                    dashboard.render_section(Section::TokenMetrics);
                }
                Some("pool") => {
                    dashboard.pool.retry();
                    dashboard.pool.settled().await;
                    dashboard.render_section(Section::PoolMetrics);
                }
                Some("predict") => {
                    dashboard.prediction.retry();
                    dashboard.prediction.settled().await;
                    display::render_predictions(&dashboard.prediction.state());
                }
                Some("forecast") => {
                    dashboard.forecast.retry();
                    dashboard.forecast.settled().await;
                    display::render_forecast(&dashboard.forecast.state());
                }
                _ => println!("Retry what? market|token|pool|predict|forecast"),
            },
            "stake" => match parse_amount(args.first().copied()) {
                Some(amount) => match dashboard.staking.stake(amount) {
                    Ok(()) => dashboard.render_section(Section::Staking),
                    Err(error) => println!("{} {error}", style("⚠").yellow()),
                },
                None => println!("{} please enter a valid amount", style("⚠").yellow()),
            },
            "unstake" => match parse_amount(args.first().copied()) {
                Some(amount) => match dashboard.staking.unstake(amount) {
                    Ok(()) => dashboard.render_section(Section::Staking),
                    Err(error) => println!("{} {error}", style("⚠").yellow()),
                },
                None => println!("{} please enter a valid amount", style("⚠").yellow()),
            },
            "use" => match dashboard.staking.select_token(&args.join(" ")) {
                Ok(()) => println!("Staking token set to {}", dashboard.staking.token()),
                Err(error) => println!("{} {error}", style("⚠").yellow()),
            },
            "balance" => {
                println!(
                    "Staked Balance: {}   Monthly Earnings: {}",
                    display::format_usd(dashboard.staking.balance()),
                    display::format_usd(dashboard.staking.monthly_earnings())
                );
            }
            "history" => dashboard.render_section(Section::Staking),
            other => println!("Unknown command `{other}` - type `help`."),
        }
    }
    Ok(())
}

// ============================================
// ENTRY POINT
// ============================================

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blockpulse=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    display::print_banner();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        error!("Please check your .env file");
        return Err(e);
    }

    config.print_summary();
    println!();

    let mut dashboard = Dashboard::build(&config, &cli)?;
    run_report(&mut dashboard, &cli).await?;

    if cli.interactive {
        run_shell(&mut dashboard).await?;
    }

    info!("done");
    Ok(())
}
