//! Command line interface for the LP farming dashboard.
use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use farmdash_api::{ApiServer, AppState, ServerConfig};
use farmdash_data::{CachedProvider, CoinGeckoProvider, MarketDataProvider, tokens};
use farmdash_domain::errors::UsageError;
use farmdash_domain::metrics::{PerformanceMetrics, impermanent_loss};
use farmdash_domain::value_objects::{DateWindow, Percentage, Price};
use farmdash_domain::{PriceSeries, Token};
use farmdash_engine::price_path::{GeometricBrownianMotion, PricePathGenerator, into_daily_series};
use farmdash_engine::{FarmConfig, FarmSimulation, SurfaceConfig, simulate_farm};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::env;
use std::io::Write as _;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "farmdash")]
#[command(about = "LP farming economics: impermanent loss, rewards and performance", long_about = None)]
struct Cli {
    /// Use the paid CoinGecko tier (requires COINGECKO_API_KEY)
    #[arg(long, global = true)]
    pro: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tokens selectable as a pair
    Tokens,
    /// Fetch recent price history for one token
    MarketData {
        /// Token symbol or CoinGecko id (e.g. BTC)
        #[arg(short, long, default_value = "BTC")]
        token: String,

        /// Days of history to fetch
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },
    /// Point-in-time impermanent loss from two price changes
    Il {
        /// Price change of asset A in percent (e.g. 10 for +10%)
        #[arg(long)]
        change_a: f64,

        /// Price change of asset B in percent
        #[arg(long)]
        change_b: f64,
    },
    /// Simulate LP farming vs buy-and-hold for a token pair
    Simulate {
        /// Exactly two token symbols or CoinGecko ids, comma-separated
        #[arg(long, value_delimiter = ',', default_value = "ETH,BTC")]
        tokens: Vec<String>,

        /// Days of history to simulate over
        #[arg(short, long, default_value_t = 90)]
        days: u32,

        /// Window start (YYYY-MM-DD); overrides --days when paired with --end
        #[arg(long)]
        start: Option<String>,

        /// Window end (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Farming APR in percent
        #[arg(long, default_value_t = 25.0)]
        apr: f64,

        /// Daily risk-free rate for the Sharpe ratio
        #[arg(long, default_value_t = 0.0)]
        risk_free: f64,

        /// Use a synthetic price path instead of the network
        #[arg(long)]
        demo: bool,
    },
    /// Generate the impermanent-loss surface around a price pair
    Surface {
        /// Reference price of the base token
        #[arg(long)]
        base_price: f64,

        /// Reference price of the quote token
        #[arg(long)]
        quote_price: f64,

        /// Grid points per axis
        #[arg(long, default_value_t = 300)]
        steps: usize,

        /// Write the full grid as CSV to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Run the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Tokens => {
            let mut table = Table::new();
            table.add_row(row!["Symbol", "Name", "CoinGecko id"]);
            for token in tokens::well_known() {
                table.add_row(row![token.symbol, token.name, token.coingecko_id]);
            }
            table.printstd();
        }
        Commands::MarketData { token, days } => {
            let provider = build_provider(cli.pro)?;
            let token = resolve_token(token);
            let window = DateWindow::last_days(Utc::now(), *days);

            println!("🔍 Fetching {} history ({} days)...", token, days);
            let series = provider.price_history(&token, "usd", &window).await?;

            println!("✅ Fetched {} observations:", series.len());
            let mut table = Table::new();
            table.add_row(row!["Time", "Price (USD)"]);
            for point in series.points().iter().rev().take(20).rev() {
                table.add_row(row![
                    point.timestamp.format("%Y-%m-%d %H:%M"),
                    format!("{:.4}", point.price.value)
                ]);
            }
            table.printstd();
            if let Some(last) = series.last() {
                println!("Last price: ${:.2}", last.price.value);
            }
        }
        Commands::Il { change_a, change_b } => {
            let change_a = Decimal::from_f64(*change_a)
                .ok_or_else(|| anyhow::anyhow!("change_a is not a finite number"))?;
            let change_b = Decimal::from_f64(*change_b)
                .ok_or_else(|| anyhow::anyhow!("change_b is not a finite number"))?;

            let il = impermanent_loss::il_from_changes(change_a, change_b)?;
            println!(
                "Impermanent loss for A {}% / B {}%: {:.2}%",
                change_a,
                change_b,
                il * Decimal::from(100)
            );
        }
        Commands::Simulate {
            tokens: pair,
            days,
            start,
            end,
            apr,
            risk_free,
            demo,
        } => {
            if pair.len() != 2 {
                return Err(UsageError::TokenSelection {
                    selected: pair.len(),
                }
                .into());
            }
            let token_a = resolve_token(&pair[0]);
            let token_b = resolve_token(&pair[1]);
            let window = resolve_window(start.as_deref(), end.as_deref(), *days)?;
            let apr = Decimal::from_f64(*apr).ok_or_else(|| anyhow::anyhow!("invalid APR"))?;
            let risk_free = Decimal::from_f64(*risk_free)
                .ok_or_else(|| anyhow::anyhow!("invalid risk-free rate"))?;

            let (series_a, series_b) = if *demo {
                println!("🎲 Generating synthetic price paths...");
                let steps = window.days().max(1) as usize;
                (
                    synthetic_series(token_a.clone(), &window, 0.05, 0.6, steps)?,
                    synthetic_series(token_b.clone(), &window, 0.02, 0.4, steps)?,
                )
            } else {
                let provider = build_provider(cli.pro)?;
                println!("🔍 Fetching {} and {} history...", token_a, token_b);
                let a = provider.price_history(&token_a, "usd", &window).await?;
                let b = provider.price_history(&token_b, "usd", &window).await?;
                (a, b)
            };

            let config = FarmConfig::new(window, Percentage::from_percent(apr))
                .with_daily_risk_free(risk_free);

            println!("🚀 Running farm simulation...");
            let simulation = simulate_farm(&series_a, &series_b, &config)?;
            print_simulation(&token_a, &token_b, &simulation);
        }
        Commands::Surface {
            base_price,
            quote_price,
            steps,
            output,
        } => {
            let base = Decimal::from_f64(*base_price)
                .ok_or_else(|| anyhow::anyhow!("invalid base price"))?;
            let quote = Decimal::from_f64(*quote_price)
                .ok_or_else(|| anyhow::anyhow!("invalid quote price"))?;

            let surface = SurfaceConfig::new(Price::new(base), Price::new(quote))
                .with_steps(*steps)
                .generate()?;

            let (rows, cols) = surface.steps();
            println!("✅ Generated {}x{} IL surface", rows, cols);

            if let Some(path) = output {
                let mut file = std::fs::File::create(path)?;
                writeln!(file, "base_price,quote_price,il")?;
                for (i, base_price) in surface.base_prices.iter().enumerate() {
                    for (j, quote_price) in surface.quote_prices.iter().enumerate() {
                        writeln!(file, "{},{},{}", base_price, quote_price, surface.il[i][j])?;
                    }
                }
                println!("💾 Wrote surface to {}", path);
            } else {
                // Corners give a quick sanity read without dumping 90k rows.
                let worst = surface
                    .il
                    .iter()
                    .flatten()
                    .min()
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                println!(
                    "Worst IL in scan: {:.2}%",
                    worst * Decimal::from(100)
                );
            }
        }
        Commands::Serve { port } => {
            let provider = build_provider(cli.pro)?;
            let state = AppState::new(provider);
            let config = ServerConfig::default().with_port(*port);

            println!("📡 Serving dashboard API on port {}...", port);
            ApiServer::new(config, state).run().await?;
        }
    }

    Ok(())
}

/// Shared provider stack: CoinGecko behind the TTL cache.
fn build_provider(pro: bool) -> Result<Arc<dyn MarketDataProvider>> {
    let api_key = env::var("COINGECKO_API_KEY").ok();
    if pro && api_key.is_none() {
        return Err(UsageError::MissingCredential {
            variable: "COINGECKO_API_KEY".to_string(),
        }
        .into());
    }

    let mut provider = CoinGeckoProvider::new();
    if let Some(key) = api_key {
        provider = provider.with_api_key(key);
    }
    Ok(Arc::new(CachedProvider::with_default_ttl(provider)))
}

fn resolve_token(query: &str) -> Token {
    tokens::find(query)
        .unwrap_or_else(|| Token::new(query.to_lowercase(), query.to_uppercase(), query))
}

fn resolve_window(start: Option<&str>, end: Option<&str>, days: u32) -> Result<DateWindow> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            Ok(DateWindow::new(start, end)?)
        }
        _ => Ok(DateWindow::last_days(Utc::now(), days)),
    }
}

fn parse_date(input: &str) -> Result<chrono::DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid date: {input}"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn synthetic_series(
    token: Token,
    window: &DateWindow,
    drift: f64,
    volatility: f64,
    steps: usize,
) -> Result<PriceSeries> {
    let mut gbm = GeometricBrownianMotion::daily(Decimal::from(100), drift, volatility);
    Ok(into_daily_series(token, window.start(), gbm.generate(steps))?)
}

fn print_simulation(token_a: &Token, token_b: &Token, simulation: &FarmSimulation) {
    let last = simulation
        .table
        .final_row()
        .expect("simulation tables are never empty");
    let hundred = Decimal::from(100);

    println!("\n📊 {} / {} over {} steps", token_a.symbol, token_b.symbol, simulation.table.len());
    println!("════════════════════════════════════");
    println!("Final price ratio:   {:.4}", last.price_ratio);
    println!("Impermanent loss:    {:.2}%", last.impermanent_loss * hundred);
    println!("Accrued rewards:     {:.2}%", last.rewards * hundred);
    println!("Buy & hold value:    {:.4}", last.buy_hold);
    println!("Farm value:          {:.4}", last.farm);
    println!("════════════════════════════════════");

    let mut table = Table::new();
    table.add_row(row![
        "Strategy",
        "CAGR",
        "Volatility",
        "Sharpe",
        "Max drawdown"
    ]);
    table.add_row(metrics_row("Buy & hold", &simulation.buy_hold));
    table.add_row(metrics_row("Farm", &simulation.farm));
    table.printstd();
}

fn metrics_row(name: &str, metrics: &PerformanceMetrics) -> prettytable::Row {
    let hundred = Decimal::from(100);
    let sharpe = metrics
        .sharpe_ratio
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "n/a".to_string());
    row![
        name,
        format!("{:.2}%", metrics.cagr * hundred),
        format!("{:.2}%", metrics.annual_volatility * hundred),
        sharpe,
        format!("{:.2}%", metrics.max_drawdown * hundred)
    ]
}
