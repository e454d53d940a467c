use analyzer::{FinancialAnalyzer, PeriodData};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::Settings;
use core_types::{ProductRecord, SaleRecord};
use forecaster::ForecastEngine;
use optimizer::InventoryOptimizer;
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Meridian analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // One settings load shared by every command; defaults apply when no
    // meridian.toml is present.
    let settings = configuration::load_settings()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Forecast(args) => handle_forecast(args, settings),
        Commands::Inventory(args) => handle_inventory(args, settings),
        Commands::Financials(args) => handle_financials(args, settings),
        Commands::Serve(args) => web_server::run_server(args.addr, settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Small-business analytics: sales forecasting, inventory reorder
/// recommendations, and trailing-period financial comparison.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a daily revenue trend to a sales history and project it forward.
    Forecast(ForecastArgs),
    /// Compute reorder recommendations from a stock snapshot plus recent sales.
    Inventory(InventoryArgs),
    /// Compare two adjacent trailing periods of revenue and expenses.
    Financials(FinancialsArgs),
    /// Serve the analytics API over HTTP.
    Serve(ServeArgs),
}

#[derive(Parser)]
struct ForecastArgs {
    /// Path to a JSON array of sale records.
    #[arg(long)]
    sales: PathBuf,

    /// Print the raw JSON report instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct InventoryArgs {
    /// Path to a JSON array of product records.
    #[arg(long)]
    products: PathBuf,

    /// Path to a JSON array of sale records covering the trailing demand
    /// window (30 days by default).
    #[arg(long)]
    sales: PathBuf,

    /// Print the raw JSON summary instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct FinancialsArgs {
    /// Sales for the current trailing period.
    #[arg(long)]
    current_sales: PathBuf,

    /// Sales for the period immediately before it.
    #[arg(long)]
    previous_sales: PathBuf,

    /// Purchases for the current trailing period.
    #[arg(long)]
    current_purchases: PathBuf,

    /// Purchases for the period immediately before it.
    #[arg(long)]
    previous_purchases: PathBuf,

    /// Print the raw JSON summary instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind the API server on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: SocketAddr,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_forecast(args: ForecastArgs, settings: Settings) -> anyhow::Result<()> {
    let sales: Vec<SaleRecord> = load_records(&args.sales)?;
    let report = ForecastEngine::new(settings.forecast).forecast(&sales)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Model: {} ({} records over {} days, accuracy {}%, rmse {})",
        report.model_info.model_type,
        report.model_info.data_points,
        report.model_info.days_analyzed,
        report.model_info.accuracy_percentage,
        report.model_info.rmse,
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Date", "Predicted", "Lower", "Upper"]);
    for point in &report.predictions {
        table.add_row(vec![
            point.date.to_string(),
            point.predicted_value.to_string(),
            point.confidence_interval.lower.to_string(),
            point.confidence_interval.upper.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn handle_inventory(args: InventoryArgs, settings: Settings) -> anyhow::Result<()> {
    let products: Vec<ProductRecord> = load_records(&args.products)?;
    let recent_sales: Vec<SaleRecord> = load_records(&args.sales)?;
    let summary = InventoryOptimizer::new(settings.inventory).optimize(&products, &recent_sales)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Optimization score: {}/100 ({} products, {} below minimum, {} at risk, {} value at risk)",
        summary.optimization_score,
        summary.total_products,
        summary.products_below_min,
        summary.products_at_risk,
        summary.total_value_at_risk,
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Priority", "Product", "Stock", "Min", "Avg/day", "Days left", "Order", "Reason",
    ]);
    for rec in &summary.recommendations {
        table.add_row(vec![
            rec.priority.to_string(),
            rec.product_name.clone(),
            rec.current_stock.to_string(),
            rec.min_stock.to_string(),
            rec.avg_daily_sales.to_string(),
            rec.days_until_stockout.to_string(),
            rec.recommended_order.to_string(),
            rec.reason.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn handle_financials(args: FinancialsArgs, settings: Settings) -> anyhow::Result<()> {
    let current = PeriodData {
        sales: load_records(&args.current_sales)?,
        purchases: load_records(&args.current_purchases)?,
    };
    let previous = PeriodData {
        sales: load_records(&args.previous_sales)?,
        purchases: load_records(&args.previous_purchases)?,
    };
    let summary = FinancialAnalyzer::new(settings.financial).analyze(&current, &previous)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Revenue".to_string(), summary.revenue.to_string()]);
    table.add_row(vec!["Expenses".to_string(), summary.expenses.to_string()]);
    table.add_row(vec!["Net profit".to_string(), summary.net_profit.to_string()]);
    table.add_row(vec![
        "Profit margin %".to_string(),
        summary.profit_margin.to_string(),
    ]);
    table.add_row(vec![
        "Revenue growth %".to_string(),
        summary.revenue_growth.to_string(),
    ]);
    table.add_row(vec![
        "Expense growth %".to_string(),
        summary.expense_growth.to_string(),
    ]);
    table.add_row(vec![
        "Break-even ratio".to_string(),
        summary.break_even_point.to_string(),
    ]);
    table.add_row(vec![
        "Cash runway (days)".to_string(),
        summary.cash_runway_days.to_string(),
    ]);
    table.add_row(vec![
        "Health score".to_string(),
        summary.health_score.to_string(),
    ]);
    table.add_row(vec![
        "Projected revenue".to_string(),
        summary.projection.revenue.to_string(),
    ]);
    table.add_row(vec![
        "Projected expenses".to_string(),
        summary.projection.expenses.to_string(),
    ]);
    println!("{table}");

    for insight in &summary.insights {
        match insight.recommendation.as_deref() {
            Some(recommendation) => println!(
                "[{:?}] {}: {} ({recommendation})",
                insight.kind, insight.title, insight.description
            ),
            None => println!("[{:?}] {}: {}", insight.kind, insight.title, insight.description),
        }
    }

    Ok(())
}

/// Reads a JSON array of records from disk, failing with the offending path
/// in the message. Malformed timestamps or amounts die here, before any
/// engine runs.
fn load_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(records)
}
