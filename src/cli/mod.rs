//! 命令行入口：order / balance / symbol / version

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::app_config::exchange::ExchangeConfig;
use crate::error::{AppError, AppResult};
use crate::trading::services::{ExchangeClient, OrderManager};
use crate::trading::validator::{validate_order_params, validate_symbol};

pub mod render;

#[derive(Parser, Debug)]
#[command(
    name = "trading-bot",
    version,
    about = "Simplified Trading Bot for Binance Futures Testnet"
)]
pub struct Cli {
    /// Binance API key (defaults to BINANCE_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Binance API secret (defaults to BINANCE_API_SECRET)
    #[arg(long, global = true)]
    pub api_secret: Option<String>,

    /// Directory for the per-run log file
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place an order on Binance Futures Testnet
    Order(OrderArgs),
    /// Check account balance on Binance Futures Testnet
    Balance,
    /// Show exchange metadata for a symbol
    Symbol {
        /// Trading pair symbol (e.g., BTCUSDT)
        #[arg(short, long)]
        symbol: String,
    },
    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Trading pair symbol (e.g., BTCUSDT)
    #[arg(short, long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[arg(long)]
    pub side: String,

    /// Order type: MARKET or LIMIT
    #[arg(short = 't', long = "type")]
    pub order_type: String,

    /// Order quantity
    #[arg(short, long)]
    pub quantity: String,

    /// Price (required for LIMIT orders)
    #[arg(short, long)]
    pub price: Option<String>,
}

impl Cli {
    pub fn exchange_config(&self) -> AppResult<ExchangeConfig> {
        Ok(ExchangeConfig::from_env()?
            .with_credentials(self.api_key.clone(), self.api_secret.clone()))
    }
}

/// 执行子命令，返回进程退出码
pub async fn run(cli: Cli, log_file: &Path) -> u8 {
    let result = match &cli.command {
        Commands::Order(args) => run_order(args, &cli, log_file).await,
        Commands::Balance => run_balance(&cli).await,
        Commands::Symbol { symbol } => run_symbol(symbol, &cli).await,
        Commands::Version => {
            println!("\nTrading Bot v{}\n", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    }
}

fn report_error(err: &AppError) {
    println!();
    render::error_panel(err).printstd();
    println!();
    match err {
        AppError::Validation(e) => error!("Validation error: {}", e),
        AppError::Configuration(e) => error!("Configuration error: {}", e),
        AppError::RemoteApi(e) => error!("Remote API error: {}", e),
    }
}

async fn run_order(args: &OrderArgs, cli: &Cli, log_file: &Path) -> AppResult<()> {
    println!();
    render::panel("🤖 Binance Futures Trading Bot", &["Testnet Environment".to_string()], "bFc")
        .printstd();
    println!();

    info!("============================================================");
    info!("NEW ORDER REQUEST");
    info!("============================================================");

    println!("⚙️  Validating inputs...");
    let request = validate_order_params(
        &args.symbol,
        &args.side,
        &args.order_type,
        &args.quantity,
        args.price.as_deref(),
    )?;
    println!("✓ Inputs validated successfully\n");

    render::order_summary_table(&request).printstd();
    println!();

    println!("🔌 Connecting to Binance Futures Testnet...");
    let client = ExchangeClient::new(&cli.exchange_config()?).await?;
    println!("✓ Connected successfully\n");

    let order_manager = OrderManager::new(&client);

    println!("📤 Placing {} {} order...", request.order_type, request.side);
    let response = order_manager.place_order(&request).await?;

    println!();
    render::order_success_panel(&response).printstd();
    println!();
    println!("📝 Detailed logs saved to: {}", log_file.display());
    println!();

    info!("Order completed successfully");
    Ok(())
}

async fn run_balance(cli: &Cli) -> AppResult<()> {
    println!();
    render::panel("💰 Account Balance Check", &[], "bFc").printstd();
    println!();

    println!("🔌 Connecting to Binance...");
    let client = ExchangeClient::new(&cli.exchange_config()?).await?;
    println!("✓ Connected\n");

    println!("📊 Fetching balance...");
    let account = client.get_account_balance().await?;

    println!();
    render::balance_panel(&account).printstd();
    println!();
    Ok(())
}

async fn run_symbol(symbol: &str, cli: &Cli) -> AppResult<()> {
    let symbol = validate_symbol(symbol)?;

    println!("🔌 Connecting to Binance...");
    let client = ExchangeClient::new(&cli.exchange_config()?).await?;
    println!("✓ Connected\n");

    let info = client.get_symbol_info(&symbol).await?;
    render::symbol_panel(&symbol, info.as_ref()).printstd();
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_limit_order_flags() {
        let cli = Cli::try_parse_from([
            "trading-bot", "order", "-s", "BTCUSDT", "--side", "SELL", "-t", "LIMIT", "-q",
            "0.001", "-p", "45000",
        ])
        .unwrap();
        match cli.command {
            Commands::Order(args) => {
                assert_eq!(args.symbol, "BTCUSDT");
                assert_eq!(args.side, "SELL");
                assert_eq!(args.order_type, "LIMIT");
                assert_eq!(args.quantity, "0.001");
                assert_eq!(args.price.as_deref(), Some("45000"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_price_is_optional_and_credentials_are_global() {
        let cli = Cli::try_parse_from([
            "trading-bot", "order", "--symbol", "btcusdt", "--side", "buy", "--type", "market",
            "--quantity", "0.001", "--api-key", "k", "--api-secret", "s",
        ])
        .unwrap();
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(cli.api_secret.as_deref(), Some("s"));
        match cli.command {
            Commands::Order(args) => assert!(args.price.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_order_requires_quantity() {
        let result =
            Cli::try_parse_from(["trading-bot", "order", "-s", "BTCUSDT", "--side", "BUY", "-t", "MARKET"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_input_exits_with_one_before_connecting() {
        let cli = Cli::try_parse_from([
            "trading-bot", "order", "-s", "BTCUSDT", "--side", "BUY", "-t", "STOP", "-q", "1",
        ])
        .unwrap();
        assert_eq!(run(cli, Path::new("logs/test.log")).await, 1);
    }

    #[tokio::test]
    async fn test_version_exits_with_zero() {
        let cli = Cli::try_parse_from(["trading-bot", "version"]).unwrap();
        assert_eq!(run(cli, Path::new("logs/test.log")).await, 0);
    }
}
