use std::process::ExitCode;

use binance_futures_bot::app_config::log::setup_logging;
use binance_futures_bot::cli::{self, Cli};
use clap::Parser;
use dotenv::dotenv;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    // 设置日志
    let log = match setup_logging(&cli.log_dir) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("failed to set up logging: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let code = cli::run(cli, &log.file_path).await;
    drop(log);
    ExitCode::from(code)
}
