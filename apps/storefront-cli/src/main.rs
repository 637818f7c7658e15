//! Storefront command line entry point.

use clap::Parser;
use storefront_cli::cli::Cli;
use storefront_cli::error::ErrorCode;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match storefront_cli::run(cli).await {
        Ok(output) => print_json(&output),
        Err(err) => {
            print_json(&err);
            std::process::exit(err.exit_code());
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Failed to encode output: {}", e);
            std::process::exit(ErrorCode::Internal.exit_code());
        }
    }
}
