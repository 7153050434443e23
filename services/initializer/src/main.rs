//! Crowdsale initializer binary

use anyhow::Result;
use crowdsale_initializer::{run, Config};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments (simplified)
    let args: Vec<String> = std::env::args().collect();

    let defaults = Config::default();
    let config = Config {
        rpc_url: args.get(1).cloned().unwrap_or(defaults.rpc_url),
        keypair_path: args.get(2).cloned().unwrap_or(defaults.keypair_path),
        program_id: args
            .get(3)
            .and_then(|s| Pubkey::from_str(s).ok())
            .unwrap_or(defaults.program_id),
        mint: args
            .get(4)
            .and_then(|s| Pubkey::from_str(s).ok())
            .unwrap_or(defaults.mint),
        cost: args.get(5).and_then(|s| s.parse().ok()).unwrap_or(defaults.cost),
    };

    println!("Crowdsale Initializer Configuration:");
    println!("  RPC URL: {}", config.rpc_url);
    println!("  Keypair: {}", config.keypair_path);
    println!("  Program: {}", config.program_id);
    println!("  Mint: {}", config.mint);
    println!("  Cost: {}", config.cost);

    run(config).await
}
