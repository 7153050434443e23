//! Crowdsale initializer service
//!
//! Generates a fresh identifier, derives the crowdsale's addresses, submits
//! the one-shot initialization transaction, and reads the created state back.

pub mod config;

pub use config::Config;

use anyhow::{anyhow, Result};
use crowdsale_client::{AccountPlan, ClientConfig, InitializationProtocol};
use solana_sdk::{
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};

/// Main entry point for the initializer service
pub async fn run(config: Config) -> Result<()> {
    // Load the creator wallet
    let keypair_path = shellexpand::tilde(&config.keypair_path).to_string();
    let creator = read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("failed to read keypair from {}: {}", keypair_path, e))?;

    // Fresh identifier for this crowdsale instance. It is never persisted;
    // the derived addresses can only be recomputed later by a caller that
    // retained this value.
    let identifier = Keypair::new().pubkey();

    let plan = AccountPlan::new(
        &config.program_id,
        &identifier,
        config.cost,
        &config.mint,
        &creator.pubkey(),
    )?;

    println!("Identifier: {}", plan.identifier);
    println!("Crowdsale: {}", plan.crowdsale);
    println!("Crowdsale authority: {}", plan.authority);
    println!("Token account: {}", plan.token_account);

    let client_config = ClientConfig {
        rpc_url: config.rpc_url.clone(),
        ..ClientConfig::default()
    };
    let mut protocol = InitializationProtocol::new(&client_config);

    let receipt = protocol.submit(&plan, &creator).await?;
    println!("Initialize tx: {}", receipt.signature);

    let record = protocol.verify(&plan, &receipt).await?;

    println!("Successfully initialized crowdsale at {}", plan.crowdsale);
    println!("  ID: {}", record.id);
    println!("  Cost: {}", record.cost);
    println!("  Mint: {}", record.mint);
    println!("  Token account: {}", record.token_account);

    Ok(())
}
