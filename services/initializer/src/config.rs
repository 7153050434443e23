//! Service configuration

use solana_sdk::pubkey::Pubkey;

/// Deployed crowdsale program (devnet)
pub const CROWDSALE_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("HHEMku7SfVTSUnVobRawMC7pz54pebkG2W7ZRmCd357W");

/// Mint the crowdsale sells (devnet)
pub const TOKEN_MINT: Pubkey = solana_sdk::pubkey!("BxUX7gQuuyn2upVVJtzBAL7ZoyxG9XZbgCE7omBekLRp");

#[derive(Clone, Debug)]
pub struct Config {
    /// RPC endpoint to connect to
    pub rpc_url: String,

    /// Keypair paying for and authorizing the creation
    pub keypair_path: String,

    /// Crowdsale program to derive addresses under
    pub program_id: Pubkey,

    /// Mint being sold
    pub mint: Pubkey,

    /// Unit cost for the new crowdsale; validated by the plan
    pub cost: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            program_id: CROWDSALE_PROGRAM_ID,
            mint: TOKEN_MINT,
            cost: 1,
        }
    }
}
