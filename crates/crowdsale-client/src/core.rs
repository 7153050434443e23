//! Core client types: configuration and error handling

use solana_sdk::commitment_config::CommitmentConfig;
use thiserror::Error;

// ================================
// Configuration Types
// ================================

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// Commitment level to submit and read at
    pub commitment: CommitmentConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            commitment: CommitmentConfig::confirmed(),
        }
    }
}

// ================================
// Error Types
// ================================

#[derive(Debug, Error)]
pub enum CrowdsaleError {
    /// The bump search ran out of candidates for the given seeds. Retrying
    /// with the same seeds fails identically.
    #[error("no valid program address for the given seeds")]
    DerivationExhausted,

    /// A local precondition on the plan inputs failed; the caller must fix
    /// the inputs.
    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    /// The cluster rejected or failed the transaction. The message carries
    /// the client diagnostic verbatim, including any execution log lines.
    /// Fatal for this identifier; retry with a fresh one.
    #[error("submission failed: {0}")]
    SubmissionFailed(String),

    /// State read back after confirmation disagrees with the plan.
    #[error("on-chain state does not match the plan: {0}")]
    PostconditionViolation(String),

    #[error("rpc error: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),
}

impl From<solana_client::client_error::ClientError> for CrowdsaleError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CrowdsaleError>;
