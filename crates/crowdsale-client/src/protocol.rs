//! One-shot crowdsale initialization protocol
//!
//! Builds the initialize instruction from an account plan, submits exactly
//! one transaction, and reads the created state back to check it matches
//! the request. Nothing here retries: a failed creation with the same
//! identifier fails identically, so callers retry with a fresh identifier.

use sha2::{Digest, Sha256};
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::{AccountMeta, Instruction},
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{ClientConfig, CrowdsaleError, Result};
use crate::plan::AccountPlan;
use crate::state::CrowdsaleRecord;

/// Protocol progress for a single initialization.
///
/// `Confirmed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Planned,
    Submitted,
    Confirmed,
    Failed,
}

/// Receipt for a confirmed submission
#[derive(Debug, Clone, Copy)]
pub struct TransactionReceipt {
    pub signature: Signature,
}

/// Submits and verifies one crowdsale initialization
pub struct InitializationProtocol {
    rpc: Arc<RpcClient>,
    commitment: CommitmentConfig,
    state: ProtocolState,
}

impl InitializationProtocol {
    pub fn new(config: &ClientConfig) -> Self {
        let rpc = Arc::new(RpcClient::new_with_commitment(
            config.rpc_url.clone(),
            config.commitment,
        ));
        Self::with_client(rpc, config.commitment)
    }

    pub fn with_client(rpc: Arc<RpcClient>, commitment: CommitmentConfig) -> Self {
        Self {
            rpc,
            commitment,
            state: ProtocolState::Planned,
        }
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    /// Build the initialize instruction for a plan.
    ///
    /// Instruction data is the `global:initialize` discriminator followed by
    /// the identifier and the little-endian unit cost. The account order is
    /// positional and part of the on-chain contract.
    pub fn initialize_instruction(plan: &AccountPlan) -> Instruction {
        let mut hasher = Sha256::new();
        hasher.update(b"global:initialize");
        let hash = hasher.finalize();

        let mut data = hash[..8].to_vec();
        data.extend_from_slice(&plan.identifier.to_bytes());
        data.extend_from_slice(&plan.cost.to_le_bytes());

        Instruction {
            program_id: plan.program_id,
            accounts: vec![
                AccountMeta::new(plan.crowdsale, false),          // crowdsale state
                AccountMeta::new_readonly(plan.mint, false),      // mint being sold
                AccountMeta::new(plan.token_account, false),      // crowdsale vault
                AccountMeta::new_readonly(plan.authority, false), // vault authority
                AccountMeta::new(plan.creator, true),             // fee payer
                AccountMeta::new_readonly(plan.token_program, false),
                AccountMeta::new_readonly(plan.associated_token_program, false),
                AccountMeta::new_readonly(plan.system_program, false),
            ],
            data,
        }
    }

    /// Submit the initialization transaction and wait for confirmation.
    ///
    /// The sole state-mutating call in the protocol, and not idempotent: a
    /// second submission with the same identifier is rejected on-chain
    /// because the crowdsale account already exists.
    pub async fn submit(
        &mut self,
        plan: &AccountPlan,
        creator: &Keypair,
    ) -> Result<TransactionReceipt> {
        if creator.pubkey() != plan.creator {
            return Err(CrowdsaleError::InvalidPlan(format!(
                "signer {} does not match the plan's creator {}",
                creator.pubkey(),
                plan.creator
            )));
        }

        info!("submitting crowdsale initialization for {}", plan.crowdsale);
        self.state = ProtocolState::Submitted;

        let instruction = Self::initialize_instruction(plan);
        let sent: std::result::Result<Signature, ClientError> = async {
            let blockhash = self.rpc.get_latest_blockhash().await?;
            let transaction = Transaction::new_signed_with_payer(
                &[instruction],
                Some(&plan.creator),
                &[creator],
                blockhash,
            );
            self.rpc.send_and_confirm_transaction(&transaction).await
        }
        .await;

        match sent {
            Ok(signature) => {
                self.state = ProtocolState::Confirmed;
                info!("crowdsale initialization confirmed: {}", signature);
                Ok(TransactionReceipt { signature })
            }
            Err(err) => {
                self.state = ProtocolState::Failed;
                Err(CrowdsaleError::SubmissionFailed(submission_diagnostic(
                    &err,
                )))
            }
        }
    }

    /// Read the crowdsale account back and check it matches the plan.
    ///
    /// Only legal once the submission is confirmed. A mismatch is a
    /// protocol-level integrity failure, never retried.
    pub async fn verify(
        &self,
        plan: &AccountPlan,
        receipt: &TransactionReceipt,
    ) -> Result<CrowdsaleRecord> {
        if self.state != ProtocolState::Confirmed {
            return Err(CrowdsaleError::PostconditionViolation(format!(
                "verify called in state {:?} before confirmation",
                self.state
            )));
        }

        debug!("reading back crowdsale state at {}", plan.crowdsale);
        let account = self
            .rpc
            .get_account_with_commitment(&plan.crowdsale, self.commitment)
            .await?
            .value
            .ok_or_else(|| {
                CrowdsaleError::PostconditionViolation(format!(
                    "no account at {} after confirmed transaction {}",
                    plan.crowdsale, receipt.signature
                ))
            })?;

        let record = CrowdsaleRecord::try_from_bytes(&account.data)?;
        check_record(plan, &record)?;
        Ok(record)
    }
}

/// Compare read-back state against the plan, naming the first mismatch.
fn check_record(plan: &AccountPlan, record: &CrowdsaleRecord) -> Result<()> {
    if record.id != plan.identifier {
        return Err(CrowdsaleError::PostconditionViolation(format!(
            "stored identifier {} does not match requested {}",
            record.id, plan.identifier
        )));
    }
    if record.cost != plan.cost {
        return Err(CrowdsaleError::PostconditionViolation(format!(
            "stored cost {} does not match requested {}",
            record.cost, plan.cost
        )));
    }
    if record.mint != plan.mint {
        return Err(CrowdsaleError::PostconditionViolation(format!(
            "stored mint {} does not match requested {}",
            record.mint, plan.mint
        )));
    }
    if record.token_account != plan.token_account {
        return Err(CrowdsaleError::PostconditionViolation(format!(
            "stored token account {} does not match derived {}",
            record.token_account, plan.token_account
        )));
    }
    Ok(())
}

/// Render a client error with any simulation log lines appended, so the
/// remote execution log reaches the caller verbatim.
fn submission_diagnostic(err: &ClientError) -> String {
    let mut message = err.to_string();

    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
        ..
    }) = &err.kind
    {
        if let Some(logs) = &simulation.logs {
            for line in logs {
                message.push('\n');
                message.push_str(line);
            }
        }
    }

    message
}
