//! Deterministic address derivation for crowdsale accounts
//!
//! Pure functions over seed bytes; no I/O. Every address a crowdsale uses
//! can be recomputed at any time from the identifier alone.

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::core::{CrowdsaleError, Result};

/// Authority seed literal shared with the on-chain program. Both sides must
/// agree on this exact value for the authority PDA to line up.
pub const AUTHORITY_SEED: &[u8] = b"authority";

/// Find the crowdsale state PDA, seeds `[identifier]`
pub fn find_crowdsale_address(program_id: &Pubkey, identifier: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[identifier.as_ref()], program_id)
        .ok_or(CrowdsaleError::DerivationExhausted)
}

/// Find the crowdsale authority PDA, seeds `[identifier, AUTHORITY_SEED]`
pub fn find_authority_address(program_id: &Pubkey, identifier: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(&[identifier.as_ref(), AUTHORITY_SEED], program_id)
        .ok_or(CrowdsaleError::DerivationExhausted)
}

/// Derive the associated token account for `(mint, owner)`.
///
/// PDAs are not valid signing keys, so deriving their token account requires
/// the explicit `allow_owner_off_curve` opt-in. Passing `false` for an
/// off-curve owner is rejected here rather than producing an account the
/// on-chain program would never accept.
pub fn derive_token_account(
    mint: &Pubkey,
    owner: &Pubkey,
    allow_owner_off_curve: bool,
) -> Result<Pubkey> {
    if !allow_owner_off_curve && !owner.is_on_curve() {
        return Err(CrowdsaleError::InvalidPlan(format!(
            "token account owner {owner} is off-curve but off-curve owners were not allowed"
        )));
    }

    Ok(get_associated_token_address(owner, mint))
}
