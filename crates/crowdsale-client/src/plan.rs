//! Account plan for the initialize instruction

use solana_sdk::pubkey::Pubkey;

use crate::core::{CrowdsaleError, Result};
use crate::derive;

/// The complete, validated set of accounts the initialize instruction needs.
///
/// Immutable once built; every derived address is a pure function of the
/// identifier, the mint, and the program IDs, so an equal plan can be
/// recomputed later from the same inputs.
#[derive(Debug, Clone)]
pub struct AccountPlan {
    /// Crowdsale program the addresses are derived under
    pub program_id: Pubkey,

    /// Fresh 32-byte identifier seeding this crowdsale instance
    pub identifier: Pubkey,

    /// Unit cost, fixed at creation
    pub cost: u32,

    /// Crowdsale state PDA
    pub crowdsale: Pubkey,

    /// Token authority PDA; owns the vault, signs nothing
    pub authority: Pubkey,

    /// Associated token account holding the crowdsale's balance
    pub token_account: Pubkey,

    /// Mint being sold
    pub mint: Pubkey,

    /// Signing wallet that pays for account creation
    pub creator: Pubkey,

    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub system_program: Pubkey,
}

impl AccountPlan {
    /// Validate the inputs and derive every account the instruction needs.
    ///
    /// Returns `InvalidPlan` for a negative or oversized cost and for the
    /// default mint address; no partial plan is ever produced.
    pub fn new(
        program_id: &Pubkey,
        identifier: &Pubkey,
        cost: i64,
        mint: &Pubkey,
        creator: &Pubkey,
    ) -> Result<Self> {
        if cost < 0 {
            return Err(CrowdsaleError::InvalidPlan(format!(
                "unit cost {cost} is negative"
            )));
        }
        let cost = u32::try_from(cost).map_err(|_| {
            CrowdsaleError::InvalidPlan(format!("unit cost {cost} exceeds the u32 wire type"))
        })?;
        if *mint == Pubkey::default() {
            return Err(CrowdsaleError::InvalidPlan(
                "mint is the default address".to_string(),
            ));
        }

        let (crowdsale, _) = derive::find_crowdsale_address(program_id, identifier)?;
        let (authority, _) = derive::find_authority_address(program_id, identifier)?;
        // The authority is a PDA, so the vault derivation must opt in to an
        // off-curve owner.
        let token_account = derive::derive_token_account(mint, &authority, true)?;

        Ok(Self {
            program_id: *program_id,
            identifier: *identifier,
            cost,
            crowdsale,
            authority,
            token_account,
            mint: *mint,
            creator: *creator,
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: solana_sdk::system_program::ID,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> (Pubkey, Pubkey, Pubkey, Pubkey) {
        (
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        )
    }

    #[test]
    fn negative_cost_is_rejected() {
        let (program_id, identifier, mint, creator) = inputs();

        let err = AccountPlan::new(&program_id, &identifier, -1, &mint, &creator).unwrap_err();
        assert!(matches!(err, CrowdsaleError::InvalidPlan(_)));
    }

    #[test]
    fn zero_cost_is_allowed() {
        let (program_id, identifier, mint, creator) = inputs();

        let plan = AccountPlan::new(&program_id, &identifier, 0, &mint, &creator).unwrap();
        assert_eq!(plan.cost, 0);
    }

    #[test]
    fn oversized_cost_is_rejected() {
        let (program_id, identifier, mint, creator) = inputs();

        let err = AccountPlan::new(
            &program_id,
            &identifier,
            i64::from(u32::MAX) + 1,
            &mint,
            &creator,
        )
        .unwrap_err();
        assert!(matches!(err, CrowdsaleError::InvalidPlan(_)));
    }

    #[test]
    fn default_mint_is_rejected() {
        let (program_id, identifier, _, creator) = inputs();

        let err = AccountPlan::new(&program_id, &identifier, 1, &Pubkey::default(), &creator)
            .unwrap_err();
        assert!(matches!(err, CrowdsaleError::InvalidPlan(_)));
    }

    #[test]
    fn token_account_is_owned_by_the_authority() {
        let (program_id, identifier, mint, creator) = inputs();

        let plan = AccountPlan::new(&program_id, &identifier, 1, &mint, &creator).unwrap();

        let (authority, _) = derive::find_authority_address(&program_id, &identifier).unwrap();
        assert_eq!(plan.authority, authority);
        assert_eq!(
            plan.token_account,
            derive::derive_token_account(&mint, &authority, true).unwrap()
        );
    }

    #[test]
    fn plan_is_reproducible() {
        let (program_id, identifier, mint, creator) = inputs();

        let first = AccountPlan::new(&program_id, &identifier, 7, &mint, &creator).unwrap();
        let second = AccountPlan::new(&program_id, &identifier, 7, &mint, &creator).unwrap();

        assert_eq!(first.crowdsale, second.crowdsale);
        assert_eq!(first.authority, second.authority);
        assert_eq!(first.token_account, second.token_account);
    }

    #[test]
    fn well_known_programs_are_pinned() {
        let (program_id, identifier, mint, creator) = inputs();

        let plan = AccountPlan::new(&program_id, &identifier, 1, &mint, &creator).unwrap();
        assert_eq!(plan.token_program, spl_token::id());
        assert_eq!(
            plan.associated_token_program,
            spl_associated_token_account::id()
        );
        assert_eq!(plan.system_program, solana_sdk::system_program::ID);
    }
}
