//! On-chain crowdsale state, decoded read-only
//!
//! The layout is owned by the on-chain program: an 8-byte account
//! discriminator followed by identifier, unit cost, mint, and token account
//! in declaration order.

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::core::{CrowdsaleError, Result};

/// Serialized size of a crowdsale record, discriminator included
pub const RECORD_LEN: usize = 8 + 32 + 4 + 32 + 32;

/// Crowdsale state as stored on-chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrowdsaleRecord {
    pub id: Pubkey,
    pub cost: u32,
    pub mint: Pubkey,
    pub token_account: Pubkey,
}

fn account_discriminator() -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(b"account:Crowdsale");
    let hash = hasher.finalize();

    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

impl CrowdsaleRecord {
    /// Decode account data into a record.
    ///
    /// Rejects short data and a wrong discriminator; a crowdsale account
    /// that fails to decode after a confirmed initialization is a
    /// postcondition violation, not a transport error.
    pub fn try_from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_LEN {
            return Err(CrowdsaleError::PostconditionViolation(format!(
                "crowdsale account holds {} bytes, expected at least {}",
                data.len(),
                RECORD_LEN
            )));
        }
        if data[..8] != account_discriminator() {
            return Err(CrowdsaleError::PostconditionViolation(
                "account data does not carry the crowdsale discriminator".to_string(),
            ));
        }

        let mut offset = 8;
        let id = Pubkey::new_from_array(data[offset..offset + 32].try_into().unwrap());
        offset += 32;
        let cost = u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap());
        offset += 4;
        let mint = Pubkey::new_from_array(data[offset..offset + 32].try_into().unwrap());
        offset += 32;
        let token_account = Pubkey::new_from_array(data[offset..offset + 32].try_into().unwrap());

        Ok(Self {
            id,
            cost,
            mint,
            token_account,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &CrowdsaleRecord) -> Vec<u8> {
        let mut data = account_discriminator().to_vec();
        data.extend_from_slice(&record.id.to_bytes());
        data.extend_from_slice(&record.cost.to_le_bytes());
        data.extend_from_slice(&record.mint.to_bytes());
        data.extend_from_slice(&record.token_account.to_bytes());
        data
    }

    #[test]
    fn decodes_a_well_formed_record() {
        let record = CrowdsaleRecord {
            id: Pubkey::new_unique(),
            cost: 1,
            mint: Pubkey::new_unique(),
            token_account: Pubkey::new_unique(),
        };

        let data = encode(&record);
        assert_eq!(data.len(), RECORD_LEN);
        assert_eq!(CrowdsaleRecord::try_from_bytes(&data).unwrap(), record);
    }

    #[test]
    fn rejects_short_data() {
        let err = CrowdsaleRecord::try_from_bytes(&[0u8; 8]).unwrap_err();
        assert!(matches!(err, CrowdsaleError::PostconditionViolation(_)));
    }

    #[test]
    fn rejects_a_wrong_discriminator() {
        let err = CrowdsaleRecord::try_from_bytes(&[0u8; RECORD_LEN]).unwrap_err();
        assert!(matches!(err, CrowdsaleError::PostconditionViolation(_)));
    }
}
