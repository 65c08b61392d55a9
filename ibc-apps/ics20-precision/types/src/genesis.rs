//! Defines the genesis state of the middleware store
use alloc::collections::BTreeSet;

use ibc_core::primitives::prelude::*;

use crate::error::PrecisionError;
use crate::{Amount, Settings};

/// Escrowed amount recorded for one denomination.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EscrowTotal {
    pub denom: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub amount: Amount,
}

/// Full state of the middleware store, imported at chain start and exported
/// on upgrades.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenesisState {
    pub settings: Settings,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub total_transferred_out: Amount,
    #[serde(default)]
    pub escrow_totals: Vec<EscrowTotal>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            total_transferred_out: Amount::from(0u64),
            escrow_totals: Vec::new(),
        }
    }
}

impl GenesisState {
    pub fn validate(&self) -> Result<(), PrecisionError> {
        self.settings.validate_basic()?;

        let mut seen = BTreeSet::new();
        for escrow in &self.escrow_totals {
            if escrow.denom.trim().is_empty() {
                return Err(PrecisionError::InvalidSettings {
                    reason: "escrow total with empty denomination".to_string(),
                });
            }
            if !seen.insert(escrow.denom.as_str()) {
                return Err(PrecisionError::InvalidSettings {
                    reason: format!("duplicate escrow total for `{}`", escrow.denom),
                });
            }
        }

        Ok(())
    }
}
