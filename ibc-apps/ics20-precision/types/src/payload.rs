//! Contains the `PacketPayload` type, the undecoded view of an ICS-20
//! transfer packet's JSON bytes.
use core::str::FromStr;

use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;

use crate::error::PrecisionError;
use crate::{Amount, PrefixedCoin, PrefixedDenom};

/// Fields of a fungible token packet exactly as they appear on the wire,
/// e.g. `{"denom":"transfer/channel-0/aevmos","amount":"10","sender":"..","receiver":".."}`.
///
/// The strings are kept raw so that every field can be parsed at the point
/// where the acknowledgement processor needs it, each with its own error.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PacketPayload {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub memo: String,
}

impl PacketPayload {
    /// Parses the path-prefixed denomination.
    pub fn prefixed_denom(&self) -> Result<PrefixedDenom, PrecisionError> {
        PrefixedDenom::from_str(&self.denom).map_err(|_| PrecisionError::InvalidDenom {
            denom: self.denom.clone(),
        })
    }

    /// Parses the decimal amount string.
    pub fn parsed_amount(&self) -> Result<Amount, PrecisionError> {
        Amount::from_str(&self.amount).map_err(|_| PrecisionError::InvalidAmount {
            amount: self.amount.clone(),
        })
    }

    /// Parses denomination and amount together into the transferred token.
    pub fn prefixed_coin(&self) -> Result<PrefixedCoin, PrecisionError> {
        Ok(PrefixedCoin {
            denom: self.prefixed_denom()?,
            amount: self.parsed_amount()?,
        })
    }

    pub fn sender_signer(&self) -> Signer {
        self.sender.clone().into()
    }
}
