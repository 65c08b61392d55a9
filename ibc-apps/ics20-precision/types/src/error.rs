//! Defines the precision-bridge middleware error type
use displaydoc::Display;
use ibc_core::channel::types::acknowledgement::StatusValue;
use ibc_core::channel::types::channel::State;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::prelude::*;

use crate::Amount;

#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum PrecisionError {
    /// channel not found: port `{port_id}`, channel `{channel_id}`
    ChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel port `{port_id}`, channel `{channel_id}` is not open: state is `{state}`
    ChannelNotOpen {
        port_id: PortId,
        channel_id: ChannelId,
        state: State,
    },
    /// ibc settings do not match the expected values
    SettingsMismatch,
    /// precision middleware functionality is disabled
    Disabled,
    /// invalid settings: `{reason}`
    InvalidSettings { reason: String },
    /// decimal difference cannot change once `{total}` has been transferred out
    DecimalDifferenceLocked { total: Amount },
    /// unauthorized signer `{signer}`, expected `{authority}`
    Unauthorized { signer: String, authority: String },
    /// failed to deserialize packet data
    PacketDataDeserialization,
    /// failed to deserialize acknowledgement
    AckDeserialization,
    /// invalid denomination `{denom}`
    InvalidDenom { denom: String },
    /// invalid amount `{amount}`
    InvalidAmount { amount: String },
    /// failed to parse as AccountId
    ParseAccountFailure,
    /// converted amount is zero or negative
    NonPositiveConversion,
    /// insufficient funds: tried to lock `{send_attempt}`, account only has `{available_funds}`
    InsufficientFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// insufficient module funds: tried to unlock `{send_attempt}`, module only has `{available_funds}`
    InsufficientModuleFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// total transferred out overflows when adding `{amount}`
    TotalOverflow { amount: Amount },
    /// escrow total for `{denom}` underflows when subtracting `{amount}`
    EscrowUnderflow { denom: String, amount: Amount },
    /// token custody failure: `{description}`
    Custody { description: String },
    /// host store failure: `{description}`
    Store { description: String },
    /// underlying transfer callback failed: `{description}`
    Underlying { description: String },
}

/// Coarse classification of [`PrecisionError`]s, used by hosts and in
/// emitted error events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    #[display(fmt = "validation")]
    Validation,
    #[display(fmt = "decode")]
    Decode,
    #[display(fmt = "scaling")]
    Scaling,
    #[display(fmt = "balance")]
    Balance,
    #[display(fmt = "primitive")]
    Primitive,
}

impl PrecisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChannelNotFound { .. }
            | Self::ChannelNotOpen { .. }
            | Self::SettingsMismatch
            | Self::Disabled
            | Self::InvalidSettings { .. }
            | Self::DecimalDifferenceLocked { .. }
            | Self::Unauthorized { .. } => ErrorKind::Validation,
            Self::PacketDataDeserialization
            | Self::AckDeserialization
            | Self::InvalidDenom { .. }
            | Self::InvalidAmount { .. }
            | Self::ParseAccountFailure => ErrorKind::Decode,
            Self::NonPositiveConversion => ErrorKind::Scaling,
            Self::InsufficientFunds { .. } | Self::InsufficientModuleFunds { .. } => {
                ErrorKind::Balance
            }
            Self::TotalOverflow { .. }
            | Self::EscrowUnderflow { .. }
            | Self::Custody { .. }
            | Self::Store { .. }
            | Self::Underlying { .. } => ErrorKind::Primitive,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PrecisionError {}

impl From<PrecisionError> for StatusValue {
    fn from(err: PrecisionError) -> Self {
        StatusValue::new(err.to_string()).expect("error message must not be empty")
    }
}
