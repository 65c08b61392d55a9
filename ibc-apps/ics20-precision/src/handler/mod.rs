//! Implements the processing logic of the precision-bridge middleware.
mod accounting;
mod refund;
mod update_settings;
mod validate_channel;

pub use accounting::*;
pub use refund::*;
pub use update_settings::*;
pub use validate_channel::*;

use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::PacketPayload;

use crate::context::PrecisionValidationContext;

/// Converts the sender of a packet into a host account.
pub fn parse_sender<Ctx>(payload: &PacketPayload) -> Result<Ctx::AccountId, PrecisionError>
where
    Ctx: PrecisionValidationContext,
{
    payload
        .sender_signer()
        .try_into()
        .map_err(|_| PrecisionError::ParseAccountFailure)
}
