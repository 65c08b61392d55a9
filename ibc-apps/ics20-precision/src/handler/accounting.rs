use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::{Amount, Coin};
use ibc_core::primitives::prelude::*;
use tracing::info;

use crate::context::PrecisionExecutionContext;

/// Adds a low-precision amount to the running total moved out over the
/// tracked channel and returns the new total.
pub fn add_to_total_transferred_out(
    ctx: &mut impl PrecisionExecutionContext,
    amount: Amount,
) -> Result<Amount, PrecisionError> {
    let total = ctx
        .total_transferred_out()?
        .checked_add(amount)
        .ok_or(PrecisionError::TotalOverflow { amount })?;

    ctx.store_total_transferred_out(total)?;

    info!(%amount, %total, "recorded transfer out");

    Ok(total)
}

/// Releases `coin` from an escrow account to `receiver` and lowers the
/// escrow total of its denomination accordingly.
///
/// The escrow total is only written after the custody transfer succeeded.
pub fn unescrow_token<Ctx>(
    ctx: &mut Ctx,
    escrow_address: &Ctx::AccountId,
    receiver: &Ctx::AccountId,
    coin: &Coin<String>,
) -> Result<(), PrecisionError>
where
    Ctx: PrecisionExecutionContext,
{
    let remaining = ctx
        .total_escrow_for_denom(&coin.denom)?
        .checked_sub(coin.amount)
        .ok_or_else(|| PrecisionError::EscrowUnderflow {
            denom: coin.denom.clone(),
            amount: coin.amount,
        })?;

    ctx.send_coins(escrow_address, receiver, coin)?;

    ctx.store_total_escrow_for_denom(&coin.denom, remaining)
}
