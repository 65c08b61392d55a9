use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::events::{ErrorEvent, RefundCompletedEvent};
use ibc_app_precision_types::{scale_down, Amount, Coin, PacketPayload, PrefixedCoin, Settings};
use ibc_core::primitives::prelude::*;
use ibc_core::router::types::module::ModuleExtras;
use tracing::{error, info, warn};

use crate::context::PrecisionExecutionContext;

/// Steps of the refund exchange, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RefundStep {
    ResolveDenoms,
    ScaleDown,
    CheckSenderBalance,
    CheckModuleBalance,
    LockVoucher,
    UnlockNative,
}

/// Result of putting the locked voucher back after the native unlock failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Compensation {
    Restored,
    /// The voucher stays in module custody; recovery is manual.
    Failed(PrecisionError),
}

/// How far the refund exchange got.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefundOutcome {
    /// The voucher was locked and the native token released to the sender.
    Completed(RefundCompleted),
    /// Stopped before or at the voucher lock. Nothing was written.
    Aborted {
        step: RefundStep,
        error: PrecisionError,
    },
    /// The voucher was locked but releasing the native token failed.
    UnlockFailed {
        error: PrecisionError,
        compensation: Compensation,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefundCompleted {
    pub voucher: Coin<String>,
    pub native: Coin<String>,
}

impl RefundOutcome {
    fn aborted(step: RefundStep, error: PrecisionError) -> Self {
        Self::Aborted { step, error }
    }
}

/// Exchanges the voucher returned to the sender of a failed transfer for
/// the equivalent amount of locked native tokens.
///
/// Every check runs before the first write. The only write that can be
/// followed by a failure is the voucher lock; it is undone on a best-effort
/// basis and the outcome of that compensation is reported, not retried.
pub fn exchange_refunded_voucher<Ctx>(
    ctx: &mut Ctx,
    settings: &Settings,
    sender: &Ctx::AccountId,
    token: &PrefixedCoin,
) -> RefundOutcome
where
    Ctx: PrecisionExecutionContext,
{
    let voucher_denom = ctx
        .voucher_denom(&token.denom)
        .unwrap_or_else(|| token.denom.to_string());

    let Some(native_denom) = settings.native_denom.as_ref() else {
        return RefundOutcome::aborted(
            RefundStep::ResolveDenoms,
            PrecisionError::InvalidSettings {
                reason: "native denom is not set".to_string(),
            },
        );
    };

    let converted = match scale_down(token.amount, settings.decimal_difference) {
        Ok(converted) => converted,
        Err(e) => return RefundOutcome::aborted(RefundStep::ScaleDown, e),
    };

    let voucher = Coin {
        denom: voucher_denom,
        amount: token.amount,
    };
    let native = Coin {
        denom: native_denom.to_string(),
        amount: converted,
    };

    match ctx.account_balance(sender, &voucher.denom) {
        Ok(available) if available >= voucher.amount => {}
        Ok(available) => {
            return RefundOutcome::aborted(
                RefundStep::CheckSenderBalance,
                insufficient_sender_funds(&voucher, available),
            )
        }
        Err(e) => return RefundOutcome::aborted(RefundStep::CheckSenderBalance, e),
    }

    match ctx.module_balance(&native.denom) {
        Ok(available) if available >= native.amount => {}
        Ok(available) => {
            return RefundOutcome::aborted(
                RefundStep::CheckModuleBalance,
                insufficient_module_funds(&native, available),
            )
        }
        Err(e) => return RefundOutcome::aborted(RefundStep::CheckModuleBalance, e),
    }

    if let Err(e) = ctx.lock_tokens(sender, &voucher) {
        return RefundOutcome::aborted(RefundStep::LockVoucher, e);
    }

    if let Err(error) = ctx.unlock_tokens(sender, &native) {
        let compensation = match ctx.unlock_tokens(sender, &voucher) {
            Ok(()) => Compensation::Restored,
            Err(e) => Compensation::Failed(e),
        };
        return RefundOutcome::UnlockFailed {
            error,
            compensation,
        };
    }

    RefundOutcome::Completed(RefundCompleted { voucher, native })
}

/// Runs the refund exchange for a failed acknowledgement and turns its
/// outcome into events.
///
/// A failed compensation does not change the returned error, which is always
/// the error of the step that stopped the exchange.
pub fn refund_packet_execute<Ctx>(
    ctx: &mut Ctx,
    settings: &Settings,
    sender: &Ctx::AccountId,
    payload: &PacketPayload,
    token: &PrefixedCoin,
) -> (ModuleExtras, Result<(), PrecisionError>)
where
    Ctx: PrecisionExecutionContext,
{
    let mut extras = ModuleExtras::empty();

    match exchange_refunded_voucher(ctx, settings, sender, token) {
        RefundOutcome::Completed(RefundCompleted { voucher, native }) => {
            info!(
                sender = %payload.sender,
                voucher = %voucher.amount,
                native = %native.amount,
                "refund completed"
            );
            extras.events.push(
                RefundCompletedEvent {
                    sender: payload.sender_signer(),
                    original_amount: voucher.amount,
                    original_denom: voucher.denom,
                    converted_amount: native.amount,
                    converted_denom: native.denom,
                }
                .into(),
            );
            (extras, Ok(()))
        }
        RefundOutcome::Aborted { step, error } => {
            warn!(?step, %error, sender = %payload.sender, "refund aborted");
            extras.events.push(
                ErrorEvent {
                    error: error.clone(),
                }
                .into(),
            );
            (extras, Err(error))
        }
        RefundOutcome::UnlockFailed {
            error,
            compensation,
        } => {
            warn!(%error, sender = %payload.sender, "refund unlock failed");
            if let Compensation::Failed(compensation_error) = compensation {
                error!(
                    %compensation_error,
                    sender = %payload.sender,
                    denom = %payload.denom,
                    amount = %payload.amount,
                    "voucher remains locked after failed compensation"
                );
                extras.events.push(
                    ErrorEvent {
                        error: compensation_error,
                    }
                    .into(),
                );
            }
            extras.events.push(
                ErrorEvent {
                    error: error.clone(),
                }
                .into(),
            );
            (extras, Err(error))
        }
    }
}

fn funds_shortfall(coin: &Coin<String>, available: Amount) -> (String, String) {
    (
        format!("{}{}", coin.amount, coin.denom),
        format!("{}{}", available, coin.denom),
    )
}

fn insufficient_sender_funds(coin: &Coin<String>, available: Amount) -> PrecisionError {
    let (send_attempt, available_funds) = funds_shortfall(coin, available);
    PrecisionError::InsufficientFunds {
        send_attempt,
        available_funds,
    }
}

fn insufficient_module_funds(coin: &Coin<String>, available: Amount) -> PrecisionError {
    let (send_attempt, available_funds) = funds_shortfall(coin, available);
    PrecisionError::InsufficientModuleFunds {
        send_attempt,
        available_funds,
    }
}
