//! Acknowledgement callbacks of the precision-bridge middleware
use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::events::{ErrorEvent, InfoEvent, TransferOutEvent};
use ibc_app_precision_types::{scale_down, PacketPayload, PrefixedCoin, PrefixedDenom, Settings};
use ibc_core::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::types::module::ModuleExtras;
use tracing::{debug, warn};

use crate::context::{
    AcknowledgementCallback, PrecisionExecutionContext, PrecisionValidationContext,
};
use crate::handler::{
    add_to_total_transferred_out, parse_sender, refund_packet_execute, validate_channel,
};

/// Outcome of checking a packet against the configured channel pair and
/// tracked denomination.
enum Gate {
    /// The packet is none of the middleware's business.
    PassThrough(&'static str),
    Tracked(PrefixedDenom),
}

fn decode_payload(packet: &Packet) -> Result<PacketPayload, PrecisionError> {
    serde_json::from_slice::<PacketPayload>(&packet.data)
        .map_err(|_| PrecisionError::PacketDataDeserialization)
}

fn decode_acknowledgement(
    acknowledgement: &Acknowledgement,
) -> Result<AcknowledgementStatus, PrecisionError> {
    serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
        .map_err(|_| PrecisionError::AckDeserialization)
}

fn config_gate(settings: &Settings, payload: &PacketPayload) -> Result<Gate, PrecisionError> {
    if !settings.is_configured() {
        return Ok(Gate::PassThrough("precision settings are not configured"));
    }

    let denom = payload.prefixed_denom()?;
    if !settings.is_tracked_denom(&denom.base_denom) {
        return Ok(Gate::PassThrough("packet denom is not tracked"));
    }

    Ok(Gate::Tracked(denom))
}

/// Rejects tracked packets that travel over another channel pair, and
/// everything while the middleware is disabled.
///
/// A tracked voucher on an unexpected route must not be handled by the
/// transfer application either: it would leave the accounting while staying
/// redeemable.
fn settings_gate(settings: &Settings, packet: &Packet) -> Result<(), PrecisionError> {
    if !settings.matches_packet(packet) {
        return Err(PrecisionError::SettingsMismatch);
    }
    if !settings.enabled {
        return Err(PrecisionError::Disabled);
    }
    Ok(())
}

fn failed(
    mut extras: ModuleExtras,
    error: PrecisionError,
) -> (ModuleExtras, Result<(), PrecisionError>) {
    debug!(%error, "acknowledgement rejected");
    extras.events.push(
        ErrorEvent {
            error: error.clone(),
        }
        .into(),
    );
    (extras, Err(error))
}

pub fn on_acknowledgement_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> Result<(), PrecisionError>
where
    Ctx: PrecisionValidationContext,
{
    validate_channel(ctx, &packet.port_id_on_a, &packet.chan_id_on_a)?;

    let payload = decode_payload(packet)?;
    let settings = ctx.settings()?;

    if let Gate::PassThrough(_) = config_gate(&settings, &payload)? {
        return Ok(());
    }

    settings_gate(&settings, packet)?;

    payload.parsed_amount()?;
    parse_sender::<Ctx>(&payload)?;

    decode_acknowledgement(acknowledgement)?;

    Ok(())
}

/// Processes the acknowledgement of a transfer sent from this chain.
///
/// Untracked packets are handed to `callback` and its result is returned as
/// is, except that an error of `callback` only keeps its message, as
/// [`PrecisionError::Underlying`]. Tracked packets run through the channel
/// and settings gates, then `callback`, then either record the scaled amount
/// (success) or exchange the refunded voucher for the native token (failure).
///
/// A failed exchange is reported through events and logs only. The call
/// still succeeds so that the transfer application's own failure handling
/// completes.
pub fn on_acknowledgement_packet_execute<Ctx, Cb>(
    ctx: &mut Ctx,
    callback: &mut Cb,
    version: &Version,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    relayer: &Signer,
) -> (ModuleExtras, Result<(), PrecisionError>)
where
    Ctx: PrecisionExecutionContext,
    Cb: AcknowledgementCallback<Ctx>,
{
    if let Err(e) = validate_channel(ctx, &packet.port_id_on_a, &packet.chan_id_on_a) {
        return failed(ModuleExtras::empty(), e);
    }

    let payload = match decode_payload(packet) {
        Ok(payload) => payload,
        Err(e) => return failed(ModuleExtras::empty(), e),
    };

    let settings = match ctx.settings() {
        Ok(settings) => settings,
        Err(e) => return failed(ModuleExtras::empty(), e),
    };

    let denom = match config_gate(&settings, &payload) {
        Ok(Gate::Tracked(denom)) => denom,
        Ok(Gate::PassThrough(reason)) => {
            debug!(seq = %packet.seq_on_a, reason, "passing acknowledgement through");
            let (mut extras, result) = callback.on_acknowledgement_packet_execute(
                ctx,
                version,
                packet,
                acknowledgement,
                relayer,
            );
            extras.events.push(
                InfoEvent {
                    message: reason.to_string(),
                }
                .into(),
            );
            let result = result.map_err(|e| PrecisionError::Underlying {
                description: e.to_string(),
            });
            return (extras, result);
        }
        Err(e) => return failed(ModuleExtras::empty(), e),
    };

    if let Err(e) = settings_gate(&settings, packet) {
        return failed(ModuleExtras::empty(), e);
    }

    let amount = match payload.parsed_amount() {
        Ok(amount) => amount,
        Err(e) => return failed(ModuleExtras::empty(), e),
    };

    let sender = match parse_sender::<Ctx>(&payload) {
        Ok(sender) => sender,
        Err(e) => return failed(ModuleExtras::empty(), e),
    };

    let (mut extras, result) =
        callback.on_acknowledgement_packet_execute(ctx, version, packet, acknowledgement, relayer);
    if let Err(e) = result {
        return failed(
            extras,
            PrecisionError::Underlying {
                description: e.to_string(),
            },
        );
    }

    let acknowledgement = match decode_acknowledgement(acknowledgement) {
        Ok(acknowledgement) => acknowledgement,
        Err(e) => return failed(extras, e),
    };

    if acknowledgement.is_successful() {
        let recorded = scale_down(amount, settings.decimal_difference)
            .and_then(|scaled| add_to_total_transferred_out(ctx, scaled).map(|t| (scaled, t)));
        match recorded {
            Ok((amount, total)) => extras
                .events
                .push(TransferOutEvent { amount, total }.into()),
            Err(e) => return failed(extras, e),
        }
    } else {
        let token = PrefixedCoin { denom, amount };
        let (refund_extras, refund_result) =
            refund_packet_execute(ctx, &settings, &sender, &payload, &token);
        extras.events.extend(refund_extras.events);
        extras.log.extend(refund_extras.log);

        if let Err(e) = refund_result {
            warn!(
                seq = %packet.seq_on_a,
                error = %e,
                "refund failed, deferring to the transfer application"
            );
            extras.log.push(format!("refund failed: {e}"));
        }
    }

    (extras, Ok(()))
}
