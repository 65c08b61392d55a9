//! Defines all precision-bridge event types
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::types::event::ModuleEvent;

use crate::error::PrecisionError;
use crate::{Amount, Settings, MODULE_ID_STR};

const EVENT_TYPE_INFO: &str = "precision_info";
const EVENT_TYPE_ERROR: &str = "precision_error";
const EVENT_TYPE_REFUND_COMPLETED: &str = "refund_completed";
const EVENT_TYPE_TRANSFER_OUT: &str = "transfer_out_recorded";
const EVENT_TYPE_SETTINGS: &str = "settings_updated";

/// Contains all events variants that can be emitted by the middleware
pub enum Event {
    Info(InfoEvent),
    Error(ErrorEvent),
    RefundCompleted(RefundCompletedEvent),
    TransferOut(TransferOutEvent),
    SettingsUpdated(SettingsUpdatedEvent),
}

/// Informational event, e.g. when a packet passes through untracked
pub struct InfoEvent {
    pub message: String,
}

impl From<InfoEvent> for ModuleEvent {
    fn from(ev: InfoEvent) -> Self {
        Self {
            kind: EVENT_TYPE_INFO.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("message", ev.message).into(),
            ],
        }
    }
}

/// Emitted whenever processing fails, including refund failures that are
/// not surfaced to the caller
pub struct ErrorEvent {
    pub error: PrecisionError,
}

impl From<ErrorEvent> for ModuleEvent {
    fn from(ev: ErrorEvent) -> Self {
        let ErrorEvent { error } = ev;
        Self {
            kind: EVENT_TYPE_ERROR.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("kind", error.kind()).into(),
                ("error", error).into(),
            ],
        }
    }
}

/// Emitted once a returned voucher has been exchanged for the native token
pub struct RefundCompletedEvent {
    pub sender: Signer,
    pub original_amount: Amount,
    pub original_denom: String,
    pub converted_amount: Amount,
    pub converted_denom: String,
}

impl From<RefundCompletedEvent> for ModuleEvent {
    fn from(ev: RefundCompletedEvent) -> Self {
        let RefundCompletedEvent {
            sender,
            original_amount,
            original_denom,
            converted_amount,
            converted_denom,
        } = ev;
        Self {
            kind: EVENT_TYPE_REFUND_COMPLETED.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("sender", sender).into(),
                ("original_amount", original_amount).into(),
                ("original_denom", original_denom).into(),
                ("converted_amount", converted_amount).into(),
                ("converted_denom", converted_denom).into(),
            ],
        }
    }
}

/// Emitted on a successful acknowledgement, after the low-precision amount
/// has been added to the running total
pub struct TransferOutEvent {
    pub amount: Amount,
    pub total: Amount,
}

impl From<TransferOutEvent> for ModuleEvent {
    fn from(ev: TransferOutEvent) -> Self {
        let TransferOutEvent { amount, total } = ev;
        Self {
            kind: EVENT_TYPE_TRANSFER_OUT.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("amount", amount).into(),
                ("total", total).into(),
            ],
        }
    }
}

/// Emitted after `MsgUpdateSettings` has been applied
pub struct SettingsUpdatedEvent {
    pub settings: Settings,
}

impl From<SettingsUpdatedEvent> for ModuleEvent {
    fn from(ev: SettingsUpdatedEvent) -> Self {
        let Settings {
            native_port,
            native_channel,
            tracked_denom,
            decimal_difference,
            enabled,
            ..
        } = ev.settings;

        let or_empty = |value: Option<String>| value.unwrap_or_default();

        Self {
            kind: EVENT_TYPE_SETTINGS.to_string(),
            attributes: vec![
                ("module", MODULE_ID_STR).into(),
                ("native_port", or_empty(native_port.map(|p| p.to_string()))).into(),
                (
                    "native_channel",
                    or_empty(native_channel.map(|c| c.to_string())),
                )
                    .into(),
                (
                    "tracked_denom",
                    or_empty(tracked_denom.map(|d| d.to_string())),
                )
                    .into(),
                ("decimal_difference", decimal_difference).into(),
                ("enabled", enabled).into(),
            ],
        }
    }
}

impl From<Event> for ModuleEvent {
    fn from(ev: Event) -> Self {
        match ev {
            Event::Info(ev) => ev.into(),
            Event::Error(ev) => ev.into(),
            Event::RefundCompleted(ev) => ev.into(),
            Event::TransferOut(ev) => ev.into(),
            Event::SettingsUpdated(ev) => ev.into(),
        }
    }
}
