//! Defines the `Settings` value object that pins the middleware to one
//! channel endpoint pair and one tracked denomination.
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, PortId};
use ibc_core::primitives::prelude::*;

use crate::error::PrecisionError;
use crate::BaseDenom;

/// Configuration of the precision-bridge middleware.
///
/// A host keeps exactly one instance per chain. The acknowledgement path
/// loads it once per call and only reads it; it is replaced through
/// `MsgUpdateSettings` or genesis.
///
/// Changing `decimal_difference` after tokens were transferred out corrupts
/// the recorded totals, since they are kept in the low-precision unit.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    pub native_port: Option<PortId>,
    pub native_channel: Option<ChannelId>,
    pub native_client_id: Option<ClientId>,
    pub counterparty_port: Option<PortId>,
    pub counterparty_channel: Option<ChannelId>,
    pub counterparty_client_id: Option<ClientId>,
    /// Base denomination of the high-precision voucher carried by packets.
    pub tracked_denom: Option<BaseDenom>,
    /// Base denomination of the low-precision native token held by the module.
    pub native_denom: Option<BaseDenom>,
    /// Power-of-ten exponent separating the two precisions.
    pub decimal_difference: u32,
    pub enabled: bool,
}

impl Settings {
    /// Returns true iff the native port, native channel and tracked
    /// denomination are all set.
    pub fn is_configured(&self) -> bool {
        self.native_port.is_some() && self.native_channel.is_some() && self.tracked_denom.is_some()
    }

    /// Exact comparison of `base_denom` against the tracked denomination.
    pub fn is_tracked_denom(&self, base_denom: &BaseDenom) -> bool {
        self.tracked_denom
            .as_ref()
            .is_some_and(|tracked| tracked.as_str() == base_denom.as_str())
    }

    /// Returns true iff the source port and channel of the packet equal the
    /// native endpoint and its destination port and channel equal the
    /// counterparty endpoint.
    ///
    /// There is no partial match: a packet that agrees on three identifiers
    /// but differs on the fourth does not match.
    pub fn matches_packet(&self, packet: &Packet) -> bool {
        self.native_port.as_ref() == Some(&packet.port_id_on_a)
            && self.native_channel.as_ref() == Some(&packet.chan_id_on_a)
            && self.counterparty_port.as_ref() == Some(&packet.port_id_on_b)
            && self.counterparty_channel.as_ref() == Some(&packet.chan_id_on_b)
    }

    /// Checks that a partially filled endpoint configuration is never
    /// accepted. Unset settings (all endpoints and denominations empty) are
    /// valid and leave the middleware in pass-through mode.
    pub fn validate_basic(&self) -> Result<(), PrecisionError> {
        let required = [
            ("native port", self.native_port.is_some()),
            ("native channel", self.native_channel.is_some()),
            ("counterparty port", self.counterparty_port.is_some()),
            ("counterparty channel", self.counterparty_channel.is_some()),
            ("tracked denom", self.tracked_denom.is_some()),
            ("native denom", self.native_denom.is_some()),
        ];

        let any_set = required.iter().any(|(_, set)| *set)
            || self.native_client_id.is_some()
            || self.counterparty_client_id.is_some();

        if !any_set {
            if self.enabled {
                return Err(PrecisionError::InvalidSettings {
                    reason: "cannot enable unconfigured settings".to_string(),
                });
            }
            return Ok(());
        }

        if let Some((name, _)) = required.iter().find(|(_, set)| !*set) {
            return Err(PrecisionError::InvalidSettings {
                reason: format!("{name} is not set"),
            });
        }

        if self.tracked_denom == self.native_denom {
            return Err(PrecisionError::InvalidSettings {
                reason: "tracked and native denominations must differ".to_string(),
            });
        }

        Ok(())
    }
}
