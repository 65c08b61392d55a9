//! Defines the main context traits and the wrapped transfer callback

use core::fmt::Display;

use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::{Amount, Coin, PrefixedDenom, Settings};
use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::types::module::ModuleExtras;

/// Read access to the host state the middleware depends on, to be
/// implemented by the host
pub trait PrecisionValidationContext {
    type AccountId: TryFrom<Signer>;

    /// Looks up a channel end. Returns `Ok(None)` if no channel is
    /// registered under the given identifiers.
    fn channel_end(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelEnd>, PrecisionError>;

    /// Loads the middleware settings.
    fn settings(&self) -> Result<Settings, PrecisionError>;

    /// Signer allowed to replace the settings.
    fn authority(&self) -> Signer;

    /// Running total moved out over the tracked channel, in the low-precision unit.
    fn total_transferred_out(&self) -> Result<Amount, PrecisionError>;

    fn total_escrow_for_denom(&self, denom: &str) -> Result<Amount, PrecisionError>;

    /// Denominations with a recorded escrow total.
    fn escrow_denoms(&self) -> Result<Vec<String>, PrecisionError>;

    fn account_balance(
        &self,
        account: &Self::AccountId,
        denom: &str,
    ) -> Result<Amount, PrecisionError>;

    /// Balance held in the custody of the middleware module.
    fn module_balance(&self, denom: &str) -> Result<Amount, PrecisionError>;

    /// Returns the local denomination of the voucher that represents
    /// `denom`, e.g. its `ibc/{hash}` form.
    /// Implement only if the host chain supports hashed denominations.
    fn voucher_denom(&self, _denom: &PrefixedDenom) -> Option<String> {
        None
    }
}

/// Write access to the host state, including the token custody primitive
pub trait PrecisionExecutionContext: PrecisionValidationContext {
    fn store_settings(&mut self, settings: Settings) -> Result<(), PrecisionError>;

    fn store_total_transferred_out(&mut self, total: Amount) -> Result<(), PrecisionError>;

    fn store_total_escrow_for_denom(
        &mut self,
        denom: &str,
        amount: Amount,
    ) -> Result<(), PrecisionError>;

    /// Moves `coin` between two accounts.
    fn send_coins(
        &mut self,
        from: &Self::AccountId,
        to: &Self::AccountId,
        coin: &Coin<String>,
    ) -> Result<(), PrecisionError>;

    /// Debits `account` and credits the module custody.
    fn lock_tokens(
        &mut self,
        account: &Self::AccountId,
        coin: &Coin<String>,
    ) -> Result<(), PrecisionError>;

    /// Debits the module custody and credits `account`.
    fn unlock_tokens(
        &mut self,
        account: &Self::AccountId,
        coin: &Coin<String>,
    ) -> Result<(), PrecisionError>;
}

/// The acknowledgement callback of the transfer application wrapped by the
/// middleware.
///
/// It receives the same host context as the middleware so that its own
/// refund (unescrow or mint back to the sender) is visible to the steps that
/// follow it.
pub trait AcknowledgementCallback<Ctx> {
    type Error: Display;

    fn on_acknowledgement_packet_execute(
        &mut self,
        ctx: &mut Ctx,
        version: &Version,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), Self::Error>);
}
