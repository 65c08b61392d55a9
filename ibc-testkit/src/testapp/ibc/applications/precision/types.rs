//! In-memory host for the precision-bridge middleware.

use std::collections::{BTreeMap, BTreeSet};

use ibc_app_precision::types::{Amount, Settings};
use ibc_core::channel::types::channel::{ChannelEnd, State};
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::Signer;

use crate::fixtures::applications::precision::dummy_authority;
use crate::fixtures::core::channel::dummy_channel_end;

pub type PortChannelIdMap<V> = BTreeMap<PortId, BTreeMap<ChannelId, V>>;

/// Custody operations of [`MockPrecisionContext`] that can be made to fail.
#[derive(Clone, Debug, Default)]
pub struct FailurePoints {
    /// Denominations whose lock fails.
    pub lock: BTreeSet<String>,
    /// Denominations whose unlock fails.
    pub unlock: BTreeSet<String>,
    /// Fails every `send_coins` call.
    pub send: bool,
}

/// A host store holding channels, settings, totals and balances in memory.
///
/// Balances are keyed by the account string and the denomination; the
/// module custody is kept apart in `module_balances`.
#[derive(Clone, Debug)]
pub struct MockPrecisionContext {
    pub channels: PortChannelIdMap<ChannelEnd>,
    pub settings: Settings,
    pub authority: Signer,
    pub total_transferred_out: Amount,
    pub escrow_totals: BTreeMap<String, Amount>,
    pub balances: BTreeMap<(String, String), Amount>,
    pub module_balances: BTreeMap<String, Amount>,
    /// Maps a path-prefixed denomination to its local voucher denomination.
    pub voucher_aliases: BTreeMap<String, String>,
    pub failures: FailurePoints,
}

impl Default for MockPrecisionContext {
    fn default() -> Self {
        Self {
            channels: BTreeMap::new(),
            settings: Settings::default(),
            authority: dummy_authority(),
            total_transferred_out: Amount::from(0u64),
            escrow_totals: BTreeMap::new(),
            balances: BTreeMap::new(),
            module_balances: BTreeMap::new(),
            voucher_aliases: BTreeMap::new(),
            failures: FailurePoints::default(),
        }
    }
}

impl MockPrecisionContext {
    /// Registers a channel whose counterparty is `transfer/channel-7`.
    pub fn with_channel(mut self, port_id: PortId, channel_id: ChannelId, state: State) -> Self {
        let channel_end = dummy_channel_end(state, PortId::transfer(), ChannelId::new(7));
        self.channels
            .entry(port_id)
            .or_default()
            .insert(channel_id, channel_end);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_balance(mut self, account: &Signer, denom: &str, amount: Amount) -> Self {
        self.balances
            .insert((account.to_string(), denom.to_string()), amount);
        self
    }

    pub fn with_module_balance(mut self, denom: &str, amount: Amount) -> Self {
        self.module_balances.insert(denom.to_string(), amount);
        self
    }

    pub fn with_escrow_total(mut self, denom: &str, amount: Amount) -> Self {
        self.escrow_totals.insert(denom.to_string(), amount);
        self
    }

    pub fn with_total_transferred_out(mut self, total: Amount) -> Self {
        self.total_transferred_out = total;
        self
    }

    pub fn with_voucher_alias(mut self, prefixed_denom: &str, voucher_denom: &str) -> Self {
        self.voucher_aliases
            .insert(prefixed_denom.to_string(), voucher_denom.to_string());
        self
    }

    pub fn with_failing_lock(mut self, denom: &str) -> Self {
        self.failures.lock.insert(denom.to_string());
        self
    }

    pub fn with_failing_unlock(mut self, denom: &str) -> Self {
        self.failures.unlock.insert(denom.to_string());
        self
    }

    pub fn with_failing_send(mut self) -> Self {
        self.failures.send = true;
        self
    }

    pub fn balance_of(&self, account: &Signer, denom: &str) -> Amount {
        self.balances
            .get(&(account.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_else(|| Amount::from(0u64))
    }

    pub fn module_balance_of(&self, denom: &str) -> Amount {
        self.module_balances
            .get(denom)
            .copied()
            .unwrap_or_else(|| Amount::from(0u64))
    }
}

/// Stands in for the ICS-20 transfer application beneath the middleware.
///
/// On an error acknowledgement it credits the packet amount back to the
/// sender in the packet denomination, the way ICS-20 refunds a failed
/// transfer. `fail_with` makes the callback itself fail.
#[derive(Clone, Debug, Default)]
pub struct MockTransferCallback {
    pub invocations: usize,
    pub fail_with: Option<String>,
}

impl MockTransferCallback {
    pub fn failing(reason: &str) -> Self {
        Self {
            invocations: 0,
            fail_with: Some(reason.to_string()),
        }
    }
}
