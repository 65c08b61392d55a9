use std::str::FromStr;

use ibc_app_precision::context::{
    AcknowledgementCallback, PrecisionExecutionContext, PrecisionValidationContext,
};
use ibc_app_precision::types::error::PrecisionError;
use ibc_app_precision::types::{Amount, Coin, PacketPayload, PrefixedDenom, Settings};
use ibc_core::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_core::channel::types::channel::ChannelEnd;
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, PortId};
use ibc_core::primitives::Signer;
use ibc_core::router::types::module::ModuleExtras;
use tracing::{debug, trace};

use super::types::{MockPrecisionContext, MockTransferCallback};

fn custody_error(description: impl Into<String>) -> PrecisionError {
    PrecisionError::Custody {
        description: description.into(),
    }
}

impl MockPrecisionContext {
    fn debit_account(&mut self, account: &Signer, coin: &Coin<String>) -> Result<(), PrecisionError> {
        let key = (account.to_string(), coin.denom.clone());
        let available = self.balance_of(account, &coin.denom);
        let remaining = available.checked_sub(coin.amount).ok_or_else(|| {
            custody_error(format!("{account} cannot spend {coin}, holds {available}"))
        })?;
        self.balances.insert(key, remaining);
        Ok(())
    }

    fn credit_account(&mut self, account: &Signer, coin: &Coin<String>) -> Result<(), PrecisionError> {
        let key = (account.to_string(), coin.denom.clone());
        let current = self.balance_of(account, &coin.denom);
        let updated = current
            .checked_add(coin.amount)
            .ok_or_else(|| custody_error(format!("balance overflow crediting {coin}")))?;
        self.balances.insert(key, updated);
        Ok(())
    }

    fn debit_module(&mut self, coin: &Coin<String>) -> Result<(), PrecisionError> {
        let available = self.module_balance_of(&coin.denom);
        let remaining = available.checked_sub(coin.amount).ok_or_else(|| {
            custody_error(format!("module cannot release {coin}, holds {available}"))
        })?;
        self.module_balances.insert(coin.denom.clone(), remaining);
        Ok(())
    }

    fn credit_module(&mut self, coin: &Coin<String>) -> Result<(), PrecisionError> {
        let current = self.module_balance_of(&coin.denom);
        let updated = current
            .checked_add(coin.amount)
            .ok_or_else(|| custody_error(format!("module balance overflow crediting {coin}")))?;
        self.module_balances.insert(coin.denom.clone(), updated);
        Ok(())
    }
}

impl PrecisionValidationContext for MockPrecisionContext {
    type AccountId = Signer;

    fn channel_end(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelEnd>, PrecisionError> {
        Ok(self
            .channels
            .get(port_id)
            .and_then(|channels| channels.get(channel_id))
            .cloned())
    }

    fn settings(&self) -> Result<Settings, PrecisionError> {
        Ok(self.settings.clone())
    }

    fn authority(&self) -> Signer {
        self.authority.clone()
    }

    fn total_transferred_out(&self) -> Result<Amount, PrecisionError> {
        Ok(self.total_transferred_out)
    }

    fn total_escrow_for_denom(&self, denom: &str) -> Result<Amount, PrecisionError> {
        Ok(self
            .escrow_totals
            .get(denom)
            .copied()
            .unwrap_or_else(|| Amount::from(0u64)))
    }

    fn escrow_denoms(&self) -> Result<Vec<String>, PrecisionError> {
        Ok(self.escrow_totals.keys().cloned().collect())
    }

    fn account_balance(&self, account: &Signer, denom: &str) -> Result<Amount, PrecisionError> {
        Ok(self.balance_of(account, denom))
    }

    fn module_balance(&self, denom: &str) -> Result<Amount, PrecisionError> {
        Ok(self.module_balance_of(denom))
    }

    fn voucher_denom(&self, denom: &PrefixedDenom) -> Option<String> {
        self.voucher_aliases.get(&denom.to_string()).cloned()
    }
}

impl PrecisionExecutionContext for MockPrecisionContext {
    fn store_settings(&mut self, settings: Settings) -> Result<(), PrecisionError> {
        self.settings = settings;
        Ok(())
    }

    fn store_total_transferred_out(&mut self, total: Amount) -> Result<(), PrecisionError> {
        self.total_transferred_out = total;
        Ok(())
    }

    fn store_total_escrow_for_denom(
        &mut self,
        denom: &str,
        amount: Amount,
    ) -> Result<(), PrecisionError> {
        self.escrow_totals.insert(denom.to_string(), amount);
        Ok(())
    }

    fn send_coins(
        &mut self,
        from: &Signer,
        to: &Signer,
        coin: &Coin<String>,
    ) -> Result<(), PrecisionError> {
        if self.failures.send {
            return Err(custody_error("send_coins disabled"));
        }
        trace!(%from, %to, %coin, "sending coins");
        self.debit_account(from, coin)?;
        self.credit_account(to, coin)
    }

    fn lock_tokens(&mut self, account: &Signer, coin: &Coin<String>) -> Result<(), PrecisionError> {
        if self.failures.lock.contains(&coin.denom) {
            return Err(custody_error(format!("lock of {} disabled", coin.denom)));
        }
        trace!(%account, %coin, "locking tokens");
        self.debit_account(account, coin)?;
        self.credit_module(coin)
    }

    fn unlock_tokens(&mut self, account: &Signer, coin: &Coin<String>) -> Result<(), PrecisionError> {
        if self.failures.unlock.contains(&coin.denom) {
            return Err(custody_error(format!("unlock of {} disabled", coin.denom)));
        }
        trace!(%account, %coin, "unlocking tokens");
        self.debit_module(coin)?;
        self.credit_account(account, coin)
    }
}

impl AcknowledgementCallback<MockPrecisionContext> for MockTransferCallback {
    type Error = String;

    fn on_acknowledgement_packet_execute(
        &mut self,
        ctx: &mut MockPrecisionContext,
        _version: &Version,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), Self::Error>) {
        self.invocations += 1;

        if let Some(reason) = &self.fail_with {
            return (ModuleExtras::empty(), Err(reason.clone()));
        }

        let Ok(status) = serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
        else {
            return (ModuleExtras::empty(), Ok(()));
        };
        if status.is_successful() {
            return (ModuleExtras::empty(), Ok(()));
        }

        let refunded = serde_json::from_slice::<PacketPayload>(&packet.data)
            .map_err(|e| e.to_string())
            .and_then(|payload| {
                let amount = Amount::from_str(&payload.amount).map_err(|e| e.to_string())?;
                let coin = Coin {
                    denom: payload.denom.clone(),
                    amount,
                };
                debug!(sender = %payload.sender, %coin, "refunding sender");
                ctx.credit_account(&payload.sender_signer(), &coin)
                    .map_err(|e| e.to_string())
            });

        (ModuleExtras::empty(), refunded)
    }
}
