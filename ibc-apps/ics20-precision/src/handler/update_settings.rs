use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::events::SettingsUpdatedEvent;
use ibc_app_precision_types::msgs::MsgUpdateSettings;
use ibc_app_precision_types::Amount;
use ibc_core::primitives::prelude::*;
use ibc_core::router::types::module::ModuleExtras;
use tracing::info;

use crate::context::{PrecisionExecutionContext, PrecisionValidationContext};

pub fn update_settings_validate(
    ctx: &impl PrecisionValidationContext,
    msg: &MsgUpdateSettings,
) -> Result<(), PrecisionError> {
    let authority = ctx.authority();
    if msg.authority != authority {
        return Err(PrecisionError::Unauthorized {
            signer: msg.authority.to_string(),
            authority: authority.to_string(),
        });
    }

    msg.settings.validate_basic()?;

    // totals already recorded are expressed in the current low-precision unit
    let current = ctx.settings()?;
    let total = ctx.total_transferred_out()?;
    if current.decimal_difference != msg.settings.decimal_difference
        && total != Amount::from(0u64)
    {
        return Err(PrecisionError::DecimalDifferenceLocked { total });
    }

    Ok(())
}

pub fn update_settings_execute(
    ctx: &mut impl PrecisionExecutionContext,
    msg: MsgUpdateSettings,
) -> Result<ModuleExtras, PrecisionError> {
    ctx.store_settings(msg.settings.clone())?;

    info!(
        enabled = msg.settings.enabled,
        decimal_difference = msg.settings.decimal_difference,
        "precision settings updated"
    );

    Ok(ModuleExtras {
        events: vec![SettingsUpdatedEvent {
            settings: msg.settings,
        }
        .into()],
        log: Vec::new(),
    })
}
