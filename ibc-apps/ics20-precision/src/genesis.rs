//! Import and export of the middleware store
use ibc_app_precision_types::error::PrecisionError;
use ibc_app_precision_types::genesis::{EscrowTotal, GenesisState};
use ibc_core::primitives::prelude::*;

use crate::context::{PrecisionExecutionContext, PrecisionValidationContext};

pub fn init_genesis(
    ctx: &mut impl PrecisionExecutionContext,
    genesis: GenesisState,
) -> Result<(), PrecisionError> {
    genesis.validate()?;

    ctx.store_settings(genesis.settings)?;
    ctx.store_total_transferred_out(genesis.total_transferred_out)?;
    for EscrowTotal { denom, amount } in genesis.escrow_totals {
        ctx.store_total_escrow_for_denom(&denom, amount)?;
    }

    Ok(())
}

pub fn export_genesis(ctx: &impl PrecisionValidationContext) -> Result<GenesisState, PrecisionError> {
    let escrow_totals = ctx
        .escrow_denoms()?
        .into_iter()
        .map(|denom| {
            let amount = ctx.total_escrow_for_denom(&denom)?;
            Ok(EscrowTotal { denom, amount })
        })
        .collect::<Result<Vec<_>, PrecisionError>>()?;

    Ok(GenesisState {
        settings: ctx.settings()?,
        total_transferred_out: ctx.total_transferred_out()?,
        escrow_totals,
    })
}
