use ibc_app_precision_types::error::PrecisionError;
use ibc_core::host::types::identifiers::{ChannelId, PortId};

use crate::context::PrecisionValidationContext;

/// Checks that a channel is registered on the host and open.
pub fn validate_channel(
    ctx: &impl PrecisionValidationContext,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<(), PrecisionError> {
    let Some(channel_end) = ctx.channel_end(port_id, channel_id)? else {
        return Err(PrecisionError::ChannelNotFound {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        });
    };

    if !channel_end.is_open() {
        return Err(PrecisionError::ChannelNotOpen {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
            state: channel_end.state().clone(),
        });
    }

    Ok(())
}
