mod acknowledgement;
mod packet;

pub use acknowledgement::*;
use ibc_core::channel::types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId};
pub use packet::*;

/// ICS-20 channel version used by the dummy channel ends.
pub const DUMMY_CHANNEL_VERSION: &str = "ics20-1";

/// Returns a dummy unordered `ChannelEnd` in the given state, for testing purposes only!
pub fn dummy_channel_end(
    state: State,
    counterparty_port: PortId,
    counterparty_channel: ChannelId,
) -> ChannelEnd {
    ChannelEnd::new(
        state,
        Order::Unordered,
        Counterparty::new(counterparty_port, Some(counterparty_channel)),
        vec![ConnectionId::zero()],
        Version::new(DUMMY_CHANNEL_VERSION.to_string()),
    )
    .expect("dummy channel end is valid")
}
