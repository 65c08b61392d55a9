use std::str::FromStr;

use ibc_app_precision::types::{Amount, BaseDenom, PacketPayload, Settings};
use ibc_core::channel::types::channel::State;
use ibc_core::channel::types::packet::Packet;
use ibc_core::host::types::identifiers::{ChannelId, ClientId, PortId};
use ibc_core::primitives::Signer;
use typed_builder::TypedBuilder;

use crate::fixtures::core::channel::PacketConfig;
use crate::testapp::ibc::applications::precision::types::MockPrecisionContext;

/// Base denomination of the high-precision voucher (18 decimals).
pub const TRACKED_DENOM: &str = "atoken";
/// Base denomination of the low-precision native token (6 decimals).
pub const NATIVE_DENOM: &str = "utoken";
/// Denomination of the tracked voucher as carried by packets.
pub const TRACKED_PACKET_DENOM: &str = "transfer/channel-7/atoken";
pub const DECIMAL_DIFFERENCE: u32 = 12;

pub fn dummy_sender() -> Signer {
    Signer::from("cosmos1wxeyh7zgn4tctjzs0vtqpc6p5cxq5t2muzl7ng".to_string())
}

pub fn dummy_receiver() -> Signer {
    Signer::from("evmos1qql8ag4cluz6r4dz28p3w00dnc9w8ueulg2gmc".to_string())
}

pub fn dummy_relayer() -> Signer {
    Signer::from("cosmos1jqw0uwfdhz0yhdxcn2cj2f2m7zklfchzzmhgsa".to_string())
}

pub fn dummy_authority() -> Signer {
    Signer::from("cosmos10d07y265gmmuvt4z0w9aw880jnsr700j6zn9kn".to_string())
}

/// Returns enabled settings tracking `transfer/channel-0` to
/// `transfer/channel-7`, for testing purposes only!
pub fn dummy_settings() -> Settings {
    Settings {
        native_port: Some(PortId::transfer()),
        native_channel: Some(ChannelId::zero()),
        native_client_id: Some(
            ClientId::from_str("07-tendermint-0").expect("valid client identifier"),
        ),
        counterparty_port: Some(PortId::transfer()),
        counterparty_channel: Some(ChannelId::new(7)),
        counterparty_client_id: Some(
            ClientId::from_str("07-tendermint-3").expect("valid client identifier"),
        ),
        tracked_denom: Some(BaseDenom::from_str(TRACKED_DENOM).expect("valid denom")),
        native_denom: Some(BaseDenom::from_str(NATIVE_DENOM).expect("valid denom")),
        decimal_difference: DECIMAL_DIFFERENCE,
        enabled: true,
    }
}

/// Configuration of the `PacketPayload` type for building dummy packet data.
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = PacketPayload))]
pub struct PayloadConfig {
    #[builder(default = TRACKED_PACKET_DENOM.to_string(), setter(into))]
    pub denom: String,
    #[builder(default = "1000000000000000000".to_string(), setter(into))]
    pub amount: String,
    #[builder(default = dummy_sender().to_string(), setter(into))]
    pub sender: String,
    #[builder(default = dummy_receiver().to_string(), setter(into))]
    pub receiver: String,
    #[builder(default, setter(into))]
    pub memo: String,
}

impl From<PayloadConfig> for PacketPayload {
    fn from(config: PayloadConfig) -> Self {
        PacketPayload {
            denom: config.denom,
            amount: config.amount,
            sender: config.sender,
            receiver: config.receiver,
            memo: config.memo,
        }
    }
}

/// Encodes a payload the way ICS-20 puts it on the wire.
pub fn payload_bytes(payload: &PacketPayload) -> Vec<u8> {
    serde_json::to_vec(payload).expect("PacketPayload's infallible Serialize impl failed")
}

/// Returns a packet from `transfer/channel-0` to `transfer/channel-7`
/// carrying `payload`.
pub fn dummy_packet(payload: &PacketPayload) -> Packet {
    PacketConfig::builder().data(payload_bytes(payload)).build()
}

/// Returns a host with `transfer/channel-0` open, [`dummy_settings`] stored
/// and `module_native` of the native token in module custody.
pub fn dummy_precision_context(module_native: Amount) -> MockPrecisionContext {
    MockPrecisionContext::default()
        .with_channel(PortId::transfer(), ChannelId::zero(), State::Open)
        .with_settings(dummy_settings())
        .with_module_balance(NATIVE_DENOM, module_native)
}
