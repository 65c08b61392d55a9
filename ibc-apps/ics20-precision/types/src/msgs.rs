//! Defines the settings administration message

use ibc_core::primitives::Signer;

use crate::Settings;

/// Replaces the middleware settings. Only the module authority may submit it.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgUpdateSettings {
    pub authority: Signer,
    pub settings: Settings,
}
