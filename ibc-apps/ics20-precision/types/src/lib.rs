//! Data structures of the ICS-20 precision-bridge middleware.
//!
//! The middleware tracks exactly one channel/denomination pair on top of an
//! ICS-20 transfer application, rescales the tracked token between two
//! decimal precisions and swaps a returned voucher for the locked native
//! token whenever a tracked transfer fails.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::disallowed_methods, clippy::disallowed_types))]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod payload;
mod scale;
mod settings;

pub use payload::*;
pub use scale::*;
pub use settings::*;
pub mod error;
pub mod events;
pub mod genesis;
pub mod msgs;

/// Re-exports the ICS-20 amount and denomination types the middleware operates on.
pub use ibc_app_transfer_types::{Amount, BaseDenom, Coin, PrefixedCoin, PrefixedDenom, U256};

/// Module identifier of the precision-bridge middleware.
pub const MODULE_ID_STR: &str = "precision";
