//! Implementation of the ICS-20 precision-bridge middleware.
//!
//! The middleware wraps the acknowledgement callback of a token transfer
//! application. Packets that carry the tracked denomination over the
//! configured channel pair are accounted for on success and refunded through
//! a lock/unlock exchange on failure; every other packet passes through to
//! the wrapped callback untouched.
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

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod context;
pub mod genesis;
pub mod handler;
pub mod module;

/// Re-exports the data structures and domain types of the middleware.
pub mod types {
    #[doc(inline)]
    pub use ibc_app_precision_types::*;
}
