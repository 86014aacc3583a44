//! K-Sortable Unique Identifiers.
//!
//! A [`Ksuid`] is a 160-bit value: a 32-bit timestamp (seconds since
//! [`EPOCH_OFFSET`]) followed by a 128-bit payload. Its canonical string form
//! is 27 base-62 characters, and both the byte and the string forms sort in
//! creation order.
//!
//! ```
//! use ksuid::Ksuid;
//!
//! let id: Ksuid = "0ujtsYcgvSTl8PAuAdqWYSMnLOv".parse().unwrap();
//! assert_eq!(id.unix_time(), 1_507_608_047);
//! assert_eq!(id.to_string(), "0ujtsYcgvSTl8PAuAdqWYSMnLOv");
//! ```
//!
//! Identifiers are produced by a [`KsuidFactory`], configured once with a
//! [`Strategy`], a [`TimeSource`] and a [`RandSource`].
mod base62;
mod error;
mod generator;
mod id;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
