//! Parsing and construction of IEEE 802.11 link-layer frames.
//!
//! A frame is modeled as a chain of owned protocol nodes rooted in one of
//! the concrete variants: management frames with their tagged options,
//! control frames, and data frames with encapsulated payloads. Every node
//! implements [`Pdu`], which provides recursive size computation,
//! serialization and deep cloning; [`dot11_from_bytes`] decodes a raw
//! buffer into the matching variant.
//!
//! Construct-then-serialize:
//!
//! ```
//! use rdot11::mgmt::Beacon;
//! use rdot11::{MacAddr, Pdu};
//!
//! let mut beacon = Beacon::new(MacAddr::BROADCAST, MacAddr([0, 1, 2, 3, 4, 5]));
//! beacon.set_interval(100);
//! beacon.set_ssid("test").unwrap();
//! let bytes = beacon.to_vec();
//! assert_eq!(bytes.len(), beacon.total_size());
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
mod macros;

mod addr;
mod dispatch;
mod error;
mod pdu;

pub mod control;
pub mod data;
pub mod header;
pub mod iface;
pub mod mgmt;
pub mod options;
pub mod rsn;

pub use addr::MacAddr;
pub use dispatch::dot11_from_bytes;
pub use error::{Dot11Error, Result};
pub use pdu::{Pdu, PduKind, RawData};
