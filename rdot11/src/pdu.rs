//! The generic PDU composition engine.
//!
//! A frame is a chain of nested protocol layers. Each node owns at most one
//! child node (the encapsulated next-layer payload); size computation and
//! serialization walk the chain root-to-leaf. Ownership is strictly
//! tree-shaped, so teardown is deterministic and a deep clone never shares
//! a sub-object with the original.

use crate::error::{Dot11Error, Result};

/// Discriminant for every node kind the crate can produce.
///
/// The first four entries are the broad categories; `matches` uses them to
/// answer "is-a" queries across the variant hierarchy without a traversable
/// type graph at runtime.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PduKind {
    /// Any 802.11 frame.
    Dot11,
    /// Any 802.11 management frame.
    Dot11Mgmt,
    /// Any 802.11 control frame.
    Dot11Control,
    /// Any 802.11 data frame.
    Dot11Data,
    /// Beacon management frame.
    Beacon,
    /// Probe request management frame.
    ProbeRequest,
    /// Probe response management frame.
    ProbeResponse,
    /// Association request management frame.
    AssocRequest,
    /// Association response management frame.
    AssocResponse,
    /// Authentication management frame.
    Authentication,
    /// Deauthentication management frame.
    Deauthentication,
    /// Disassociation management frame.
    Disassoc,
    /// Request-to-send control frame.
    Rts,
    /// Clear-to-send control frame.
    Cts,
    /// Acknowledgement control frame.
    Ack,
    /// PS-Poll control frame.
    PsPoll,
    /// CF-End control frame.
    CfEnd,
    /// Block-ack request control frame.
    BlockAckRequest,
    /// Block-ack control frame.
    BlockAck,
    /// QoS data frame.
    QosData,
    /// Opaque payload bytes no known protocol claimed.
    RawData,
}

/// One protocol layer in a frame chain.
///
/// `serialize` writes the node's own header, fixed parameters and tagged
/// options (in that order), then delegates the remaining space to the child.
pub trait Pdu: core::fmt::Debug {
    /// The node's own discriminant.
    fn kind(&self) -> PduKind;

    /// Size of this node's own bytes: header, fixed body and options,
    /// excluding any child node.
    fn header_size(&self) -> usize;

    /// The owned child node, if any.
    fn inner_pdu(&self) -> Option<&dyn Pdu>;

    /// Mutable access to the owned child node.
    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)>;

    /// Write this node's own bytes into `out`.
    ///
    /// `out` must be at least `header_size()` long; `serialize` guarantees
    /// this before calling.
    fn write_header(&self, out: &mut [u8]);

    /// Deep copy: every owned sub-object is duplicated, never shared.
    fn clone_pdu(&self) -> Box<dyn Pdu>;

    /// Whether this node is-a `kind`, either exactly or as a member of the
    /// broader category `kind` names.
    fn matches(&self, kind: PduKind) -> bool {
        kind == self.kind()
    }

    /// Size of this node plus all its descendants.
    fn total_size(&self) -> usize {
        self.header_size() + self.inner_pdu().map_or(0, |p| p.total_size())
    }

    /// Serialize the chain rooted at this node into `out`, returning the
    /// number of bytes written.
    fn serialize(&self, out: &mut [u8]) -> Result<usize> {
        let required = self.total_size();
        if out.len() < required {
            return Err(Dot11Error::BufferTooSmall {
                required,
                available: out.len(),
            });
        }
        let own = self.header_size();
        self.write_header(&mut out[..own]);
        if let Some(inner) = self.inner_pdu() {
            inner.serialize(&mut out[own..required])?;
        }
        Ok(required)
    }

    /// Serialize into a freshly allocated, exactly sized buffer.
    fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.total_size()];
        // The buffer is sized exactly, so serialization cannot fail.
        let _ = self.serialize(&mut out);
        out
    }
}

impl Clone for Box<dyn Pdu> {
    fn clone(&self) -> Self {
        self.clone_pdu()
    }
}

/// An opaque leaf node holding bytes that no known protocol claimed.
///
/// Unrecognized encapsulated payloads are preserved here rather than
/// dropped, so a parse/serialize round trip reproduces the input buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawData {
    payload: Vec<u8>,
}

impl RawData {
    /// Wrap an owned byte buffer.
    pub fn new(payload: Vec<u8>) -> Self {
        RawData { payload }
    }

    /// Copy `payload` into a new leaf node.
    pub fn from_slice(payload: &[u8]) -> Self {
        RawData {
            payload: payload.to_vec(),
        }
    }

    /// The wrapped bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl Pdu for RawData {
    fn kind(&self) -> PduKind {
        PduKind::RawData
    }

    fn header_size(&self) -> usize {
        self.payload.len()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        None
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        None
    }

    fn write_header(&self, out: &mut [u8]) {
        out[..self.payload.len()].copy_from_slice(&self.payload);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }
}

/// Wrap trailing bytes as a raw child node, or `None` when empty.
pub(crate) fn raw_child(rest: &[u8]) -> Option<Box<dyn Pdu>> {
    if rest.is_empty() {
        None
    } else {
        Some(Box::new(RawData::from_slice(rest)))
    }
}
