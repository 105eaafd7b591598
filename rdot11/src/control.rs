//! 802.11 control frames.
//!
//! Control frames carry no extended addressing header and no tagged
//! options. CTS and ACK are the 10-byte base header alone; RTS, PS-Poll and
//! CF-End add a second (transmitter) address; the block-ack pair adds its
//! control words after that. Trailing bytes past a variant's fixed layout
//! are preserved as an opaque child node.

use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::{Dot11Error, Result};
use crate::header::{BaseHeader, FrameType, ADDR_LEN, BASE_HEADER_LEN};
use crate::pdu::{raw_child, Pdu, PduKind};

/// Control frame subtypes.
pub mod subtype {
    /// Block-ack request.
    pub const BLOCK_ACK_REQ: u8 = 8;
    /// Block-ack.
    pub const BLOCK_ACK: u8 = 9;
    /// PS-Poll.
    pub const PS_POLL: u8 = 10;
    /// Request-to-send.
    pub const RTS: u8 = 11;
    /// Clear-to-send.
    pub const CTS: u8 = 12;
    /// Acknowledgement.
    pub const ACK: u8 = 13;
    /// CF-End.
    pub const CF_END: u8 = 14;
}

const TA_HEADER_LEN: usize = BASE_HEADER_LEN + ADDR_LEN;
const BLOCK_ACK_REQ_LEN: usize = TA_HEADER_LEN + 4;
const BLOCK_ACK_LEN: usize = BLOCK_ACK_REQ_LEN + 8;

/// Base header plus the transmitter address: the common prefix of RTS,
/// PS-Poll, CF-End and the block-ack pair.
#[derive(Debug, Clone, Copy, Default)]
struct ControlTa {
    base: BaseHeader,
    target_addr: MacAddr,
}

impl ControlTa {
    fn new(subtype: u8, dst: MacAddr, target: MacAddr) -> Self {
        ControlTa {
            base: BaseHeader::new(FrameType::CONTROL, subtype, dst),
            target_addr: target,
        }
    }

    fn parse(buf: &[u8]) -> Result<Self> {
        let base = BaseHeader::parse(buf)?;
        if buf.len() < TA_HEADER_LEN {
            return Err(Dot11Error::MalformedHeader {
                required: TA_HEADER_LEN,
                available: buf.len(),
            });
        }
        Ok(ControlTa {
            base,
            target_addr: MacAddr::from_bytes(&buf[BASE_HEADER_LEN..TA_HEADER_LEN]),
        })
    }

    fn emit(&self, out: &mut [u8]) {
        self.base.emit(out);
        out[BASE_HEADER_LEN..TA_HEADER_LEN].copy_from_slice(self.target_addr.as_bytes());
    }
}

macro_rules! control_base_accessors {
    () => {
        /// The frame control word.
        pub fn frame_control(&self) -> &crate::header::FrameControl {
            &self.base.frame_control
        }

        /// Mutable access to the frame control word.
        pub fn frame_control_mut(&mut self) -> &mut crate::header::FrameControl {
            &mut self.base.frame_control
        }

        /// The duration/ID field.
        pub fn duration_id(&self) -> u16 {
            self.base.duration_id
        }

        /// Set the duration/ID field.
        pub fn set_duration_id(&mut self, value: u16) {
            self.base.duration_id = value;
        }

        /// The first (receiver) address.
        pub fn addr1(&self) -> MacAddr {
            self.base.addr1
        }

        /// Set the first (receiver) address.
        pub fn set_addr1(&mut self, addr: MacAddr) {
            self.base.addr1 = addr;
        }
    };
}

macro_rules! control_ta_accessors {
    () => {
        /// The frame control word.
        pub fn frame_control(&self) -> &crate::header::FrameControl {
            &self.ta.base.frame_control
        }

        /// Mutable access to the frame control word.
        pub fn frame_control_mut(&mut self) -> &mut crate::header::FrameControl {
            &mut self.ta.base.frame_control
        }

        /// The duration/ID field.
        pub fn duration_id(&self) -> u16 {
            self.ta.base.duration_id
        }

        /// Set the duration/ID field.
        pub fn set_duration_id(&mut self, value: u16) {
            self.ta.base.duration_id = value;
        }

        /// The first (receiver) address.
        pub fn addr1(&self) -> MacAddr {
            self.ta.base.addr1
        }

        /// Set the first (receiver) address.
        pub fn set_addr1(&mut self, addr: MacAddr) {
            self.ta.base.addr1 = addr;
        }

        /// The transmitter address.
        pub fn target_addr(&self) -> MacAddr {
            self.ta.target_addr
        }

        /// Set the transmitter address.
        pub fn set_target_addr(&mut self, addr: MacAddr) {
            self.ta.target_addr = addr;
        }
    };
}

macro_rules! control_pdu_boilerplate {
    ($kind:path) => {
        fn kind(&self) -> PduKind {
            $kind
        }

        fn inner_pdu(&self) -> Option<&dyn Pdu> {
            self.inner.as_deref()
        }

        fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
            self.inner.as_deref_mut()
        }

        fn clone_pdu(&self) -> Box<dyn Pdu> {
            Box::new(self.clone())
        }

        fn matches(&self, kind: PduKind) -> bool {
            matches!(kind, $kind | PduKind::Dot11Control | PduKind::Dot11)
        }
    };
}

/// A generic control frame: the fallback for subtypes without a concrete
/// variant. Bytes past the base header are kept as an opaque child.
#[derive(Debug, Clone, Default)]
pub struct Dot11Control {
    base: BaseHeader,
    inner: Option<Box<dyn Pdu>>,
}

impl Dot11Control {
    /// A generic control frame with the given subtype.
    pub fn new(subtype: u8, dst: MacAddr) -> Self {
        Dot11Control {
            base: BaseHeader::new(FrameType::CONTROL, subtype, dst),
            inner: None,
        }
    }

    /// Parse the base header and keep the remainder as a raw child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let base = BaseHeader::parse(buf)?;
        Ok(Dot11Control {
            base,
            inner: raw_child(&buf[BASE_HEADER_LEN..]),
        })
    }

    control_base_accessors!();
}

impl Pdu for Dot11Control {
    control_pdu_boilerplate!(PduKind::Dot11Control);

    fn header_size(&self) -> usize {
        BASE_HEADER_LEN
    }

    fn write_header(&self, out: &mut [u8]) {
        self.base.emit(out);
    }
}

macro_rules! base_only_control {
    (
        $(#[$doc:meta])*
        $name:ident, $kind:path, $subtype:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            base: BaseHeader,
            inner: Option<Box<dyn Pdu>>,
        }

        impl $name {
            /// A frame addressed to `dst`.
            pub fn new(dst: MacAddr) -> Self {
                $name {
                    base: BaseHeader::new(FrameType::CONTROL, $subtype, dst),
                    inner: None,
                }
            }

            /// Decode the fixed layout; trailing bytes become a raw child.
            pub fn parse(buf: &[u8]) -> Result<Self> {
                let base = BaseHeader::parse(buf)?;
                Ok($name {
                    base,
                    inner: raw_child(&buf[BASE_HEADER_LEN..]),
                })
            }

            control_base_accessors!();
        }

        impl Pdu for $name {
            control_pdu_boilerplate!($kind);

            fn header_size(&self) -> usize {
                BASE_HEADER_LEN
            }

            fn write_header(&self, out: &mut [u8]) {
                self.base.emit(out);
            }
        }
    };
}

base_only_control!(
    /// A clear-to-send frame: the 10-byte base header alone.
    Cts,
    PduKind::Cts,
    subtype::CTS
);

base_only_control!(
    /// An acknowledgement frame: the 10-byte base header alone.
    Ack,
    PduKind::Ack,
    subtype::ACK
);

macro_rules! ta_control {
    (
        $(#[$doc:meta])*
        $name:ident, $kind:path, $subtype:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            ta: ControlTa,
            inner: Option<Box<dyn Pdu>>,
        }

        impl $name {
            /// A frame addressed from `target` to `dst`.
            pub fn new(dst: MacAddr, target: MacAddr) -> Self {
                $name {
                    ta: ControlTa::new($subtype, dst, target),
                    inner: None,
                }
            }

            /// Decode the fixed layout; trailing bytes become a raw child.
            pub fn parse(buf: &[u8]) -> Result<Self> {
                let ta = ControlTa::parse(buf)?;
                Ok($name {
                    ta,
                    inner: raw_child(&buf[TA_HEADER_LEN..]),
                })
            }

            control_ta_accessors!();
        }

        impl Pdu for $name {
            control_pdu_boilerplate!($kind);

            fn header_size(&self) -> usize {
                TA_HEADER_LEN
            }

            fn write_header(&self, out: &mut [u8]) {
                self.ta.emit(out);
            }
        }
    };
}

ta_control!(
    /// A request-to-send frame.
    Rts,
    PduKind::Rts,
    subtype::RTS
);

ta_control!(
    /// A PS-Poll frame. The duration/ID slot carries the association ID.
    PsPoll,
    PduKind::PsPoll,
    subtype::PS_POLL
);

ta_control!(
    /// A CF-End frame.
    CfEnd,
    PduKind::CfEnd,
    subtype::CF_END
);

/// A block-ack request frame.
///
/// After the transmitter address come the BAR control word (TID in the top
/// four bits) and the starting sequence control word, both little-endian.
#[derive(Debug, Clone, Default)]
pub struct BlockAckRequest {
    ta: ControlTa,
    bar_control: u16,
    start_sequence: u16,
    inner: Option<Box<dyn Pdu>>,
}

impl BlockAckRequest {
    /// A block-ack request addressed from `target` to `dst`.
    pub fn new(dst: MacAddr, target: MacAddr) -> Self {
        BlockAckRequest {
            ta: ControlTa::new(subtype::BLOCK_ACK_REQ, dst, target),
            ..BlockAckRequest::default()
        }
    }

    /// Decode the fixed layout; trailing bytes become a raw child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let ta = ControlTa::parse(buf)?;
        if buf.len() < BLOCK_ACK_REQ_LEN {
            return Err(Dot11Error::MalformedHeader {
                required: BLOCK_ACK_REQ_LEN,
                available: buf.len(),
            });
        }
        Ok(BlockAckRequest {
            ta,
            bar_control: LittleEndian::read_u16(&buf[TA_HEADER_LEN..TA_HEADER_LEN + 2]),
            start_sequence: LittleEndian::read_u16(&buf[TA_HEADER_LEN + 2..TA_HEADER_LEN + 4]),
            inner: raw_child(&buf[BLOCK_ACK_REQ_LEN..]),
        })
    }

    control_ta_accessors!();

    /// The raw BAR control word.
    pub fn bar_control(&self) -> u16 {
        self.bar_control
    }

    /// Set the raw BAR control word.
    pub fn set_bar_control(&mut self, value: u16) {
        self.bar_control = value;
    }

    /// The traffic identifier, the top four bits of the BAR control word.
    pub fn tid(&self) -> u8 {
        (self.bar_control >> 12) as u8
    }

    /// Set the traffic identifier.
    pub fn set_tid(&mut self, value: u8) {
        assert!(value <= 0xf);
        self.bar_control = (self.bar_control & 0x0fff) | (u16::from(value) << 12);
    }

    /// The 12-bit starting sequence number.
    pub fn start_sequence(&self) -> u16 {
        self.start_sequence >> 4
    }

    /// Set the 12-bit starting sequence number.
    pub fn set_start_sequence(&mut self, value: u16) {
        assert!(value <= 0xfff);
        self.start_sequence = (self.start_sequence & 0xf) | (value << 4);
    }

    /// The 4-bit fragment number of the starting sequence control word.
    pub fn fragment_number(&self) -> u8 {
        (self.start_sequence & 0xf) as u8
    }

    /// Set the 4-bit fragment number.
    pub fn set_fragment_number(&mut self, value: u8) {
        assert!(value <= 0xf);
        self.start_sequence = (self.start_sequence & !0xf) | u16::from(value);
    }
}

impl Pdu for BlockAckRequest {
    control_pdu_boilerplate!(PduKind::BlockAckRequest);

    fn header_size(&self) -> usize {
        BLOCK_ACK_REQ_LEN
    }

    fn write_header(&self, out: &mut [u8]) {
        self.ta.emit(out);
        LittleEndian::write_u16(&mut out[TA_HEADER_LEN..TA_HEADER_LEN + 2], self.bar_control);
        LittleEndian::write_u16(
            &mut out[TA_HEADER_LEN + 2..TA_HEADER_LEN + 4],
            self.start_sequence,
        );
    }
}

/// A block-ack frame: a block-ack request layout followed by the 64-bit
/// acknowledgement bitmap.
#[derive(Debug, Clone, Default)]
pub struct BlockAck {
    ta: ControlTa,
    bar_control: u16,
    start_sequence: u16,
    bitmap: [u8; 8],
    inner: Option<Box<dyn Pdu>>,
}

impl BlockAck {
    /// A block-ack addressed from `target` to `dst`.
    pub fn new(dst: MacAddr, target: MacAddr) -> Self {
        BlockAck {
            ta: ControlTa::new(subtype::BLOCK_ACK, dst, target),
            ..BlockAck::default()
        }
    }

    /// Decode the fixed layout; trailing bytes become a raw child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let ta = ControlTa::parse(buf)?;
        if buf.len() < BLOCK_ACK_LEN {
            return Err(Dot11Error::MalformedHeader {
                required: BLOCK_ACK_LEN,
                available: buf.len(),
            });
        }
        let mut bitmap = [0u8; 8];
        bitmap.copy_from_slice(&buf[BLOCK_ACK_REQ_LEN..BLOCK_ACK_LEN]);
        Ok(BlockAck {
            ta,
            bar_control: LittleEndian::read_u16(&buf[TA_HEADER_LEN..TA_HEADER_LEN + 2]),
            start_sequence: LittleEndian::read_u16(&buf[TA_HEADER_LEN + 2..TA_HEADER_LEN + 4]),
            bitmap,
            inner: raw_child(&buf[BLOCK_ACK_LEN..]),
        })
    }

    control_ta_accessors!();

    /// The raw BAR control word.
    pub fn bar_control(&self) -> u16 {
        self.bar_control
    }

    /// Set the raw BAR control word.
    pub fn set_bar_control(&mut self, value: u16) {
        self.bar_control = value;
    }

    /// The traffic identifier, the top four bits of the BAR control word.
    pub fn tid(&self) -> u8 {
        (self.bar_control >> 12) as u8
    }

    /// Set the traffic identifier.
    pub fn set_tid(&mut self, value: u8) {
        assert!(value <= 0xf);
        self.bar_control = (self.bar_control & 0x0fff) | (u16::from(value) << 12);
    }

    /// The 12-bit starting sequence number.
    pub fn start_sequence(&self) -> u16 {
        self.start_sequence >> 4
    }

    /// Set the 12-bit starting sequence number.
    pub fn set_start_sequence(&mut self, value: u16) {
        assert!(value <= 0xfff);
        self.start_sequence = (self.start_sequence & 0xf) | (value << 4);
    }

    /// The 64-bit acknowledgement bitmap.
    pub fn bitmap(&self) -> &[u8; 8] {
        &self.bitmap
    }

    /// Set the 64-bit acknowledgement bitmap.
    pub fn set_bitmap(&mut self, bitmap: [u8; 8]) {
        self.bitmap = bitmap;
    }
}

impl Pdu for BlockAck {
    control_pdu_boilerplate!(PduKind::BlockAck);

    fn header_size(&self) -> usize {
        BLOCK_ACK_LEN
    }

    fn write_header(&self, out: &mut [u8]) {
        self.ta.emit(out);
        LittleEndian::write_u16(&mut out[TA_HEADER_LEN..TA_HEADER_LEN + 2], self.bar_control);
        LittleEndian::write_u16(
            &mut out[TA_HEADER_LEN + 2..TA_HEADER_LEN + 4],
            self.start_sequence,
        );
        out[BLOCK_ACK_REQ_LEN..BLOCK_ACK_LEN].copy_from_slice(&self.bitmap);
    }
}
