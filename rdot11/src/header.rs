//! Fixed 802.11 header codecs.
//!
//! Every sub-byte field is extracted and inserted with masks and shifts over
//! the little-endian wire words, so the byte image is identical on any host.
//! Unknown type/subtype combinations are preserved verbatim; the codec must
//! round-trip any on-wire value.

use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::{Dot11Error, Result};

/// Length of the fixed part every 802.11 frame starts with.
pub const BASE_HEADER_LEN: usize = 10;

/// Length of the extended addressing header without the optional fourth
/// address.
pub const EXT_HEADER_LEN: usize = 14;

/// Length of one address slot.
pub const ADDR_LEN: usize = 6;

wire_enum! {
    /// The 2-bit frame type carried in the frame control word.
    pub struct FrameType (u8) {
        /// Management frames (beacon, probe, auth, ...).
        MANAGEMENT = 0,
        /// Control frames (RTS, CTS, ACK, ...).
        CONTROL = 1,
        /// Data frames.
        DATA = 2,
    }
}

/// The 16-bit frame control word.
///
/// Stored as the raw little-endian value. Wire layout, from bit 0:
/// protocol version (2), type (2), subtype (4), then the flag byte:
/// to-DS, from-DS, more-frag, retry, power-mgmt, more-data, WEP, order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct FrameControl(u16);

const TO_DS_BIT: u16 = 8;
const FROM_DS_BIT: u16 = 9;
const MORE_FRAG_BIT: u16 = 10;
const RETRY_BIT: u16 = 11;
const POWER_MGMT_BIT: u16 = 12;
const MORE_DATA_BIT: u16 = 13;
const WEP_BIT: u16 = 14;
const ORDER_BIT: u16 = 15;

impl FrameControl {
    /// A frame control word for the given type and subtype, all flags clear.
    pub fn new(frame_type: FrameType, subtype: u8) -> Self {
        let mut fc = FrameControl(0);
        fc.set_frame_type(frame_type);
        fc.set_subtype(subtype);
        fc
    }

    /// Rebuild from the raw little-endian word.
    pub fn from_raw(raw: u16) -> Self {
        FrameControl(raw)
    }

    /// The raw little-endian word.
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// The 2-bit protocol version.
    pub fn version(&self) -> u8 {
        (self.0 & 0x3) as u8
    }

    /// Set the 2-bit protocol version.
    pub fn set_version(&mut self, value: u8) {
        assert!(value <= 0x3);
        self.0 = (self.0 & !0x3) | u16::from(value);
    }

    /// The 2-bit frame type.
    pub fn frame_type(&self) -> FrameType {
        FrameType::from(((self.0 >> 2) & 0x3) as u8)
    }

    /// Set the 2-bit frame type.
    pub fn set_frame_type(&mut self, value: FrameType) {
        self.0 = (self.0 & !0xc) | (u16::from(value.raw() & 0x3) << 2);
    }

    /// The 4-bit frame subtype.
    pub fn subtype(&self) -> u8 {
        ((self.0 >> 4) & 0xf) as u8
    }

    /// Set the 4-bit frame subtype.
    pub fn set_subtype(&mut self, value: u8) {
        assert!(value <= 0xf);
        self.0 = (self.0 & !0xf0) | (u16::from(value) << 4);
    }

    fn flag(&self, bit: u16) -> bool {
        self.0 & (1 << bit) != 0
    }

    fn set_flag(&mut self, bit: u16, value: bool) {
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }

    /// The "To DS" flag.
    pub fn to_ds(&self) -> bool {
        self.flag(TO_DS_BIT)
    }

    /// Set the "To DS" flag.
    pub fn set_to_ds(&mut self, value: bool) {
        self.set_flag(TO_DS_BIT, value);
    }

    /// The "From DS" flag.
    pub fn from_ds(&self) -> bool {
        self.flag(FROM_DS_BIT)
    }

    /// Set the "From DS" flag.
    pub fn set_from_ds(&mut self, value: bool) {
        self.set_flag(FROM_DS_BIT, value);
    }

    /// The "More Fragments" flag.
    pub fn more_frag(&self) -> bool {
        self.flag(MORE_FRAG_BIT)
    }

    /// Set the "More Fragments" flag.
    pub fn set_more_frag(&mut self, value: bool) {
        self.set_flag(MORE_FRAG_BIT, value);
    }

    /// The "Retry" flag.
    pub fn retry(&self) -> bool {
        self.flag(RETRY_BIT)
    }

    /// Set the "Retry" flag.
    pub fn set_retry(&mut self, value: bool) {
        self.set_flag(RETRY_BIT, value);
    }

    /// The "Power Management" flag.
    pub fn power_mgmt(&self) -> bool {
        self.flag(POWER_MGMT_BIT)
    }

    /// Set the "Power Management" flag.
    pub fn set_power_mgmt(&mut self, value: bool) {
        self.set_flag(POWER_MGMT_BIT, value);
    }

    /// The "More Data" flag.
    pub fn more_data(&self) -> bool {
        self.flag(MORE_DATA_BIT)
    }

    /// Set the "More Data" flag.
    pub fn set_more_data(&mut self, value: bool) {
        self.set_flag(MORE_DATA_BIT, value);
    }

    /// The "WEP" (protected frame) flag.
    pub fn wep(&self) -> bool {
        self.flag(WEP_BIT)
    }

    /// Set the "WEP" (protected frame) flag.
    pub fn set_wep(&mut self, value: bool) {
        self.set_flag(WEP_BIT, value);
    }

    /// The "Order" flag.
    pub fn order(&self) -> bool {
        self.flag(ORDER_BIT)
    }

    /// Set the "Order" flag.
    pub fn set_order(&mut self, value: bool) {
        self.set_flag(ORDER_BIT, value);
    }

    /// Whether the fourth address occupies wire space: true iff both DS
    /// flags are set.
    pub fn has_addr4(&self) -> bool {
        self.to_ds() && self.from_ds()
    }
}

/// Frame control, duration/ID and the first address: the fixed 10 bytes
/// every 802.11 frame starts with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct BaseHeader {
    /// The frame control word.
    pub frame_control: FrameControl,
    /// The 16-bit duration/ID field.
    pub duration_id: u16,
    /// The first address.
    pub addr1: MacAddr,
}

impl BaseHeader {
    /// A base header for the given type/subtype and receiver address.
    pub fn new(frame_type: FrameType, subtype: u8, addr1: MacAddr) -> Self {
        BaseHeader {
            frame_control: FrameControl::new(frame_type, subtype),
            duration_id: 0,
            addr1,
        }
    }

    /// Decode exactly [`BASE_HEADER_LEN`] bytes from the front of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() < BASE_HEADER_LEN {
            return Err(Dot11Error::MalformedHeader {
                required: BASE_HEADER_LEN,
                available: buf.len(),
            });
        }
        Ok(BaseHeader {
            frame_control: FrameControl::from_raw(LittleEndian::read_u16(&buf[0..2])),
            duration_id: LittleEndian::read_u16(&buf[2..4]),
            addr1: MacAddr::from_bytes(&buf[4..10]),
        })
    }

    /// Write the 10-byte image into the front of `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than [`BASE_HEADER_LEN`].
    pub fn emit(&self, out: &mut [u8]) {
        LittleEndian::write_u16(&mut out[0..2], self.frame_control.raw());
        LittleEndian::write_u16(&mut out[2..4], self.duration_id);
        out[4..10].copy_from_slice(self.addr1.as_bytes());
    }
}

/// The extended addressing header used by management and data frames:
/// addresses 2 and 3, the sequence control word, and the conditional fourth
/// address.
///
/// The fourth address slot is always stored, but only occupies wire space
/// when both DS flags of the frame control word are set. That flag state
/// lives outside this structure's byte range, so `parse`, `emit` and `size`
/// take it as an explicit precondition instead of inferring it from the
/// buffer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct ExtendedHeader {
    /// The second address.
    pub addr2: MacAddr,
    /// The third address.
    pub addr3: MacAddr,
    /// The 4-bit fragment number (low bits of the sequence control word).
    pub frag_num: u8,
    /// The 12-bit sequence number (high bits of the sequence control word).
    pub seq_num: u16,
    /// The fourth address; written to the wire only when `has_addr4`.
    pub addr4: MacAddr,
}

impl ExtendedHeader {
    /// Wire size of the extended header given the DS flag state.
    pub fn size(has_addr4: bool) -> usize {
        EXT_HEADER_LEN + if has_addr4 { ADDR_LEN } else { 0 }
    }

    /// Decode the extended header from the front of `buf`.
    ///
    /// `has_addr4` must be derived from the already-decoded frame control
    /// word ([`FrameControl::has_addr4`]).
    pub fn parse(buf: &[u8], has_addr4: bool) -> Result<Self> {
        let required = Self::size(has_addr4);
        if buf.len() < required {
            return Err(Dot11Error::MalformedHeader {
                required,
                available: buf.len(),
            });
        }
        let seq_control = LittleEndian::read_u16(&buf[12..14]);
        Ok(ExtendedHeader {
            addr2: MacAddr::from_bytes(&buf[0..6]),
            addr3: MacAddr::from_bytes(&buf[6..12]),
            frag_num: (seq_control & 0xf) as u8,
            seq_num: seq_control >> 4,
            addr4: if has_addr4 {
                MacAddr::from_bytes(&buf[14..20])
            } else {
                MacAddr::NULL
            },
        })
    }

    /// Write the wire image into the front of `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `size(has_addr4)`.
    pub fn emit(&self, out: &mut [u8], has_addr4: bool) {
        out[0..6].copy_from_slice(self.addr2.as_bytes());
        out[6..12].copy_from_slice(self.addr3.as_bytes());
        let seq_control = (self.seq_num << 4) | u16::from(self.frag_num & 0xf);
        LittleEndian::write_u16(&mut out[12..14], seq_control);
        if has_addr4 {
            out[14..20].copy_from_slice(self.addr4.as_bytes());
        }
    }

    /// Set the 12-bit sequence number.
    pub fn set_seq_num(&mut self, value: u16) {
        assert!(value <= 0xfff);
        self.seq_num = value;
    }

    /// Set the 4-bit fragment number.
    pub fn set_frag_num(&mut self, value: u8) {
        assert!(value <= 0xf);
        self.frag_num = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_control_bit_layout() {
        let mut fc = FrameControl::new(FrameType::MANAGEMENT, 8);
        assert_eq!(fc.raw(), 0x0080);
        fc.set_to_ds(true);
        fc.set_from_ds(true);
        assert_eq!(fc.raw(), 0x0380);
        assert!(fc.has_addr4());
        fc.set_from_ds(false);
        assert!(!fc.has_addr4());

        // Byte image: subtype 8 management -> 0x80 0x01 with to-DS set.
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, fc.raw());
        assert_eq!(buf, [0x80, 0x01]);
    }

    #[test]
    fn frame_control_round_trips_unknown_values() {
        for raw in [0x0000u16, 0xffff, 0x1234, 0x00c0] {
            let fc = FrameControl::from_raw(raw);
            assert_eq!(fc.raw(), raw);
        }
        // Reserved type 3 is preserved, not rejected.
        let fc = FrameControl::from_raw(0x000c);
        assert_eq!(fc.frame_type().raw(), 3);
    }

    #[test]
    fn sequence_control_split() {
        let mut buf = [0u8; EXT_HEADER_LEN];
        let mut ext = ExtendedHeader::default();
        ext.set_frag_num(0x5);
        ext.set_seq_num(0xabc);
        ext.emit(&mut buf, false);
        assert_eq!(LittleEndian::read_u16(&buf[12..14]), 0xabc5);

        let parsed = ExtendedHeader::parse(&buf, false).unwrap();
        assert_eq!(parsed.frag_num, 0x5);
        assert_eq!(parsed.seq_num, 0xabc);
    }

    #[test]
    fn short_base_header_is_malformed() {
        let buf = [0u8; 9];
        assert_eq!(
            BaseHeader::parse(&buf),
            Err(Dot11Error::MalformedHeader {
                required: 10,
                available: 9
            })
        );
    }
}
