//! 802.11 data frames.
//!
//! Data frames use the full addressing layout: base header, extended
//! header, and the conditional fourth address when the frame crosses the
//! distribution system in both directions. The payload past the headers is
//! carried as an opaque child node. QoS data adds one 16-bit control word
//! between the headers and the payload.

use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::{Dot11Error, Result};
use crate::header::{BaseHeader, ExtendedHeader, FrameType, BASE_HEADER_LEN};
use crate::pdu::{raw_child, Pdu, PduKind};

/// Data frame subtypes. Subtypes 8 and above carry the QoS control word.
pub mod subtype {
    /// Plain data.
    pub const DATA: u8 = 0;
    /// QoS data.
    pub const QOS_DATA: u8 = 8;
}

/// A plain data frame.
#[derive(Debug, Clone, Default)]
pub struct Dot11Data {
    base: BaseHeader,
    ext: ExtendedHeader,
    inner: Option<Box<dyn Pdu>>,
}

impl Dot11Data {
    /// A data frame addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        Self::with_subtype(subtype::DATA, dst, src)
    }

    pub(crate) fn with_subtype(subtype: u8, dst: MacAddr, src: MacAddr) -> Self {
        let mut data = Dot11Data {
            base: BaseHeader::new(FrameType::DATA, subtype, dst),
            ..Dot11Data::default()
        };
        data.ext.addr2 = src;
        data
    }

    /// Decode the headers and keep the payload as a raw child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut data, offset) = Self::parse_headers(buf)?;
        data.inner = raw_child(&buf[offset..]);
        Ok(data)
    }

    pub(crate) fn parse_headers(buf: &[u8]) -> Result<(Self, usize)> {
        let base = BaseHeader::parse(buf)?;
        let has_addr4 = base.frame_control.has_addr4();
        let ext = ExtendedHeader::parse(&buf[BASE_HEADER_LEN..], has_addr4)?;
        let consumed = BASE_HEADER_LEN + ExtendedHeader::size(has_addr4);
        Ok((
            Dot11Data {
                base,
                ext,
                inner: None,
            },
            consumed,
        ))
    }

    pub(crate) fn headers_size(&self) -> usize {
        BASE_HEADER_LEN + ExtendedHeader::size(self.base.frame_control.has_addr4())
    }

    pub(crate) fn emit_headers(&self, out: &mut [u8]) -> usize {
        let has_addr4 = self.base.frame_control.has_addr4();
        self.base.emit(out);
        self.ext.emit(&mut out[BASE_HEADER_LEN..], has_addr4);
        BASE_HEADER_LEN + ExtendedHeader::size(has_addr4)
    }

    /// The frame control word.
    pub fn frame_control(&self) -> &crate::header::FrameControl {
        &self.base.frame_control
    }

    /// Mutable access to the frame control word. Toggling the DS flags
    /// changes whether the fourth address occupies wire space.
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

    /// The second (transmitter) address.
    pub fn addr2(&self) -> MacAddr {
        self.ext.addr2
    }

    /// Set the second (transmitter) address.
    pub fn set_addr2(&mut self, addr: MacAddr) {
        self.ext.addr2 = addr;
    }

    /// The third address.
    pub fn addr3(&self) -> MacAddr {
        self.ext.addr3
    }

    /// Set the third address.
    pub fn set_addr3(&mut self, addr: MacAddr) {
        self.ext.addr3 = addr;
    }

    /// The fourth address; on the wire only when both DS flags are set.
    pub fn addr4(&self) -> MacAddr {
        self.ext.addr4
    }

    /// Set the fourth address.
    pub fn set_addr4(&mut self, addr: MacAddr) {
        self.ext.addr4 = addr;
    }

    /// The 4-bit fragment number.
    pub fn frag_num(&self) -> u8 {
        self.ext.frag_num
    }

    /// Set the 4-bit fragment number.
    pub fn set_frag_num(&mut self, value: u8) {
        self.ext.set_frag_num(value);
    }

    /// The 12-bit sequence number.
    pub fn seq_num(&self) -> u16 {
        self.ext.seq_num
    }

    /// Set the 12-bit sequence number.
    pub fn set_seq_num(&mut self, value: u16) {
        self.ext.set_seq_num(value);
    }

    /// Attach an owned child node, replacing any previous one.
    pub fn set_inner_pdu(&mut self, inner: Box<dyn Pdu>) {
        self.inner = Some(inner);
    }
}

impl Pdu for Dot11Data {
    fn kind(&self) -> PduKind {
        PduKind::Dot11Data
    }

    fn header_size(&self) -> usize {
        self.headers_size()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.inner.as_deref()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.inner.as_deref_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        self.emit_headers(out);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(kind, PduKind::Dot11Data | PduKind::Dot11)
    }
}

const QOS_CONTROL_LEN: usize = 2;

/// A QoS data frame: the data layout plus the 16-bit QoS control word.
#[derive(Debug, Clone)]
pub struct QosData {
    data: Dot11Data,
    qos_control: u16,
}

impl Default for QosData {
    fn default() -> Self {
        QosData {
            data: Dot11Data::with_subtype(subtype::QOS_DATA, MacAddr::NULL, MacAddr::NULL),
            qos_control: 0,
        }
    }
}

impl QosData {
    /// A QoS data frame addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        QosData {
            data: Dot11Data::with_subtype(subtype::QOS_DATA, dst, src),
            qos_control: 0,
        }
    }

    /// Decode the headers and QoS control word; the payload becomes a raw
    /// child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut data, offset) = Dot11Data::parse_headers(buf)?;
        if buf.len() < offset + QOS_CONTROL_LEN {
            return Err(Dot11Error::MalformedHeader {
                required: offset + QOS_CONTROL_LEN,
                available: buf.len(),
            });
        }
        let qos_control = LittleEndian::read_u16(&buf[offset..offset + QOS_CONTROL_LEN]);
        data.inner = raw_child(&buf[offset + QOS_CONTROL_LEN..]);
        Ok(QosData { data, qos_control })
    }

    /// The shared data-frame fields.
    pub fn data(&self) -> &Dot11Data {
        &self.data
    }

    /// Mutable access to the shared data-frame fields.
    pub fn data_mut(&mut self) -> &mut Dot11Data {
        &mut self.data
    }

    /// The QoS control word.
    pub fn qos_control(&self) -> u16 {
        self.qos_control
    }

    /// Set the QoS control word.
    pub fn set_qos_control(&mut self, value: u16) {
        self.qos_control = value;
    }
}

impl Pdu for QosData {
    fn kind(&self) -> PduKind {
        PduKind::QosData
    }

    fn header_size(&self) -> usize {
        self.data.headers_size() + QOS_CONTROL_LEN
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.data.inner.as_deref()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.data.inner.as_deref_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        let offset = self.data.emit_headers(out);
        LittleEndian::write_u16(&mut out[offset..offset + QOS_CONTROL_LEN], self.qos_control);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::QosData | PduKind::Dot11Data | PduKind::Dot11
        )
    }
}
