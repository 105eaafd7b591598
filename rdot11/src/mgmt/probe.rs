use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::Result;
use crate::pdu::{Pdu, PduKind};

use super::{check_body, read_capability, subtype, CapabilityInfo, MgmtFrame};

/// A probe request frame. It has no fixed body; the probed SSID and the
/// station's rates go straight into the tagged options.
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    frame: MgmtFrame,
}

impl ProbeRequest {
    /// A probe request addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        ProbeRequest {
            frame: MgmtFrame::new(subtype::PROBE_REQ, dst, src),
        }
    }

    /// Decode a whole probe request: headers, then options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        frame.parse_options(&buf[offset..])?;
        Ok(ProbeRequest { frame })
    }

    /// Shared management header and option fields.
    pub fn frame(&self) -> &MgmtFrame {
        &self.frame
    }

    /// Mutable access to the shared management fields.
    pub fn frame_mut(&mut self) -> &mut MgmtFrame {
        &mut self.frame
    }

    /// The probed SSID, or an empty string when the option is absent.
    pub fn ssid(&self) -> String {
        self.frame.ssid()
    }

    /// Set the SSID option.
    pub fn set_ssid(&mut self, ssid: &str) -> Result<()> {
        self.frame.set_ssid(ssid)
    }
}

impl Pdu for ProbeRequest {
    fn kind(&self) -> PduKind {
        PduKind::ProbeRequest
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + self.frame.options_size()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.frame.inner_pdu()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.frame.inner_pdu_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        let offset = self.frame.emit_prefix(out);
        self.frame.emit_options(&mut out[offset..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::ProbeRequest | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}

/// A probe response frame. The fixed body mirrors the beacon body:
/// timestamp, interval, capabilities.
#[derive(Debug, Clone, Default)]
pub struct ProbeResponse {
    frame: MgmtFrame,
    timestamp: u64,
    interval: u16,
    capabilities: CapabilityInfo,
}

const RESP_BODY_LEN: usize = 12;

impl ProbeResponse {
    /// A probe response addressed from `src` to `dst`, with a zeroed fixed
    /// body.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        ProbeResponse {
            frame: MgmtFrame::new(subtype::PROBE_RESP, dst, src),
            ..ProbeResponse::default()
        }
    }

    /// Decode a whole probe response: headers, fixed body, then options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(RESP_BODY_LEN, buf.len() - offset)?;
        let body = &buf[offset..];
        let timestamp = LittleEndian::read_u64(&body[0..8]);
        let interval = LittleEndian::read_u16(&body[8..10]);
        let capabilities = read_capability(&body[10..12]);
        frame.parse_options(&buf[offset + RESP_BODY_LEN..])?;
        Ok(ProbeResponse {
            frame,
            timestamp,
            interval,
            capabilities,
        })
    }

    /// Shared management header and option fields.
    pub fn frame(&self) -> &MgmtFrame {
        &self.frame
    }

    /// Mutable access to the shared management fields.
    pub fn frame_mut(&mut self) -> &mut MgmtFrame {
        &mut self.frame
    }

    /// The 64-bit TSF timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Set the 64-bit TSF timestamp.
    pub fn set_timestamp(&mut self, value: u64) {
        self.timestamp = value;
    }

    /// The beacon interval, in 1024-microsecond time units.
    pub fn interval(&self) -> u16 {
        self.interval
    }

    /// Set the beacon interval.
    pub fn set_interval(&mut self, value: u16) {
        self.interval = value;
    }

    /// The capability bitmap.
    pub fn capabilities(&self) -> CapabilityInfo {
        self.capabilities
    }

    /// Mutable access to the capability bitmap.
    pub fn capabilities_mut(&mut self) -> &mut CapabilityInfo {
        &mut self.capabilities
    }

    /// The advertised SSID, or an empty string when the option is absent.
    pub fn ssid(&self) -> String {
        self.frame.ssid()
    }

    /// Set the SSID option.
    pub fn set_ssid(&mut self, ssid: &str) -> Result<()> {
        self.frame.set_ssid(ssid)
    }
}

impl Pdu for ProbeResponse {
    fn kind(&self) -> PduKind {
        PduKind::ProbeResponse
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + RESP_BODY_LEN + self.frame.options_size()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.frame.inner_pdu()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.frame.inner_pdu_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        let offset = self.frame.emit_prefix(out);
        let body = &mut out[offset..];
        LittleEndian::write_u64(&mut body[0..8], self.timestamp);
        LittleEndian::write_u16(&mut body[8..10], self.interval);
        LittleEndian::write_u16(&mut body[10..12], self.capabilities.raw());
        self.frame.emit_options(&mut out[offset + RESP_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::ProbeResponse | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}
