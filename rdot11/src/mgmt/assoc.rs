use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::Result;
use crate::pdu::{Pdu, PduKind};

use super::{check_body, read_capability, subtype, CapabilityInfo, MgmtFrame};

/// An association request frame. The fixed body carries the station's
/// capability bitmap and its listen interval.
#[derive(Debug, Clone, Default)]
pub struct AssocRequest {
    frame: MgmtFrame,
    capabilities: CapabilityInfo,
    listen_interval: u16,
}

const REQ_BODY_LEN: usize = 4;

impl AssocRequest {
    /// An association request addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        AssocRequest {
            frame: MgmtFrame::new(subtype::ASSOC_REQ, dst, src),
            ..AssocRequest::default()
        }
    }

    /// Decode a whole association request: headers, fixed body, then
    /// options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(REQ_BODY_LEN, buf.len() - offset)?;
        let body = &buf[offset..];
        let capabilities = read_capability(&body[0..2]);
        let listen_interval = LittleEndian::read_u16(&body[2..4]);
        frame.parse_options(&buf[offset + REQ_BODY_LEN..])?;
        Ok(AssocRequest {
            frame,
            capabilities,
            listen_interval,
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

    /// The capability bitmap.
    pub fn capabilities(&self) -> CapabilityInfo {
        self.capabilities
    }

    /// Mutable access to the capability bitmap.
    pub fn capabilities_mut(&mut self) -> &mut CapabilityInfo {
        &mut self.capabilities
    }

    /// The listen interval, in beacon intervals.
    pub fn listen_interval(&self) -> u16 {
        self.listen_interval
    }

    /// Set the listen interval.
    pub fn set_listen_interval(&mut self, value: u16) {
        self.listen_interval = value;
    }

    /// The requested SSID, or an empty string when the option is absent.
    pub fn ssid(&self) -> String {
        self.frame.ssid()
    }

    /// Set the SSID option.
    pub fn set_ssid(&mut self, ssid: &str) -> Result<()> {
        self.frame.set_ssid(ssid)
    }
}

impl Pdu for AssocRequest {
    fn kind(&self) -> PduKind {
        PduKind::AssocRequest
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + REQ_BODY_LEN + self.frame.options_size()
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
        LittleEndian::write_u16(&mut body[0..2], self.capabilities.raw());
        LittleEndian::write_u16(&mut body[2..4], self.listen_interval);
        self.frame.emit_options(&mut out[offset + REQ_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::AssocRequest | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}

/// An association response frame. The fixed body carries the AP's
/// capability bitmap, the status code and the assigned association ID.
#[derive(Debug, Clone, Default)]
pub struct AssocResponse {
    frame: MgmtFrame,
    capabilities: CapabilityInfo,
    status_code: u16,
    aid: u16,
}

const RESP_BODY_LEN: usize = 6;

impl AssocResponse {
    /// An association response addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        AssocResponse {
            frame: MgmtFrame::new(subtype::ASSOC_RESP, dst, src),
            ..AssocResponse::default()
        }
    }

    /// Decode a whole association response: headers, fixed body, then
    /// options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(RESP_BODY_LEN, buf.len() - offset)?;
        let body = &buf[offset..];
        let capabilities = read_capability(&body[0..2]);
        let status_code = LittleEndian::read_u16(&body[2..4]);
        let aid = LittleEndian::read_u16(&body[4..6]);
        frame.parse_options(&buf[offset + RESP_BODY_LEN..])?;
        Ok(AssocResponse {
            frame,
            capabilities,
            status_code,
            aid,
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

    /// The capability bitmap.
    pub fn capabilities(&self) -> CapabilityInfo {
        self.capabilities
    }

    /// Mutable access to the capability bitmap.
    pub fn capabilities_mut(&mut self) -> &mut CapabilityInfo {
        &mut self.capabilities
    }

    /// The status code; zero means success.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Set the status code.
    pub fn set_status_code(&mut self, value: u16) {
        self.status_code = value;
    }

    /// The assigned association ID.
    pub fn aid(&self) -> u16 {
        self.aid
    }

    /// Set the association ID.
    pub fn set_aid(&mut self, value: u16) {
        self.aid = value;
    }
}

impl Pdu for AssocResponse {
    fn kind(&self) -> PduKind {
        PduKind::AssocResponse
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
        LittleEndian::write_u16(&mut body[0..2], self.capabilities.raw());
        LittleEndian::write_u16(&mut body[2..4], self.status_code);
        LittleEndian::write_u16(&mut body[4..6], self.aid);
        self.frame.emit_options(&mut out[offset + RESP_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::AssocResponse | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}
