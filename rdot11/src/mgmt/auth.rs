use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::Result;
use crate::pdu::{Pdu, PduKind};

use super::{check_body, subtype, MgmtFrame, ReasonCode};

/// An authentication frame. The fixed body carries the authentication
/// algorithm number, the sequence number of the handshake step, and a
/// status code; the challenge text for shared-key authentication goes into
/// the tagged options.
#[derive(Debug, Clone, Default)]
pub struct Authentication {
    frame: MgmtFrame,
    auth_algorithm: u16,
    auth_seq_number: u16,
    status_code: u16,
}

const AUTH_BODY_LEN: usize = 6;

impl Authentication {
    /// An authentication frame addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        Authentication {
            frame: MgmtFrame::new(subtype::AUTH, dst, src),
            ..Authentication::default()
        }
    }

    /// Decode a whole authentication frame: headers, fixed body, then
    /// options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(AUTH_BODY_LEN, buf.len() - offset)?;
        let body = &buf[offset..];
        let auth_algorithm = LittleEndian::read_u16(&body[0..2]);
        let auth_seq_number = LittleEndian::read_u16(&body[2..4]);
        let status_code = LittleEndian::read_u16(&body[4..6]);
        frame.parse_options(&buf[offset + AUTH_BODY_LEN..])?;
        Ok(Authentication {
            frame,
            auth_algorithm,
            auth_seq_number,
            status_code,
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

    /// The authentication algorithm number; zero is open system.
    pub fn auth_algorithm(&self) -> u16 {
        self.auth_algorithm
    }

    /// Set the authentication algorithm number.
    pub fn set_auth_algorithm(&mut self, value: u16) {
        self.auth_algorithm = value;
    }

    /// The authentication transaction sequence number.
    pub fn auth_seq_number(&self) -> u16 {
        self.auth_seq_number
    }

    /// Set the authentication transaction sequence number.
    pub fn set_auth_seq_number(&mut self, value: u16) {
        self.auth_seq_number = value;
    }

    /// The status code; zero means success.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Set the status code.
    pub fn set_status_code(&mut self, value: u16) {
        self.status_code = value;
    }
}

impl Pdu for Authentication {
    fn kind(&self) -> PduKind {
        PduKind::Authentication
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + AUTH_BODY_LEN + self.frame.options_size()
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
        LittleEndian::write_u16(&mut body[0..2], self.auth_algorithm);
        LittleEndian::write_u16(&mut body[2..4], self.auth_seq_number);
        LittleEndian::write_u16(&mut body[4..6], self.status_code);
        self.frame.emit_options(&mut out[offset + AUTH_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::Authentication | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}

/// A deauthentication frame. The fixed body is a single reason code.
#[derive(Debug, Clone, Default)]
pub struct Deauthentication {
    frame: MgmtFrame,
    reason_code: ReasonCode,
}

const REASON_BODY_LEN: usize = 2;

impl Deauthentication {
    /// A deauthentication frame addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        Deauthentication {
            frame: MgmtFrame::new(subtype::DEAUTH, dst, src),
            ..Deauthentication::default()
        }
    }

    /// Decode a whole deauthentication frame: headers, reason code, then
    /// options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(REASON_BODY_LEN, buf.len() - offset)?;
        let reason_code = ReasonCode::from(LittleEndian::read_u16(&buf[offset..offset + 2]));
        frame.parse_options(&buf[offset + REASON_BODY_LEN..])?;
        Ok(Deauthentication { frame, reason_code })
    }

    /// Shared management header and option fields.
    pub fn frame(&self) -> &MgmtFrame {
        &self.frame
    }

    /// Mutable access to the shared management fields.
    pub fn frame_mut(&mut self) -> &mut MgmtFrame {
        &mut self.frame
    }

    /// The reason code.
    pub fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    /// Set the reason code.
    pub fn set_reason_code(&mut self, reason: ReasonCode) {
        self.reason_code = reason;
    }
}

impl Pdu for Deauthentication {
    fn kind(&self) -> PduKind {
        PduKind::Deauthentication
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + REASON_BODY_LEN + self.frame.options_size()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.frame.inner_pdu()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.frame.inner_pdu_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        let offset = self.frame.emit_prefix(out);
        LittleEndian::write_u16(&mut out[offset..offset + 2], self.reason_code.raw());
        self.frame.emit_options(&mut out[offset + REASON_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::Deauthentication | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}

/// A disassociation frame. Same body as deauthentication: a single reason
/// code.
#[derive(Debug, Clone, Default)]
pub struct Disassoc {
    frame: MgmtFrame,
    reason_code: ReasonCode,
}

impl Disassoc {
    /// A disassociation frame addressed from `src` to `dst`.
    pub fn new(dst: MacAddr, src: MacAddr) -> Self {
        Disassoc {
            frame: MgmtFrame::new(subtype::DISASSOC, dst, src),
            ..Disassoc::default()
        }
    }

    /// Decode a whole disassociation frame: headers, reason code, then
    /// options.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        check_body(REASON_BODY_LEN, buf.len() - offset)?;
        let reason_code = ReasonCode::from(LittleEndian::read_u16(&buf[offset..offset + 2]));
        frame.parse_options(&buf[offset + REASON_BODY_LEN..])?;
        Ok(Disassoc { frame, reason_code })
    }

    /// Shared management header and option fields.
    pub fn frame(&self) -> &MgmtFrame {
        &self.frame
    }

    /// Mutable access to the shared management fields.
    pub fn frame_mut(&mut self) -> &mut MgmtFrame {
        &mut self.frame
    }

    /// The reason code.
    pub fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    /// Set the reason code.
    pub fn set_reason_code(&mut self, reason: ReasonCode) {
        self.reason_code = reason;
    }
}

impl Pdu for Disassoc {
    fn kind(&self) -> PduKind {
        PduKind::Disassoc
    }

    fn header_size(&self) -> usize {
        self.frame.prefix_size() + REASON_BODY_LEN + self.frame.options_size()
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.frame.inner_pdu()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.frame.inner_pdu_mut()
    }

    fn write_header(&self, out: &mut [u8]) {
        let offset = self.frame.emit_prefix(out);
        LittleEndian::write_u16(&mut out[offset..offset + 2], self.reason_code.raw());
        self.frame.emit_options(&mut out[offset + REASON_BODY_LEN..]);
    }

    fn clone_pdu(&self) -> Box<dyn Pdu> {
        Box::new(self.clone())
    }

    fn matches(&self, kind: PduKind) -> bool {
        matches!(
            kind,
            PduKind::Disassoc | PduKind::Dot11Mgmt | PduKind::Dot11
        )
    }
}
