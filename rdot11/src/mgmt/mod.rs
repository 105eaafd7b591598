//! 802.11 management frames.
//!
//! Every management variant shares the same shape: base header, extended
//! addressing header, a variant-specific fixed body, then the tagged option
//! list, which consumes the rest of the frame. [`MgmtFrame`] carries the
//! shared fields by composition; the variants in the submodules add their
//! fixed bodies and plug into the generic PDU machinery.

use byteorder::{ByteOrder, LittleEndian};

use crate::addr::MacAddr;
use crate::error::{Dot11Error, Result};
use crate::header::{BaseHeader, ExtendedHeader, FrameType, BASE_HEADER_LEN};
use crate::options::{OptionList, OptionTag, TaggedOption};
use crate::pdu::Pdu;
use crate::rsn::RsnInformation;

mod beacon;
pub use beacon::Beacon;

mod probe;
pub use probe::{ProbeRequest, ProbeResponse};

mod assoc;
pub use assoc::{AssocRequest, AssocResponse};

mod auth;
pub use auth::{Authentication, Deauthentication, Disassoc};

/// Management frame subtypes.
pub mod subtype {
    /// Association request.
    pub const ASSOC_REQ: u8 = 0;
    /// Association response.
    pub const ASSOC_RESP: u8 = 1;
    /// Reassociation request.
    pub const REASSOC_REQ: u8 = 2;
    /// Reassociation response.
    pub const REASSOC_RESP: u8 = 3;
    /// Probe request.
    pub const PROBE_REQ: u8 = 4;
    /// Probe response.
    pub const PROBE_RESP: u8 = 5;
    /// Beacon.
    pub const BEACON: u8 = 8;
    /// Announcement traffic indication message.
    pub const ATIM: u8 = 9;
    /// Disassociation.
    pub const DISASSOC: u8 = 10;
    /// Authentication.
    pub const AUTH: u8 = 11;
    /// Deauthentication.
    pub const DEAUTH: u8 = 12;
}

wire_enum! {
    /// Reason codes carried by disassociation and deauthentication frames.
    pub struct ReasonCode (u16) {
        /// Unspecified reason.
        UNSPECIFIED = 1,
        /// Previous authentication no longer valid.
        PREV_AUTH_NOT_VALID = 2,
        /// Station is leaving the IBSS or ESS.
        STA_LEAVING_IBSS_ESS = 3,
        /// Disassociated due to inactivity.
        INACTIVITY = 4,
        /// AP unable to handle all associated stations.
        CANT_HANDLE_STA = 5,
        /// Class 2 frame from a nonauthenticated station.
        CLASS2_FROM_NO_AUTH = 6,
        /// Class 3 frame from a nonassociated station.
        CLASS3_FROM_NO_AUTH = 7,
        /// Station is leaving the BSS.
        STA_LEAVING_BSS = 8,
        /// Station requesting (re)association is not authenticated.
        STA_NOT_AUTH_WITH_STA = 9,
        /// Power capability element is unacceptable.
        POW_CAP_NOT_VALID = 10,
        /// Supported channels element is unacceptable.
        SUPPORTED_CHANN_NOT_VALID = 11,
        /// Invalid element contents.
        INVALID_CONTENT = 13,
        /// Message integrity code failure.
        MIC_FAIL = 14,
        /// 4-way handshake timeout.
        HANDSHAKE_TIMEOUT = 15,
        /// Group key handshake timeout.
        GROUP_KEY_TIMEOUT = 16,
        /// Element mismatch in the 4-way handshake.
        WRONG_HANDSHAKE = 17,
        /// Invalid group cipher.
        INVALID_GROUP_CIPHER = 18,
        /// Invalid pairwise cipher.
        INVALID_PAIRWISE_CIPHER = 19,
        /// Invalid AKMP.
        INVALID_AKMP = 20,
        /// Unsupported RSN element version.
        UNSUPPORTED_RSN_VERSION = 21,
        /// Invalid RSN element capabilities.
        INVALID_RSN_CAPABILITIES = 22,
        /// 802.1X authentication failed.
        AUTH_FAILED = 23,
        /// Cipher suite rejected by policy.
        CIPHER_SUITE_REJECTED = 24,
        /// Unspecified QoS-related reason.
        UNSPECIFIED_QOS_REASON = 32,
        /// Insufficient bandwidth for the QoS station.
        NOT_ENOUGH_BANDWIDTH = 33,
        /// Excessive missed acknowledgements due to poor channel.
        POOR_CHANNEL = 34,
        /// Station is transmitting outside the limits of its TXOPs.
        STA_OUT_OF_LIMITS = 35,
        /// Requested by the station as it is leaving the BSS.
        REQUESTED_BY_STA_LEAVING = 36,
        /// Requested by the station as it rejects the mechanism.
        REQUESTED_BY_STA_REJECT_MECHANISM = 37,
        /// Requested by the station as setup is required.
        REQUESTED_BY_STA_REJECT_SETUP = 38,
        /// Requested by the station due to timeout.
        REQUESTED_BY_STA_TIMEOUT = 39,
        /// Peer station does not support the cipher suite.
        PEER_STA_NOT_SUPPORT_CIPHER = 45,
    }
}

/// The 16-bit capability information bitmap carried in beacon, probe
/// response and (re)association bodies.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct CapabilityInfo(u16);

macro_rules! cap_bit {
    ($(#[$doc:meta])* $getter:ident, $(#[$set_doc:meta])* $setter:ident, $bit:expr) => {
        $(#[$doc])*
        pub fn $getter(&self) -> bool {
            self.0 & (1 << $bit) != 0
        }

        $(#[$set_doc])*
        pub fn $setter(&mut self, value: bool) {
            if value {
                self.0 |= 1 << $bit;
            } else {
                self.0 &= !(1 << $bit);
            }
        }
    };
}

impl CapabilityInfo {
    /// Rebuild from the raw little-endian word.
    pub fn from_raw(raw: u16) -> Self {
        CapabilityInfo(raw)
    }

    /// The raw little-endian word.
    pub fn raw(&self) -> u16 {
        self.0
    }

    cap_bit!(
        /// The ESS flag.
        ess,
        /// Set the ESS flag.
        set_ess,
        0
    );
    cap_bit!(
        /// The IBSS flag.
        ibss,
        /// Set the IBSS flag.
        set_ibss,
        1
    );
    cap_bit!(
        /// The CF-pollable flag.
        cf_poll,
        /// Set the CF-pollable flag.
        set_cf_poll,
        2
    );
    cap_bit!(
        /// The CF-poll-request flag.
        cf_poll_req,
        /// Set the CF-poll-request flag.
        set_cf_poll_req,
        3
    );
    cap_bit!(
        /// The privacy flag.
        privacy,
        /// Set the privacy flag.
        set_privacy,
        4
    );
    cap_bit!(
        /// The short-preamble flag.
        short_preamble,
        /// Set the short-preamble flag.
        set_short_preamble,
        5
    );
    cap_bit!(
        /// The PBCC flag.
        pbcc,
        /// Set the PBCC flag.
        set_pbcc,
        6
    );
    cap_bit!(
        /// The channel-agility flag.
        channel_agility,
        /// Set the channel-agility flag.
        set_channel_agility,
        7
    );
    cap_bit!(
        /// The spectrum-management flag.
        spectrum_mgmt,
        /// Set the spectrum-management flag.
        set_spectrum_mgmt,
        8
    );
    cap_bit!(
        /// The QoS flag.
        qos,
        /// Set the QoS flag.
        set_qos,
        9
    );
    cap_bit!(
        /// The short-slot-time flag.
        sst,
        /// Set the short-slot-time flag.
        set_sst,
        10
    );
    cap_bit!(
        /// The APSD flag.
        apsd,
        /// Set the APSD flag.
        set_apsd,
        11
    );
    cap_bit!(
        /// The reserved bit.
        reserved,
        /// Set the reserved bit.
        set_reserved,
        12
    );
    cap_bit!(
        /// The DSSS-OFDM flag.
        dsss_ofdm,
        /// Set the DSSS-OFDM flag.
        set_dsss_ofdm,
        13
    );
    cap_bit!(
        /// The delayed-block-ack flag.
        delayed_block_ack,
        /// Set the delayed-block-ack flag.
        set_delayed_block_ack,
        14
    );
    cap_bit!(
        /// The immediate-block-ack flag.
        immediate_block_ack,
        /// Set the immediate-block-ack flag.
        set_immediate_block_ack,
        15
    );
}

/// Fields shared by every management variant: fixed headers, the
/// information element list, and the optional encapsulated child node.
#[derive(Debug, Clone, Default)]
pub struct MgmtFrame {
    base: BaseHeader,
    ext: ExtendedHeader,
    options: OptionList,
    inner: Option<Box<dyn Pdu>>,
}

impl MgmtFrame {
    /// A management frame of the given subtype, addressed from `src` to
    /// `dst`.
    pub fn new(subtype: u8, dst: MacAddr, src: MacAddr) -> Self {
        let mut frame = MgmtFrame {
            base: BaseHeader::new(FrameType::MANAGEMENT, subtype, dst),
            ..MgmtFrame::default()
        };
        frame.ext.addr2 = src;
        frame
    }

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

    /// The tagged option list.
    pub fn options(&self) -> &OptionList {
        &self.options
    }

    /// Mutable access to the tagged option list.
    pub fn options_mut(&mut self) -> &mut OptionList {
        &mut self.options
    }

    /// Append a tagged option, copying `value`.
    pub fn add_option(&mut self, tag: OptionTag, value: &[u8]) -> Result<()> {
        self.options.add(tag, value)
    }

    /// The first option carrying `tag`, or `None`.
    pub fn search_option(&self, tag: OptionTag) -> Option<&TaggedOption> {
        self.options.search(tag)
    }

    /// The owned child node, if any.
    pub fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.inner.as_deref()
    }

    /// Mutable access to the owned child node.
    pub fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.inner.as_deref_mut()
    }

    /// Attach an owned child node, replacing any previous one.
    pub fn set_inner_pdu(&mut self, inner: Box<dyn Pdu>) {
        self.inner = Some(inner);
    }

    /// Wire size of the base plus extended headers for the current DS flag
    /// state. The fourth address contributes 6 bytes iff both DS flags are
    /// set.
    pub fn prefix_size(&self) -> usize {
        BASE_HEADER_LEN + ExtendedHeader::size(self.base.frame_control.has_addr4())
    }

    /// Wire size of the tagged option list.
    pub fn options_size(&self) -> usize {
        self.options.encoded_size()
    }

    pub(crate) fn parse_prefix(buf: &[u8]) -> Result<(MgmtFrame, usize)> {
        let base = BaseHeader::parse(buf)?;
        let has_addr4 = base.frame_control.has_addr4();
        let ext = ExtendedHeader::parse(&buf[BASE_HEADER_LEN..], has_addr4)?;
        let consumed = BASE_HEADER_LEN + ExtendedHeader::size(has_addr4);
        Ok((
            MgmtFrame {
                base,
                ext,
                options: OptionList::new(),
                inner: None,
            },
            consumed,
        ))
    }

    pub(crate) fn emit_prefix(&self, out: &mut [u8]) -> usize {
        let has_addr4 = self.base.frame_control.has_addr4();
        self.base.emit(out);
        self.ext.emit(&mut out[BASE_HEADER_LEN..], has_addr4);
        BASE_HEADER_LEN + ExtendedHeader::size(has_addr4)
    }

    pub(crate) fn parse_options(&mut self, buf: &[u8]) -> Result<()> {
        self.options = OptionList::parse(buf)?;
        Ok(())
    }

    pub(crate) fn emit_options(&self, out: &mut [u8]) {
        self.options.emit(out);
    }

    // Option setter helpers. Each is a thin translation of semantic fields
    // into one tagged option, the pattern all information elements follow.

    /// Set the SSID option.
    pub fn set_ssid(&mut self, ssid: &str) -> Result<()> {
        self.add_option(OptionTag::SSID, ssid.as_bytes())
    }

    /// The SSID carried by this frame, or an empty string when the option
    /// is absent.
    pub fn ssid(&self) -> String {
        self.search_option(OptionTag::SSID)
            .map(|opt| String::from_utf8_lossy(opt.value()).into_owned())
            .unwrap_or_default()
    }

    /// Set the supported rates option. Rates are given in Mbps and encoded
    /// in 0.5 Mbps units.
    pub fn set_supported_rates(&mut self, rates: &[f32]) -> Result<()> {
        let encoded: Vec<u8> = rates.iter().map(|rate| (rate * 2.0) as u8).collect();
        self.add_option(OptionTag::SUPPORTED_RATES, &encoded)
    }

    /// Set the extended supported rates option, in 0.5 Mbps units.
    pub fn set_extended_supported_rates(&mut self, rates: &[f32]) -> Result<()> {
        let encoded: Vec<u8> = rates.iter().map(|rate| (rate * 2.0) as u8).collect();
        self.add_option(OptionTag::EXT_SUPPORTED_RATES, &encoded)
    }

    /// Set the DS parameter set option (current channel).
    pub fn set_ds_parameter_set(&mut self, current_channel: u8) -> Result<()> {
        self.add_option(OptionTag::DS_SET, &[current_channel])
    }

    /// Serialize `info` and set it as the RSN information option.
    pub fn set_rsn_information(&mut self, info: &RsnInformation) -> Result<()> {
        self.add_option(OptionTag::RSN, &info.serialize())
    }

    /// Decode the RSN information option, if present.
    pub fn rsn_information(&self) -> Result<Option<RsnInformation>> {
        match self.search_option(OptionTag::RSN) {
            Some(opt) => RsnInformation::parse(opt.value()).map(Some),
            None => Ok(None),
        }
    }

    /// Set the challenge text option.
    pub fn set_challenge_text(&mut self, text: &[u8]) -> Result<()> {
        self.add_option(OptionTag::CHALLENGE_TEXT, text)
    }

    /// Set the power capability option.
    pub fn set_power_capability(&mut self, min_power: u8, max_power: u8) -> Result<()> {
        self.add_option(OptionTag::POWER_CAPABILITY, &[min_power, max_power])
    }

    /// Set the ERP information option.
    pub fn set_erp_information(&mut self, value: u8) -> Result<()> {
        self.add_option(OptionTag::ERP_INFORMATION, &[value])
    }

    /// Set the channel switch announcement option.
    pub fn set_channel_switch(
        &mut self,
        switch_mode: u8,
        new_channel: u8,
        switch_count: u8,
    ) -> Result<()> {
        self.add_option(
            OptionTag::CHANNEL_SWITCH,
            &[switch_mode, new_channel, switch_count],
        )
    }

    /// Set the traffic indication map option.
    pub fn set_tim(
        &mut self,
        dtim_count: u8,
        dtim_period: u8,
        bitmap_control: u8,
        partial_virtual_bitmap: &[u8],
    ) -> Result<()> {
        let mut value = Vec::with_capacity(3 + partial_virtual_bitmap.len());
        value.push(dtim_count);
        value.push(dtim_period);
        value.push(bitmap_control);
        value.extend_from_slice(partial_virtual_bitmap);
        self.add_option(OptionTag::TIM, &value)
    }

    /// Set the QoS capability option.
    pub fn set_qos_capability(&mut self, qos_info: u8) -> Result<()> {
        self.add_option(OptionTag::QOS_CAPABILITY, &[qos_info])
    }
}

pub(crate) fn check_body(required: usize, available: usize) -> Result<()> {
    if available < required {
        return Err(Dot11Error::MalformedBody {
            required,
            available,
        });
    }
    Ok(())
}

pub(crate) fn read_capability(buf: &[u8]) -> CapabilityInfo {
    CapabilityInfo::from_raw(LittleEndian::read_u16(&buf[0..2]))
}

/// A generic management frame: the fallback for subtypes without a concrete
/// variant. It carries only the common headers; the body bytes are kept as
/// an opaque child so nothing is dropped.
#[derive(Debug, Clone, Default)]
pub struct Dot11Mgmt {
    frame: MgmtFrame,
}

impl Dot11Mgmt {
    /// A generic management frame with the given subtype.
    pub fn new(subtype: u8, dst: MacAddr, src: MacAddr) -> Self {
        Dot11Mgmt {
            frame: MgmtFrame::new(subtype, dst, src),
        }
    }

    /// Parse the common headers and keep the remainder as a raw child.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let (mut frame, offset) = MgmtFrame::parse_prefix(buf)?;
        frame.inner = crate::pdu::raw_child(&buf[offset..]);
        Ok(Dot11Mgmt { frame })
    }

    /// Shared management header and option fields.
    pub fn frame(&self) -> &MgmtFrame {
        &self.frame
    }

    /// Mutable access to the shared management fields.
    pub fn frame_mut(&mut self) -> &mut MgmtFrame {
        &mut self.frame
    }
}

impl Pdu for Dot11Mgmt {
    fn kind(&self) -> crate::pdu::PduKind {
        crate::pdu::PduKind::Dot11Mgmt
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

    fn matches(&self, kind: crate::pdu::PduKind) -> bool {
        matches!(
            kind,
            crate::pdu::PduKind::Dot11Mgmt | crate::pdu::PduKind::Dot11
        )
    }
}
