//! Top-level frame classification.

use byteorder::{ByteOrder, LittleEndian};

use crate::control;
use crate::data;
use crate::error::{Dot11Error, Result};
use crate::header::{FrameControl, FrameType, BASE_HEADER_LEN};
use crate::mgmt;
use crate::pdu::{Pdu, RawData};

/// Decode a whole 802.11 frame, picking the concrete variant from the
/// type and subtype bits of the frame control word.
///
/// Known subtypes produce their concrete node; unknown subtypes of a known
/// type fall back to that type's generic node, so the bytes still round
/// trip. Frames of the reserved type 3 become an opaque [`RawData`] leaf.
pub fn dot11_from_bytes(buf: &[u8]) -> Result<Box<dyn Pdu>> {
    if buf.len() < BASE_HEADER_LEN {
        return Err(Dot11Error::MalformedHeader {
            required: BASE_HEADER_LEN,
            available: buf.len(),
        });
    }
    let fc = FrameControl::from_raw(LittleEndian::read_u16(&buf[0..2]));
    let frame_type = fc.frame_type();
    if frame_type == FrameType::MANAGEMENT {
        mgmt_from_bytes(fc.subtype(), buf)
    } else if frame_type == FrameType::CONTROL {
        control_from_bytes(fc.subtype(), buf)
    } else if frame_type == FrameType::DATA {
        // Subtypes 8 and above carry the QoS control word.
        if fc.subtype() >= data::subtype::QOS_DATA {
            Ok(Box::new(data::QosData::parse(buf)?))
        } else {
            Ok(Box::new(data::Dot11Data::parse(buf)?))
        }
    } else {
        Ok(Box::new(RawData::from_slice(buf)))
    }
}

fn mgmt_from_bytes(subtype: u8, buf: &[u8]) -> Result<Box<dyn Pdu>> {
    use mgmt::subtype::*;
    Ok(match subtype {
        ASSOC_REQ => Box::new(mgmt::AssocRequest::parse(buf)?),
        ASSOC_RESP => Box::new(mgmt::AssocResponse::parse(buf)?),
        PROBE_REQ => Box::new(mgmt::ProbeRequest::parse(buf)?),
        PROBE_RESP => Box::new(mgmt::ProbeResponse::parse(buf)?),
        BEACON => Box::new(mgmt::Beacon::parse(buf)?),
        DISASSOC => Box::new(mgmt::Disassoc::parse(buf)?),
        AUTH => Box::new(mgmt::Authentication::parse(buf)?),
        DEAUTH => Box::new(mgmt::Deauthentication::parse(buf)?),
        _ => Box::new(mgmt::Dot11Mgmt::parse(buf)?),
    })
}

fn control_from_bytes(subtype: u8, buf: &[u8]) -> Result<Box<dyn Pdu>> {
    use control::subtype::*;
    Ok(match subtype {
        BLOCK_ACK_REQ => Box::new(control::BlockAckRequest::parse(buf)?),
        BLOCK_ACK => Box::new(control::BlockAck::parse(buf)?),
        PS_POLL => Box::new(control::PsPoll::parse(buf)?),
        RTS => Box::new(control::Rts::parse(buf)?),
        CTS => Box::new(control::Cts::parse(buf)?),
        ACK => Box::new(control::Ack::parse(buf)?),
        CF_END => Box::new(control::CfEnd::parse(buf)?),
        _ => Box::new(control::Dot11Control::parse(buf)?),
    })
}
