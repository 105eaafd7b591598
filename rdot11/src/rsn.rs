//! The RSN information element codec.
//!
//! A self-describing variable-length structure: 16-bit counts precede each
//! suite list, everything little-endian. The serialized blob becomes the
//! value of a single [`OptionTag::RSN`](crate::options::OptionTag::RSN)
//! tagged option.

use bytes::Buf;
use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Dot11Error, Result};
use crate::options::OptionTag;

wire_enum! {
    /// Cipher suite selectors: the little-endian u32 image of the 00-0f-ac
    /// OUI plus suite type.
    pub struct CipherSuite (u32) {
        /// WEP with 40-bit keys.
        WEP_40 = 0x01ac0f00,
        /// Temporal key integrity protocol.
        TKIP = 0x02ac0f00,
        /// AES counter mode with CBC-MAC.
        CCMP = 0x04ac0f00,
        /// WEP with 104-bit keys.
        WEP_104 = 0x05ac0f00,
    }
}

wire_enum! {
    /// Authentication and key management suite selectors.
    pub struct AkmSuite (u32) {
        /// PMKSA caching / 802.1X.
        PMKSA = 0x01ac0f00,
        /// Pre-shared key.
        PSK = 0x02ac0f00,
    }
}

/// The RSN information element payload.
///
/// Suite lists keep insertion order; unknown suite selectors round-trip
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsnInformation {
    version: u16,
    capabilities: u16,
    group_suite: CipherSuite,
    pairwise_suites: Vec<CipherSuite>,
    akm_suites: Vec<AkmSuite>,
}

impl Default for RsnInformation {
    fn default() -> Self {
        RsnInformation::new()
    }
}

impl RsnInformation {
    /// An empty element with version 1.
    pub fn new() -> Self {
        RsnInformation {
            version: 1,
            capabilities: 0,
            group_suite: CipherSuite::from(0),
            pairwise_suites: Vec::new(),
            akm_suites: Vec::new(),
        }
    }

    /// The canonical WPA2-PSK configuration: version 1, group suite CCMP,
    /// one pairwise CCMP suite, one PSK AKM suite.
    pub fn wpa2_psk() -> Self {
        let mut rsn = RsnInformation::new();
        rsn.set_group_suite(CipherSuite::CCMP);
        rsn.add_pairwise_suite(CipherSuite::CCMP);
        rsn.add_akm_suite(AkmSuite::PSK);
        rsn
    }

    /// The version field.
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Set the version field.
    pub fn set_version(&mut self, version: u16) {
        self.version = version;
    }

    /// The capabilities bitmap.
    pub fn capabilities(&self) -> u16 {
        self.capabilities
    }

    /// Set the capabilities bitmap.
    pub fn set_capabilities(&mut self, capabilities: u16) {
        self.capabilities = capabilities;
    }

    /// The group cipher suite.
    pub fn group_suite(&self) -> CipherSuite {
        self.group_suite
    }

    /// Set the group cipher suite.
    pub fn set_group_suite(&mut self, suite: CipherSuite) {
        self.group_suite = suite;
    }

    /// Append a pairwise cipher suite.
    pub fn add_pairwise_suite(&mut self, suite: CipherSuite) {
        self.pairwise_suites.push(suite);
    }

    /// Append an AKM suite.
    pub fn add_akm_suite(&mut self, akm: AkmSuite) {
        self.akm_suites.push(akm);
    }

    /// The pairwise cipher suites, in wire order.
    pub fn pairwise_suites(&self) -> &[CipherSuite] {
        &self.pairwise_suites
    }

    /// The AKM suites, in wire order.
    pub fn akm_suites(&self) -> &[AkmSuite] {
        &self.akm_suites
    }

    /// The exact byte count `serialize` produces.
    pub fn encoded_size(&self) -> usize {
        2 + 4 + 2 + 4 * self.pairwise_suites.len() + 2 + 4 * self.akm_suites.len() + 2
    }

    /// Serialize into the on-wire layout: version(2), group suite(4),
    /// pairwise count(2), pairwise suites(4 each), AKM count(2), AKM
    /// suites(4 each), capabilities(2).
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.encoded_size()];
        LittleEndian::write_u16(&mut out[0..2], self.version);
        LittleEndian::write_u32(&mut out[2..6], self.group_suite.raw());
        LittleEndian::write_u16(&mut out[6..8], self.pairwise_suites.len() as u16);
        let mut offset = 8;
        for suite in &self.pairwise_suites {
            LittleEndian::write_u32(&mut out[offset..offset + 4], suite.raw());
            offset += 4;
        }
        LittleEndian::write_u16(&mut out[offset..offset + 2], self.akm_suites.len() as u16);
        offset += 2;
        for akm in &self.akm_suites {
            LittleEndian::write_u32(&mut out[offset..offset + 4], akm.raw());
            offset += 4;
        }
        LittleEndian::write_u16(&mut out[offset..offset + 2], self.capabilities);
        out
    }

    /// Decode an RSN element payload, the inverse of `serialize`.
    ///
    /// Counts are read first; the declared suite lists and the trailing
    /// capabilities word are bounds-checked against the remaining bytes
    /// before anything is read.
    pub fn parse(buf: &[u8]) -> Result<Self> {
        let total = buf.len();
        let mut cur = buf;
        let mut rsn = RsnInformation::new();

        check_remaining(total, cur.remaining(), 8)?;
        rsn.version = cur.get_u16_le();
        rsn.group_suite = CipherSuite::from(cur.get_u32_le());
        let pairwise_count = usize::from(cur.get_u16_le());

        check_remaining(total, cur.remaining(), 4 * pairwise_count + 2)?;
        for _ in 0..pairwise_count {
            rsn.add_pairwise_suite(CipherSuite::from(cur.get_u32_le()));
        }
        let akm_count = usize::from(cur.get_u16_le());

        check_remaining(total, cur.remaining(), 4 * akm_count + 2)?;
        for _ in 0..akm_count {
            rsn.add_akm_suite(AkmSuite::from(cur.get_u32_le()));
        }
        rsn.capabilities = cur.get_u16_le();
        Ok(rsn)
    }
}

fn check_remaining(total: usize, remaining: usize, needed: usize) -> Result<()> {
    if remaining < needed {
        return Err(Dot11Error::MalformedOption {
            tag: OptionTag::RSN.raw(),
            required: total - remaining + needed,
            available: total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_selectors_encode_to_oui_order() {
        let mut out = [0u8; 4];
        LittleEndian::write_u32(&mut out, CipherSuite::CCMP.raw());
        assert_eq!(out, [0x00, 0x0f, 0xac, 0x04]);
        LittleEndian::write_u32(&mut out, AkmSuite::PSK.raw());
        assert_eq!(out, [0x00, 0x0f, 0xac, 0x02]);
    }
}
