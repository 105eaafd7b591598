//! The tagged option (information element) codec.
//!
//! Management frames carry a variable-length list of tag-length-value
//! entries after their fixed body. Insertion order is wire order and
//! duplicate tags are allowed; lookup returns the first match. The declared
//! length of every entry is checked against the remaining buffer before any
//! value byte is read.

use crate::error::{Dot11Error, Result};

wire_enum! {
    /// Information element identifiers.
    pub struct OptionTag (u8) {
        /// Service set identifier.
        SSID = 0,
        /// Supported rates, in 0.5 Mbps units.
        SUPPORTED_RATES = 1,
        /// Frequency-hopping parameter set.
        FH_SET = 2,
        /// Direct-sequence parameter set (current channel).
        DS_SET = 3,
        /// Contention-free parameter set.
        CF_SET = 4,
        /// Traffic indication map.
        TIM = 5,
        /// IBSS parameter set.
        IBSS_SET = 6,
        /// Country information.
        COUNTRY = 7,
        /// Hopping pattern parameters.
        HOPPING_PATTERN_PARAMS = 8,
        /// Hopping pattern table.
        HOPPING_PATTERN_TABLE = 9,
        /// Request information.
        REQUEST = 10,
        /// BSS load.
        BSS_LOAD = 11,
        /// EDCA parameter set.
        EDCA = 12,
        /// Traffic specification.
        TSPEC = 13,
        /// Traffic classification.
        TCLAS = 14,
        /// Schedule.
        SCHEDULE = 15,
        /// Challenge text for shared-key authentication.
        CHALLENGE_TEXT = 16,
        /// Local power constraint.
        POWER_CONSTRAINT = 32,
        /// Transmit power capability.
        POWER_CAPABILITY = 33,
        /// Transmit power control request.
        TPC_REQUEST = 34,
        /// Transmit power control report.
        TPC_REPORT = 35,
        /// Supported channels.
        SUPPORTED_CHANNELS = 36,
        /// Channel switch announcement.
        CHANNEL_SWITCH = 37,
        /// Measurement request.
        MEASUREMENT_REQUEST = 38,
        /// Measurement report.
        MEASUREMENT_REPORT = 39,
        /// Quiet interval.
        QUIET = 40,
        /// IBSS dynamic frequency selection.
        IBSS_DFS = 41,
        /// ERP information.
        ERP_INFORMATION = 42,
        /// Traffic stream delay.
        TS_DELAY = 43,
        /// Traffic classification processing.
        TCLAS_PROCESSING = 44,
        /// QoS capability.
        QOS_CAPABILITY = 46,
        /// Robust security network information.
        RSN = 48,
        /// Extended supported rates.
        EXT_SUPPORTED_RATES = 50,
    }
}

/// A single tag-length-value entry. The value is copied in on construction
/// and owned by the option for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOption {
    tag: OptionTag,
    value: Vec<u8>,
}

impl TaggedOption {
    /// Build an option from a tag and a value of at most 255 bytes.
    pub fn new(tag: OptionTag, value: &[u8]) -> Result<Self> {
        if value.len() > usize::from(u8::MAX) {
            return Err(Dot11Error::OversizedOption { len: value.len() });
        }
        Ok(TaggedOption {
            tag,
            value: value.to_vec(),
        })
    }

    /// The option's tag.
    pub fn tag(&self) -> OptionTag {
        self.tag
    }

    /// The option's value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The 2-byte tag/length prefix plus the value bytes.
    pub fn encoded_size(&self) -> usize {
        2 + self.value.len()
    }
}

/// An ordered list of tagged options. Insertion order is wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionList {
    opts: Vec<TaggedOption>,
    // Cached sum of encoded_size over all entries, kept in sync by add().
    encoded_size: usize,
}

impl OptionList {
    /// An empty list.
    pub fn new() -> Self {
        OptionList::default()
    }

    /// Append an option, copying `value`. Values longer than 255 bytes are
    /// rejected, never truncated.
    pub fn add(&mut self, tag: OptionTag, value: &[u8]) -> Result<()> {
        let opt = TaggedOption::new(tag, value)?;
        self.encoded_size += opt.encoded_size();
        self.opts.push(opt);
        Ok(())
    }

    /// The first option carrying `tag`, or `None`. Absence is a valid,
    /// non-exceptional outcome.
    pub fn search(&self, tag: OptionTag) -> Option<&TaggedOption> {
        self.opts.iter().find(|opt| opt.tag == tag)
    }

    /// All entries in wire order.
    pub fn as_slice(&self) -> &[TaggedOption] {
        &self.opts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.opts.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    /// The exact byte count `emit` will produce.
    pub fn encoded_size(&self) -> usize {
        self.encoded_size
    }

    /// Decode a whole buffer of consecutive tag-length-value entries.
    ///
    /// Fails with `MalformedOption` as soon as a declared length would read
    /// past the end of `buf`; no partial list is returned.
    pub fn parse(mut buf: &[u8]) -> Result<OptionList> {
        let mut list = OptionList::new();
        while !buf.is_empty() {
            if buf.len() < 2 {
                return Err(Dot11Error::MalformedOption {
                    tag: buf[0],
                    required: 2,
                    available: buf.len(),
                });
            }
            let tag = buf[0];
            let len = usize::from(buf[1]);
            if buf.len() < 2 + len {
                return Err(Dot11Error::MalformedOption {
                    tag,
                    required: 2 + len,
                    available: buf.len(),
                });
            }
            list.add(OptionTag::from(tag), &buf[2..2 + len])?;
            buf = &buf[2 + len..];
        }
        Ok(list)
    }

    /// Write all entries into the front of `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than `encoded_size()`.
    pub fn emit(&self, out: &mut [u8]) {
        let mut offset = 0;
        for opt in &self.opts {
            out[offset] = opt.tag.raw();
            out[offset + 1] = opt.value.len() as u8;
            out[offset + 2..offset + 2 + opt.value.len()].copy_from_slice(&opt.value);
            offset += opt.encoded_size();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_size_tracks_additions() {
        let mut opts = OptionList::new();
        assert_eq!(opts.encoded_size(), 0);
        opts.add(OptionTag::SSID, b"net").unwrap();
        assert_eq!(opts.encoded_size(), 5);
        opts.add(OptionTag::DS_SET, &[11]).unwrap();
        assert_eq!(opts.encoded_size(), 8);

        let mut out = vec![0u8; opts.encoded_size()];
        opts.emit(&mut out);
        assert_eq!(out, [0, 3, b'n', b'e', b't', 3, 1, 11]);
    }

    #[test]
    fn oversized_value_is_rejected() {
        let mut opts = OptionList::new();
        let big = [0u8; 256];
        assert_eq!(
            opts.add(OptionTag::SSID, &big),
            Err(Dot11Error::OversizedOption { len: 256 })
        );
        // Nothing was appended.
        assert!(opts.is_empty());
        assert_eq!(opts.encoded_size(), 0);
    }

    #[test]
    fn truncated_option_fails_before_reading() {
        // Tag 0, length 4, but only 2 value bytes follow.
        let buf = [0u8, 4, 1, 2];
        assert_eq!(
            OptionList::parse(&buf),
            Err(Dot11Error::MalformedOption {
                tag: 0,
                required: 6,
                available: 4
            })
        );

        // A dangling tag byte without a length byte.
        let buf = [48u8];
        assert_eq!(
            OptionList::parse(&buf),
            Err(Dot11Error::MalformedOption {
                tag: 48,
                required: 2,
                available: 1
            })
        );
    }

    #[test]
    fn duplicates_first_match_wins() {
        let mut opts = OptionList::new();
        opts.add(OptionTag::SSID, b"first").unwrap();
        opts.add(OptionTag::SSID, b"second").unwrap();
        assert_eq!(opts.search(OptionTag::SSID).unwrap().value(), b"first");
        assert_eq!(opts.len(), 2);
    }
}
