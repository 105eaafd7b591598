use rdot11::options::OptionTag;
use rdot11::rsn::{AkmSuite, CipherSuite, RsnInformation};
use rdot11::Dot11Error;

#[test]
fn wpa2_psk_byte_image() {
    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        // Version 1.
        0x01, 0x00,
        // Group suite: CCMP.
        0x00, 0x0f, 0xac, 0x04,
        // One pairwise suite: CCMP.
        0x01, 0x00, 0x00, 0x0f, 0xac, 0x04,
        // One AKM suite: PSK.
        0x01, 0x00, 0x00, 0x0f, 0xac, 0x02,
        // Capabilities.
        0x00, 0x00,
    ];
    let rsn = RsnInformation::wpa2_psk();
    assert_eq!(rsn.encoded_size(), 20);
    assert_eq!(rsn.serialize(), expected);
    assert_eq!(RsnInformation::parse(&expected).unwrap(), rsn);
}

#[test]
fn suite_lists_keep_insertion_order() {
    let mut rsn = RsnInformation::new();
    rsn.set_group_suite(CipherSuite::TKIP);
    rsn.add_pairwise_suite(CipherSuite::TKIP);
    rsn.add_pairwise_suite(CipherSuite::CCMP);
    rsn.add_akm_suite(AkmSuite::PMKSA);
    rsn.add_akm_suite(AkmSuite::PSK);
    rsn.set_capabilities(0x000c);

    let parsed = RsnInformation::parse(&rsn.serialize()).unwrap();
    assert_eq!(parsed.pairwise_suites(), &[CipherSuite::TKIP, CipherSuite::CCMP]);
    assert_eq!(parsed.akm_suites(), &[AkmSuite::PMKSA, AkmSuite::PSK]);
    assert_eq!(parsed.capabilities(), 0x000c);
}

#[test]
fn unknown_suite_selectors_round_trip() {
    let mut rsn = RsnInformation::new();
    rsn.set_group_suite(CipherSuite::from(0xdead_beef));
    rsn.add_pairwise_suite(CipherSuite::from(0x1234_5678));
    let parsed = RsnInformation::parse(&rsn.serialize()).unwrap();
    assert_eq!(parsed.group_suite().raw(), 0xdead_beef);
    assert_eq!(parsed.pairwise_suites()[0].raw(), 0x1234_5678);
}

#[test]
fn truncated_element_fails_before_reading() {
    // A declared pairwise count of 2 with only one suite's worth of bytes.
    let mut bytes = RsnInformation::wpa2_psk().serialize();
    bytes[6] = 2;
    let short = &bytes[..12];
    assert_eq!(
        RsnInformation::parse(short).unwrap_err(),
        Dot11Error::MalformedOption {
            tag: OptionTag::RSN.raw(),
            required: 18,
            available: 12,
        }
    );

    // Too short for even the fixed fields.
    assert_eq!(
        RsnInformation::parse(&[0x01, 0x00]).unwrap_err(),
        Dot11Error::MalformedOption {
            tag: OptionTag::RSN.raw(),
            required: 8,
            available: 2,
        }
    );
}
