use rdot11::mgmt::Beacon;
use rdot11::{dot11_from_bytes, Dot11Error, MacAddr, Pdu, PduKind};

#[test]
fn build_beacon_byte_image() {
    let src = MacAddr([0, 1, 2, 3, 4, 5]);
    let mut beacon = Beacon::new(MacAddr::BROADCAST, src);
    beacon.set_interval(100);
    beacon.capabilities_mut().set_ess(true);
    beacon.capabilities_mut().set_privacy(true);
    beacon.set_ssid("test").unwrap();

    // 24 header bytes, 12 body bytes, 6 option bytes.
    assert_eq!(beacon.total_size(), 42);

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        // Frame control: management, subtype 8; duration 0.
        0x80, 0x00, 0x00, 0x00,
        // addr1: broadcast.
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        // addr2: source.
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
        // addr3 and sequence control, all zero.
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Timestamp.
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Interval 100, capabilities ESS + privacy.
        0x64, 0x00, 0x11, 0x00,
        // SSID option.
        0x00, 0x04, b't', b'e', b's', b't',
    ];
    assert_eq!(beacon.to_vec(), expected);
}

#[test]
fn parse_beacon_round_trip() {
    let src = MacAddr([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]);
    let mut beacon = Beacon::new(MacAddr::BROADCAST, src);
    beacon.set_timestamp(0x0123_4567_89ab_cdef);
    beacon.set_interval(100);
    beacon.capabilities_mut().set_privacy(true);
    beacon.set_ssid("lab-net").unwrap();
    beacon.frame_mut().set_ds_parameter_set(11).unwrap();
    let bytes = beacon.to_vec();

    let parsed = Beacon::parse(&bytes).unwrap();
    assert_eq!(parsed.timestamp(), 0x0123_4567_89ab_cdef);
    assert_eq!(parsed.interval(), 100);
    assert!(parsed.capabilities().privacy());
    assert!(!parsed.capabilities().ess());
    assert_eq!(parsed.ssid(), "lab-net");
    assert_eq!(parsed.frame().addr1(), MacAddr::BROADCAST);
    assert_eq!(parsed.frame().addr2(), src);
    assert_eq!(parsed.to_vec(), bytes);

    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::Beacon);
    assert!(node.matches(PduKind::Beacon));
    assert!(node.matches(PduKind::Dot11Mgmt));
    assert!(node.matches(PduKind::Dot11));
    assert!(!node.matches(PduKind::ProbeResponse));
    assert_eq!(node.to_vec(), bytes);
}

#[test]
fn truncated_beacon_body_is_malformed() {
    let beacon = Beacon::new(MacAddr::BROADCAST, MacAddr::NULL);
    let bytes = beacon.to_vec();
    // Cut into the fixed body: headers are intact, body is short.
    let err = Beacon::parse(&bytes[..28]).unwrap_err();
    assert_eq!(
        err,
        Dot11Error::MalformedBody {
            required: 12,
            available: 4,
        }
    );
}

#[test]
fn serialize_into_short_buffer_fails() {
    let mut beacon = Beacon::new(MacAddr::BROADCAST, MacAddr::NULL);
    beacon.set_ssid("net").unwrap();
    let mut out = vec![0u8; beacon.total_size() - 1];
    assert_eq!(
        beacon.serialize(&mut out),
        Err(Dot11Error::BufferTooSmall {
            required: beacon.total_size(),
            available: beacon.total_size() - 1,
        })
    );
}
