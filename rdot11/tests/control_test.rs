use rdot11::control::{Ack, BlockAck, BlockAckRequest, CfEnd, Cts, PsPoll, Rts};
use rdot11::{dot11_from_bytes, Dot11Error, MacAddr, Pdu, PduKind};

const AP: MacAddr = MacAddr([0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]);
const STA: MacAddr = MacAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

#[test]
fn rts_byte_image() {
    let mut rts = Rts::new(AP, STA);
    rts.set_duration_id(0x1234);

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        // Frame control: control type, subtype 11; duration 0x1234.
        0xb4, 0x00, 0x34, 0x12,
        // Receiver address.
        0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f,
        // Transmitter address.
        0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    assert_eq!(rts.to_vec(), expected);

    let parsed = Rts::parse(&expected).unwrap();
    assert_eq!(parsed.addr1(), AP);
    assert_eq!(parsed.target_addr(), STA);
    assert_eq!(parsed.duration_id(), 0x1234);
}

#[test]
fn cts_and_ack_are_base_header_only() {
    let cts = Cts::new(STA);
    assert_eq!(cts.total_size(), 10);
    assert_eq!(dot11_from_bytes(&cts.to_vec()).unwrap().kind(), PduKind::Cts);

    let ack = Ack::new(STA);
    assert_eq!(ack.total_size(), 10);
    let node = dot11_from_bytes(&ack.to_vec()).unwrap();
    assert_eq!(node.kind(), PduKind::Ack);
    assert!(node.matches(PduKind::Dot11Control));
    assert!(node.matches(PduKind::Dot11));
    assert!(!node.matches(PduKind::Cts));
}

#[test]
fn ps_poll_and_cf_end_round_trip() {
    let mut ps = PsPoll::new(AP, STA);
    // The duration slot carries the association ID.
    ps.set_duration_id(0xc001);
    let bytes = ps.to_vec();
    assert_eq!(bytes.len(), 16);
    let parsed = PsPoll::parse(&bytes).unwrap();
    assert_eq!(parsed.duration_id(), 0xc001);
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::PsPoll);

    let cf_end = CfEnd::new(MacAddr::BROADCAST, AP);
    assert_eq!(
        dot11_from_bytes(&cf_end.to_vec()).unwrap().kind(),
        PduKind::CfEnd
    );
}

#[test]
fn block_ack_request_fields() {
    let mut bar = BlockAckRequest::new(AP, STA);
    bar.set_tid(5);
    bar.set_start_sequence(0x321);
    bar.set_fragment_number(2);
    let bytes = bar.to_vec();
    assert_eq!(bytes.len(), 20);

    let parsed = BlockAckRequest::parse(&bytes).unwrap();
    assert_eq!(parsed.tid(), 5);
    assert_eq!(parsed.start_sequence(), 0x321);
    assert_eq!(parsed.fragment_number(), 2);
    assert_eq!(
        dot11_from_bytes(&bytes).unwrap().kind(),
        PduKind::BlockAckRequest
    );
}

#[test]
fn block_ack_carries_bitmap() {
    let mut ba = BlockAck::new(AP, STA);
    ba.set_tid(3);
    ba.set_start_sequence(0x100);
    ba.set_bitmap([0xaa, 0xbb, 0xcc, 0xdd, 0x11, 0x22, 0x33, 0x44]);
    let bytes = ba.to_vec();
    assert_eq!(bytes.len(), 28);

    let parsed = BlockAck::parse(&bytes).unwrap();
    assert_eq!(parsed.tid(), 3);
    assert_eq!(parsed.start_sequence(), 0x100);
    assert_eq!(parsed.bitmap(), &[0xaa, 0xbb, 0xcc, 0xdd, 0x11, 0x22, 0x33, 0x44]);
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::BlockAck);
}

#[test]
fn truncated_block_ack_is_malformed() {
    let ba = BlockAck::new(AP, STA);
    let bytes = ba.to_vec();
    assert_eq!(
        BlockAck::parse(&bytes[..24]).unwrap_err(),
        Dot11Error::MalformedHeader {
            required: 28,
            available: 24,
        }
    );
}

#[test]
fn unknown_control_subtype_falls_back_to_generic() {
    // Subtype 7 has no concrete control variant.
    let mut bytes = Cts::new(STA).to_vec();
    bytes[0] = 0x74;
    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::Dot11Control);
    assert_eq!(node.to_vec(), bytes);
}
