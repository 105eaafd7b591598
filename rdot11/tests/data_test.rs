use rdot11::data::{Dot11Data, QosData};
use rdot11::{dot11_from_bytes, MacAddr, Pdu, PduKind, RawData};

const AP: MacAddr = MacAddr([0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]);
const STA: MacAddr = MacAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
const WDS: MacAddr = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

#[test]
fn ds_flags_gate_the_fourth_address() {
    let mut data = Dot11Data::new(AP, STA);
    assert_eq!(data.header_size(), 24);

    data.frame_control_mut().set_to_ds(true);
    assert_eq!(data.header_size(), 24);

    // Both DS flags set: the fourth address occupies wire space.
    data.frame_control_mut().set_from_ds(true);
    data.set_addr4(WDS);
    assert_eq!(data.header_size(), 30);
    let bytes = data.to_vec();
    assert_eq!(&bytes[24..30], WDS.as_bytes());

    let parsed = Dot11Data::parse(&bytes).unwrap();
    assert_eq!(parsed.addr4(), WDS);

    // Clearing one flag drops the slot from the wire image again.
    data.frame_control_mut().set_from_ds(false);
    assert_eq!(data.header_size(), 24);
    let parsed = Dot11Data::parse(&data.to_vec()).unwrap();
    assert_eq!(parsed.addr4(), MacAddr::NULL);
}

#[test]
fn payload_becomes_a_raw_child() {
    let mut data = Dot11Data::new(AP, STA);
    data.set_seq_num(0x10);
    data.set_inner_pdu(Box::new(RawData::from_slice(b"payload bytes")));
    assert_eq!(data.total_size(), 24 + 13);
    let bytes = data.to_vec();

    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::Dot11Data);
    assert!(node.matches(PduKind::Dot11));
    assert_eq!(node.inner_pdu().unwrap().kind(), PduKind::RawData);
    assert_eq!(node.to_vec(), bytes);
}

#[test]
fn qos_data_adds_the_control_word() {
    let mut qos = QosData::new(AP, STA);
    qos.set_qos_control(0x5008);
    qos.data_mut()
        .set_inner_pdu(Box::new(RawData::from_slice(&[0xde, 0xad])));
    assert_eq!(qos.header_size(), 26);
    let bytes = qos.to_vec();

    let parsed = QosData::parse(&bytes).unwrap();
    assert_eq!(parsed.qos_control(), 0x5008);
    assert_eq!(parsed.data().addr1(), AP);
    assert_eq!(parsed.data().addr2(), STA);
    assert_eq!(parsed.to_vec(), bytes);

    // Data subtypes 8 and above dispatch as QoS.
    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::QosData);
    assert!(node.matches(PduKind::Dot11Data));
    assert!(node.matches(PduKind::Dot11));
}

#[test]
fn deep_clone_is_independent() {
    let mut data = Dot11Data::new(AP, STA);
    data.set_inner_pdu(Box::new(RawData::from_slice(b"original")));
    let copy = data.clone_pdu();
    let before = copy.to_vec();

    // Mutating the original never shows through the copy.
    data.set_seq_num(0xfff);
    data.set_inner_pdu(Box::new(RawData::from_slice(b"changed!")));
    assert_eq!(copy.to_vec(), before);
    assert_ne!(data.to_vec(), before);
}
