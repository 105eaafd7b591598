use rdot11::mgmt::{
    AssocRequest, AssocResponse, Authentication, Deauthentication, Disassoc, ProbeRequest,
    ProbeResponse, ReasonCode,
};
use rdot11::rsn::RsnInformation;
use rdot11::{dot11_from_bytes, MacAddr, Pdu, PduKind};

const AP: MacAddr = MacAddr([0x00, 0x1b, 0x2c, 0x3d, 0x4e, 0x5f]);
const STA: MacAddr = MacAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

#[test]
fn assoc_request_round_trip() {
    let mut req = AssocRequest::new(AP, STA);
    req.capabilities_mut().set_ess(true);
    req.set_listen_interval(10);
    req.set_ssid("lab-net").unwrap();
    req.frame_mut()
        .set_supported_rates(&[1.0, 2.0, 5.5, 11.0])
        .unwrap();
    let bytes = req.to_vec();

    let parsed = AssocRequest::parse(&bytes).unwrap();
    assert!(parsed.capabilities().ess());
    assert_eq!(parsed.listen_interval(), 10);
    assert_eq!(parsed.ssid(), "lab-net");
    let rates = parsed
        .frame()
        .search_option(rdot11::options::OptionTag::SUPPORTED_RATES)
        .unwrap();
    // 0.5 Mbps units.
    assert_eq!(rates.value(), &[2, 4, 11, 22]);
    assert_eq!(parsed.to_vec(), bytes);

    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::AssocRequest);
    assert!(node.matches(PduKind::Dot11Mgmt));
}

#[test]
fn assoc_response_round_trip() {
    let mut resp = AssocResponse::new(STA, AP);
    resp.capabilities_mut().set_ess(true);
    resp.set_status_code(0);
    resp.set_aid(0xc001);
    let bytes = resp.to_vec();

    let parsed = AssocResponse::parse(&bytes).unwrap();
    assert_eq!(parsed.status_code(), 0);
    assert_eq!(parsed.aid(), 0xc001);
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::AssocResponse);
}

#[test]
fn probe_request_has_no_fixed_body() {
    let mut probe = ProbeRequest::new(MacAddr::BROADCAST, STA);
    probe.set_ssid("lab-net").unwrap();
    // 24 header bytes plus the 9-byte SSID option.
    assert_eq!(probe.total_size(), 33);

    let bytes = probe.to_vec();
    let parsed = ProbeRequest::parse(&bytes).unwrap();
    assert_eq!(parsed.ssid(), "lab-net");
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::ProbeRequest);
}

#[test]
fn probe_response_mirrors_beacon_body() {
    let mut resp = ProbeResponse::new(STA, AP);
    resp.set_timestamp(1024);
    resp.set_interval(100);
    resp.capabilities_mut().set_privacy(true);
    resp.set_ssid("lab-net").unwrap();
    let bytes = resp.to_vec();

    let parsed = ProbeResponse::parse(&bytes).unwrap();
    assert_eq!(parsed.timestamp(), 1024);
    assert_eq!(parsed.interval(), 100);
    assert!(parsed.capabilities().privacy());
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::ProbeResponse);
}

#[test]
fn authentication_round_trip() {
    let mut auth = Authentication::new(AP, STA);
    auth.set_auth_algorithm(1);
    auth.set_auth_seq_number(2);
    auth.set_status_code(0);
    auth.frame_mut().set_challenge_text(b"challenge").unwrap();
    let bytes = auth.to_vec();

    let parsed = Authentication::parse(&bytes).unwrap();
    assert_eq!(parsed.auth_algorithm(), 1);
    assert_eq!(parsed.auth_seq_number(), 2);
    assert_eq!(parsed.status_code(), 0);
    let challenge = parsed
        .frame()
        .search_option(rdot11::options::OptionTag::CHALLENGE_TEXT)
        .unwrap();
    assert_eq!(challenge.value(), b"challenge");
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::Authentication);
}

#[test]
fn deauth_and_disassoc_carry_reason_codes() {
    let mut deauth = Deauthentication::new(STA, AP);
    deauth.set_reason_code(ReasonCode::INACTIVITY);
    let bytes = deauth.to_vec();
    let parsed = Deauthentication::parse(&bytes).unwrap();
    assert_eq!(parsed.reason_code(), ReasonCode::INACTIVITY);
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::Deauthentication);

    let mut disassoc = Disassoc::new(STA, AP);
    disassoc.set_reason_code(ReasonCode::STA_LEAVING_BSS);
    let bytes = disassoc.to_vec();
    let parsed = Disassoc::parse(&bytes).unwrap();
    assert_eq!(parsed.reason_code(), ReasonCode::STA_LEAVING_BSS);
    assert_eq!(dot11_from_bytes(&bytes).unwrap().kind(), PduKind::Disassoc);

    // Unknown reason codes are preserved, not rejected.
    let mut raw = Deauthentication::new(STA, AP);
    raw.set_reason_code(ReasonCode::from(0x7777));
    let parsed = Deauthentication::parse(&raw.to_vec()).unwrap();
    assert_eq!(parsed.reason_code().raw(), 0x7777);
}

#[test]
fn rsn_option_decodes_from_frame() {
    let mut resp = AssocResponse::new(STA, AP);
    resp.frame_mut()
        .set_rsn_information(&RsnInformation::wpa2_psk())
        .unwrap();
    let bytes = resp.to_vec();

    let parsed = AssocResponse::parse(&bytes).unwrap();
    let rsn = parsed.frame().rsn_information().unwrap().unwrap();
    assert_eq!(rsn, RsnInformation::wpa2_psk());

    // A frame without the option yields None, not an error.
    let plain = AssocResponse::new(STA, AP);
    let parsed = AssocResponse::parse(&plain.to_vec()).unwrap();
    assert_eq!(parsed.frame().rsn_information(), Ok(None));
}

#[test]
fn unknown_mgmt_subtype_falls_back_to_generic() {
    // Subtype 9 (ATIM) has no concrete variant.
    #[rustfmt::skip]
    let bytes: Vec<u8> = vec![
        0x90, 0x00, 0x00, 0x00,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Opaque body bytes.
        0x01, 0x02, 0x03,
    ];
    let node = dot11_from_bytes(&bytes).unwrap();
    assert_eq!(node.kind(), PduKind::Dot11Mgmt);
    assert!(node.matches(PduKind::Dot11));
    // The body survives as a raw child and the frame round-trips.
    assert_eq!(node.inner_pdu().unwrap().kind(), PduKind::RawData);
    assert_eq!(node.to_vec(), bytes);
}
