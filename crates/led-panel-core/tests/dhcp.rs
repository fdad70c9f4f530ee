//! DHCP packets for access point clients.

use std::net::Ipv4Addr;

use led_panel_core::dhcp::{DhcpPool, MIN_REPLY_BUFFER, MessageType, build_reply, parse_request};

const MAC: [u8; 6] = [0x02, 0x11, 0x22, 0x33, 0x44, 0x07];
const XID: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];
const COOKIE: [u8; 4] = [99, 130, 83, 99];

fn pool() -> DhcpPool {
    DhcpPool {
        server: Ipv4Addr::new(192, 168, 4, 1),
        prefix_len: 24,
        first_host: 2,
        last_host: 50,
        lease_time_secs: 3600,
    }
}

fn client_packet(message_type: u8) -> Vec<u8> {
    let mut packet = vec![0u8; 240];
    packet[0] = 1;
    packet[1] = 1;
    packet[2] = 6;
    packet[4..8].copy_from_slice(&XID);
    packet[28..34].copy_from_slice(&MAC);
    packet[236..240].copy_from_slice(&COOKIE);
    // Padding before the message type must be skipped
    packet.extend_from_slice(&[0, 0, 61, 7, 1]);
    packet.extend_from_slice(&MAC);
    packet.extend_from_slice(&[53, 1, message_type, 255]);
    packet
}

/// Options of a reply as (code, data) pairs.
fn options(reply: &[u8]) -> Vec<(u8, Vec<u8>)> {
    let mut found = Vec::new();
    let mut i = 240;
    while reply[i] != 255 {
        let len = usize::from(reply[i + 1]);
        found.push((reply[i], reply[i + 2..i + 2 + len].to_vec()));
        i += 2 + len;
    }
    found
}

fn option(reply: &[u8], code: u8) -> Vec<u8> {
    options(reply)
        .into_iter()
        .find_map(|(c, data)| (c == code).then_some(data))
        .unwrap()
}

#[test]
fn parses_discover() {
    let request = parse_request(&client_packet(1)).unwrap();

    assert_eq!(request.message_type, MessageType::Discover);
    assert_eq!(request.xid, XID);
    assert_eq!(request.client_mac, MAC);
}

#[test]
fn rejects_malformed_packets() {
    let packet = client_packet(1);
    assert!(parse_request(&packet[..239]).is_none());

    let mut reply_op = packet.clone();
    reply_op[0] = 2;
    assert!(parse_request(&reply_op).is_none());

    let mut bad_cookie = packet.clone();
    bad_cookie[236] = 0;
    assert!(parse_request(&bad_cookie).is_none());

    let mut no_type = packet;
    no_type.truncate(240);
    no_type.push(255);
    assert!(parse_request(&no_type).is_none());
}

#[test]
fn discover_gets_offer() {
    let pool = pool();
    let request = parse_request(&client_packet(1)).unwrap();
    let reply_type = request.message_type.reply().unwrap();
    let offered = pool.allocate(&request.client_mac);

    let mut buffer = [0u8; 576];
    let len = build_reply(&mut buffer, &pool, &request, offered, reply_type);
    let reply = &buffer[..len];

    assert_eq!(reply_type, MessageType::Offer);
    assert!(len <= MIN_REPLY_BUFFER);
    assert_eq!(reply[0], 2);
    assert_eq!(reply[4..8], XID);
    assert_eq!(reply[16..20], offered.octets());
    assert_eq!(reply[20..24], [192, 168, 4, 1]);
    assert_eq!(reply[28..34], MAC);
    assert_eq!(reply[236..240], COOKIE);
    assert_eq!(reply[len - 1], 255);

    assert_eq!(option(reply, 53), [2]);
    assert_eq!(option(reply, 54), [192, 168, 4, 1]);
    assert_eq!(option(reply, 51), 3600u32.to_be_bytes());
    assert_eq!(option(reply, 1), [255, 255, 255, 0]);
    assert_eq!(option(reply, 3), [192, 168, 4, 1]);
}

#[test]
fn request_gets_ack_for_the_same_address() {
    let pool = pool();
    let discover = parse_request(&client_packet(1)).unwrap();
    let request = parse_request(&client_packet(3)).unwrap();

    assert_eq!(request.message_type.reply(), Some(MessageType::Ack));
    assert_eq!(
        pool.allocate(&request.client_mac),
        pool.allocate(&discover.client_mac)
    );
}

#[test]
fn only_discover_and_request_are_answered() {
    for raw in [2, 4, 5, 6, 7, 8] {
        let request = parse_request(&client_packet(raw)).unwrap();
        assert_eq!(request.message_type.reply(), None, "message type {raw}");
    }
}

#[test]
fn allocations_stay_in_the_pool() {
    let pool = pool();

    for last in 0..=u8::MAX {
        let mut mac = MAC;
        mac[5] = last;
        let [a, b, c, host] = pool.allocate(&mac).octets();
        assert_eq!([a, b, c], [192, 168, 4]);
        assert!((2..=50).contains(&host), "host {host}");
    }
}
