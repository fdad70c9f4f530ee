//! mDNS Responder Task
//!
//! Answers A queries for `<hostname>.local` with the access point address.

use core::net::Ipv6Addr;

use edge_mdns::{
    HostAnswersMdnsHandler,
    MdnsHandler as _,
    MdnsRequest,
    MdnsResponse,
    domain::base::Ttl,
    host::Host,
};
use embassy_net::{
    IpEndpoint,
    Ipv4Address,
    Stack,
    udp::{PacketMetadata, UdpSocket},
};
use esp_println::println;

use crate::config;

const MDNS_PORT: u16 = 5353;
const MDNS_IPV4_GROUP: Ipv4Address = Ipv4Address::new(224, 0, 0, 251);
const PACKET_SIZE: usize = 1500;

#[embassy_executor::task]
pub async fn mdns_responder_task(stack: Stack<'static>) {
    if let Err(e) = stack.join_multicast_group(MDNS_IPV4_GROUP) {
        println!("mdns: failed to join multicast group: {:?}", e);
        return;
    }

    let mut rx_meta = [PacketMetadata::EMPTY; 4];
    let mut rx_buffer = [0u8; PACKET_SIZE];
    let mut tx_meta = [PacketMetadata::EMPTY; 4];
    let mut tx_buffer = [0u8; PACKET_SIZE];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    if let Err(e) = socket.bind(MDNS_PORT) {
        println!("mdns: failed to bind port {}: {:?}", MDNS_PORT, e);
        return;
    }

    let host = Host {
        hostname: config::MDNS.hostname,
        ipv4: config::NETWORK.address,
        ipv6: Ipv6Addr::UNSPECIFIED,
        ttl: Ttl::from_secs(config::MDNS.ttl_secs),
    };
    let mut handler = HostAnswersMdnsHandler::new(host);
    println!("mdns: advertising {}.local", config::MDNS.hostname);

    let mut request_buf = [0u8; PACKET_SIZE];
    let mut reply_buf = [0u8; PACKET_SIZE];
    loop {
        let (len, meta) = match socket.recv_from(&mut request_buf).await {
            Ok(received) => received,
            Err(e) => {
                println!("mdns: recv error: {:?}", e);
                continue;
            }
        };

        // Queries from a port other than 5353 are one-shot and get a unicast answer
        let legacy = meta.endpoint.port != MDNS_PORT;
        let request = MdnsRequest::Request {
            legacy,
            multicast: true,
            data: &request_buf[..len],
        };

        let data = match handler.handle(request, &mut reply_buf) {
            Ok(MdnsResponse::Reply { data, .. }) => data,
            Ok(MdnsResponse::None) => continue,
            Err(e) => {
                println!("mdns: bad packet: {:?}", e);
                continue;
            }
        };

        let dest = if legacy {
            meta.endpoint
        } else {
            IpEndpoint::new(MDNS_IPV4_GROUP.into(), MDNS_PORT)
        };
        if let Err(e) = socket.send_to(data, dest).await {
            println!("mdns: send error: {:?}", e);
        }
    }
}
