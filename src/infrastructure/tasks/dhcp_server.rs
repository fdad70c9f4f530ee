//! DHCP Server Task
//!
//! Hands out addresses to access point clients.

use embassy_net::{
    Ipv4Address,
    Stack,
    udp::{PacketMetadata, UdpSocket},
};
use esp_println::println;

use led_panel_core::dhcp::{DhcpPool, MIN_REPLY_BUFFER, build_reply, parse_request};

use crate::config;

const DHCP_SERVER_PORT: u16 = 67;
const DHCP_CLIENT_PORT: u16 = 68;
const PACKET_SIZE: usize = 576;

const _: () = assert!(PACKET_SIZE >= MIN_REPLY_BUFFER);

#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>) {
    let network = &config::NETWORK;
    let pool = DhcpPool {
        server: network.address,
        prefix_len: network.prefix_len,
        first_host: network.lease_range.0,
        last_host: network.lease_range.1,
        lease_time_secs: network.lease_time_secs,
    };

    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];
    let mut socket = UdpSocket::new(
        stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );

    if let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        println!("dhcp_server: failed to bind port {}: {:?}", DHCP_SERVER_PORT, e);
        return;
    }
    println!("dhcp_server: listening on port {}", DHCP_SERVER_PORT);

    let mut packet = [0u8; PACKET_SIZE];
    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => len,
            Err(e) => {
                println!("dhcp_server: recv error: {:?}", e);
                continue;
            }
        };

        let Some(request) = parse_request(&packet[..len]) else {
            continue;
        };
        let Some(reply_type) = request.message_type.reply() else {
            #[cfg(feature = "log")]
            println!("dhcp_server: ignoring {:?}", request.message_type);
            continue;
        };

        let offered = pool.allocate(&request.client_mac);
        let reply_len = build_reply(&mut packet, &pool, &request, offered, reply_type);

        #[cfg(feature = "log")]
        println!("dhcp_server: {:?} -> {}", reply_type, offered);

        let dest = (Ipv4Address::BROADCAST, DHCP_CLIENT_PORT);
        if let Err(e) = socket.send_to(&packet[..reply_len], dest).await {
            println!("dhcp_server: send error: {:?}", e);
        }
    }
}
