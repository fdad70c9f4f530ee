//! Minimal DHCP server protocol
//!
//! Parses BOOTREQUEST packets and builds OFFER/ACK replies for a single
//! subnet. Leases are stateless: the offered address is derived from the
//! client MAC, so a client always gets the same address back.

use core::net::Ipv4Addr;

/// Message types carried in option 53
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Discover,
    Offer,
    Request,
    Ack,
    Other(u8),
}

impl MessageType {
    const fn from_raw(value: u8) -> Self {
        match value {
            1 => MessageType::Discover,
            2 => MessageType::Offer,
            3 => MessageType::Request,
            5 => MessageType::Ack,
            other => MessageType::Other(other),
        }
    }

    const fn as_raw(self) -> u8 {
        match self {
            MessageType::Discover => 1,
            MessageType::Offer => 2,
            MessageType::Request => 3,
            MessageType::Ack => 5,
            MessageType::Other(other) => other,
        }
    }

    /// Reply expected for this request type, if any.
    pub const fn reply(self) -> Option<Self> {
        match self {
            MessageType::Discover => Some(MessageType::Offer),
            MessageType::Request => Some(MessageType::Ack),
            _ => None,
        }
    }
}

const OP_BOOTREQUEST: u8 = 1;
const OP_BOOTREPLY: u8 = 2;
const HTYPE_ETHERNET: u8 = 1;
const FLAG_BROADCAST: [u8; 2] = [0x80, 0x00];

const OPTION_PAD: u8 = 0;
const OPTION_SUBNET_MASK: u8 = 1;
const OPTION_ROUTER: u8 = 3;
const OPTION_DNS: u8 = 6;
const OPTION_LEASE_TIME: u8 = 51;
const OPTION_MESSAGE_TYPE: u8 = 53;
const OPTION_SERVER_ID: u8 = 54;
const OPTION_END: u8 = 255;

const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];
const OPTIONS_OFFSET: usize = 240;

/// Smallest buffer a reply fits in.
pub const MIN_REPLY_BUFFER: usize = OPTIONS_OFFSET + 64;

/// Parsed DHCP request
#[derive(Debug)]
pub struct DhcpRequest {
    pub xid: [u8; 4],
    pub client_mac: [u8; 6],
    pub message_type: MessageType,
}

/// Address plan of the served subnet.
#[derive(Debug, Clone, Copy)]
pub struct DhcpPool {
    pub server: Ipv4Addr,
    pub prefix_len: u8,
    pub first_host: u8,
    pub last_host: u8,
    pub lease_time_secs: u32,
}

impl DhcpPool {
    /// Derive the address offered to a client from its MAC.
    pub fn allocate(&self, mac: &[u8; 6]) -> Ipv4Addr {
        let span = self.last_host.saturating_sub(self.first_host).saturating_add(1);
        let host = self.first_host + mac[5] % span;
        let [a, b, c, _] = self.server.octets();
        Ipv4Addr::new(a, b, c, host)
    }

    fn subnet_mask(&self) -> Ipv4Addr {
        let bits = u32::MAX.checked_shl(32 - u32::from(self.prefix_len)).unwrap_or(0);
        Ipv4Addr::from(bits)
    }
}

/// Parse a DHCP request from a raw packet
///
/// Returns `None` for anything that is not a well formed BOOTREQUEST.
pub fn parse_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < OPTIONS_OFFSET || packet[0] != OP_BOOTREQUEST {
        return None;
    }
    if packet[236..OPTIONS_OFFSET] != MAGIC_COOKIE {
        return None;
    }

    let message_type = find_option(&packet[OPTIONS_OFFSET..], OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())
        .map(MessageType::from_raw)?;

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);
    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Write an OFFER or ACK for `request` into `buffer`.
///
/// The server advertises itself as router and DNS server. Returns the reply
/// length; `buffer` must hold at least [`MIN_REPLY_BUFFER`] bytes.
pub fn build_reply(
    buffer: &mut [u8],
    pool: &DhcpPool,
    request: &DhcpRequest,
    offered: Ipv4Addr,
    reply_type: MessageType,
) -> usize {
    buffer.fill(0);

    buffer[0] = OP_BOOTREPLY;
    buffer[1] = HTYPE_ETHERNET;
    buffer[2] = 6;
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&FLAG_BROADCAST);
    buffer[16..20].copy_from_slice(&offered.octets());
    buffer[20..24].copy_from_slice(&pool.server.octets());
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..OPTIONS_OFFSET].copy_from_slice(&MAGIC_COOKIE);

    let server = pool.server.octets();
    let mut options = OptionWriter::new(&mut buffer[OPTIONS_OFFSET..]);
    options.put(OPTION_MESSAGE_TYPE, &[reply_type.as_raw()]);
    options.put(OPTION_SERVER_ID, &server);
    options.put(OPTION_LEASE_TIME, &pool.lease_time_secs.to_be_bytes());
    options.put(OPTION_SUBNET_MASK, &pool.subnet_mask().octets());
    options.put(OPTION_ROUTER, &server);
    options.put(OPTION_DNS, &server);
    let written = options.finish();

    OPTIONS_OFFSET + written
}

struct OptionWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OptionWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn put(&mut self, code: u8, data: &[u8]) {
        let end = self.pos + 2 + data.len();
        self.buf[self.pos] = code;
        self.buf[self.pos + 1] = data.len() as u8;
        self.buf[self.pos + 2..end].copy_from_slice(data);
        self.pos = end;
    }

    fn finish(self) -> usize {
        self.buf[self.pos] = OPTION_END;
        self.pos + 1
    }
}

/// Find an option in the options section (after the magic cookie).
fn find_option(options: &[u8], code: u8) -> Option<&[u8]> {
    let mut i = 0;
    while i < options.len() {
        match options[i] {
            OPTION_END => break,
            OPTION_PAD => {
                i += 1;
                continue;
            }
            _ => {}
        }
        let len = usize::from(*options.get(i + 1)?);
        let data = options.get(i + 2..i + 2 + len)?;
        if options[i] == code {
            return Some(data);
        }
        i += 2 + len;
    }
    None
}
