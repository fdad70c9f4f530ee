//! Compile-time device configuration.

use embassy_net::Ipv4Address;
use embassy_time::Duration;

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

pub struct WifiApConfig {
    pub ssid: &'static str,
    pub password: &'static str,
    pub channel: u8,
    pub max_connections: u16,
}

pub struct NetworkConfig {
    pub address: Ipv4Address,
    pub prefix_len: u8,
    /// First and last host octet handed out by the DHCP server
    pub lease_range: (u8, u8),
    pub lease_time_secs: u32,
}

pub struct MdnsConfig {
    pub hostname: &'static str,
    pub ttl_secs: u32,
}

pub struct HttpConfig {
    pub port: u16,
    pub socket_timeout: Duration,
    /// Deadline for receiving a POST body
    pub body_timeout: Duration,
}

pub struct PlaybackConfig {
    /// Bounded wait on the plan queue while idle
    pub queue_poll_timeout: Duration,
}

pub const WIFI_AP: WifiApConfig = WifiApConfig {
    ssid: match option_env!("PANEL_WIFI_SSID") {
        Some(ssid) => ssid,
        None => "esp-wifi",
    },
    password: match option_env!("PANEL_WIFI_PASSWORD") {
        Some(password) => password,
        None => "mypassword",
    },
    channel: 1,
    max_connections: 1,
};

pub const NETWORK: NetworkConfig = NetworkConfig {
    address: Ipv4Address::new(192, 168, 4, 1),
    prefix_len: 24,
    lease_range: (2, 50),
    lease_time_secs: 3600,
};

pub const MDNS: MdnsConfig = MdnsConfig {
    hostname: "esp32",
    ttl_secs: 120,
};

pub const HTTP: HttpConfig = HttpConfig {
    port: 80,
    socket_timeout: Duration::from_secs(30),
    body_timeout: Duration::from_secs(5),
};

pub const PLAYBACK: PlaybackConfig = PlaybackConfig {
    queue_poll_timeout: Duration::from_millis(1000),
};

/// Six pattern outputs in channel order: LED1, LED2, LED3, RED, GREEN, BLUE.
///
/// All lines start low.
#[macro_export]
macro_rules! panel_outputs {
    ($p:expr) => {{
        use esp_hal::gpio::{Level, Output, OutputConfig};
        [
            Output::new($p.GPIO13, Level::Low, OutputConfig::default()),
            Output::new($p.GPIO12, Level::Low, OutputConfig::default()),
            Output::new($p.GPIO14, Level::Low, OutputConfig::default()),
            Output::new($p.GPIO27, Level::Low, OutputConfig::default()),
            Output::new($p.GPIO17, Level::Low, OutputConfig::default()),
            Output::new($p.GPIO16, Level::Low, OutputConfig::default()),
        ]
    }};
}

#[macro_export]
macro_rules! status_led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}
