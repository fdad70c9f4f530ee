//! Wi-Fi access point bring-up
//!
//! Starts the radio in AP mode and an `embassy-net` stack with a static
//! address. Clients get their address from the DHCP server task.

use embassy_executor::Spawner;
use embassy_net::{Ipv4Cidr, Runner, Stack, StackResources, StaticConfigV4};
use embassy_time::{Duration, Timer};
use esp_hal::{peripherals::WIFI, rng::Rng};
use esp_println::println;
use esp_radio::wifi::{
    AccessPointConfig,
    AuthMethod,
    Config,
    ModeConfig,
    WifiController,
    WifiDevice,
};
use static_cell::make_static;

use crate::config::{NetworkConfig, WifiApConfig};

/// HTTP, DHCP and mDNS sockets plus headroom
const MAX_SOCKETS: usize = 4;

/// Start the access point and return the network stack once the link is up.
pub async fn start_wifi_ap(
    spawner: Spawner,
    wifi_device: WIFI<'static>,
    ap: &'static WifiApConfig,
    network: &NetworkConfig,
) -> Stack<'static> {
    let radio = &*make_static!(esp_radio::init().expect("Failed to init radio"));
    let (controller, interfaces) = esp_radio::wifi::new(radio, wifi_device, Config::default())
        .expect("Failed to create Wi-Fi controller");

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(network.address, network.prefix_len),
        gateway: Some(network.address),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let resources = make_static!(StackResources::<MAX_SOCKETS>::new());
    let (stack, runner) = embassy_net::new(interfaces.ap, net_config, resources, random_seed());

    spawner
        .spawn(wifi_ap_task(controller, ap))
        .expect("Failed to spawn Wi-Fi AP task");
    spawner
        .spawn(network_runner_task(runner))
        .expect("Failed to spawn network runner task");

    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(100)).await;
    }
    println!("wifi_ap: link up, address {}", network.address);

    stack
}

fn random_seed() -> u64 {
    let rng = Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}

/// Configures the controller in AP mode and keeps it running.
#[embassy_executor::task]
async fn wifi_ap_task(mut controller: WifiController<'static>, ap: &'static WifiApConfig) {
    println!(
        "wifi_ap: starting AP '{}' on channel {}",
        ap.ssid, ap.channel
    );

    let ap_config = AccessPointConfig::default()
        .with_ssid(ap.ssid.into())
        .with_password(ap.password.into())
        .with_channel(ap.channel)
        .with_max_connections(ap.max_connections)
        .with_auth_method(AuthMethod::Wpa2Personal);

    controller
        .set_config(&ModeConfig::AccessPoint(ap_config))
        .expect("Failed to configure AP");
    controller.start_async().await.expect("Failed to start AP");

    println!("wifi_ap: AP started");

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

#[embassy_executor::task]
async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
