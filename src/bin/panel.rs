//! LED Panel Firmware
//!
//! - Starts a Wi-Fi access point with a DHCP server for clients
//! - Advertises `esp32.local` over mDNS
//! - Serves the control page on http://192.168.4.1
//! - Plays the selected pattern on six GPIO outputs

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Level, Output, OutputConfig},
    timer::timg::TimerGroup,
};
use esp_println::println;
use led_panel_core::PlanQueue;

use esp_led_panel::{
    config::{self, BUILD_VERSION},
    controllers::PanelHttpController,
    infrastructure::{
        drivers::{PanelOutputs, start_wifi_ap},
        tasks::{dhcp_server_task, http_server_task, mdns_responder_task, playback_task},
    },
    mk_static,
    panel_outputs,
    status_led_gpio,
};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  LED Panel Firmware {}", BUILD_VERSION);
    println!("=================================");

    // Initialize hardware
    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    // Heap for the radio driver (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start RTOS
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Outputs first, so every line is low before anything else runs
    let outputs: PanelOutputs = panel_outputs!(peripherals);
    let mut status_led =
        Output::new(status_led_gpio!(peripherals), Level::Low, OutputConfig::default());

    // Single hand-off queue shared by the HTTP controller and the player
    let queue: &'static PlanQueue = mk_static!(PlanQueue, PlanQueue::new());

    let stack = start_wifi_ap(spawner, peripherals.WIFI, &config::WIFI_AP, &config::NETWORK).await;

    spawner
        .spawn(dhcp_server_task(stack))
        .expect("Failed to spawn DHCP server task");
    spawner
        .spawn(mdns_responder_task(stack))
        .expect("Failed to spawn mDNS responder task");

    let controller: &'static PanelHttpController =
        mk_static!(PanelHttpController, PanelHttpController::new(queue));
    spawner
        .spawn(http_server_task(stack, controller))
        .expect("Failed to spawn HTTP server task");
    spawner
        .spawn(playback_task(outputs, queue))
        .expect("Failed to spawn playback task");

    println!("Panel ready!");
    println!("Connect to WiFi: {}", config::WIFI_AP.ssid);
    println!(
        "Open http://{} or http://{}.local in browser",
        config::NETWORK.address,
        config::MDNS.hostname
    );
    status_led.set_high();

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
