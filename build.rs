fn main() {
    let version = chrono::Utc::now().format("%Y%m%d.%H%M").to_string();
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rerun-if-env-changed=PANEL_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=PANEL_WIFI_PASSWORD");
}
