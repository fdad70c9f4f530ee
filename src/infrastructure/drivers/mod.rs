mod outputs;
pub mod wifi_ap;

pub use outputs::PanelOutputs;
pub use wifi_ap::start_wifi_ap;
