mod dhcp_server;
mod http_server;
mod mdns;
mod playback;

pub use dhcp_server::dhcp_server_task;
pub use http_server::http_server_task;
pub use mdns::mdns_responder_task;
pub use playback::playback_task;
