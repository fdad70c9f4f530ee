//! HTTP Server Task
//!
//! Runs the control page server with the `PanelHttpController`.

use embassy_net::Stack;

use crate::{config, controllers::PanelHttpController, net::http::HttpServer};

const RX_BUFFER_SIZE: usize = 2048;
const TX_BUFFER_SIZE: usize = 4096;

#[embassy_executor::task]
pub async fn http_server_task(stack: Stack<'static>, handler: &'static PanelHttpController) {
    let server = HttpServer::new(handler, config::HTTP.socket_timeout);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];

    esp_println::println!("http_server: listening on port {}", config::HTTP.port);
    server
        .listen_and_serve(stack, config::HTTP.port, &mut rx_buffer, &mut tx_buffer)
        .await
}
