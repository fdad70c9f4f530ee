//! Control page HTTP controller
//!
//! Serves the control page on `GET /` and turns `POST /` form submissions
//! into playback plans for the player.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_println::println;
use led_panel_core::{BodyError, ControlPanel, MAX_FORM_BODY, PlanQueue, Reply};

use crate::{
    config,
    net::http::{ContentType, HttpConnection, HttpHandler, HttpMethod, HttpResult},
};

const CONTROL_PAGE_HTML: &[u8] = include_bytes!("../../assets/control_page.html");

pub struct PanelHttpController {
    panel: ControlPanel<'static, CriticalSectionRawMutex>,
}

impl PanelHttpController {
    pub fn new(queue: &'static PlanQueue) -> Self {
        Self {
            panel: ControlPanel::new(queue, CONTROL_PAGE_HTML),
        }
    }

    async fn handle_get_page(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        write_reply(conn, self.panel.page()).await
    }

    async fn handle_submit(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let reply = match conn.read_body(MAX_FORM_BODY, config::HTTP.body_timeout).await {
            Ok(body) => {
                let submission = self.panel.submit(body);
                #[cfg(feature = "log")]
                println!(
                    "http: mode {} speed {} -> {} steps every {} ms",
                    submission.selection.mode,
                    submission.selection.speed,
                    submission.plan.step_count(),
                    submission.plan.step_delay_ms()
                );
                if !submission.enqueued {
                    println!("http: plan queue full, command dropped");
                }
                submission.reply
            }
            Err(e) => {
                println!("http: body receive failed: {:?}", e);
                self.panel.receive_failed(BodyError::from(e))
            }
        };

        write_reply(conn, reply).await
    }
}

impl HttpHandler for PanelHttpController {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        match conn.route() {
            (HttpMethod::Get, "/") => self.handle_get_page(conn).await,
            (HttpMethod::Post, "/") => self.handle_submit(conn).await,
            (_, "/") => {
                conn.respond(405, ContentType::TextPlain, b"Method Not Allowed")
                    .await
            }
            _ => conn.respond(404, ContentType::TextPlain, b"Not Found").await,
        }
    }
}

async fn write_reply(conn: &mut HttpConnection<'_>, reply: Reply<'_>) -> HttpResult {
    conn.respond(reply.status, ContentType::TextHtml, reply.body).await
}
