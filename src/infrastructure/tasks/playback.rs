//! Playback Task
//!
//! Plays queued plans on the panel outputs for the lifetime of the firmware.

use core::fmt::Debug;

use embassy_time::Delay;
use esp_println::println;
use led_panel_core::{OutputChannels, PlanQueue, PlaybackEngine};

use crate::{config, infrastructure::drivers::PanelOutputs};

#[embassy_executor::task]
pub async fn playback_task(outputs: PanelOutputs, queue: &'static PlanQueue) {
    println!("playback: ready");
    serve(outputs, queue).await
}

/// Run the engine until an output fails, then abort.
///
/// A failing output is a driver or hardware fault; the panic handler resets
/// the chip.
async fn serve<O>(outputs: O, queue: &'static PlanQueue) -> !
where
    O: OutputChannels,
    O::Error: Debug,
{
    let mut engine = PlaybackEngine::new(outputs, Delay);
    match engine.run(queue, config::PLAYBACK.queue_poll_timeout).await {
        Ok(never) => match never {},
        Err(e) => panic!("playback: output failure: {:?}", e),
    }
}
