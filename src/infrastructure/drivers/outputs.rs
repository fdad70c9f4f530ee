use esp_hal::gpio::Output;
use led_panel_core::CHANNEL_COUNT;

/// GPIO lines driven by the player, in channel order.
///
/// Build with [`crate::panel_outputs!`]. Each line is a push-pull output whose
/// `embedded-hal` implementation cannot fail.
pub type PanelOutputs = [Output<'static>; CHANNEL_COUNT];
