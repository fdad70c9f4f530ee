//! Pattern presets
//!
//! Maps the mode and speed picked on the control page to a concrete
//! [`PlaybackPlan`]. Every input maps to a defined plan: an unknown mode yields
//! a no-op plan and an unknown speed falls back to the slow delay.

/// Number of output channels driven by a plan.
///
/// Channel order: LED1, LED2, LED3, RED, GREEN, BLUE.
pub const CHANNEL_COUNT: usize = 6;

/// Pattern presets selectable from the control page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// LED1..LED3 and RED count up in binary, BLUE follows RED.
    BinaryCount,
    /// LED1, LED3 and RED blink together.
    Blink,
    /// Like [`Mode::BinaryCount`] with LED1..LED3 reversed, GREEN follows RED.
    ReverseCount,
    /// Everything except RED blinks together.
    BlinkAll,
}

impl Mode {
    /// Resolve the numeric mode sent by the form (1-4).
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Mode::BinaryCount),
            2 => Some(Mode::Blink),
            3 => Some(Mode::ReverseCount),
            4 => Some(Mode::BlinkAll),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u8 {
        match self {
            Mode::BinaryCount => 1,
            Mode::Blink => 2,
            Mode::ReverseCount => 3,
            Mode::BlinkAll => 4,
        }
    }

    /// Channel masks for this preset.
    pub const fn channel_masks(self) -> [u8; CHANNEL_COUNT] {
        match self {
            Mode::BinaryCount => [1, 2, 4, 8, 0, 8],
            Mode::Blink => [1, 0, 1, 1, 0, 0],
            Mode::ReverseCount => [4, 2, 1, 8, 8, 0],
            Mode::BlinkAll => [1, 1, 1, 0, 1, 1],
        }
    }

    /// Number of steps one run of this preset lasts.
    pub const fn step_count(self) -> u32 {
        match self {
            Mode::BinaryCount | Mode::ReverseCount => 17,
            Mode::Blink | Mode::BlinkAll => 21,
        }
    }
}

/// Playback speed presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Medium,
    Fast,
}

impl Speed {
    /// Delay used when the requested speed is unknown.
    pub const DEFAULT_DELAY_MS: u32 = 1000;

    /// Resolve the numeric speed sent by the form (1-3).
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            1 => Some(Speed::Slow),
            2 => Some(Speed::Medium),
            3 => Some(Speed::Fast),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> u8 {
        match self {
            Speed::Slow => 1,
            Speed::Medium => 2,
            Speed::Fast => 3,
        }
    }

    /// Delay between two steps, in milliseconds.
    pub const fn step_delay_ms(self) -> u32 {
        match self {
            Speed::Slow => 1000,
            Speed::Medium => 500,
            Speed::Fast => 100,
        }
    }
}

/// Complete description of one playback sequence.
///
/// A plan is a plain value: it is copied into the queue and copied out by the
/// player, which keeps its own step counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPlan {
    channel_masks: [u8; CHANNEL_COUNT],
    step_delay_ms: u32,
    step_count: u32,
}

impl PlaybackPlan {
    /// Plan that sets nothing and finishes immediately.
    pub const NOOP: Self = Self::new([0; CHANNEL_COUNT], Speed::DEFAULT_DELAY_MS, 0);

    pub const fn new(
        channel_masks: [u8; CHANNEL_COUNT],
        step_delay_ms: u32,
        step_count: u32,
    ) -> Self {
        Self {
            channel_masks,
            step_delay_ms,
            step_count,
        }
    }

    /// Build a plan from resolved presets.
    ///
    /// A missing mode zeroes the masks and the step count, a missing speed
    /// uses [`Speed::DEFAULT_DELAY_MS`].
    pub const fn from_presets(mode: Option<Mode>, speed: Option<Speed>) -> Self {
        let (channel_masks, step_count) = match mode {
            Some(mode) => (mode.channel_masks(), mode.step_count()),
            None => ([0; CHANNEL_COUNT], 0),
        };
        let step_delay_ms = match speed {
            Some(speed) => speed.step_delay_ms(),
            None => Speed::DEFAULT_DELAY_MS,
        };

        Self::new(channel_masks, step_delay_ms, step_count)
    }

    pub const fn channel_masks(&self) -> [u8; CHANNEL_COUNT] {
        self.channel_masks
    }

    pub const fn step_delay_ms(&self) -> u32 {
        self.step_delay_ms
    }

    pub const fn step_count(&self) -> u32 {
        self.step_count
    }

    /// Whether playing this plan touches no output at all.
    pub const fn is_noop(&self) -> bool {
        self.step_count == 0
    }

    /// Total playback time, in milliseconds.
    #[allow(clippy::cast_lossless)]
    pub const fn duration_ms(&self) -> u64 {
        self.step_delay_ms as u64 * self.step_count as u64
    }
}

impl Default for PlaybackPlan {
    fn default() -> Self {
        Self::NOOP
    }
}

/// Build the plan for a raw (mode, speed) selection.
pub const fn build_plan(mode: u8, speed: u8) -> PlaybackPlan {
    PlaybackPlan::from_presets(Mode::from_raw(mode), Speed::from_raw(speed))
}
