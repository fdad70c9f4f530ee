//! Playback engine
//!
//! Two-state machine: `Idle` while waiting on the queue, `Playing` while a
//! plan runs. A plan always runs to completion; plans queued meanwhile wait
//! their turn. Outputs keep the levels of the last step once a plan is done.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;

use crate::{
    plan::{CHANNEL_COUNT, PlaybackPlan},
    queue::CommandQueue,
};

/// Six output lines driven together.
pub trait OutputChannels {
    type Error;

    /// Set every channel level, in channel order.
    fn set_levels(&mut self, levels: [bool; CHANNEL_COUNT]) -> Result<(), Self::Error>;
}

impl<P: OutputPin> OutputChannels for [P; CHANNEL_COUNT] {
    type Error = P::Error;

    fn set_levels(&mut self, levels: [bool; CHANNEL_COUNT]) -> Result<(), Self::Error> {
        for (pin, level) in self.iter_mut().zip(levels) {
            pin.set_state(PinState::from(level))?;
        }
        Ok(())
    }
}

/// Channel levels for a given step counter.
///
/// A channel is high when its mask shares a bit with the counter.
pub fn levels_at(step: u32, masks: [u8; CHANNEL_COUNT]) -> [bool; CHANNEL_COUNT] {
    masks.map(|mask| step & u32::from(mask) != 0)
}

/// Engine state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Waiting for the next plan
    Idle,
    /// Executing a plan
    Playing,
}

/// Plays plans on a set of output channels.
pub struct PlaybackEngine<O: OutputChannels, D: DelayNs> {
    outputs: O,
    delay: D,
    state: EngineState,
}

impl<O: OutputChannels, D: DelayNs> PlaybackEngine<O, D> {
    pub fn new(outputs: O, delay: D) -> Self {
        Self {
            outputs,
            delay,
            state: EngineState::Idle,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Consume the engine and hand back its outputs and delay.
    pub fn into_parts(self) -> (O, D) {
        (self.outputs, self.delay)
    }

    /// Run one plan to completion.
    ///
    /// Returns the number of steps executed. An output error aborts the plan
    /// and leaves the engine idle.
    pub async fn play(&mut self, plan: &PlaybackPlan) -> Result<u32, O::Error> {
        let masks = plan.channel_masks();
        let mut steps_remaining = plan.step_count();
        let mut counter: u32 = 0;

        self.state = EngineState::Playing;
        while steps_remaining > 0 {
            if let Err(e) = self.outputs.set_levels(levels_at(counter, masks)) {
                self.state = EngineState::Idle;
                return Err(e);
            }
            self.delay.delay_ms(plan.step_delay_ms()).await;
            counter = counter.wrapping_add(1);
            steps_remaining -= 1;
        }
        self.state = EngineState::Idle;

        Ok(counter)
    }

    /// Wait up to `timeout` for a plan and play it.
    ///
    /// Returns `None` when nothing arrived in time.
    pub async fn poll_once<M: RawMutex>(
        &mut self,
        queue: &CommandQueue<M>,
        timeout: Duration,
    ) -> Result<Option<u32>, O::Error> {
        let Some(plan) = queue.receive_wait(timeout).await else {
            return Ok(None);
        };
        self.play(&plan).await.map(Some)
    }

    /// Serve the queue forever.
    ///
    /// Only returns when an output fails.
    pub async fn run<M: RawMutex>(
        &mut self,
        queue: &CommandQueue<M>,
        poll_timeout: Duration,
    ) -> Result<Infallible, O::Error> {
        loop {
            self.poll_once(queue, poll_timeout).await?;
        }
    }
}
