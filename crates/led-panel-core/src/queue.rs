//! Hand-off queue between the control page and the player.

use embassy_sync::{
    blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex},
    channel::Channel,
};
use embassy_time::{Duration, with_timeout};

use crate::plan::PlaybackPlan;

/// Number of plans that can wait for the player.
pub const QUEUE_CAPACITY: usize = 20;

/// Queue shared between the HTTP task and the playback task.
pub type PlanQueue = CommandQueue<CriticalSectionRawMutex>;

/// Bounded FIFO of playback plans.
///
/// Producers never wait: a plan sent to a full queue is dropped. The single
/// consumer waits for the next plan with a deadline.
pub struct CommandQueue<M: RawMutex> {
    channel: Channel<M, PlaybackPlan, QUEUE_CAPACITY>,
}

impl<M: RawMutex> CommandQueue<M> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue a plan without waiting.
    ///
    /// Returns `false` and drops the plan when the queue is full.
    pub fn try_send(&self, plan: PlaybackPlan) -> bool {
        self.channel.try_send(plan).is_ok()
    }

    /// Wait up to `timeout` for the oldest queued plan.
    pub async fn receive_wait(&self, timeout: Duration) -> Option<PlaybackPlan> {
        with_timeout(timeout, self.channel.receive()).await.ok()
    }

    /// Take the oldest queued plan if there is one.
    pub fn try_receive(&self) -> Option<PlaybackPlan> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub const fn capacity(&self) -> usize {
        QUEUE_CAPACITY
    }
}

impl<M: RawMutex> Default for CommandQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}
