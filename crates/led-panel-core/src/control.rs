//! Control page request handling
//!
//! Decides what to answer for the two operations on `/`, independent of the
//! HTTP transport. The transport reads the request, calls into
//! [`ControlPanel`] and writes the returned [`Reply`].

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::{form::Selection, plan::PlaybackPlan, queue::CommandQueue};

/// HTTP status codes used by the control page.
pub mod status {
    pub const OK: u16 = 200;
    pub const REQUEST_TIMEOUT: u16 = 408;
    pub const INTERNAL_ERROR: u16 = 500;
}

/// Failure while receiving a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    /// The client did not send the body in time
    Timeout,
    /// Any other receive failure
    Other,
}

/// Response to write back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<'a> {
    pub status: u16,
    pub body: &'a [u8],
}

/// Outcome of a submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission<'a> {
    pub selection: Selection,
    pub plan: PlaybackPlan,
    /// Whether the plan made it into the queue
    pub enqueued: bool,
    pub reply: Reply<'a>,
}

/// Control page bound to the playback queue.
pub struct ControlPanel<'a, M: RawMutex> {
    queue: &'a CommandQueue<M>,
    page: &'a [u8],
}

impl<'a, M: RawMutex> ControlPanel<'a, M> {
    pub const fn new(queue: &'a CommandQueue<M>, page: &'a [u8]) -> Self {
        Self { queue, page }
    }

    /// `GET /`: the control page, no side effects.
    pub fn page(&self) -> Reply<'a> {
        Reply {
            status: status::OK,
            body: self.page,
        }
    }

    /// `POST /` with a received body.
    ///
    /// The page is returned whether or not the plan was queued; a full queue
    /// drops the plan and is only visible in [`Submission::enqueued`].
    pub fn submit(&self, body: &[u8]) -> Submission<'a> {
        let selection = Selection::from_form(body);
        let plan = selection.plan();
        let enqueued = self.queue.try_send(plan);

        Submission {
            selection,
            plan,
            enqueued,
            reply: self.page(),
        }
    }

    /// `POST /` whose body could not be received. Nothing is queued.
    pub fn receive_failed(&self, error: BodyError) -> Reply<'a> {
        let status = match error {
            BodyError::Timeout => status::REQUEST_TIMEOUT,
            BodyError::Other => status::INTERNAL_ERROR,
        };
        Reply { status, body: &[] }
    }
}
