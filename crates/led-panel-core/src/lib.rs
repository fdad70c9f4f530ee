#![no_std]

//! LED panel core
//!
//! Hardware-independent half of the LED panel firmware:
//! - `plan` - preset table turning a (mode, speed) selection into a [`PlaybackPlan`]
//! - `form` - decoder for the control page form body
//! - `queue` - bounded hand-off queue between the HTTP side and the player
//! - `engine` - playback state machine driving six output channels
//! - `control` - request handling for the control page, independent of the transport
//! - `http` - request head collection and parsing for the control page server
//! - `dhcp` - DHCP packet codec for clients of the access point
//!
//! The engine is generic over [`OutputChannels`] and an async delay, so it can
//! run against GPIO pins on the device and against recorders in tests.

pub mod control;
pub mod dhcp;
pub mod engine;
pub mod form;
pub mod http;
pub mod plan;
pub mod queue;

pub use control::{BodyError, ControlPanel, Reply, Submission};
pub use engine::{EngineState, OutputChannels, PlaybackEngine, levels_at};
pub use form::{MAX_FORM_BODY, Selection};
pub use http::{HeadReader, HttpMethod, MAX_HEAD_LEN, RequestHead, body_read_len};
pub use plan::{CHANNEL_COUNT, Mode, PlaybackPlan, Speed, build_plan};
pub use queue::{CommandQueue, PlanQueue, QUEUE_CAPACITY};
