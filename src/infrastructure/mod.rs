//! Hardware-backed parts of the firmware: drivers and background tasks.

pub mod drivers;
pub mod tasks;
