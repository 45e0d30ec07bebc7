//! Platform abstraction layer
//!
//! Handles browser/native differences for frame scheduling:
//! - `scheduler`: one-frame-at-a-time loop with clean cancellation
//! - `web`: requestAnimationFrame-backed requester (wasm32 only)
//! - `ManualFrames`: requester for headless hosts and tests

pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scheduler::{FrameControl, FrameRequester, FrameScheduler, ManualFrames};
