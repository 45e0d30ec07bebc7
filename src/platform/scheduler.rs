//! Frame scheduling
//!
//! The host calls back once per display refresh. A `FrameScheduler` keeps at
//! most one request outstanding: the next frame is only requested after the
//! current callback returns, so ticks never overlap. Stopping cancels the
//! pending request, and a stray callback after that is ignored.

/// Whether the loop should keep running after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Host hook that delivers one callback on the next refresh
pub trait FrameRequester {
    /// Opaque id of a pending request
    type Handle: Copy;

    /// Ask for one more frame. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct FrameScheduler<R: FrameRequester> {
    requester: R,
    pending: Option<R::Handle>,
    running: bool,
    frames: u64,
}

impl<R: FrameRequester> FrameScheduler<R> {
    pub fn new(requester: R) -> Self {
        Self {
            requester,
            pending: None,
            running: false,
            frames: 0,
        }
    }

    /// Begin requesting frames (no-op if already running)
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.request_next();
    }

    /// Stop the loop and cancel any outstanding request
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.requester.cancel_frame(handle);
        }
    }

    /// Handle a host callback: run `frame` once, then request the next
    /// frame if it asked to continue. Callbacks after `stop` do nothing.
    pub fn on_frame(&mut self, frame: impl FnOnce() -> FrameControl) -> FrameControl {
        self.pending = None;
        if !self.running {
            return FrameControl::Stop;
        }

        self.frames += 1;
        match frame() {
            FrameControl::Continue => {
                self.request_next();
                if self.running {
                    FrameControl::Continue
                } else {
                    FrameControl::Stop
                }
            }
            FrameControl::Stop => {
                log::debug!("Frame loop stopped after {} frames", self.frames);
                self.running = false;
                FrameControl::Stop
            }
        }
    }

    fn request_next(&mut self) {
        match self.requester.request_frame() {
            Some(handle) => self.pending = Some(handle),
            None => {
                log::warn!("Host refused a frame request; stopping loop");
                self.running = false;
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames run since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }
}

impl<R: FrameRequester> Drop for FrameScheduler<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Requester for hosts that pump frames themselves (native loop, tests)
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: u32,
    outstanding: Option<u32>,
    cancelled: u32,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request id awaiting delivery, if any
    pub fn outstanding(&self) -> Option<u32> {
        self.outstanding
    }

    /// Number of requests cancelled before delivery
    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl FrameRequester for ManualFrames {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        self.next_id += 1;
        self.outstanding = Some(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
            self.cancelled += 1;
        }
    }
}
