//! requestAnimationFrame-backed frame requester

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::scheduler::FrameRequester;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Delivers frames through `window.requestAnimationFrame`.
///
/// The callback is installed once with `set_callback` and reused for every
/// request, so no closure is leaked per frame.
#[derive(Clone, Default)]
pub struct AnimationFrames {
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the function the browser calls on each requested frame
    pub fn set_callback(&self, callback: impl FnMut(f64) + 'static) {
        *self.callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(callback));
    }
}

impl FrameRequester for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let window = web_sys::window()?;
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}
