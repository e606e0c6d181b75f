//! `requestAnimationFrame` as a [`FrameScheduler`].

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::schedule::{FrameCallback, FrameScheduler};

/// Browser frame scheduler. Each request registers a one-shot closure that
/// frees itself after running.
pub struct AnimationFrames {
	window: Window,
}

impl AnimationFrames {
	pub fn new() -> Option<Self> {
		web_sys::window().map(|window| Self { window })
	}
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&self, callback: FrameCallback) {
		let closure = Closure::once_into_js(move |now: f64| callback(now));
		if let Err(err) = self.window.request_animation_frame(closure.unchecked_ref()) {
			warn!("friend-graph: requestAnimationFrame failed: {err:?}");
		}
	}
}
