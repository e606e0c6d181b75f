//! Cancellable frame loops.
//!
//! A loop is a step function re-queued on the host's frame scheduler after
//! every call. It ends when the step breaks, when its [`LoopHandle`] is
//! cancelled, or when the handle is dropped. A callback that was already queued
//! when the loop ended still fires, but does nothing and does not re-queue.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

/// Callback run on the next frame with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host facility that runs a callback once, on the next frame.
pub trait FrameScheduler {
	/// Queues `callback` for the next frame. Each request fires at most once.
	fn request_frame(&self, callback: FrameCallback);
}

/// Owner of a running loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct LoopHandle {
	active: Rc<Cell<bool>>,
}

impl LoopHandle {
	pub fn cancel(&self) {
		self.active.set(false);
	}

	/// Still rescheduling: neither cancelled nor finished.
	pub fn is_active(&self) -> bool {
		self.active.get()
	}
}

impl Drop for LoopHandle {
	fn drop(&mut self) {
		self.cancel();
	}
}

struct LoopTask {
	scheduler: Rc<dyn FrameScheduler>,
	active: Rc<Cell<bool>>,
	step: Box<dyn FnMut(f64) -> ControlFlow<()>>,
}

impl LoopTask {
	fn schedule(self) {
		let scheduler = self.scheduler.clone();
		scheduler.request_frame(Box::new(move |now| self.run(now)));
	}

	fn run(mut self, now: f64) {
		if !self.active.get() {
			return;
		}
		match (self.step)(now) {
			ControlFlow::Continue(()) if self.active.get() => self.schedule(),
			ControlFlow::Continue(()) => {}
			ControlFlow::Break(()) => self.active.set(false),
		}
	}
}

/// Runs `step` once per frame until it returns [`ControlFlow::Break`] or the
/// returned handle is cancelled.
pub fn spawn_loop(
	scheduler: Rc<dyn FrameScheduler>,
	step: impl FnMut(f64) -> ControlFlow<()> + 'static,
) -> LoopHandle {
	let active = Rc::new(Cell::new(true));
	LoopTask {
		scheduler,
		active: active.clone(),
		step: Box::new(step),
	}
	.schedule();
	LoopHandle { active }
}

/// Scheduler driven by hand, for headless hosts and tests.
#[derive(Default)]
pub struct ManualScheduler {
	queue: RefCell<Vec<FrameCallback>>,
	now: Cell<f64>,
}

impl ManualScheduler {
	pub fn new() -> Rc<Self> {
		Rc::new(Self::default())
	}

	/// Callbacks waiting for the next frame.
	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Timestamp of the last frame run.
	pub fn now(&self) -> f64 {
		self.now.get()
	}

	/// Advances the clock by `dt` ms and fires everything queued before this
	/// call. Returns how many callbacks fired.
	pub fn run_frame(&self, dt: f64) -> usize {
		let now = self.now.get() + dt;
		self.now.set(now);
		let due = self.queue.take();
		let fired = due.len();
		for callback in due {
			callback(now);
		}
		fired
	}

	/// Runs `count` frames of `dt` ms each.
	pub fn run_frames(&self, count: usize, dt: f64) {
		for _ in 0..count {
			self.run_frame(dt);
		}
	}
}

impl FrameScheduler for ManualScheduler {
	fn request_frame(&self, callback: FrameCallback) {
		self.queue.borrow_mut().push(callback);
	}
}

impl std::fmt::Debug for ManualScheduler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ManualScheduler")
			.field("pending", &self.pending())
			.field("now", &self.now.get())
			.finish()
	}
}
