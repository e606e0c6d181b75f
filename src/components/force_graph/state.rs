//! Pointer interaction on top of a [`GraphSession`].

use crate::graph::Graph;
use crate::layout::Point;
use crate::session::GraphSession;

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// The canvas's session plus whatever the pointer is doing to it.
#[derive(Debug)]
pub struct CanvasState {
	pub session: GraphSession,
	pub drag: DragState,
	/// Pointer distance within which a node counts as hit.
	pub hit_radius: f64,
}

impl CanvasState {
	pub fn new(session: GraphSession, hit_radius: f64) -> Self {
		Self {
			session,
			drag: DragState::default(),
			hit_radius,
		}
	}

	/// Replaces the graph. A drag in progress is abandoned with the old graph.
	pub fn load(&mut self, graph: &Graph) {
		self.drag = DragState::default();
		self.session.load(graph);
	}

	/// Starts dragging the node under `(x, y)`. Returns whether one was hit.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
		let Some(idx) = self.session.node_at(x, y, self.hit_radius) else {
			return false;
		};
		let Some(Point { x: nx, y: ny }) = self.session.simulation().position(idx) else {
			return false;
		};

		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			node_start_x: nx,
			node_start_y: ny,
		};
		self.session.drag_start(idx);
		true
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		if let Some(idx) = self.drag.node_idx {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			self.session
				.drag_to(idx, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
		}
	}

	/// Ends the drag, if any. Also used when the pointer leaves the canvas.
	pub fn pointer_up(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.session.drag_end(idx);
		}
		self.drag.active = false;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;
	use crate::config::Config;
	use crate::layout::LayoutFrame;
	use crate::schedule::ManualScheduler;
	use crate::session::{RenderBinding, Scene};
	use crate::zap::ZapPoint;

	struct Blank;

	impl RenderBinding for Blank {
		fn on_load(&mut self, _: &Scene<'_>) {}
		fn on_tick(&mut self, _: &LayoutFrame<'_>) {}
		fn on_zap_frame(&mut self, _: f64, _: &[ZapPoint]) {}
	}

	fn state() -> (Rc<ManualScheduler>, CanvasState) {
		let scheduler = ManualScheduler::new();
		let session = GraphSession::new(
			scheduler.clone(),
			Rc::new(RefCell::new(Blank)),
			Config::default(),
			Point::new(350.0, 250.0),
		);
		let mut state = CanvasState::new(session, 18.0);
		state.load(&"3 2\n1 2\n2 3".parse().unwrap());
		(scheduler, state)
	}

	#[test]
	fn drag_follows_pointer_delta() {
		let (scheduler, mut state) = state();
		scheduler.run_frames(50, 16.0);
		let p = state.session.simulation().position(1).unwrap();

		// Grab slightly off center; the node must not jump to the pointer.
		assert!(state.pointer_down(p.x + 5.0, p.y + 5.0));
		assert!(state.drag.active);
		state.pointer_move(p.x + 45.0, p.y - 15.0);
		scheduler.run_frame(16.0);
		let moved = state.session.simulation().position(1).unwrap();
		assert!(moved.distance(Point::new(p.x + 40.0, p.y - 20.0)) < 1e-9);

		state.pointer_up();
		assert!(!state.drag.active);
		assert!(!state.session.simulation().nodes()[1].is_pinned());
		assert_eq!(state.session.simulation().alpha_target(), 0.0);
	}

	#[test]
	fn missing_the_nodes_does_nothing() {
		let (_scheduler, mut state) = state();
		assert!(!state.pointer_down(-5_000.0, -5_000.0));
		assert!(!state.drag.active);
		state.pointer_move(0.0, 0.0);
		state.pointer_up();
		assert!(state.session.simulation().nodes().iter().all(|n| !n.is_pinned()));
	}

	#[test]
	fn reload_abandons_the_drag() {
		let (_scheduler, mut state) = state();
		let p = state.session.simulation().position(0).unwrap();
		assert!(state.pointer_down(p.x, p.y));
		state.load(&"2 1\n1 2".parse().unwrap());
		assert!(!state.drag.active);
		state.pointer_move(0.0, 0.0);
		assert!(state.session.simulation().nodes().iter().all(|n| !n.is_pinned()));
	}
}
