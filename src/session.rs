//! One loaded graph and the loops that animate it.
//!
//! A [`GraphSession`] owns the layout simulation, the zap animator and the two
//! frame loops driving them. Loading new data tears all of it down first, so a
//! previous graph can never call back into the renderer again.

use std::cell::{Ref, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use log::{debug, info};

use crate::config::Config;
use crate::graph::{Components, Graph, find_components};
use crate::layout::{LayoutFrame, Link, Point, Simulation};
use crate::schedule::{FrameScheduler, LoopHandle, spawn_loop};
use crate::zap::{ZapAnimator, ZapPoint};

/// What a renderer needs to know about a freshly loaded graph.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
	/// Display label per node index.
	pub labels: &'a [String],
	pub components: &'a Components,
}

impl Scene<'_> {
	/// Component index of the node at `index` (graph id − 1).
	pub fn component_at(&self, index: usize) -> usize {
		self.components.membership().get(index).copied().unwrap_or(0)
	}
}

/// Receiver of everything the session produces.
pub trait RenderBinding {
	/// A new graph replaced the previous one.
	fn on_load(&mut self, scene: &Scene<'_>);
	/// The layout finished a tick.
	fn on_tick(&mut self, frame: &LayoutFrame<'_>);
	/// Animation frame at `now` ms, with every zap placed on its edge.
	fn on_zap_frame(&mut self, now: f64, zaps: &[ZapPoint]);
}

/// A loaded graph plus the physics and zap loops animating it.
///
/// The session is idle until [`GraphSession::load`] is called. Each load
/// replaces the layout, the zaps and the component partition, and every
/// result is pushed to the [`RenderBinding`]. Dropping the session cancels
/// both loops.
pub struct GraphSession {
	scheduler: Rc<dyn FrameScheduler>,
	binding: Rc<RefCell<dyn RenderBinding>>,
	config: Config,
	simulation: Rc<RefCell<Simulation>>,
	zaps: Rc<RefCell<ZapAnimator>>,
	components: Components,
	physics: Option<LoopHandle>,
	animation: Option<LoopHandle>,
}

impl std::fmt::Debug for GraphSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GraphSession")
			.field("simulation", &self.simulation.borrow())
			.field("components", &self.components.count())
			.field("physics", &self.is_running())
			.field("animation", &self.is_animating())
			.finish_non_exhaustive()
	}
}

impl GraphSession {
	/// An idle session with no graph. Layout is centered on `center`.
	pub fn new(
		scheduler: Rc<dyn FrameScheduler>,
		binding: Rc<RefCell<dyn RenderBinding>>,
		config: Config,
		center: Point,
	) -> Self {
		let simulation = Simulation::new(0, &[], center, &config.layout);
		Self {
			scheduler,
			binding,
			config,
			simulation: Rc::new(RefCell::new(simulation)),
			zaps: Rc::new(RefCell::new(ZapAnimator::default())),
			components: Components::default(),
			physics: None,
			animation: None,
		}
	}

	/// Replaces whatever is loaded with `graph` and starts animating it.
	///
	/// Pins, velocities and zap progress of the previous graph are discarded.
	pub fn load(&mut self, graph: &Graph) {
		self.stop();

		let center = self.simulation.borrow().center();
		let components = find_components(graph);
		let links: Vec<Link> = graph
			.edges()
			.iter()
			.map(|&(u, v)| Link {
				source: u - 1,
				target: v - 1,
			})
			.collect();

		let mut simulation = Simulation::new(graph.node_count(), &links, center, &self.config.layout);
		let binding = self.binding.clone();
		simulation.on_tick(move |frame| binding.borrow_mut().on_tick(frame));

		self.binding.borrow_mut().on_load(&Scene {
			labels: graph.labels(),
			components: &components,
		});

		info!(
			"friend-graph: loaded {} nodes, {} edges, {} groups",
			graph.node_count(),
			graph.edge_count(),
			components.count()
		);

		self.simulation = Rc::new(RefCell::new(simulation));
		self.zaps = Rc::new(RefCell::new(ZapAnimator::new(links.len(), &self.config.zap)));
		self.components = components;
		self.start_physics();
		self.start_animation();
	}

	/// Cancels both loops. The loaded graph stays in place.
	pub fn stop(&mut self) {
		let (physics, animation) = (self.physics.take(), self.animation.take());
		if physics.is_some() || animation.is_some() {
			debug!("friend-graph: loops stopped");
		}
	}

	fn start_physics(&mut self) {
		let simulation = self.simulation.clone();
		self.physics = Some(spawn_loop(self.scheduler.clone(), move |_| {
			let mut simulation = simulation.borrow_mut();
			simulation.tick();
			if simulation.is_settled() {
				debug!("friend-graph: layout settled after {} ticks", simulation.ticks());
				ControlFlow::Break(())
			} else {
				ControlFlow::Continue(())
			}
		}));
	}

	fn start_animation(&mut self) {
		let (simulation, zaps, binding) = (
			self.simulation.clone(),
			self.zaps.clone(),
			self.binding.clone(),
		);
		self.animation = Some(spawn_loop(self.scheduler.clone(), move |now| {
			let points = {
				let mut zaps = zaps.borrow_mut();
				zaps.advance();
				let simulation = simulation.borrow();
				zaps.locate(|edge| simulation.edge_endpoints(edge))
			};
			binding.borrow_mut().on_zap_frame(now, &points);
			ControlFlow::Continue(())
		}));
	}

	/// Restarts the physics loop if it has stopped.
	fn wake(&mut self) {
		if !self.is_running() {
			debug!("friend-graph: layout woken");
			self.start_physics();
		}
	}

	/// The physics loop is ticking.
	pub fn is_running(&self) -> bool {
		self.physics.as_ref().is_some_and(LoopHandle::is_active)
	}

	/// The zap loop is running.
	pub fn is_animating(&self) -> bool {
		self.animation.as_ref().is_some_and(LoopHandle::is_active)
	}

	/// Node index under `(x, y)`, if any is within `radius`.
	pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		self.simulation.borrow().find_node(x, y, radius)
	}

	/// Pins `node` and reheats the layout, restarting it if it had settled.
	pub fn drag_start(&mut self, node: usize) {
		self.simulation.borrow_mut().drag_start(node);
		self.wake();
	}

	/// Moves the pin of a dragged `node` to `(x, y)`.
	pub fn drag_to(&mut self, node: usize, x: f64, y: f64) {
		self.simulation.borrow_mut().drag_to(node, x, y);
	}

	/// Releases `node` and lets the layout cool down again.
	pub fn drag_end(&mut self, node: usize) {
		self.simulation.borrow_mut().drag_end(node);
	}

	/// Moves the point the centering force pulls toward and reheats the layout
	/// just enough to drift there.
	pub fn set_center(&mut self, center: Point) {
		{
			let mut simulation = self.simulation.borrow_mut();
			simulation.set_center(center);
			let reheat = simulation.alpha().max(simulation.config().alpha_min * 10.0);
			simulation.set_alpha(reheat);
		}
		self.wake();
	}

	/// Friend groups of the loaded graph.
	pub fn components(&self) -> &Components {
		&self.components
	}

	/// Number of separate friend groups in the loaded graph.
	pub fn component_count(&self) -> usize {
		self.components.count()
	}

	pub fn simulation(&self) -> Ref<'_, Simulation> {
		self.simulation.borrow()
	}

	/// Zap particles of the loaded graph.
	pub fn zaps(&self) -> Ref<'_, ZapAnimator> {
		self.zaps.borrow()
	}

	pub fn config(&self) -> &Config {
		&self.config
	}
}
