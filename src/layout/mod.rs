//! Force-directed layout simulation.
//!
//! A velocity-Verlet style integrator cooled by a global `alpha`: every tick
//! moves `alpha` toward `alpha_target`, runs the link, many-body, center and
//! collision forces, then applies damped velocities. Nodes live in one
//! contiguous vector and links refer to them by index, so the renderer reads
//! positions without ever owning a node.
//!
//! The engine does no drawing. Everything a renderer needs arrives through the
//! [`Simulation::on_tick`] callback, once per integration step and only after
//! every node has been updated.

mod forces;
mod quadtree;

use serde::Deserialize;

use forces::{CollideForce, LinkForce, ManyBodyForce, apply_center};

/// 2D point in layout space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Linear interpolation toward `other`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}

	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Per-node simulation state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Pinned x. A pinned node ignores forces but still exerts them.
	pub fx: Option<f64>,
	/// Pinned y.
	pub fy: Option<f64>,
}

impl SimNode {
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// An undirected link between two node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
}

/// Layout tuning knobs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Rest length of every link.
	pub link_distance: f64,
	/// Many-body strength. Negative repels.
	pub charge: f64,
	/// Barnes-Hut opening criterion.
	pub theta: f64,
	/// Distances below this are clamped when computing charge.
	pub distance_min: f64,
	/// Pairs farther apart than this ignore each other's charge.
	pub distance_max: Option<f64>,
	/// Pull of the centroid toward the layout center.
	pub center_strength: f64,
	/// Node radius for overlap resolution. `None` disables collision.
	pub collide_radius: Option<f64>,
	pub collide_strength: f64,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Temperature the simulation is held at while a node is dragged.
	pub drag_alpha_target: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			link_distance: 120.0,
			charge: -300.0,
			theta: 0.9,
			distance_min: 1.0,
			distance_max: None,
			center_strength: 1.0,
			collide_radius: Some(40.0),
			collide_strength: 1.0,
			alpha_min,
			// Reaches alpha_min from 1.0 in ~300 ticks.
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
		}
	}
}

/// Deterministic LCG feeding the jiggle that separates coincident nodes.
#[derive(Clone, Debug)]
pub(crate) struct Lcg(u64);

impl Default for Lcg {
	fn default() -> Self {
		Self(1)
	}
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	pub fn next_f64(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}

	/// A tiny nonzero-on-average offset.
	pub fn jiggle(&mut self) -> f64 {
		(self.next_f64() - 0.5) * 1e-6
	}
}

/// Read-only view handed to the tick callback.
#[derive(Clone, Copy, Debug)]
pub struct LayoutFrame<'a> {
	pub nodes: &'a [SimNode],
	pub links: &'a [Link],
	pub alpha: f64,
	/// Ticks run so far, this one included.
	pub tick: u64,
}

impl LayoutFrame<'_> {
	pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
		self.nodes.iter().map(SimNode::position)
	}

	/// `(source, target)` positions for every link.
	pub fn link_endpoints(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
		self.links
			.iter()
			.map(|link| (self.nodes[link.source].position(), self.nodes[link.target].position()))
	}
}

type TickCallback = Box<dyn FnMut(&LayoutFrame<'_>)>;

/// The running layout for one graph.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<Link>,
	config: LayoutConfig,
	center: Point,
	alpha: f64,
	alpha_target: f64,
	ticks: u64,
	link_force: LinkForce,
	rng: Lcg,
	on_tick: Option<TickCallback>,
}

impl std::fmt::Debug for Simulation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Simulation")
			.field("nodes", &self.nodes.len())
			.field("links", &self.links.len())
			.field("alpha", &self.alpha)
			.field("alpha_target", &self.alpha_target)
			.field("ticks", &self.ticks)
			.finish_non_exhaustive()
	}
}

impl Simulation {
	/// Places `node_count` nodes on a phyllotaxis spiral around `center`.
	///
	/// Links with an endpoint outside `0..node_count` are dropped.
	pub fn new(node_count: usize, links: &[Link], center: Point, config: &LayoutConfig) -> Self {
		let initial_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
		let nodes = (0..node_count)
			.map(|i| {
				let radius = 10.0 * (0.5 + i as f64).sqrt();
				let angle = i as f64 * initial_angle;
				SimNode {
					x: center.x + radius * angle.cos(),
					y: center.y + radius * angle.sin(),
					..SimNode::default()
				}
			})
			.collect();

		let links: Vec<Link> = links
			.iter()
			.copied()
			.filter(|link| link.source < node_count && link.target < node_count)
			.collect();
		let link_force = LinkForce::new(node_count, &links, config.link_distance);

		Self {
			nodes,
			links,
			config: config.clone(),
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			ticks: 0,
			link_force,
			rng: Lcg::default(),
			on_tick: None,
		}
	}

	/// Registers the per-tick callback, replacing any previous one.
	pub fn on_tick(&mut self, callback: impl FnMut(&LayoutFrame<'_>) + 'static) {
		self.on_tick = Some(Box::new(callback));
	}

	/// Runs one integration step, then notifies the tick callback.
	pub fn tick(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
		let alpha = self.alpha;

		self.link_force
			.apply(&mut self.nodes, &self.links, alpha, &mut self.rng);
		ManyBodyForce {
			strength: self.config.charge,
			theta: self.config.theta,
			distance_min: self.config.distance_min,
			distance_max: self.config.distance_max,
		}
		.apply(&mut self.nodes, alpha, &mut self.rng);
		apply_center(&mut self.nodes, self.center, self.config.center_strength);
		if let Some(radius) = self.config.collide_radius {
			CollideForce {
				radius,
				strength: self.config.collide_strength,
			}
			.apply(&mut self.nodes, &mut self.rng);
		}

		let keep = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= keep;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= keep;
					node.y += node.vy;
				}
			}
		}

		self.ticks += 1;
		if let Some(callback) = self.on_tick.as_mut() {
			callback(&LayoutFrame {
				nodes: &self.nodes,
				links: &self.links,
				alpha: self.alpha,
				tick: self.ticks,
			});
		}
	}

	/// Cooled below `alpha_min`; further ticks barely move anything.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.config.alpha_min
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) {
		self.alpha = alpha.clamp(0.0, 1.0);
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target.clamp(0.0, 1.0);
	}

	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	pub fn position(&self, node: usize) -> Option<Point> {
		self.nodes.get(node).map(SimNode::position)
	}

	/// Live `(source, target)` positions of link `edge`.
	pub fn edge_endpoints(&self, edge: usize) -> Option<(Point, Point)> {
		let link = self.links.get(edge)?;
		Some((
			self.nodes[link.source].position(),
			self.nodes[link.target].position(),
		))
	}

	pub fn center(&self) -> Point {
		self.center
	}

	pub fn set_center(&mut self, center: Point) {
		self.center = center;
	}

	/// Nearest node within `radius` of `(x, y)`.
	pub fn find_node(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		let target = Point::new(x, y);
		self.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (i, node.position().distance(target)))
			.filter(|&(_, d)| d < radius)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	/// Fixes `node` at `(x, y)` until [`unpin`](Self::unpin).
	pub fn pin(&mut self, node: usize, x: f64, y: f64) {
		if let Some(n) = self.nodes.get_mut(node) {
			n.fx = Some(x);
			n.fy = Some(y);
			n.x = x;
			n.y = y;
		}
	}

	pub fn unpin(&mut self, node: usize) {
		if let Some(n) = self.nodes.get_mut(node) {
			n.fx = None;
			n.fy = None;
		}
	}

	/// Pins `node` where it is and heats the layout up for dragging.
	pub fn drag_start(&mut self, node: usize) {
		let Some(Point { x, y }) = self.position(node) else {
			return;
		};
		self.set_alpha_target(self.config.drag_alpha_target);
		self.pin(node, x, y);
	}

	pub fn drag_to(&mut self, node: usize, x: f64, y: f64) {
		self.pin(node, x, y);
	}

	/// Releases the pin and lets the layout cool down again.
	pub fn drag_end(&mut self, node: usize) {
		self.set_alpha_target(0.0);
		self.unpin(node);
	}
}
