//! Forces applied on every simulation tick.
//!
//! Each force nudges node velocities (or, for centering, positions) in place.
//! Pinned nodes are treated like any other node here; the integrator is what
//! keeps them at their pin.

use super::quadtree::QuadTree;
use super::{Lcg, Link, Point, SimNode};

/// Spring force pulling linked nodes toward a rest distance.
#[derive(Clone, Debug, Default)]
pub(crate) struct LinkForce {
	distance: f64,
	strengths: Vec<f64>,
	bias: Vec<f64>,
}

impl LinkForce {
	/// Weakens links at high-degree nodes and splits the correction by degree.
	pub fn new(node_count: usize, links: &[Link], distance: f64) -> Self {
		let mut degree = vec![0usize; node_count];
		for link in links {
			degree[link.source] += 1;
			degree[link.target] += 1;
		}

		let (strengths, bias) = links
			.iter()
			.map(|link| {
				let (s, t) = (degree[link.source] as f64, degree[link.target] as f64);
				(1.0 / s.min(t), s / (s + t))
			})
			.unzip();

		Self {
			distance,
			strengths,
			bias,
		}
	}

	pub fn apply(&self, nodes: &mut [SimNode], links: &[Link], alpha: f64, rng: &mut Lcg) {
		for (i, link) in links.iter().enumerate() {
			let (source, target) = (&nodes[link.source], &nodes[link.target]);
			let mut x = target.x + target.vx - source.x - source.vx;
			let mut y = target.y + target.vy - source.y - source.vy;
			if x == 0.0 {
				x = rng.jiggle();
			}
			if y == 0.0 {
				y = rng.jiggle();
			}

			let len = (x * x + y * y).sqrt();
			let scale = (len - self.distance) / len * alpha * self.strengths[i];
			let (x, y) = (x * scale, y * scale);
			let b = self.bias[i];

			let target = &mut nodes[link.target];
			target.vx -= x * b;
			target.vy -= y * b;
			let source = &mut nodes[link.source];
			source.vx += x * (1.0 - b);
			source.vy += y * (1.0 - b);
		}
	}
}

/// Charge between all node pairs, approximated with Barnes-Hut.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ManyBodyForce {
	pub strength: f64,
	pub theta: f64,
	pub distance_min: f64,
	pub distance_max: Option<f64>,
}

impl ManyBodyForce {
	pub fn apply(&self, nodes: &mut [SimNode], alpha: f64, rng: &mut Lcg) {
		if nodes.len() < 2 || self.strength == 0.0 {
			return;
		}

		let points: Vec<Point> = nodes.iter().map(SimNode::position).collect();
		let mut tree = QuadTree::build(&points);
		tree.accumulate(&points, |_| self.strength);

		let theta2 = self.theta * self.theta;
		let min2 = self.distance_min * self.distance_min;
		let max2 = self.distance_max.map_or(f64::INFINITY, |d| d * d);

		for (i, node) in nodes.iter_mut().enumerate() {
			let origin = points[i];
			let (mut vx, mut vy) = (0.0, 0.0);

			tree.visit(|cell| {
				if cell.value == 0.0 {
					return true;
				}
				let (mut x, mut y) = (cell.cx - origin.x, cell.cy - origin.y);
				let mut l = x * x + y * y;
				let w = cell.width();

				// Far enough away: treat the whole cell as one body.
				if w * w / theta2 < l {
					if l < max2 {
						if x == 0.0 {
							x = rng.jiggle();
							l += x * x;
						}
						if y == 0.0 {
							y = rng.jiggle();
							l += y * y;
						}
						if l < min2 {
							l = (min2 * l).sqrt();
						}
						vx += x * cell.value * alpha / l;
						vy += y * cell.value * alpha / l;
					}
					return true;
				}

				if !cell.is_leaf() {
					return false;
				}
				if l >= max2 {
					return true;
				}

				for &j in cell.points.iter().filter(|&&j| j != i) {
					let (mut x, mut y) = (points[j].x - origin.x, points[j].y - origin.y);
					if x == 0.0 {
						x = rng.jiggle();
					}
					if y == 0.0 {
						y = rng.jiggle();
					}
					let mut l = x * x + y * y;
					if l < min2 {
						l = (min2 * l).sqrt();
					}
					let w = self.strength * alpha / l;
					vx += x * w;
					vy += y * w;
				}
				true
			});

			node.vx += vx;
			node.vy += vy;
		}
	}
}

/// Translates all nodes so their centroid sits on `center`.
pub(crate) fn apply_center(nodes: &mut [SimNode], center: Point, strength: f64) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes
		.iter()
		.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
	let (dx, dy) = (
		(sx / n - center.x) * strength,
		(sy / n - center.y) * strength,
	);
	for node in nodes {
		node.x -= dx;
		node.y -= dy;
	}
}

/// Pushes apart nodes whose circles of `radius` overlap.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CollideForce {
	pub radius: f64,
	pub strength: f64,
}

impl CollideForce {
	pub fn apply(&self, nodes: &mut [SimNode], rng: &mut Lcg) {
		if nodes.len() < 2 || self.radius <= 0.0 {
			return;
		}

		let predicted: Vec<Point> = nodes
			.iter()
			.map(|node| Point::new(node.x + node.vx, node.y + node.vy))
			.collect();
		let tree = QuadTree::build(&predicted);

		let reach = self.radius * 2.0;
		// Equal radii split every correction evenly.
		let share = 0.5;

		for i in 0..nodes.len() {
			let Point { x: xi, y: yi } = predicted[i];
			tree.visit(|cell| {
				if !cell.is_leaf() {
					return cell.x0 > xi + reach
						|| cell.x1 < xi - reach
						|| cell.y0 > yi + reach
						|| cell.y1 < yi - reach;
				}
				for &j in cell.points.iter().filter(|&&j| j > i) {
					let other = &nodes[j];
					let mut x = xi - other.x - other.vx;
					let mut y = yi - other.y - other.vy;
					let mut l = x * x + y * y;
					if l >= reach * reach {
						continue;
					}
					if x == 0.0 {
						x = rng.jiggle();
						l += x * x;
					}
					if y == 0.0 {
						y = rng.jiggle();
						l += y * y;
					}
					let len = l.sqrt();
					let push = (reach - len) / len * self.strength;
					let (x, y) = (x * push, y * push);

					nodes[i].vx += x * share;
					nodes[i].vy += y * share;
					nodes[j].vx -= x * (1.0 - share);
					nodes[j].vy -= y * (1.0 - share);
				}
				true
			});
		}
	}
}
