//! "Zap" particles bouncing along edges.
//!
//! Each edge carries one particle whose progress runs back and forth between
//! the edge's endpoints. Progress advances once per animation frame, on its own
//! loop, so particles keep moving whether or not the layout has settled, and
//! are placed on the live endpoint positions every frame.

use serde::Deserialize;

use crate::layout::Point;

/// Zap animation settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZapConfig {
	/// Progress advanced per frame. 0.005 crosses an edge in ~200 frames.
	pub step: f64,
}

impl Default for ZapConfig {
	fn default() -> Self {
		Self { step: 0.005 }
	}
}

/// Travel direction along an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// Source to target.
	Forward,
	/// Target to source.
	Backward,
}

impl Direction {
	pub fn sign(self) -> f64 {
		match self {
			Direction::Forward => 1.0,
			Direction::Backward => -1.0,
		}
	}

	pub fn reversed(self) -> Self {
		match self {
			Direction::Forward => Direction::Backward,
			Direction::Backward => Direction::Forward,
		}
	}
}

/// One particle riding edge `edge`.
#[derive(Clone, Debug, PartialEq)]
pub struct ZapParticle {
	pub edge: usize,
	/// Position along the edge, 0 at the source and 1 at the target. May
	/// overshoot by one step right before turning around.
	pub progress: f64,
	pub direction: Direction,
}

/// A particle placed in layout space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZapPoint {
	pub edge: usize,
	pub position: Point,
}

/// Drives every edge's particle.
#[derive(Clone, Debug, Default)]
pub struct ZapAnimator {
	particles: Vec<ZapParticle>,
	step: f64,
	frames: u64,
}

impl ZapAnimator {
	/// One particle per edge, starting at scattered but reproducible offsets.
	pub fn new(edge_count: usize, config: &ZapConfig) -> Self {
		let particles = (0..edge_count)
			.map(|edge| ZapParticle {
				edge,
				progress: Self::pseudo_random(edge as f64 + 1.0),
				direction: Direction::Forward,
			})
			.collect();

		Self {
			particles,
			step: config.step,
			frames: 0,
		}
	}

	/// Simple deterministic hash of `seed` into `[0, 1)`.
	fn pseudo_random(seed: f64) -> f64 {
		let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
		x - x.floor()
	}

	/// Advances every particle by one frame, turning around once it has left
	/// `[0, 1]`.
	pub fn advance(&mut self) {
		for p in &mut self.particles {
			p.progress += self.step * p.direction.sign();
			if p.progress > 1.0 || p.progress < 0.0 {
				p.direction = p.direction.reversed();
			}
		}
		self.frames += 1;
	}

	/// Places particles on their edges using live endpoint positions.
	///
	/// Edges for which `endpoints` has no answer are skipped.
	pub fn locate(&self, endpoints: impl Fn(usize) -> Option<(Point, Point)>) -> Vec<ZapPoint> {
		self.particles
			.iter()
			.filter_map(|p| {
				let (source, target) = endpoints(p.edge)?;
				Some(ZapPoint {
					edge: p.edge,
					position: source.lerp(target, p.progress.clamp(0.0, 1.0)),
				})
			})
			.collect()
	}

	pub fn particles(&self) -> &[ZapParticle] {
		&self.particles
	}

	/// Frames advanced so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_spread_inside_unit_interval() {
		let zaps = ZapAnimator::new(50, &ZapConfig::default());
		assert_eq!(zaps.particles().len(), 50);
		for p in zaps.particles() {
			assert!((0.0..1.0).contains(&p.progress));
			assert_eq!(p.direction, Direction::Forward);
		}
		let first = zaps.particles()[0].progress;
		assert!(zaps.particles().iter().any(|p| p.progress != first));
	}

	#[test]
	fn is_reproducible() {
		let a = ZapAnimator::new(8, &ZapConfig::default());
		let b = ZapAnimator::new(8, &ZapConfig::default());
		assert_eq!(a.particles(), b.particles());
	}

	#[test]
	fn progress_overshoots_at_most_one_step() {
		let config = ZapConfig::default();
		let mut zaps = ZapAnimator::new(16, &config);
		let mut reversals = 0;
		let mut last: Vec<Direction> = zaps.particles().iter().map(|p| p.direction).collect();

		for _ in 0..2_000 {
			zaps.advance();
			for (p, prev) in zaps.particles().iter().zip(&mut last) {
				assert!(p.progress >= -config.step - 1e-12, "{}", p.progress);
				assert!(p.progress <= 1.0 + config.step + 1e-12, "{}", p.progress);
				if p.direction != *prev {
					reversals += 1;
					*prev = p.direction;
				}
			}
		}
		assert_eq!(zaps.frames(), 2_000);
		// 2000 frames is ten traverses per particle.
		assert!(reversals >= 16 * 9);
	}

	#[test]
	fn turns_around_after_leaving_the_edge() {
		let mut zaps = ZapAnimator::new(1, &ZapConfig { step: 0.25 });
		zaps.particles[0].progress = 0.9;
		zaps.advance();
		assert!((zaps.particles()[0].progress - 1.15).abs() < 1e-12);
		assert_eq!(zaps.particles()[0].direction, Direction::Backward);
		zaps.advance();
		assert!((zaps.particles()[0].progress - 0.9).abs() < 1e-12);
		assert_eq!(zaps.particles()[0].direction, Direction::Backward);
	}

	#[test]
	fn points_stay_on_moving_segment() {
		let mut zaps = ZapAnimator::new(3, &ZapConfig { step: 0.05 });
		for frame in 0..500 {
			zaps.advance();
			let t = frame as f64;
			let ends = |edge: usize| {
				let e = edge as f64;
				Some((
					Point::new(t.sin() * 40.0 + e, 10.0 - t * 0.5),
					Point::new(100.0 + t.cos() * 30.0, e * 20.0 + t),
				))
			};
			for zap in zaps.locate(ends) {
				let (a, b) = ends(zap.edge).unwrap();
				let along = a.distance(zap.position) + zap.position.distance(b);
				assert!((along - a.distance(b)).abs() < 1e-6);
			}
		}
	}

	#[test]
	fn missing_edges_are_skipped() {
		let zaps = ZapAnimator::new(3, &ZapConfig::default());
		let points = zaps.locate(|edge| (edge != 1).then(|| (Point::default(), Point::new(10.0, 0.0))));
		assert_eq!(points.iter().map(|z| z.edge).collect::<Vec<_>>(), vec![0, 2]);
	}

	#[test]
	fn no_edges_no_particles() {
		let mut zaps = ZapAnimator::new(0, &ZapConfig::default());
		zaps.advance();
		assert!(zaps.locate(|_| None).is_empty());
	}
}
