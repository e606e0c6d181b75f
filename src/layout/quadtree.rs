//! Arena quadtree used by the many-body and collision forces.

use super::Point;

/// Below this depth coincident or near-coincident points share a leaf.
const MAX_DEPTH: usize = 24;

/// A square region of the tree.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
	pub children: [Option<usize>; 4],
	/// Point indices, only populated on leaves.
	pub points: Vec<usize>,
	/// Aggregated charge.
	pub value: f64,
	/// Charge-weighted center.
	pub cx: f64,
	pub cy: f64,
}

impl Cell {
	fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
		Self {
			x0,
			y0,
			x1,
			y1,
			children: [None; 4],
			points: Vec::new(),
			value: 0.0,
			cx: 0.0,
			cy: 0.0,
		}
	}

	pub fn is_leaf(&self) -> bool {
		self.children.iter().all(Option::is_none)
	}

	pub fn width(&self) -> f64 {
		self.x1 - self.x0
	}
}

#[derive(Clone, Debug, Default)]
pub(crate) struct QuadTree {
	cells: Vec<Cell>,
}

impl QuadTree {
	/// Builds a tree over `points`. The root is the bounding square.
	pub fn build(points: &[Point]) -> Self {
		let mut tree = Self::default();
		if points.is_empty() {
			return tree;
		}

		let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
		let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for p in points {
			x0 = x0.min(p.x);
			y0 = y0.min(p.y);
			x1 = x1.max(p.x);
			y1 = y1.max(p.y);
		}
		let side = (x1 - x0).max(y1 - y0).max(1.0);

		tree.cells.push(Cell::new(x0, y0, x0 + side, y0 + side));
		let indices: Vec<usize> = (0..points.len()).collect();
		tree.split(0, indices, points, 0);
		tree
	}

	fn split(&mut self, cell: usize, indices: Vec<usize>, points: &[Point], depth: usize) {
		let first = points[indices[0]];
		let coincident = indices.iter().all(|&i| points[i] == first);
		if indices.len() == 1 || coincident || depth >= MAX_DEPTH {
			self.cells[cell].points = indices;
			return;
		}

		let (x0, y0, x1, y1) = {
			let c = &self.cells[cell];
			(c.x0, c.y0, c.x1, c.y1)
		};
		let (xm, ym) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		let mut quadrants: [Vec<usize>; 4] = Default::default();
		for i in indices {
			let p = points[i];
			let q = usize::from(p.x >= xm) | (usize::from(p.y >= ym) << 1);
			quadrants[q].push(i);
		}

		for (q, members) in quadrants.into_iter().enumerate() {
			if members.is_empty() {
				continue;
			}
			let (cx0, cx1) = if q & 1 == 0 { (x0, xm) } else { (xm, x1) };
			let (cy0, cy1) = if q & 2 == 0 { (y0, ym) } else { (ym, y1) };
			let child = self.cells.len();
			self.cells.push(Cell::new(cx0, cy0, cx1, cy1));
			self.cells[cell].children[q] = Some(child);
			self.split(child, members, points, depth + 1);
		}
	}

	/// Computes each cell's total charge and charge-weighted center.
	///
	/// Children are always pushed after their parent, so a reverse sweep sees
	/// every child before its parent.
	pub fn accumulate(&mut self, points: &[Point], charge: impl Fn(usize) -> f64) {
		for idx in (0..self.cells.len()).rev() {
			let (mut value, mut weight, mut x, mut y) = (0.0, 0.0, 0.0, 0.0);
			if self.cells[idx].is_leaf() {
				for &i in &self.cells[idx].points {
					value += charge(i);
				}
				let p = points[self.cells[idx].points[0]];
				(x, y) = (p.x, p.y);
			} else {
				for child in self.cells[idx].children.into_iter().flatten() {
					let c = &self.cells[child];
					let w = c.value.abs();
					value += c.value;
					weight += w;
					x += w * c.cx;
					y += w * c.cy;
				}
				if weight > 0.0 {
					x /= weight;
					y /= weight;
				}
			}
			let cell = &mut self.cells[idx];
			cell.value = value;
			cell.cx = x;
			cell.cy = y;
		}
	}

	/// Pre-order walk. Returning `true` from `visit` skips the cell's children.
	pub fn visit(&self, mut visit: impl FnMut(&Cell) -> bool) {
		if self.cells.is_empty() {
			return;
		}
		let mut stack = vec![0];
		while let Some(idx) = stack.pop() {
			let cell = &self.cells[idx];
			if visit(cell) {
				continue;
			}
			stack.extend(cell.children.iter().rev().flatten());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
		coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
	}

	#[test]
	fn every_point_lands_in_one_leaf() {
		let points = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0), (3.0, 7.0)]);
		let tree = QuadTree::build(&points);

		let mut found = Vec::new();
		tree.visit(|cell| {
			if cell.is_leaf() {
				for &i in &cell.points {
					let p = points[i];
					assert!(p.x >= cell.x0 && p.x <= cell.x1);
					assert!(p.y >= cell.y0 && p.y <= cell.y1);
				}
				found.extend_from_slice(&cell.points);
			}
			false
		});
		found.sort_unstable();
		assert_eq!(found, vec![0, 1, 2, 3, 4]);
	}

	#[test]
	fn coincident_points_share_a_leaf() {
		let points = pts(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
		let tree = QuadTree::build(&points);
		let mut leaves = 0;
		tree.visit(|cell| {
			if cell.is_leaf() {
				leaves += 1;
				assert_eq!(cell.points.len(), 3);
			}
			false
		});
		assert_eq!(leaves, 1);
	}

	#[test]
	fn accumulate_sums_charge_at_the_root() {
		let points = pts(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (4.0, 4.0)]);
		let mut tree = QuadTree::build(&points);
		tree.accumulate(&points, |_| -2.0);

		let mut root = None;
		tree.visit(|cell| {
			root.get_or_insert((cell.value, cell.cx, cell.cy));
			true
		});
		let (value, cx, cy) = root.unwrap();
		assert_eq!(value, -8.0);
		assert!((cx - 2.0).abs() < 1e-9);
		assert!((cy - 2.0).abs() < 1e-9);
	}

	#[test]
	fn empty_tree_visits_nothing() {
		let tree = QuadTree::build(&[]);
		let mut calls = 0;
		tree.visit(|_| {
			calls += 1;
			false
		});
		assert_eq!(calls, 0);
	}
}
