//! Connected components by depth-first search.

use super::Graph;

/// Partition of a graph's nodes into connected components.
///
/// Components are ordered by their smallest node id; each component lists its
/// ids in DFS visitation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Components {
	groups: Vec<Vec<usize>>,
	/// `membership[id - 1]` is the component index of `id`.
	membership: Vec<usize>,
}

impl Components {
	/// Number of components.
	pub fn count(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}

	pub fn groups(&self) -> &[Vec<usize>] {
		&self.groups
	}

	/// Component index of node `id`.
	pub fn component_of(&self, id: usize) -> Option<usize> {
		self.membership.get(id.checked_sub(1)?).copied()
	}

	/// Component index per node, indexed by `id - 1`.
	pub fn membership(&self) -> &[usize] {
		&self.membership
	}

	pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
		self.groups.iter().map(Vec::as_slice)
	}
}

/// Scans ids in ascending order and floods each unvisited one.
///
/// The traversal keeps an explicit stack of `(node, next neighbor)` cursors so
/// it visits nodes in the same order as a recursive descent would, without
/// growing the call stack on large components.
pub fn find_components(graph: &Graph) -> Components {
	const UNVISITED: usize = usize::MAX;

	let n = graph.node_count();
	let mut membership = vec![UNVISITED; n];
	let mut groups: Vec<Vec<usize>> = Vec::new();
	let mut stack: Vec<(usize, usize)> = Vec::new();

	for start in graph.ids() {
		if membership[start - 1] != UNVISITED {
			continue;
		}
		let component = groups.len();
		let mut group = vec![start];
		membership[start - 1] = component;
		stack.push((start, 0));

		while let Some(top) = stack.last_mut() {
			let (node, cursor) = *top;
			match graph.neighbors(node).get(cursor) {
				Some(&next) => {
					top.1 += 1;
					if membership[next - 1] == UNVISITED {
						membership[next - 1] = component;
						group.push(next);
						stack.push((next, 0));
					}
				}
				None => {
					stack.pop();
				}
			}
		}
		groups.push(group);
	}

	Components { groups, membership }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph(n: usize, edges: &[(i64, i64)]) -> Graph {
		Graph::from_edges(n, edges.iter().copied()).unwrap()
	}

	fn recursive_order(graph: &Graph) -> Vec<Vec<usize>> {
		fn dfs(graph: &Graph, node: usize, seen: &mut [bool], group: &mut Vec<usize>) {
			seen[node - 1] = true;
			group.push(node);
			for &next in graph.neighbors(node) {
				if !seen[next - 1] {
					dfs(graph, next, seen, group);
				}
			}
		}
		let mut seen = vec![false; graph.node_count()];
		let mut groups = Vec::new();
		for id in graph.ids() {
			if !seen[id - 1] {
				let mut group = Vec::new();
				dfs(graph, id, &mut seen, &mut group);
				groups.push(group);
			}
		}
		groups
	}

	#[test]
	fn sample_graph_has_two_groups() {
		let components = find_components(&graph(6, &[(1, 2), (2, 3), (4, 5), (5, 6)]));
		assert_eq!(components.count(), 2);
		assert_eq!(components.groups(), &[vec![1, 2, 3], vec![4, 5, 6]]);
		assert_eq!(components.component_of(3), Some(0));
		assert_eq!(components.component_of(6), Some(1));
		assert_eq!(components.component_of(7), None);
	}

	#[test]
	fn isolated_node_forms_its_own_group() {
		let components = find_components(&graph(6, &[(1, 2), (2, 3), (4, 5)]));
		assert_eq!(components.count(), 3);
		assert_eq!(components.groups(), &[vec![1, 2, 3], vec![4, 5], vec![6]]);
		assert_eq!(components.component_of(6), Some(2));
	}

	#[test]
	fn groups_follow_visitation_order() {
		// 1 -> 4 is visited first, and 4 leads to 2 before 1's next neighbor 3.
		let components = find_components(&graph(4, &[(1, 4), (1, 3), (4, 2)]));
		assert_eq!(components.groups(), &[vec![1, 4, 2, 3]]);
	}

	#[test]
	fn matches_recursive_descent_on_branchy_graph() {
		let g = graph(
			10,
			&[
				(1, 5),
				(5, 9),
				(1, 2),
				(2, 9),
				(9, 3),
				(3, 1),
				(6, 8),
				(8, 7),
				(7, 6),
				(4, 10),
			],
		);
		let components = find_components(&g);
		assert_eq!(components.groups(), recursive_order(&g).as_slice());
	}

	#[test]
	fn every_node_belongs_to_exactly_one_group() {
		let g = graph(9, &[(2, 7), (7, 9), (1, 8), (3, 3), (4, 6), (6, 5)]);
		let components = find_components(&g);

		let mut seen: Vec<usize> = components.iter().flatten().copied().collect();
		assert_eq!(seen.len(), 9);
		seen.sort_unstable();
		assert_eq!(seen, (1..=9).collect::<Vec<_>>());
		assert!(components.iter().all(|group| !group.is_empty()));
		for (index, group) in components.iter().enumerate() {
			for &id in group {
				assert_eq!(components.component_of(id), Some(index));
			}
		}
	}

	#[test]
	fn is_idempotent() {
		let g = graph(7, &[(3, 1), (1, 7), (2, 4), (4, 2), (6, 6)]);
		assert_eq!(find_components(&g), find_components(&g));
	}

	#[test]
	fn self_loops_do_not_change_partition() {
		let base = graph(5, &[(1, 2), (3, 4)]);
		let looped = graph(5, &[(1, 2), (5, 5), (3, 4), (2, 2)]);
		assert_eq!(find_components(&base), find_components(&looped));
	}

	#[test]
	fn parallel_edges_are_harmless() {
		let components = find_components(&graph(3, &[(1, 2), (2, 1), (1, 2)]));
		assert_eq!(components.groups(), &[vec![1, 2], vec![3]]);
	}

	#[test]
	fn empty_graph_has_no_components() {
		let components = find_components(&Graph::new(0));
		assert_eq!(components.count(), 0);
		assert!(components.is_empty());
	}

	#[test]
	fn long_path_does_not_overflow() {
		let n = 200_000;
		let edges = (1..n as i64).map(|u| (u, u + 1));
		let g = Graph::from_edges(n, edges).unwrap();
		let components = find_components(&g);
		assert_eq!(components.count(), 1);
		assert_eq!(components.groups()[0].len(), n);
		assert_eq!(components.groups()[0][..3], [1, 2, 3]);
	}
}
