//! Undirected friend graph: node count, ordered edge list and adjacency.
//!
//! Node ids are `1..=n`. Every edge inserts both directions into the adjacency
//! lists, so a self-loop appears twice in its own list and parallel edges are
//! kept as separate entries.

mod components;
mod parse;
mod payload;

pub use components::{Components, find_components};
pub use parse::{parse_edge_list, parse_json};
pub use payload::{GraphPayload, GraphSource, UserId, UserRecord};

use crate::error::{GraphError, Result};

/// Largest node count accepted from untrusted input.
pub const MAX_NODES: usize = 1_000_000;

/// Parsed, validated graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	edges: Vec<(usize, usize)>,
	/// `adjacency[id - 1]` lists the neighbors of `id` in insertion order.
	adjacency: Vec<Vec<usize>>,
	labels: Vec<String>,
}

impl Graph {
	/// A graph with `n` isolated nodes labelled by their ids.
	pub fn new(n: usize) -> Self {
		Self {
			edges: Vec::new(),
			adjacency: vec![Vec::new(); n],
			labels: (1..=n).map(|id| id.to_string()).collect(),
		}
	}

	/// Like [`Graph::new`], but rejects `n` above [`MAX_NODES`].
	pub fn try_new(n: usize) -> Result<Self> {
		if n > MAX_NODES {
			return Err(GraphError::TooManyNodes { n, max: MAX_NODES });
		}
		Ok(Self::new(n))
	}

	/// Builds a graph from `(u, v)` pairs, rejecting ids outside `1..=n`.
	pub fn from_edges<I>(n: usize, edges: I) -> Result<Self>
	where
		I: IntoIterator<Item = (i64, i64)>,
	{
		let mut graph = Self::try_new(n)?;
		for (u, v) in edges {
			graph.add_edge(u, v)?;
		}
		Ok(graph)
	}

	/// Appends an undirected edge.
	pub fn add_edge(&mut self, u: i64, v: i64) -> Result<()> {
		let edge = self.edges.len() + 1;
		let u = self.check_id(u, edge)?;
		let v = self.check_id(v, edge)?;
		self.adjacency[u - 1].push(v);
		self.adjacency[v - 1].push(u);
		self.edges.push((u, v));
		Ok(())
	}

	fn check_id(&self, id: i64, edge: usize) -> Result<usize> {
		let n = self.node_count();
		usize::try_from(id)
			.ok()
			.filter(|id| (1..=n).contains(id))
			.ok_or(GraphError::NodeOutOfRange { edge, node: id, n })
	}

	/// Replaces the display labels. Missing entries keep the numeric id.
	pub fn with_labels<I, S>(mut self, labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for (slot, label) in self.labels.iter_mut().zip(labels) {
			*slot = label.into();
		}
		self
	}

	pub fn node_count(&self) -> usize {
		self.adjacency.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adjacency.is_empty()
	}

	/// Edges as `(u, v)` id pairs, in input order.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Neighbors of `id`, or an empty slice when `id` is not a node.
	pub fn neighbors(&self, id: usize) -> &[usize] {
		id.checked_sub(1)
			.and_then(|idx| self.adjacency.get(idx))
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	pub fn label(&self, id: usize) -> Option<&str> {
		self.labels.get(id.checked_sub(1)?).map(String::as_str)
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	/// Node ids in ascending order.
	pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
		1..=self.node_count()
	}
}

/// Writes the `n m` / `u v` edge-list form that [`parse_edge_list`] reads.
impl std::fmt::Display for Graph {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.node_count(), self.edge_count())?;
		for (u, v) in &self.edges {
			write!(f, "\n{u} {v}")?;
		}
		Ok(())
	}
}

impl std::str::FromStr for Graph {
	type Err = GraphError;

	fn from_str(text: &str) -> Result<Self> {
		parse_edge_list(text)
	}
}
