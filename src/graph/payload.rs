//! JSON payload shapes accepted as graph input.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::Deserialize;

use super::Graph;
use crate::error::{GraphError, Result};

/// Counted edge list: `{ "n": 6, "edges": [[1, 2], [2, 3]] }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphPayload {
	pub n: usize,
	#[serde(default)]
	pub edges: Vec<[i64; 2]>,
}

/// A user id as it appears in the user-list payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum UserId {
	Number(i64),
	Text(String),
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserId::Number(n) => write!(f, "{n}"),
			UserId::Text(s) => f.write_str(s),
		}
	}
}

/// One entry of the user-list payload.
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
	pub id: UserId,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub connections: Vec<UserId>,
}

/// Any supported graph payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum GraphSource {
	Counted(GraphPayload),
	Users(Vec<UserRecord>),
}

impl GraphSource {
	/// Validates the payload into a [`Graph`].
	pub fn into_graph(self) -> Result<Graph> {
		match self {
			GraphSource::Counted(payload) => payload.into_graph(),
			GraphSource::Users(users) => users_to_graph(&users),
		}
	}
}

impl GraphPayload {
	pub fn into_graph(self) -> Result<Graph> {
		Graph::from_edges(self.n, self.edges.into_iter().map(|[u, v]| (u, v)))
	}
}

/// Maps user ids to `1..=n` in order of appearance; names become labels.
fn users_to_graph(users: &[UserRecord]) -> Result<Graph> {
	let mut index: HashMap<&UserId, usize> = HashMap::with_capacity(users.len());
	let mut labels = Vec::with_capacity(users.len());
	for user in users {
		if let Entry::Vacant(slot) = index.entry(&user.id) {
			labels.push(user.name.clone().unwrap_or_else(|| user.id.to_string()));
			slot.insert(labels.len());
		}
	}

	let mut graph = Graph::try_new(labels.len())?.with_labels(labels);

	for user in users {
		let source = index[&user.id];
		for target in &user.connections {
			let Some(&target_idx) = index.get(target) else {
				return Err(GraphError::UnknownUser {
					user: user.id.to_string(),
					target: target.to_string(),
				});
			};
			graph.add_edge(source as i64, target_idx as i64)?;
		}
	}
	Ok(graph)
}
