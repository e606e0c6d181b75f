//! Errors raised while turning raw input into a [`Graph`](crate::graph::Graph).

/// Input validation failures. Parsing never yields a partial graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// The edge-list text does not follow the `n m` / `u v` grammar.
	#[error("line {line}: {reason}")]
	Format { line: usize, reason: String },
	/// The declared node count exceeds what a graph may hold.
	#[error("node count {n} exceeds the limit of {max}")]
	TooManyNodes { n: usize, max: usize },
	/// An edge names a node id outside `1..=n`.
	#[error("edge {edge}: node {node} is outside 1..={n}")]
	NodeOutOfRange { edge: usize, node: i64, n: usize },
	/// A user-list connection points at an id that no user declares.
	#[error("user `{user}` is connected to unknown user `{target}`")]
	UnknownUser { user: String, target: String },
	/// The JSON payload is not valid JSON or has the wrong shape.
	#[error("invalid graph payload: {0}")]
	Json(#[from] serde_json::Error),
}

impl GraphError {
	pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
		Self::Format {
			line,
			reason: reason.into(),
		}
	}
}

/// Result alias for graph construction.
pub type Result<T> = std::result::Result<T, GraphError>;
