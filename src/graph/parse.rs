//! Text and JSON front ends for [`Graph`].

use log::warn;

use super::Graph;
use super::payload::GraphSource;
use crate::error::{GraphError, Result};

/// Parses the `n m` header followed by one `u v` pair per line.
///
/// The declared edge count is advisory: the edge lines present win. Blank
/// lines are skipped, anything else must be exactly two integers.
pub fn parse_edge_list(text: &str) -> Result<Graph> {
	let mut lines = text
		.lines()
		.enumerate()
		.map(|(i, line)| (i + 1, line.trim()))
		.filter(|(_, line)| !line.is_empty());

	let Some((header_line, header)) = lines.next() else {
		return Err(GraphError::format(1, "missing `n m` header"));
	};
	let [n, declared] = pair(header_line, header)?;
	let n = usize::try_from(n)
		.map_err(|_| GraphError::format(header_line, format!("node count {n} is out of range")))?;

	let mut graph = Graph::try_new(n)?;
	for (line_no, line) in lines {
		let [u, v] = pair(line_no, line)?;
		graph.add_edge(u, v)?;
	}

	if usize::try_from(declared).ok() != Some(graph.edge_count()) {
		warn!(
			"edge list declares {declared} edges but contains {}",
			graph.edge_count()
		);
	}
	Ok(graph)
}

/// Parses a JSON payload, either `{ n, edges }` or a user list.
pub fn parse_json(text: &str) -> Result<Graph> {
	serde_json::from_str::<GraphSource>(text)?.into_graph()
}

fn pair(line_no: usize, line: &str) -> Result<[i64; 2]> {
	let mut tokens = line.split_whitespace();
	let (Some(a), Some(b), None) = (tokens.next(), tokens.next(), tokens.next()) else {
		return Err(GraphError::format(line_no, "expected exactly two integers"));
	};
	let int = |token: &str| {
		token
			.parse::<i64>()
			.map_err(|_| GraphError::format(line_no, format!("`{token}` is not an integer")))
	};
	Ok([int(a)?, int(b)?])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_sample_input() {
		let graph: Graph = "6 4\n1 2\n2 3\n4 5\n5 6".parse().unwrap();
		assert_eq!(graph.node_count(), 6);
		assert_eq!(graph.edges(), &[(1, 2), (2, 3), (4, 5), (5, 6)]);
		assert_eq!(graph.neighbors(5), &[4, 6]);
	}

	#[test]
	fn tolerates_extra_whitespace_and_blank_lines() {
		let graph = parse_edge_list("  3   2 \r\n\n1\t2\n\n 2 3 \n").unwrap();
		assert_eq!(graph.edges(), &[(1, 2), (2, 3)]);
	}

	#[test]
	fn actual_edge_lines_are_authoritative() {
		let graph = parse_edge_list("4 10\n1 2\n3 4").unwrap();
		assert_eq!(graph.edge_count(), 2);

		let graph = parse_edge_list("4 0\n1 2").unwrap();
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn header_only_graph_has_no_edges() {
		let graph = parse_edge_list("0 0").unwrap();
		assert!(graph.is_empty());
	}

	#[test]
	fn empty_text_is_a_format_error() {
		let err = parse_edge_list("   \n ").unwrap_err();
		assert!(matches!(err, GraphError::Format { line: 1, .. }));
	}

	#[test]
	fn malformed_lines_report_their_line_number() {
		let cases = [
			("3 1\n1 x", 2),
			("3 2\n1 2\n1 2 3", 3),
			("3 2\n1 2\n\n3", 4),
			("three 1\n1 2", 1),
			("3\n1 2", 1),
			("-2 0", 1),
		];
		for (text, line) in cases {
			match parse_edge_list(text) {
				Err(GraphError::Format { line: got, .. }) => assert_eq!(got, line, "{text:?}"),
				other => panic!("expected format error for {text:?}, got {other:?}"),
			}
		}
	}

	#[test]
	fn out_of_range_node_is_rejected() {
		let err = parse_edge_list("3 2\n1 2\n2 7").unwrap_err();
		assert!(matches!(
			err,
			GraphError::NodeOutOfRange {
				edge: 2,
				node: 7,
				n: 3
			}
		));
		assert!(parse_edge_list("3 1\n0 1").is_err());
	}

	#[test]
	fn huge_node_count_is_an_error() {
		let text = "1000000000000000000 0";
		assert!(matches!(
			parse_edge_list(text),
			Err(GraphError::TooManyNodes { n: 1_000_000_000_000_000_000, .. })
		));
		let json = r#"{ "n": 1000000000000000000, "edges": [] }"#;
		assert!(matches!(
			parse_json(json),
			Err(GraphError::TooManyNodes { n: 1_000_000_000_000_000_000, .. })
		));
	}

	#[test]
	fn parses_counted_json_payload() {
		let graph = parse_json(r#"{ "n": 3, "edges": [[1, 2], [3, 3]] }"#).unwrap();
		assert_eq!(graph.node_count(), 3);
		assert_eq!(graph.edges(), &[(1, 2), (3, 3)]);
	}

	#[test]
	fn counted_payload_is_range_checked() {
		let err = parse_json(r#"{ "n": 2, "edges": [[1, 3]] }"#).unwrap_err();
		assert!(matches!(err, GraphError::NodeOutOfRange { node: 3, .. }));
	}

	#[test]
	fn parses_user_list_payload() {
		let graph = parse_json(
			r#"[
				{ "id": 10, "name": "Ada", "connections": [20] },
				{ "id": 20, "name": "Grace", "connections": [] },
				{ "id": "x", "connections": [10] }
			]"#,
		)
		.unwrap();
		assert_eq!(graph.node_count(), 3);
		assert_eq!(graph.edges(), &[(1, 2), (3, 1)]);
		assert_eq!(graph.labels(), &["Ada", "Grace", "x"]);
	}

	#[test]
	fn user_list_with_unknown_connection_fails() {
		let err = parse_json(r#"[{ "id": 1, "connections": [2] }]"#).unwrap_err();
		assert!(matches!(err, GraphError::UnknownUser { .. }));
		assert_eq!(err.to_string(), "user `1` is connected to unknown user `2`");
	}

	#[test]
	fn invalid_json_is_reported() {
		assert!(matches!(parse_json("{ nope"), Err(GraphError::Json(_))));
		assert!(matches!(parse_json(r#"{ "edges": [] }"#), Err(GraphError::Json(_))));
	}
}
