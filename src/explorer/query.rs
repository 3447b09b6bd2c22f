use super::error::{PathField, QueryError};
use super::graph::{Graph, NodeId};

/// Resolve a search box entry to a node.
pub fn resolve_search(graph: &Graph, text: &str) -> Result<NodeId, QueryError> {
	let name = text.trim();
	if name.is_empty() {
		return Err(QueryError::EmptySearch);
	}
	graph
		.lookup(name)
		.ok_or_else(|| QueryError::NotFound(name.to_owned()))
}

/// Resolve the start and end fields of a path request.
pub fn resolve_path_request(
	graph: &Graph,
	start: &str,
	end: &str,
) -> Result<(NodeId, NodeId), QueryError> {
	let (start, end) = (start.trim(), end.trim());
	if start.is_empty() {
		return Err(QueryError::EmptyInput(PathField::Start));
	}
	if end.is_empty() {
		return Err(QueryError::EmptyInput(PathField::End));
	}
	let lookup = |name: &str| {
		graph
			.lookup(name)
			.ok_or_else(|| QueryError::NotFound(name.to_owned()))
	};
	Ok((lookup(start)?, lookup(end)?))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn graph() -> Graph {
		Graph::from_json(r#"{"alpha":["beta"]}"#).unwrap()
	}

	#[test]
	fn search_trims_and_resolves() {
		let graph = graph();
		assert_eq!(resolve_search(&graph, "  beta "), Ok(graph.lookup("beta").unwrap()));
		assert_eq!(resolve_search(&graph, " "), Err(QueryError::EmptySearch));
		assert_eq!(
			resolve_search(&graph, "gamma"),
			Err(QueryError::NotFound("gamma".into()))
		);
	}

	#[test]
	fn path_request_reports_missing_fields_first() {
		let graph = graph();
		assert_eq!(
			resolve_path_request(&graph, "", "nope"),
			Err(QueryError::EmptyInput(PathField::Start))
		);
		assert_eq!(
			resolve_path_request(&graph, "alpha", ""),
			Err(QueryError::EmptyInput(PathField::End))
		);
		assert_eq!(
			resolve_path_request(&graph, "alpha", "nope"),
			Err(QueryError::NotFound("nope".into()))
		);
		assert!(resolve_path_request(&graph, "alpha", "beta").is_ok());
	}

	#[test]
	fn notices_name_the_problem() {
		assert_eq!(
			QueryError::EmptyInput(PathField::End).to_string(),
			"please enter the end node"
		);
		assert_eq!(
			QueryError::NotFound("x".into()).to_string(),
			"no node named \"x\""
		);
	}
}
