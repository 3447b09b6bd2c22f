use std::collections::VecDeque;

use super::graph::{Graph, NodeId};

/// Ordered walk of distinct nodes from a requested start to a requested end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path(Vec<NodeId>);

impl Path {
	/// Nodes from start to end.
	pub fn nodes(&self) -> &[NodeId] {
		&self.0
	}

	/// Number of nodes, one more than [`hops`](Self::hops).
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Always false for a path returned by [`find_path`].
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of edges walked.
	pub fn hops(&self) -> usize {
		self.0.len().saturating_sub(1)
	}

	/// First node.
	pub fn start(&self) -> NodeId {
		self.0[0]
	}

	/// Last node.
	pub fn end(&self) -> NodeId {
		self.0[self.0.len() - 1]
	}

	/// Node names in walk order.
	pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
		self.0.iter().map(|&id| graph.name(id)).collect()
	}
}

impl From<Path> for Vec<NodeId> {
	fn from(path: Path) -> Self {
		path.0
	}
}

/// Fewest-hop path from `start` to `end` along forward edges, or `None`.
///
/// Breadth-first with parent pointers. A node's parent is the first node
/// expanded that reaches it, and successors are expanded in edge order, so
/// ties resolve the same way a queue of whole partial paths would.
pub fn find_path(graph: &Graph, start: NodeId, end: NodeId) -> Option<Path> {
	if !graph.contains(start) || !graph.contains(end) {
		return None;
	}
	if start == end {
		return Some(Path(vec![start]));
	}

	let mut parent: Vec<Option<NodeId>> = vec![None; graph.node_count()];
	parent[start.index()] = Some(start);
	let mut queue = VecDeque::from([start]);

	while let Some(current) = queue.pop_front() {
		for &next in graph.successors(current) {
			if parent[next.index()].is_some() {
				continue;
			}
			parent[next.index()] = Some(current);
			if next == end {
				return Some(backtrack(&parent, start, end));
			}
			queue.push_back(next);
		}
	}

	None
}

fn backtrack(parent: &[Option<NodeId>], start: NodeId, end: NodeId) -> Path {
	let mut nodes = vec![end];
	let mut cursor = end;
	while cursor != start {
		let Some(prev) = parent[cursor.index()] else {
			break;
		};
		cursor = prev;
		nodes.push(cursor);
	}
	nodes.reverse();
	Path(nodes)
}

/// Name-level lookup; unknown names yield `None` like an unreachable end.
pub fn find_path_by_name(graph: &Graph, start: &str, end: &str) -> Option<Path> {
	find_path(graph, graph.lookup(start)?, graph.lookup(end)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn diamond() -> Graph {
		Graph::from_json(r#"{"A":["B","C"],"B":["D"],"C":["D"],"D":[]}"#).unwrap()
	}

	#[test]
	fn trivial_path_to_self() {
		let graph = diamond();
		let a = graph.lookup("A").unwrap();
		assert_eq!(find_path(&graph, a, a).unwrap().nodes(), &[a]);
	}

	#[test]
	fn diamond_has_two_hop_path() {
		let graph = diamond();
		let path = find_path_by_name(&graph, "A", "D").unwrap();

		assert_eq!(path.len(), 3);
		assert_eq!(path.hops(), 2);
		// first listed successor wins the tie
		assert_eq!(path.names(&graph), ["A", "B", "D"]);
	}

	#[test]
	fn edges_are_not_walked_backwards() {
		let graph = diamond();
		assert_eq!(find_path_by_name(&graph, "D", "A"), None);
	}

	#[test]
	fn unknown_endpoints_are_not_found() {
		let graph = diamond();
		assert_eq!(find_path_by_name(&graph, "A", "Q"), None);
		assert_eq!(find_path_by_name(&graph, "Q", "Q"), None);
	}

	#[test]
	fn cycles_terminate() {
		let graph = Graph::from_json(r#"{"A":["B","A"],"B":["C","A"],"C":["B"],"X":[]}"#).unwrap();
		assert_eq!(find_path_by_name(&graph, "A", "X"), None);
		assert_eq!(find_path_by_name(&graph, "C", "A").unwrap().names(&graph), ["C", "B", "A"]);
	}

	#[test]
	fn prefers_fewer_hops_over_earlier_edges() {
		let graph = Graph::from_json(r#"{"S":["A","T"],"A":["T"]}"#).unwrap();
		assert_eq!(find_path_by_name(&graph, "S", "T").unwrap().names(&graph), ["S", "T"]);
	}
}
