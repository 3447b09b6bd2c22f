use std::collections::HashMap;

use serde_json::Value;

use super::error::GraphError;

/// Dense node handle, assigned in first-appearance order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Position in first-appearance order.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Position of an edge in the graph's edge sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
	/// Position in the edge sequence.
	pub fn index(self) -> usize {
		self.0
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
	name: String,
}

/// Directed relation from `source` to `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Node the edge leaves.
	pub source: NodeId,
	/// Node the edge arrives at.
	pub target: NodeId,
}

/// Immutable directed graph built once from an adjacency payload.
///
/// Parallel edges and self-loops are kept as given.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	by_name: HashMap<String, NodeId>,
	edges: Vec<Edge>,
	outgoing: Vec<Vec<NodeId>>,
	in_degree: Vec<usize>,
}

impl Graph {
	/// Build from `(source, targets)` pairs, keeping iteration order.
	pub fn from_adjacency<K, V, T>(adjacency: impl IntoIterator<Item = (K, T)>) -> Self
	where
		K: AsRef<str>,
		V: AsRef<str>,
		T: IntoIterator<Item = V>,
	{
		let mut graph = Graph::default();
		for (source, targets) in adjacency {
			let source = graph.intern(source.as_ref());
			for target in targets {
				let target = graph.intern(target.as_ref());
				graph.push_edge(source, target);
			}
		}
		graph
	}

	/// Parse a JSON object of `name -> [names]`.
	pub fn from_json(payload: &str) -> Result<Self, GraphError> {
		Self::from_value(serde_json::from_str(payload)?)
	}

	/// Validate an already-parsed payload.
	pub fn from_value(payload: Value) -> Result<Self, GraphError> {
		let Value::Object(map) = payload else {
			return Err(GraphError::NotAnObject);
		};

		let mut adjacency = Vec::with_capacity(map.len());
		for (key, value) in map {
			let Value::Array(entries) = value else {
				return Err(GraphError::NotAList { key });
			};
			let mut targets = Vec::with_capacity(entries.len());
			for (index, entry) in entries.into_iter().enumerate() {
				match entry {
					Value::String(name) => targets.push(name),
					_ => return Err(GraphError::NotAName { key, index }),
				}
			}
			adjacency.push((key, targets));
		}

		Ok(Self::from_adjacency(adjacency))
	}

	fn intern(&mut self, name: &str) -> NodeId {
		if let Some(&id) = self.by_name.get(name) {
			return id;
		}
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node { name: name.to_owned() });
		self.by_name.insert(name.to_owned(), id);
		self.outgoing.push(Vec::new());
		self.in_degree.push(0);
		id
	}

	fn push_edge(&mut self, source: NodeId, target: NodeId) {
		self.edges.push(Edge { source, target });
		self.outgoing[source.0].push(target);
		self.in_degree[target.0] += 1;
	}

	/// Number of distinct nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges, parallel edges counted separately.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// Node with exactly this name.
	pub fn lookup(&self, name: &str) -> Option<NodeId> {
		self.by_name.get(name).copied()
	}

	/// Whether `id` belongs to this graph.
	pub fn contains(&self, id: NodeId) -> bool {
		id.0 < self.nodes.len()
	}

	/// Name of `id`.
	pub fn name(&self, id: NodeId) -> &str {
		&self.nodes[id.0].name
	}

	/// Every node, in first-appearance order.
	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		(0..self.nodes.len()).map(NodeId)
	}

	/// Node names in first-appearance order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.nodes.iter().map(|n| n.name.as_str())
	}

	/// Every edge with its id, in payload order.
	pub fn edges(&self) -> impl Iterator<Item = (EdgeId, Edge)> + '_ {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), *e))
	}

	/// Endpoints of `id`.
	pub fn edge(&self, id: EdgeId) -> Edge {
		self.edges[id.0]
	}

	/// Forward neighbours in edge order, repeated once per parallel edge.
	pub fn successors(&self, id: NodeId) -> &[NodeId] {
		&self.outgoing[id.0]
	}

	/// Number of edges leaving `id`.
	pub fn out_degree(&self, id: NodeId) -> usize {
		self.outgoing[id.0].len()
	}

	/// Number of edges arriving at `id`.
	pub fn in_degree(&self, id: NodeId) -> usize {
		self.in_degree[id.0]
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;

	#[test]
	fn nodes_are_union_of_keys_and_entries() {
		let graph = Graph::from_json(r#"{"A":["B","C"],"B":["D","A"],"E":[]}"#).unwrap();

		let names: BTreeSet<_> = graph.names().collect();
		assert_eq!(names, BTreeSet::from(["A", "B", "C", "D", "E"]));
		assert_eq!(graph.node_count(), 5);
		assert_eq!(graph.edge_count(), 4);
	}

	#[test]
	fn parallel_edges_and_self_loops_are_kept() {
		let graph = Graph::from_json(r#"{"A":["B","B","A"]}"#).unwrap();
		let a = graph.lookup("A").unwrap();
		let b = graph.lookup("B").unwrap();

		assert_eq!(graph.edge_count(), 3);
		assert_eq!(graph.successors(a), &[b, b, a]);
		assert_eq!(graph.in_degree(b), 2);
		assert_eq!(graph.in_degree(a), 1);
	}

	#[test]
	fn node_order_follows_first_appearance() {
		let graph = Graph::from_json(r#"{"Z":["Y"],"A":["Z","X"]}"#).unwrap();
		let names: Vec<_> = graph.names().collect();
		assert_eq!(names, ["Z", "Y", "A", "X"]);
	}

	#[test]
	fn from_adjacency_matches_json() {
		let graph = Graph::from_adjacency([("A", vec!["B"]), ("B", Vec::new())]);
		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.edge_count(), 1);
		assert_eq!(graph.name(graph.edge(EdgeId(0)).target), "B");
	}

	#[test]
	fn rejects_malformed_payloads() {
		assert!(matches!(Graph::from_json("{"), Err(GraphError::Json(_))));
		assert!(matches!(Graph::from_json(r#"["A"]"#), Err(GraphError::NotAnObject)));
		assert!(matches!(
			Graph::from_json(r#"{"A":"B"}"#),
			Err(GraphError::NotAList { key }) if key == "A"
		));
		assert!(matches!(
			Graph::from_json(r#"{"A":["B", 3]}"#),
			Err(GraphError::NotAName { key, index: 1 }) if key == "A"
		));
	}

	#[test]
	fn lookup_misses_unknown_names() {
		let graph = Graph::from_json(r#"{"A":[]}"#).unwrap();
		assert_eq!(graph.lookup("a"), None);
		assert!(graph.lookup("A").is_some());
	}
}
