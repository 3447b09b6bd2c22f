use std::collections::HashSet;

use super::graph::{EdgeId, Graph, NodeId};

/// How a link touching the selection is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkStyle {
	/// Leaves a selected node.
	Outgoing,
	/// Only arrives at a selected node; keeps the default colour.
	Incoming,
}

/// A link touching the selection and how to draw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkHighlight {
	/// The highlighted edge.
	pub edge: EdgeId,
	/// Direction relative to the selection.
	pub style: LinkStyle,
}

/// Highlight instructions handed to the layout engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
	/// Selected nodes.
	pub nodes: HashSet<NodeId>,
	/// Links with at least one selected endpoint, in edge order.
	pub links: Vec<LinkHighlight>,
}

impl Highlight {
	/// Nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Nodes the user currently has highlighted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	selected: HashSet<NodeId>,
}

impl SelectionState {
	/// Empty selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `node` if absent, removes it if present. Returns the new membership.
	pub fn toggle(&mut self, node: NodeId) -> bool {
		if self.selected.remove(&node) {
			false
		} else {
			self.selected.insert(node);
			true
		}
	}

	/// Select exactly `nodes`, dropping everything else.
	pub fn replace(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
		self.selected = nodes.into_iter().collect();
	}

	/// Deselect everything.
	pub fn clear(&mut self) {
		self.selected.clear();
	}

	/// Whether `node` is highlighted.
	pub fn is_selected(&self, node: NodeId) -> bool {
		self.selected.contains(&node)
	}

	/// Number of selected nodes.
	pub fn len(&self) -> usize {
		self.selected.len()
	}

	/// Nothing is selected.
	pub fn is_empty(&self) -> bool {
		self.selected.is_empty()
	}

	/// Selected nodes in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.selected.iter().copied()
	}

	/// Every edge with a selected endpoint, in edge order.
	pub fn selected_links(&self, graph: &Graph) -> Vec<LinkHighlight> {
		if self.selected.is_empty() {
			return Vec::new();
		}
		graph
			.edges()
			.filter_map(|(edge, e)| {
				let style = if self.is_selected(e.source) {
					LinkStyle::Outgoing
				} else if self.is_selected(e.target) {
					LinkStyle::Incoming
				} else {
					return None;
				};
				Some(LinkHighlight { edge, style })
			})
			.collect()
	}

	/// Node set and link styles for the layout engine.
	pub fn highlight(&self, graph: &Graph) -> Highlight {
		Highlight {
			nodes: self.selected.clone(),
			links: self.selected_links(graph),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::path::find_path_by_name;

	fn graph() -> Graph {
		Graph::from_json(r#"{"A":["B","C"],"B":["D"],"C":["D"],"D":[],"E":["F"]}"#).unwrap()
	}

	#[test]
	fn toggle_is_self_inverse() {
		let graph = graph();
		let a = graph.lookup("A").unwrap();
		let mut selection = SelectionState::new();

		assert!(selection.toggle(a));
		assert!(selection.is_selected(a));
		assert!(!selection.toggle(a));
		assert!(!selection.is_selected(a));
		assert!(selection.is_empty());
	}

	#[test]
	fn replace_discards_previous_selection() {
		let graph = graph();
		let mut selection = SelectionState::new();
		selection.toggle(graph.lookup("E").unwrap());
		selection.replace([graph.lookup("A").unwrap(), graph.lookup("B").unwrap()]);

		assert_eq!(selection.len(), 2);
		assert!(!selection.is_selected(graph.lookup("E").unwrap()));
	}

	#[test]
	fn links_follow_path_selection() {
		let graph = graph();
		let path = find_path_by_name(&graph, "A", "D").unwrap();
		let mut selection = SelectionState::new();
		selection.replace(path.nodes().iter().copied());

		let links = selection.selected_links(&graph);
		let included: Vec<_> = links.iter().map(|l| l.edge).collect();

		for (edge, e) in graph.edges() {
			let (src, tgt) = (selection.is_selected(e.source), selection.is_selected(e.target));
			if src && tgt {
				assert!(included.contains(&edge));
			}
			if !src && !tgt {
				assert!(!included.contains(&edge));
			}
		}
		// E -> F is untouched
		assert_eq!(links.len(), 4);
	}

	#[test]
	fn incoming_only_links_keep_default_style() {
		let graph = graph();
		let mut selection = SelectionState::new();
		selection.toggle(graph.lookup("D").unwrap());

		let links = selection.selected_links(&graph);
		assert_eq!(links.len(), 2);
		assert!(links.iter().all(|l| l.style == LinkStyle::Incoming));

		selection.toggle(graph.lookup("B").unwrap());
		let links = selection.selected_links(&graph);
		let styles: Vec<_> = links
			.iter()
			.map(|l| {
				let e = graph.edge(l.edge);
				(graph.name(e.source), graph.name(e.target), l.style)
			})
			.collect();
		assert_eq!(
			styles,
			[
				("A", "B", LinkStyle::Incoming),
				("B", "D", LinkStyle::Outgoing),
				("C", "D", LinkStyle::Incoming),
			]
		);
	}
}
