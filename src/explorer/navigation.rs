use log::debug;

use super::graph::NodeId;
use super::path::Path;

#[derive(Clone, Debug)]
struct Walk {
	nodes: Vec<NodeId>,
	cursor: usize,
	elapsed_ms: f64,
	step_delay_ms: f64,
}

impl Walk {
	fn next_due_ms(&self) -> f64 {
		self.cursor as f64 * self.step_delay_ms
	}
}

/// Steps through a path one focus call at a time.
///
/// Only one walk runs at a time. The host advances it from its frame loop;
/// step `i` becomes due once `i * step_delay_ms` has elapsed since `start`.
#[derive(Clone, Debug, Default)]
pub struct NavigationSequencer {
	walk: Option<Walk>,
}

impl NavigationSequencer {
	/// Sequencer with no walk in flight.
	pub fn new() -> Self {
		Self::default()
	}

	/// Begin walking `path`, cancelling any walk in flight.
	pub fn start(&mut self, path: Path, step_delay_ms: f64) {
		if self.cancel() {
			debug!("previous path walk replaced");
		}
		self.walk = Some(Walk {
			nodes: path.into(),
			cursor: 0,
			elapsed_ms: 0.0,
			step_delay_ms: step_delay_ms.max(0.0),
		});
	}

	/// Stop the current walk. Returns whether one was running.
	pub fn cancel(&mut self) -> bool {
		self.walk.take().is_some()
	}

	/// A walk still has steps to focus.
	pub fn is_running(&self) -> bool {
		self.walk.is_some()
	}

	/// Steps still to be focused.
	pub fn remaining(&self) -> usize {
		self.walk.as_ref().map_or(0, |w| w.nodes.len() - w.cursor)
	}

	/// Move the clock forward by `dt_ms` and focus every step now due, in order.
	pub fn advance(&mut self, dt_ms: f64, mut focus: impl FnMut(NodeId)) {
		let Some(walk) = self.walk.as_mut() else {
			return;
		};
		walk.elapsed_ms += dt_ms.max(0.0);
		while walk.cursor < walk.nodes.len() && walk.next_due_ms() <= walk.elapsed_ms {
			focus(walk.nodes[walk.cursor]);
			walk.cursor += 1;
		}
		if walk.cursor == walk.nodes.len() {
			self.walk = None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explorer::graph::Graph;
	use crate::explorer::path::find_path_by_name;

	fn chain() -> (Graph, Path) {
		let graph = Graph::from_json(r#"{"A":["B"],"B":["C"],"C":["D"],"X":["Y"]}"#).unwrap();
		let path = find_path_by_name(&graph, "A", "D").unwrap();
		(graph, path)
	}

	fn run(seq: &mut NavigationSequencer, dt: f64) -> Vec<NodeId> {
		let mut focused = Vec::new();
		seq.advance(dt, |n| focused.push(n));
		focused
	}

	#[test]
	fn steps_fire_at_multiples_of_delay() {
		let (graph, path) = chain();
		let ids = path.nodes().to_vec();
		let mut seq = NavigationSequencer::new();
		seq.start(path, 100.0);

		assert_eq!(run(&mut seq, 0.0), [ids[0]]);
		assert!(run(&mut seq, 99.0).is_empty());
		assert_eq!(run(&mut seq, 1.0), [ids[1]]);
		assert_eq!(seq.remaining(), 2);
		assert_eq!(run(&mut seq, 250.0), [ids[2], ids[3]]);
		assert!(!seq.is_running());
		assert_eq!(graph.name(ids[3]), "D");
	}

	#[test]
	fn starting_a_walk_cancels_the_previous_one() {
		let (graph, path) = chain();
		let other = find_path_by_name(&graph, "X", "Y").unwrap();
		let mut seq = NavigationSequencer::new();

		seq.start(path, 100.0);
		run(&mut seq, 0.0);
		seq.start(other.clone(), 100.0);

		let mut focused = run(&mut seq, 0.0);
		focused.extend(run(&mut seq, 1000.0));
		assert_eq!(focused, other.nodes());
	}

	#[test]
	fn cancel_stops_further_focus() {
		let (_, path) = chain();
		let mut seq = NavigationSequencer::new();
		seq.start(path, 100.0);
		run(&mut seq, 0.0);

		assert!(seq.cancel());
		assert!(run(&mut seq, 1000.0).is_empty());
		assert!(!seq.cancel());
	}

	#[test]
	fn single_node_walk_finishes_immediately() {
		let (graph, _) = chain();
		let a = graph.lookup("A").unwrap();
		let path = find_path_by_name(&graph, "A", "A").unwrap();
		let mut seq = NavigationSequencer::new();
		seq.start(path, 500.0);

		assert_eq!(run(&mut seq, 0.0), [a]);
		assert!(!seq.is_running());
	}
}
