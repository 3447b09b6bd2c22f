use crate::explorer::{Graph, Highlight, NodeId};

/// What the engine reports to tick subscribers after every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSnapshot {
	pub alpha: f64,
	pub running: bool,
	/// Cooled below the minimum alpha, or frozen.
	pub settled: bool,
}

pub type TickListener = Box<dyn FnMut(&TickSnapshot)>;

/// Operations the explorer drives on the layout/rendering collaborator.
pub trait LayoutEngine {
	/// Replace the drawn nodes and links with `graph`'s.
	fn load(&mut self, graph: &Graph);
	fn set_highlight(&mut self, highlight: Highlight);
	/// Animate the view so `node` ends up centred.
	fn zoom_to(&mut self, node: NodeId, duration_ms: f64);
	fn node_position(&self, node: NodeId) -> Option<(f64, f64)>;
	fn set_alpha_decay(&mut self, value: f64);
	fn set_running(&mut self, running: bool);
	fn set_alpha(&mut self, value: f64);
	fn subscribe_ticks(&mut self, listener: TickListener);
}

/// Pointer state machine for the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	/// Button down on a node, not yet moved far enough to count as a drag.
	Pressed(NodeGrab),
	Dragging(NodeGrab),
	Panning {
		start_x: f64,
		start_y: f64,
		transform_start_x: f64,
		transform_start_y: f64,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGrab {
	pub node: NodeId,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}
