use std::collections::HashSet;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::{Interaction, LayoutEngine, NodeGrab, TickListener, TickSnapshot};
use crate::explorer::{Graph, Highlight, LinkStyle, NodeId};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];
const LEAF_COLOR: &str = "#7f8c9d";

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
pub const ALPHA_MIN: f64 = 0.001;
const ALPHA_TARGET: f64 = 0.0;
/// Heat restored when the user grabs a node.
const DRAG_ALPHA: f64 = 0.3;
const DRAG_THRESHOLD: f64 = 3.0;
const FOCUS_SCALE: f64 = 2.0;
const MIN_SCALE: f64 = 0.1;
const MAX_SCALE: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeId>,
	pub neighbors: HashSet<NodeId>,
	pub highlight_t: f64,
	pub prev_node: Option<NodeId>,
	pub prev_neighbors: HashSet<NodeId>,
	delay_t: f64,
}

#[derive(Clone, Debug)]
struct FocusTween {
	node: NodeId,
	from: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

pub(crate) fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub interaction: Interaction,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub running: bool,
	pub alpha: f64,
	pub alpha_decay: f64,
	pub flow_time: f64,
	pub(crate) edges: Vec<(NodeId, NodeId)>,
	pub(crate) positions: Vec<(f64, f64)>,
	pub(crate) link_styles: Vec<Option<LinkStyle>>,
	pub(crate) highlight: Highlight,
	node_idx: Vec<DefaultNodeIdx>,
	focus: Option<FocusTween>,
	listeners: Vec<TickListener>,
}

impl ForceGraphState {
	pub fn new(graph: &Graph, width: f64, height: f64, alpha_decay: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation_parameters()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			interaction: Interaction::Idle,
			hover: HoverState::default(),
			width,
			height,
			running: true,
			alpha: 1.0,
			alpha_decay,
			flow_time: 0.0,
			edges: Vec::new(),
			positions: Vec::new(),
			link_styles: Vec::new(),
			highlight: Highlight::default(),
			node_idx: Vec::new(),
			focus: None,
			listeners: Vec::new(),
		};
		state.load(graph);
		state
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.data.user_data.id);
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<NodeId>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(id) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == id {
					self.hover.neighbors.insert(tgt);
				} else if tgt == id {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, id: NodeId) -> bool {
		self.hover.node == Some(id)
			|| self.hover.neighbors.contains(&id)
			|| self.hover.prev_node == Some(id)
			|| self.hover.prev_neighbors.contains(&id)
	}

	pub fn is_hovered(&self, id: NodeId) -> bool {
		self.hover.node == Some(id) || self.hover.prev_node == Some(id)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn is_selected(&self, id: NodeId) -> bool {
		self.highlight.nodes.contains(&id)
	}

	pub fn has_selection(&self) -> bool {
		!self.highlight.is_empty()
	}

	pub fn is_settled(&self) -> bool {
		!self.running || self.alpha < ALPHA_MIN
	}

	pub fn tick(&mut self, dt: f32) {
		if self.running && self.alpha >= ALPHA_MIN {
			self.graph.update(dt * self.alpha as f32);
			self.alpha += (ALPHA_TARGET - self.alpha) * self.alpha_decay;
			self.sync_positions();
		}
		self.flow_time += dt as f64;
		self.tick_hover(dt as f64);
		self.tick_focus(dt as f64 * 1000.0);

		let snapshot = TickSnapshot {
			alpha: self.alpha,
			running: self.running,
			settled: self.is_settled(),
		};
		for listener in &mut self.listeners {
			listener(&snapshot);
		}
	}

	fn tick_hover(&mut self, dt: f64) {
		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	fn tick_focus(&mut self, dt_ms: f64) {
		let Some(tween) = self.focus.as_mut() else {
			return;
		};
		tween.elapsed_ms += dt_ms;
		let t = if tween.duration_ms <= 0.0 {
			1.0
		} else {
			(tween.elapsed_ms / tween.duration_ms).min(1.0)
		};
		let (node, from) = (tween.node, tween.from.clone());
		let Some(target) = self.focus_transform(node, &from) else {
			self.focus = None;
			return;
		};
		let e = ease_out_cubic(t);
		self.transform = ViewTransform {
			x: from.x + (target.x - from.x) * e,
			y: from.y + (target.y - from.y) * e,
			k: from.k + (target.k - from.k) * e,
		};
		if t >= 1.0 {
			self.focus = None;
		}
	}

	/// View transform centring `node` at its current position.
	fn focus_transform(&self, node: NodeId, from: &ViewTransform) -> Option<ViewTransform> {
		let (px, py) = self.node_position(node)?;
		let k = from.k.max(FOCUS_SCALE);
		Some(ViewTransform {
			x: self.width / 2.0 - px * k,
			y: self.height / 2.0 - py * k,
			k,
		})
	}

	#[cfg(test)]
	pub fn is_focusing(&self) -> bool {
		self.focus.is_some()
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions[node.data.user_data.id.index()] = (node.x() as f64, node.y() as f64);
		});
	}

	fn move_node(&mut self, grab: &NodeGrab, x: f64, y: f64) {
		let (dx, dy) = (
			(x - grab.start_x) / self.transform.k,
			(y - grab.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			grab.node_start_x + dx as f32,
			grab.node_start_y + dy as f32,
		);
		let idx = self.node_idx[grab.node.index()];
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
		self.positions[grab.node.index()] = (nx as f64, ny as f64);
	}

	/// Button down at screen position `(x, y)`.
	pub fn press(&mut self, x: f64, y: f64) {
		self.interaction = match self.node_at_position(x, y) {
			Some(node) => {
				let (px, py) = self.positions[node.index()];
				Interaction::Pressed(NodeGrab {
					node,
					start_x: x,
					start_y: y,
					node_start_x: px as f32,
					node_start_y: py as f32,
				})
			}
			None => {
				self.focus = None;
				Interaction::Panning {
					start_x: x,
					start_y: y,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				}
			}
		};
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		match self.interaction.clone() {
			Interaction::Idle => {
				let hovered = self.node_at_position(x, y);
				self.set_hover(hovered);
			}
			Interaction::Pressed(grab) => {
				let moved = ((x - grab.start_x).powi(2) + (y - grab.start_y).powi(2)).sqrt();
				if moved >= DRAG_THRESHOLD {
					debug!("Dragging node {:?}", grab.node);
					self.alpha = self.alpha.max(DRAG_ALPHA);
					self.interaction = Interaction::Dragging(grab);
					self.move_node(&grab, x, y);
				}
			}
			Interaction::Dragging(grab) => self.move_node(&grab, x, y),
			Interaction::Panning {
				start_x,
				start_y,
				transform_start_x,
				transform_start_y,
			} => {
				self.transform.x = transform_start_x + (x - start_x);
				self.transform.y = transform_start_y + (y - start_y);
			}
		}
	}

	/// Button up. Returns the node clicked, if the press never became a drag.
	pub fn release(&mut self) -> Option<NodeId> {
		match std::mem::take(&mut self.interaction) {
			Interaction::Pressed(grab) => Some(grab.node),
			_ => None,
		}
	}

	pub fn leave(&mut self) {
		self.interaction = Interaction::Idle;
		self.set_hover(None);
	}

	/// Zoom by `factor` keeping screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		self.focus = None;
		let new_k = (self.transform.k * factor).clamp(MIN_SCALE, MAX_SCALE);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl LayoutEngine for ForceGraphState {
	fn load(&mut self, graph: &Graph) {
		let mut sim = ForceGraph::new(simulation_parameters());
		let count = graph.node_count().max(1);
		self.node_idx.clear();
		self.positions.clear();

		for id in graph.node_ids() {
			let color = match graph.out_degree(id) {
				0 => LEAF_COLOR,
				d => COLORS[(d - 1) % COLORS.len()],
			};
			let angle = (id.index() as f64) * 2.0 * PI / count as f64;
			let (x, y) = ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32);

			let idx = sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id,
					label: graph.name(id).to_owned(),
					color,
				},
			});
			self.node_idx.push(idx);
			self.positions.push((x as f64, y as f64));
		}

		self.edges = graph.edges().map(|(_, e)| (e.source, e.target)).collect();
		for &(src, tgt) in &self.edges {
			// self-loops have no length for the spring model
			if src != tgt {
				sim.add_edge(
					self.node_idx[src.index()],
					self.node_idx[tgt.index()],
					EdgeData::default(),
				);
			}
		}

		self.graph = sim;
		self.hover = HoverState::default();
		self.interaction = Interaction::Idle;
		self.focus = None;
		self.link_styles = vec![None; self.edges.len()];
		self.highlight = Highlight::default();
		self.alpha = 1.0;
		debug!(
			"Layout loaded {} nodes, {} edges",
			self.node_idx.len(),
			self.edges.len()
		);
	}

	fn set_highlight(&mut self, highlight: Highlight) {
		self.link_styles = vec![None; self.edges.len()];
		for link in &highlight.links {
			if let Some(style) = self.link_styles.get_mut(link.edge.index()) {
				*style = Some(link.style);
			}
		}
		self.highlight = highlight;
	}

	fn zoom_to(&mut self, node: NodeId, duration_ms: f64) {
		if node.index() >= self.positions.len() {
			return;
		}
		self.focus = Some(FocusTween {
			node,
			from: self.transform.clone(),
			elapsed_ms: 0.0,
			duration_ms,
		});
	}

	fn node_position(&self, node: NodeId) -> Option<(f64, f64)> {
		self.positions.get(node.index()).copied()
	}

	fn set_alpha_decay(&mut self, value: f64) {
		self.alpha_decay = value.clamp(0.0, 1.0);
	}

	fn set_running(&mut self, running: bool) {
		self.running = running;
	}

	fn set_alpha(&mut self, value: f64) {
		self.alpha = value.clamp(0.0, 1.0);
	}

	fn subscribe_ticks(&mut self, listener: TickListener) {
		self.listeners.push(listener);
	}
}

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;
	use crate::explorer::SelectionState;

	fn state() -> (Graph, ForceGraphState) {
		let graph = Graph::from_json(r#"{"A":["B","C"],"B":["D"],"C":["D"],"D":["D"]}"#).unwrap();
		let state = ForceGraphState::new(&graph, 800.0, 600.0, 0.0228);
		(graph, state)
	}

	fn screen_of(state: &ForceGraphState, node: NodeId) -> (f64, f64) {
		let (x, y) = state.node_position(node).unwrap();
		(
			state.transform.x + x * state.transform.k,
			state.transform.y + y * state.transform.k,
		)
	}

	#[test]
	fn zoom_to_centres_node_after_duration() {
		let (graph, mut state) = state();
		state.set_running(false);
		let c = graph.lookup("C").unwrap();

		state.zoom_to(c, 500.0);
		state.tick(0.25);
		assert!(state.is_focusing());
		state.tick(0.25);
		assert!(!state.is_focusing());

		let (sx, sy) = screen_of(&state, c);
		assert!((sx - 400.0).abs() < 1e-6);
		assert!((sy - 300.0).abs() < 1e-6);
		assert_eq!(state.transform.k, FOCUS_SCALE);
	}

	#[test]
	fn frozen_layout_does_not_move() {
		let (graph, mut state) = state();
		let a = graph.lookup("A").unwrap();
		state.set_running(false);
		let before = state.node_position(a);
		for _ in 0..10 {
			state.tick(0.016);
		}
		assert_eq!(state.node_position(a), before);
	}

	#[test]
	fn alpha_cools_until_settled_and_reheats() {
		let (_, mut state) = state();
		state.set_alpha_decay(0.5);
		let settled = Rc::new(Cell::new(false));
		let seen = settled.clone();
		state.subscribe_ticks(Box::new(move |snap: &TickSnapshot| seen.set(snap.settled)));

		for _ in 0..20 {
			state.tick(0.016);
		}
		assert!(state.alpha < ALPHA_MIN);
		assert!(settled.get());

		state.set_alpha(1.0);
		state.tick(0.016);
		assert!(!settled.get());
	}

	#[test]
	fn press_and_release_on_node_is_a_click() {
		let (graph, mut state) = state();
		state.set_running(false);
		let b = graph.lookup("B").unwrap();
		let (x, y) = screen_of(&state, b);

		state.press(x, y);
		state.pointer_move(x + 1.0, y);
		assert_eq!(state.release(), Some(b));
		assert_eq!(state.interaction, Interaction::Idle);
	}

	#[test]
	fn dragging_moves_node_and_is_not_a_click() {
		let (graph, mut state) = state();
		state.set_running(false);
		let b = graph.lookup("B").unwrap();
		let (x, y) = screen_of(&state, b);
		let (bx, by) = state.node_position(b).unwrap();

		state.press(x, y);
		state.pointer_move(x + 20.0, y + 10.0);
		assert!(matches!(state.interaction, Interaction::Dragging(_)));
		let (nx, ny) = state.node_position(b).unwrap();
		assert!((nx - (bx + 20.0)).abs() < 1e-3);
		assert!((ny - (by + 10.0)).abs() < 1e-3);
		assert_eq!(state.release(), None);
	}

	#[test]
	fn background_press_pans() {
		let (_, mut state) = state();
		state.press(5.0, 5.0);
		state.pointer_move(25.0, 15.0);
		assert_eq!(state.transform.x, 420.0);
		assert_eq!(state.transform.y, 310.0);
		assert_eq!(state.release(), None);
	}

	#[test]
	fn highlight_maps_link_styles_by_edge() {
		let (graph, mut state) = state();
		let mut selection = SelectionState::new();
		selection.toggle(graph.lookup("B").unwrap());
		state.set_highlight(selection.highlight(&graph));

		// A->B, A->C, B->D, C->D, D->D
		assert_eq!(
			state.link_styles,
			[
				Some(LinkStyle::Incoming),
				None,
				Some(LinkStyle::Outgoing),
				None,
				None
			]
		);
		assert!(state.has_selection());
	}

	#[test]
	fn hover_collects_neighbours_both_ways() {
		let (graph, mut state) = state();
		let b = graph.lookup("B").unwrap();
		state.set_hover(Some(b));

		assert!(state.is_highlighted(graph.lookup("A").unwrap()));
		assert!(state.is_highlighted(graph.lookup("D").unwrap()));
		assert!(!state.is_highlighted(graph.lookup("C").unwrap()));
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let (_, mut state) = state();
		for _ in 0..100 {
			state.zoom_at(400.0, 300.0, 1.1);
		}
		assert_eq!(state.transform.k, MAX_SCALE);
	}
}
