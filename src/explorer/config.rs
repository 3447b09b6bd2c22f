use log::info;

/// Where the graph payload is served unless overridden.
pub const DEFAULT_GRAPH_URL: &str = "/api/graph";

/// Tunables for the explorer page.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
	/// Address of the adjacency payload.
	pub graph_url: String,
	/// Typed characters needed before autocomplete suggests anything.
	pub min_query_len: usize,
	/// 0 shows every match.
	pub max_suggestions: usize,
	/// Time between successive steps of a path walk.
	pub step_delay_ms: f64,
	/// Length of the zoom animation onto a node.
	pub focus_duration_ms: f64,
	/// Initial cooling rate of the layout simulation.
	pub alpha_decay: f64,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			graph_url: DEFAULT_GRAPH_URL.into(),
			min_query_len: 3,
			max_suggestions: 12,
			step_delay_ms: 1500.0,
			focus_duration_ms: 1000.0,
			alpha_decay: 0.0228,
		}
	}
}

impl ExplorerConfig {
	/// Defaults, with `?graph=<url>` in the page address overriding the graph URL.
	pub fn from_location() -> Self {
		let mut config = Self::default();
		let search = web_sys::window().and_then(|w| w.location().search().ok());
		if let Some(url) = search.as_deref().and_then(graph_param) {
			info!("Graph URL overridden: {}", url);
			config.graph_url = url;
		}
		config
	}
}

fn graph_param(search: &str) -> Option<String> {
	web_sys::UrlSearchParams::new_with_str(search)
		.ok()?
		.get("graph")
		.filter(|url| !url.is_empty())
}
