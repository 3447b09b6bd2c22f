use thiserror::Error;

/// The graph payload could not be turned into a [`Graph`](super::Graph).
///
/// Fatal: nothing can be explored without a graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// Payload did not parse as JSON.
	#[error("graph payload is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// Top level is not a JSON object.
	#[error("graph payload must be an object mapping names to lists of names")]
	NotAnObject,

	/// An adjacency value is not an array.
	#[error("adjacency for {key:?} must be a list of names")]
	NotAList {
		/// Source node whose adjacency is malformed.
		key: String,
	},

	/// An adjacency array holds something other than a string.
	#[error("adjacency for {key:?} has a non-name entry at position {index}")]
	NotAName {
		/// Source node whose adjacency is malformed.
		key: String,
		/// Position of the offending entry.
		index: usize,
	},

	/// The request failed or the server answered with an error.
	#[error("failed to fetch graph from {url}: {reason}")]
	Fetch {
		/// Address the graph was requested from.
		url: String,
		/// Transport error, server message or status line.
		reason: String,
	},
}

/// Which path field a request left blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathField {
	/// The node a path begins at.
	Start,
	/// The node a path ends at.
	End,
}

impl std::fmt::Display for PathField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PathField::Start => f.write_str("start"),
			PathField::End => f.write_str("end"),
		}
	}
}

/// Recoverable query failures, shown to the user as a notice.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
	/// The search box was blank.
	#[error("please enter a node name")]
	EmptySearch,

	/// A path field was blank.
	#[error("please enter the {0} node")]
	EmptyInput(PathField),

	/// No node carries this name.
	#[error("no node named {0:?}")]
	NotFound(String),

	/// Both nodes exist but no directed walk joins them.
	#[error("no path from {start:?} to {end:?}")]
	NoPath {
		/// Requested start node.
		start: String,
		/// Requested end node.
		end: String,
	},
}
