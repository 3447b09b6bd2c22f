//! Graph model and the queries the explorer runs against it.

mod config;
mod error;
pub mod fuzzy;
mod graph;
mod load;
mod navigation;
mod path;
mod query;
mod selection;

pub use config::ExplorerConfig;
pub use error::{GraphError, PathField, QueryError};
pub use graph::{Edge, EdgeId, Graph, NodeId};
pub use load::fetch_graph;
pub use navigation::NavigationSequencer;
pub use path::{Path, find_path, find_path_by_name};
pub use query::{resolve_path_request, resolve_search};
pub use selection::{Highlight, LinkHighlight, LinkStyle, SelectionState};
