use log::{error, info};
use serde_json::Value;

use super::error::GraphError;
use super::graph::Graph;

/// Fetch and build the session graph. No retries.
pub async fn fetch_graph(url: &str) -> Result<Graph, GraphError> {
	info!("Fetching graph from {}", url);
	let response = ehttp::fetch_async(ehttp::Request::get(url))
		.await
		.map_err(|reason| GraphError::Fetch {
			url: url.to_owned(),
			reason,
		})?;

	if !response.ok {
		let reason = std::str::from_utf8(&response.bytes)
			.ok()
			.and_then(error_message)
			.unwrap_or_else(|| format!("{} {}", response.status, response.status_text));
		error!("Graph request failed: {}", reason);
		return Err(GraphError::Fetch {
			url: url.to_owned(),
			reason,
		});
	}

	let graph = Graph::from_json(decode_body(url, &response.bytes)?)?;
	info!(
		"Graph loaded: {} nodes, {} edges",
		graph.node_count(),
		graph.edge_count()
	);
	Ok(graph)
}

fn decode_body<'a>(url: &str, bytes: &'a [u8]) -> Result<&'a str, GraphError> {
	std::str::from_utf8(bytes).map_err(|err| {
		error!("Graph body from {} is not UTF-8: {}", url, err);
		GraphError::Fetch {
			url: url.to_owned(),
			reason: "invalid UTF-8 body".into(),
		}
	})
}

/// The graph server reports failures as `{"error": "..."}`.
fn error_message(body: &str) -> Option<String> {
	match serde_json::from_str::<Value>(body).ok()? {
		Value::Object(mut map) => match map.remove("error")? {
			Value::String(message) => Some(message),
			_ => None,
		},
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_error_body_is_reported() {
		assert_eq!(
			error_message(r#"{"error": "No graph.json found."}"#).as_deref(),
			Some("No graph.json found.")
		);
		assert_eq!(error_message("<html>"), None);
		assert_eq!(error_message(r#"{"error": 3}"#), None);
	}
	#[test]
	fn non_utf8_body_is_a_fetch_error() {
		assert_eq!(decode_body("/g", br#"{"A":[]}"#).unwrap(), r#"{"A":[]}"#);
		match decode_body("/g", &[b'{', 0xff, 0xfe, b'}']) {
			Err(GraphError::Fetch { url, reason }) => {
				assert_eq!(url, "/g");
				assert_eq!(reason, "invalid UTF-8 body");
			}
			other => panic!("expected fetch error, got {:?}", other),
		}
	}
}
