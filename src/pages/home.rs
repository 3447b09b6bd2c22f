use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{info, warn};
use web_sys::MouseEvent;

use crate::components::controls::SimulationControls;
use crate::components::force_graph::{
	EngineHandle, ForceGraphCanvas, FrameHook, LayoutEngine, TickHook, TickSnapshot,
};
use crate::components::search::AutocompleteInput;
use crate::explorer::{
	ExplorerConfig, Graph, NavigationSequencer, NodeId, QueryError, SelectionState, fetch_graph,
	find_path, resolve_path_request, resolve_search,
};

/// Show a recoverable problem as a blocking notice.
fn notify(err: &QueryError) {
	warn!("{}", err);
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&err.to_string());
	}
}

/// Default Home Page: loads the graph, then hands over to the explorer.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let url = config.graph_url;
	let graph = LocalResource::new(move || {
		let url = url.clone();
		async move { fetch_graph(&url).await.map(Arc::new).map_err(Arc::new) }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<Suspense fallback=|| view! { <p class="loading">"Loading graph..."</p> }>
				{move || Suspend::new(async move {
					graph.await.map(|graph| view! { <Explorer graph=graph /> })
				})}
			</Suspense>
		</ErrorBoundary>
	}
}

#[component]
fn Explorer(graph: Arc<Graph>) -> impl IntoView {
	let config = use_context::<ExplorerConfig>().unwrap_or_default();
	let names: Arc<Vec<String>> = Arc::new(graph.names().map(str::to_owned).collect());
	let (node_count, edge_count) = (graph.node_count(), graph.edge_count());

	let selection = RwSignal::new(SelectionState::new());
	let search = RwSignal::new(String::new());
	let start = RwSignal::new(String::new());
	let end = RwSignal::new(String::new());
	let running = RwSignal::new(true);
	let alpha_decay = RwSignal::new(config.alpha_decay);
	let settled = RwSignal::new(false);
	let engine: EngineHandle = Rc::new(RefCell::new(None));
	let sequencer = Rc::new(RefCell::new(NavigationSequencer::new()));

	let highlight = {
		let graph = graph.clone();
		Signal::derive(move || selection.with(|s| s.highlight(&graph)))
	};

	let on_node_click = {
		let graph = graph.clone();
		Callback::new(move |node: NodeId| {
			let mut selected = false;
			selection.update(|s| selected = s.toggle(node));
			info!(
				"{} {}",
				if selected { "Selected" } else { "Deselected" },
				graph.name(node)
			);
		})
	};

	let on_frame: FrameHook = {
		let (sequencer, focus_ms) = (sequencer.clone(), config.focus_duration_ms);
		Rc::new(move |engine: &mut dyn LayoutEngine, dt_ms: f64| {
			sequencer
				.borrow_mut()
				.advance(dt_ms, |node| engine.zoom_to(node, focus_ms));
		})
	};

	let on_tick: TickHook = Rc::new(move |snapshot: &TickSnapshot| {
		if settled.get_untracked() != snapshot.settled {
			settled.set(snapshot.settled);
		}
	});

	let run_search: Rc<dyn Fn()> = {
		let (graph, engine, sequencer) = (graph.clone(), engine.clone(), sequencer.clone());
		let focus_ms = config.focus_duration_ms;
		Rc::new(move || match resolve_search(&graph, &search.get_untracked()) {
			Ok(node) => {
				info!("Found {}", graph.name(node));
				selection.update(|s| s.replace([node]));
				sequencer.borrow_mut().cancel();
				if let Some(ref mut s) = *engine.borrow_mut() {
					s.zoom_to(node, focus_ms);
				}
			}
			Err(err) => notify(&err),
		})
	};

	let run_path: Rc<dyn Fn()> = {
		let (graph, sequencer) = (graph.clone(), sequencer.clone());
		let step_delay_ms = config.step_delay_ms;
		Rc::new(move || {
			let request = resolve_path_request(&graph, &start.get_untracked(), &end.get_untracked());
			let (from, to) = match request {
				Ok(ends) => ends,
				Err(err) => return notify(&err),
			};
			let Some(path) = find_path(&graph, from, to) else {
				return notify(&QueryError::NoPath {
					start: graph.name(from).to_owned(),
					end: graph.name(to).to_owned(),
				});
			};
			info!("Path: {}", path.names(&graph).join(" -> "));
			selection.update(|s| s.replace(path.nodes().iter().copied()));
			sequencer.borrow_mut().start(path, step_delay_ms);
		})
	};

	let clear = {
		let sequencer = sequencer.clone();
		move |_: MouseEvent| {
			sequencer.borrow_mut().cancel();
			selection.update(SelectionState::clear);
		}
	};

	let (search_click, path_click) = (run_search.clone(), run_path.clone());

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas
				graph=graph
				engine=engine.clone()
				highlight=highlight
				on_node_click=on_node_click
				on_frame=on_frame
				on_tick=on_tick
				alpha_decay=config.alpha_decay
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Concept Graph"</h1>
				<p class="subtitle">
					"Click nodes to select. Drag to reposition. Scroll to zoom. Drag background to pan."
				</p>

				<div class="search-row">
					<AutocompleteInput
						value=search
						names=names.clone()
						placeholder="Search node"
						on_submit=run_search
					/>
					<button on:click=move |_: MouseEvent| search_click()>"Search"</button>
				</div>

				<div class="path-row">
					<AutocompleteInput value=start names=names.clone() placeholder="Start node" />
					<AutocompleteInput
						value=end
						names=names
						placeholder="End node"
						on_submit=run_path
					/>
					<button on:click=move |_: MouseEvent| path_click()>"Find path"</button>
				</div>

				<SimulationControls
					engine=engine
					running=running
					alpha_decay=alpha_decay
					settled=settled
				/>

				<p class="status">
					{format!("{} nodes, {} edges", node_count, edge_count)}
					{move || format!(", {} selected", selection.with(SelectionState::len))}
					<button on:click=clear>"Clear selection"</button>
				</p>
			</div>
		</div>
	}
}
