use leptos::prelude::*;
use log::debug;
use web_sys::{Event, MouseEvent};

use super::force_graph::{EngineHandle, LayoutEngine};

/// Freeze/run toggle, alpha decay input and reheat button.
#[component]
pub fn SimulationControls(
	engine: EngineHandle,
	running: RwSignal<bool>,
	alpha_decay: RwSignal<f64>,
	#[prop(into)] settled: Signal<bool>,
) -> impl IntoView {
	let engine_run = engine.clone();
	let toggle_running = move |_: MouseEvent| {
		let next = !running.get_untracked();
		running.set(next);
		if let Some(ref mut s) = *engine_run.borrow_mut() {
			s.set_running(next);
		}
		debug!("Simulation {}", if next { "running" } else { "frozen" });
	};

	let engine_decay = engine.clone();
	let set_decay = move |ev: Event| {
		let Ok(value) = event_target_value(&ev).parse::<f64>() else {
			return;
		};
		alpha_decay.set(value);
		if let Some(ref mut s) = *engine_decay.borrow_mut() {
			s.set_alpha_decay(value);
		}
	};

	let reheat = move |_: MouseEvent| {
		running.set(true);
		if let Some(ref mut s) = *engine.borrow_mut() {
			s.set_running(true);
			s.set_alpha(1.0);
		}
		debug!("Simulation reheated");
	};

	view! {
		<div class="simulation-controls">
			<button on:click=toggle_running>
				{move || if running.get() { "Freeze" } else { "Run" }}
			</button>
			<label>
				"Decay "
				<input
					type="number"
					min="0"
					max="1"
					step="0.001"
					prop:value=move || alpha_decay.get().to_string()
					on:change=set_decay
				/>
			</label>
			<button on:click=reheat>"Reheat"</button>
			<span class="sim-status">
				{move || if settled.get() { "settled" } else { "simulating" }}
			</span>
		</div>
	}
}
