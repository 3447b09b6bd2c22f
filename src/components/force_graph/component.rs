use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::{LayoutEngine, TickSnapshot};
use crate::explorer::{Graph, Highlight, NodeId};

/// Shared slot for the engine; filled once the canvas mounts.
pub type EngineHandle = Rc<RefCell<Option<ForceGraphState>>>;

/// Called every frame before physics, with the elapsed milliseconds.
pub type FrameHook = Rc<dyn Fn(&mut dyn LayoutEngine, f64)>;

/// Observes every engine tick.
pub type TickHook = Rc<dyn Fn(&TickSnapshot)>;

/// Frames longer than this are treated as a stall and not fed to physics.
const MAX_STEP_S: f64 = 0.1;

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

#[component]
pub fn ForceGraphCanvas(
	graph: Arc<Graph>,
	engine: EngineHandle,
	#[prop(into)] highlight: Signal<Highlight>,
	#[prop(into)] on_node_click: Callback<NodeId>,
	#[prop(optional)] on_frame: Option<FrameHook>,
	#[prop(optional)] on_tick: Option<TickHook>,
	#[prop(default = 0.0228)] alpha_decay: f64,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(engine.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let mut state = ForceGraphState::new(&graph, w, h, alpha_decay);
		state.set_highlight(highlight.get_untracked());
		if let Some(hook) = on_tick.clone() {
			state.subscribe_ticks(Box::new(move |snapshot: &TickSnapshot| hook(snapshot)));
		}
		*state_init.borrow_mut() = Some(state);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner, on_frame) =
			(state_init.clone(), animate_init.clone(), on_frame.clone());
		let mut last_frame = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt_ms = (now - last_frame).max(0.0);
			last_frame = now;
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if let Some(hook) = &on_frame {
					hook(s, dt_ms);
				}
				s.tick((dt_ms / 1000.0).min(MAX_STEP_S) as f32);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_hl = engine.clone();
	Effect::new(move |_| {
		let next = highlight.get();
		if let Some(ref mut s) = *state_hl.borrow_mut() {
			s.set_highlight(next);
		}
	});

	let state_md = engine.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = engine.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = engine.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		// the engine borrow is released before handing control to the page
		if let Some(node) = clicked {
			on_node_click.run(node);
		}
	};

	let state_ml = engine.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = engine;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
