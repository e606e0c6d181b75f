//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse handlers for
//! node dragging. The first run of its effect builds a [`GraphSession`] drawing
//! through a [`CanvasBinding`]; every later change of `data` reloads it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::frame_loop::AnimationFrames;
use super::render::CanvasBinding;
use super::state::CanvasState;
use super::theme::Theme;
use crate::config::Config;
use crate::graph::Graph;
use crate::layout::Point;
use crate::session::GraphSession;

/// Renders an interactive friend graph on a `width` × `height` canvas.
///
/// Pass graph data via the reactive `data` signal. Each new value replaces the
/// previous layout entirely.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<Graph>,
	#[prop(optional)] config: Config,
	#[prop(default = 700.0)] width: f64,
	#[prop(default = 500.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let state_init = state.clone();

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let mut slot = state_init.borrow_mut();
		if slot.is_none() {
			*slot = create_state(&canvas, &config, width, height);
		}
		match slot.as_mut() {
			Some(state) => state.load(&graph),
			None => warn!("friend-graph: no 2d canvas context, nothing will be drawn"),
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state;
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_up();
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
			style="display: block; cursor: grab;"
		/>
	}
}

fn create_state(
	canvas: &HtmlCanvasElement,
	config: &Config,
	width: f64,
	height: f64,
) -> Option<CanvasState> {
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);

	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
	let scheduler = AnimationFrames::new()?;

	let theme = Theme::named(config.theme);
	let hit_radius = theme.node.radius;
	let binding = Rc::new(RefCell::new(CanvasBinding::new(ctx, theme, width, height)));
	let session = GraphSession::new(
		Rc::new(scheduler),
		binding,
		config.clone(),
		Point::new(width / 2.0, height / 2.0),
	);
	Some(CanvasState::new(session, hit_radius))
}

/// Event position relative to the canvas's top-left corner.
fn pointer_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
