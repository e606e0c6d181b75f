//! friend-graph: Interactive friend network visualizer.
//!
//! Parses an edge list into a graph, counts its separate friend groups with a
//! depth-first search, and animates it with a force-directed layout drawn on a
//! canvas: one glowing bulb per person, colored by group, with zaps running
//! along every friendship.
//!
//! Everything except [`components`] and the page itself is headless and runs
//! without a browser.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MouseEvent, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod schedule;
pub mod session;
pub mod zap;

pub use components::force_graph::{ForceGraphCanvas, Theme};
pub use config::{Config, ThemeName};
pub use error::{GraphError, Result};
pub use graph::{Components, Graph, find_components, parse_edge_list, parse_json};
pub use session::{GraphSession, RenderBinding, Scene};

/// Input shown on first load.
pub const DEFAULT_INPUT: &str = "6 4\n1 2\n2 3\n4 5\n5 6";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("friend-graph: logging initialized");
}

/// Text of the `<script id="...">` element, if the page has one.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON, either `{ n, edges }` or a list of users with
/// `connections`.
fn load_graph_data() -> Option<Graph> {
	let json_text = script_text("graph-data")?;

	match parse_json(&json_text) {
		Ok(graph) => {
			info!(
				"friend-graph: loaded {} nodes, {} edges",
				graph.node_count(),
				graph.edge_count()
			);
			Some(graph)
		}
		Err(e) => {
			warn!("friend-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Load settings from a script element with id="graph-config".
fn load_config() -> Option<Config> {
	let json_text = script_text("graph-config")?;

	Config::from_json(&json_text)
		.inspect_err(|e| warn!("friend-graph: failed to parse config: {}", e))
		.ok()
}

/// Main application component.
/// Reads the edge list from a text area and renders the friend graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	// Script data is shown in the text area as its edge list.
	let (initial, text) = match load_graph_data() {
		Some(graph) => {
			let text = graph.to_string();
			(graph, text)
		}
		None => (
			parse_edge_list(DEFAULT_INPUT).unwrap_or_default(),
			DEFAULT_INPUT.to_string(),
		),
	};

	let (input, set_input) = signal(text);
	let (graph, set_graph) = signal(initial);
	let (error, set_error) = signal(None::<String>);
	let groups = Memo::new(move |_| graph.with(find_components).count());

	let visualize = move |_: MouseEvent| match parse_edge_list(&input.get()) {
		Ok(parsed) => {
			set_error.set(None);
			set_graph.set(parsed);
		}
		Err(e) => {
			warn!("friend-graph: rejected input: {}", e);
			set_error.set(Some(e.to_string()));
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Friend Network Visualizer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="container">
			<h1>"Friend Network Visualizer"</h1>
			<textarea
				rows="8"
				prop:value=move || input.get()
				on:input=move |ev| set_input.set(event_target_value(&ev))
			/>
			<button on:click=visualize>"Visualize"</button>
			{move || error.get().map(|e| view! { <p class="error">{e}</p> })}
			<h3>"Separate friend groups: " {move || groups.get()}</h3>
			<ForceGraphCanvas data=graph config=config />
		</div>
	}
}
