//! Canvas rendering for the force graph.
//!
//! [`CanvasBinding`] keeps the latest layout frame and redraws the whole scene
//! on every animation frame, in this order:
//! 1. Background gradient
//! 2. Edge lines, optionally dashed with a flowing offset
//! 3. Zap particles
//! 4. Node bulbs with glow, then labels
//! 5. Vignette

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::theme::{Color, Theme};
use crate::layout::{LayoutFrame, Link, Point};
use crate::session::{RenderBinding, Scene};
use crate::zap::ZapPoint;

/// Dash offset at `now` ms for a pattern flowing from source to target.
pub(crate) fn dash_offset(now: f64, speed: f64, (dash, gap): (f64, f64)) -> f64 {
	let period = dash + gap;
	if period <= 0.0 {
		return 0.0;
	}
	-((now * speed) % period)
}

/// Stroke color of `link`: the theme's fixed color, or the source's group color.
pub(crate) fn link_color(theme: &Theme, node_colors: &[Color], link: &Link) -> Color {
	theme
		.edge
		.color
		.or_else(|| node_colors.get(link.source).copied())
		.unwrap_or_else(|| theme.palette.get(0))
}

/// Draws a [`GraphSession`](crate::session::GraphSession) onto a 2D canvas.
pub struct CanvasBinding {
	ctx: CanvasRenderingContext2d,
	theme: Theme,
	width: f64,
	height: f64,
	labels: Vec<String>,
	node_colors: Vec<Color>,
	positions: Vec<Point>,
	links: Vec<Link>,
}

impl CanvasBinding {
	pub fn new(ctx: CanvasRenderingContext2d, theme: Theme, width: f64, height: f64) -> Self {
		Self {
			ctx,
			theme,
			width,
			height,
			labels: Vec::new(),
			node_colors: Vec::new(),
			positions: Vec::new(),
			links: Vec::new(),
		}
	}

	fn draw(&self, now: f64, zaps: &[ZapPoint]) {
		self.draw_background();
		self.draw_edges(now);
		if self.theme.zap.enabled {
			self.draw_zaps(zaps);
		}
		self.draw_nodes();
		if self.theme.background.vignette > 0.0 {
			self.draw_vignette();
		}
	}

	fn draw_background(&self) {
		let ctx = &self.ctx;
		let background = &self.theme.background;
		let (w, h) = (self.width, self.height);

		let gradient = background
			.use_gradient
			.then(|| ctx.create_radial_gradient(w / 2.0, h / 2.0, 0.0, w / 2.0, h / 2.0, w.max(h) * 0.8))
			.and_then(Result::ok);
		match gradient {
			Some(gradient) => {
				let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
				let _ = gradient.add_color_stop(1.0, &background.color.to_css());
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
			}
			None => ctx.set_fill_style_str(&background.color.to_css()),
		}
		ctx.fill_rect(0.0, 0.0, w, h);
	}

	fn draw_vignette(&self) {
		let ctx = &self.ctx;
		let (w, h) = (self.width, self.height);
		let Ok(gradient) =
			ctx.create_radial_gradient(w / 2.0, h / 2.0, w.min(h) * 0.3, w / 2.0, h / 2.0, w.max(h) * 0.7)
		else {
			return;
		};

		let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
		let _ = gradient.add_color_stop(
			1.0,
			&format!("rgba(0, 0, 0, {})", self.theme.background.vignette),
		);
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.fill_rect(0.0, 0.0, w, h);
	}

	fn draw_edges(&self, now: f64) {
		let ctx = &self.ctx;
		let style = &self.theme.edge;

		ctx.set_line_width(style.width);
		ctx.set_global_alpha(style.opacity);
		match style.dash {
			Some(pattern) => {
				let _ = ctx.set_line_dash(&js_sys::Array::of2(
					&JsValue::from_f64(pattern.0),
					&JsValue::from_f64(pattern.1),
				));
				ctx.set_line_dash_offset(dash_offset(now, style.flow_speed, pattern));
			}
			None => {
				let _ = ctx.set_line_dash(&js_sys::Array::new());
			}
		}

		for link in &self.links {
			let (Some(a), Some(b)) = (self.positions.get(link.source), self.positions.get(link.target))
			else {
				continue;
			};
			let color = link_color(&self.theme, &self.node_colors, link).to_css();
			ctx.set_stroke_style_str(&color);
			if style.glow_blur > 0.0 {
				ctx.set_shadow_color(&color);
				ctx.set_shadow_blur(style.glow_blur);
			}
			ctx.begin_path();
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
			ctx.stroke();
		}

		ctx.set_shadow_blur(0.0);
		ctx.set_global_alpha(1.0);
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	fn draw_zaps(&self, zaps: &[ZapPoint]) {
		let ctx = &self.ctx;
		let style = &self.theme.zap;

		for zap in zaps {
			let Some(link) = self.links.get(zap.edge) else {
				continue;
			};
			let color = link_color(&self.theme, &self.node_colors, link).to_css();
			ctx.set_fill_style_str(&color);
			ctx.set_shadow_color(&color);
			ctx.set_shadow_blur(style.glow_blur);
			ctx.begin_path();
			let _ = ctx.arc(zap.position.x, zap.position.y, style.radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
		ctx.set_shadow_blur(0.0);
	}

	fn draw_nodes(&self) {
		let ctx = &self.ctx;
		let style = &self.theme.node;
		let radius = style.radius;

		// Pass 1: bulbs
		for (i, p) in self.positions.iter().enumerate() {
			let color = self
				.node_colors
				.get(i)
				.copied()
				.unwrap_or_else(|| self.theme.palette.get(0));

			if style.glow_blur > 0.0 {
				ctx.set_shadow_color(&color.to_css());
				ctx.set_shadow_blur(style.glow_blur);
			}

			let fill = ctx.create_radial_gradient(
				p.x - radius * 0.3,
				p.y - radius * 0.3,
				0.0,
				p.x,
				p.y,
				radius,
			);
			match fill {
				Ok(gradient) => {
					let _ = gradient.add_color_stop(0.0, &color.lighten(0.5).to_css());
					let _ = gradient.add_color_stop(0.7, &color.to_css());
					let _ = gradient.add_color_stop(1.0, &color.to_css());
					#[allow(deprecated)]
					ctx.set_fill_style(&gradient);
				}
				Err(_) => ctx.set_fill_style_str(&color.to_css()),
			}
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
			ctx.fill();
			ctx.set_shadow_blur(0.0);

			if style.border_width > 0.0 {
				ctx.set_stroke_style_str(&style.border_color.to_css());
				ctx.set_line_width(style.border_width);
				ctx.stroke();
			}
		}

		// Pass 2: labels on top of every bulb
		let label = &self.theme.label;
		ctx.set_fill_style_str(&label.color.to_css());
		ctx.set_font(label.font);
		ctx.set_text_align("center");
		for (text, p) in self.labels.iter().zip(&self.positions) {
			let _ = ctx.fill_text(text, p.x, p.y + label.offset_y);
		}
	}
}

impl RenderBinding for CanvasBinding {
	fn on_load(&mut self, scene: &Scene<'_>) {
		self.labels = scene.labels.to_vec();
		self.node_colors = (0..scene.labels.len())
			.map(|i| self.theme.component_color(scene.component_at(i)))
			.collect();
		self.positions.clear();
		self.links.clear();
	}

	fn on_tick(&mut self, frame: &LayoutFrame<'_>) {
		self.positions.clear();
		self.positions.extend(frame.positions());
		if self.links.len() != frame.links.len() {
			self.links = frame.links.to_vec();
		}
	}

	fn on_zap_frame(&mut self, now: f64, zaps: &[ZapPoint]) {
		self.draw(now, zaps);
	}
}
