//! Visual theming for the force graph.
//!
//! Provides color palettes and the visual style of every drawn element.

use crate::config::ThemeName;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// `0xRRGGBB` literal.
	pub const fn hex(rgb: u32) -> Self {
		Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors assigned to components, cycling when there are more components
/// than colors.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Saturated bulb colors.
	pub fn neon() -> Self {
		Self {
			colors: vec![
				Color::hex(0x00ffff), // Cyan
				Color::hex(0xff00ff), // Magenta
				Color::hex(0xffd700), // Gold
				Color::hex(0xff4500), // Orange red
				Color::hex(0xadff2f), // Green yellow
				Color::hex(0x00ced1), // Dark turquoise
			],
		}
	}

	/// The classic ten categorical colors.
	pub fn category10() -> Self {
		Self {
			colors: vec![
				Color::hex(0x1f77b4),
				Color::hex(0xff7f0e),
				Color::hex(0x2ca02c),
				Color::hex(0xd62728),
				Color::hex(0x9467bd),
				Color::hex(0x8c564b),
				Color::hex(0xe377c2),
				Color::hex(0x7f7f7f),
				Color::hex(0xbcbd22),
				Color::hex(0x17becf),
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		match self.colors.len() {
			0 => Color::rgb(128, 128, 128),
			len => self.colors[index % len],
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Fixed stroke color. `None` takes the source node's component color.
	pub color: Option<Color>,
	pub width: f64,
	pub opacity: f64,
	/// Shadow blur of the glow, 0 disables it.
	pub glow_blur: f64,
	/// Dash and gap lengths. `None` draws solid lines.
	pub dash: Option<(f64, f64)>,
	/// Dash offset travelled per millisecond.
	pub flow_speed: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub radius: f64,
	/// Shadow blur of the glow, 0 disables it.
	pub glow_blur: f64,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	pub border_color: Color,
}

/// Zap particle style. Zaps take their edge's color.
#[derive(Clone, Debug)]
pub struct ZapStyle {
	pub enabled: bool,
	pub radius: f64,
	pub glow_blur: f64,
}

#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	pub font: &'static str,
	/// Baseline offset from the node center.
	pub offset_y: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: ThemeName,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub zap: ZapStyle,
	pub label: LabelStyle,
	pub palette: NodePalette,
}

impl Theme {
	pub fn named(name: ThemeName) -> Self {
		match name {
			ThemeName::Bulbs => Self::bulbs(),
			ThemeName::Friends => Self::friends(),
		}
	}

	/// Glowing neon bulbs on a dark board, wired in their group's color (default)
	pub fn bulbs() -> Self {
		Self {
			name: ThemeName::Bulbs,
			background: BackgroundStyle {
				color: Color::rgb(10, 12, 20),
				color_secondary: Color::rgb(24, 28, 44),
				use_gradient: true,
				vignette: 0.25,
			},
			edge: EdgeStyle {
				color: None,
				width: 2.0,
				opacity: 0.8,
				glow_blur: 4.0,
				dash: None,
				flow_speed: 0.0,
			},
			node: NodeStyle {
				radius: 18.0,
				glow_blur: 15.0,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
			},
			zap: ZapStyle {
				enabled: true,
				radius: 4.0,
				glow_blur: 6.0,
			},
			label: LabelStyle {
				color: Color::rgb(255, 255, 255),
				font: "12px sans-serif",
				offset_y: 35.0,
			},
			palette: NodePalette::neon(),
		}
	}

	/// Light sheet with flowing dashed links and outlined group-colored nodes
	pub fn friends() -> Self {
		Self {
			name: ThemeName::Friends,
			background: BackgroundStyle {
				color: Color::hex(0xf9f9f9),
				color_secondary: Color::hex(0xf9f9f9),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Some(Color::hex(0x38bdf8)),
				width: 2.0,
				opacity: 0.8,
				glow_blur: 0.0,
				dash: Some((5.0, 5.0)),
				// 10px every two seconds.
				flow_speed: 0.005,
			},
			node: NodeStyle {
				radius: 18.0,
				glow_blur: 8.0,
				border_width: 1.5,
				border_color: Color::rgb(255, 255, 255),
			},
			zap: ZapStyle {
				enabled: true,
				radius: 4.0,
				glow_blur: 6.0,
			},
			label: LabelStyle {
				color: Color::rgb(255, 255, 255),
				font: "12px sans-serif",
				offset_y: 5.0,
			},
			palette: NodePalette::category10(),
		}
	}

	/// Color of the component at `index`.
	pub fn component_color(&self, index: usize) -> Color {
		self.palette.get(index)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::bulbs()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_cycles_by_component() {
		let palette = NodePalette::neon();
		assert_eq!(palette.get(0), Color::hex(0x00ffff));
		assert_eq!(palette.get(6), palette.get(0));
		assert_eq!(palette.get(13), palette.get(1));
		assert_eq!(NodePalette { colors: Vec::new() }.get(3), Color::rgb(128, 128, 128));
	}

	#[test]
	fn css_strings() {
		assert_eq!(Color::hex(0x38bdf8).to_css(), "#38bdf8");
		assert_eq!(Color::rgb(255, 0, 0).with_alpha(0.5).to_css(), "rgba(255, 0, 0, 0.5)");
		assert_eq!(Color::rgb(0, 0, 0).lighten(1.0), Color::rgb(255, 255, 255));
	}

	#[test]
	fn presets_match_their_names() {
		assert_eq!(Theme::named(ThemeName::Bulbs).name, ThemeName::Bulbs);
		assert_eq!(Theme::named(ThemeName::Friends).name, ThemeName::Friends);
		assert_eq!(Theme::default().name, ThemeName::Bulbs);
	}
}
