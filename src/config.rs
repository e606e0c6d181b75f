//! Runtime configuration.
//!
//! Every field has a default, so a page may ship a partial JSON object (or
//! nothing at all) in its `graph-config` script element.

use serde::Deserialize;

use crate::layout::LayoutConfig;
use crate::zap::ZapConfig;

/// Visual preset for the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Dark background, neon bulbs with glow, labels under each bulb.
	#[default]
	Bulbs,
	/// Light background, flat category colors, labels centered on nodes.
	Friends,
}

/// Settings for a [`GraphSession`](crate::session::GraphSession) and its canvas.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Force parameters and cooling schedule.
	pub layout: LayoutConfig,
	pub zap: ZapConfig,
	/// Canvas preset.
	pub theme: ThemeName,
}

impl Config {
	/// Reads a possibly partial JSON object. Missing fields keep their defaults.
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		serde_json::from_str(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(Config::from_json("{}").unwrap(), Config::default());
	}

	#[test]
	fn partial_sections_keep_other_defaults() {
		let config = Config::from_json(
			r#"{ "layout": { "charge": -120, "collide_radius": null }, "theme": "friends" }"#,
		)
		.unwrap();
		assert_eq!(config.layout.charge, -120.0);
		assert_eq!(config.layout.collide_radius, None);
		assert_eq!(config.layout.link_distance, 120.0);
		assert_eq!(config.zap, ZapConfig::default());
		assert_eq!(config.theme, ThemeName::Friends);
	}

	#[test]
	fn zap_step_is_configurable() {
		let config = Config::from_json(r#"{ "zap": { "step": 0.01 } }"#).unwrap();
		assert_eq!(config.zap.step, 0.01);
	}

	#[test]
	fn defaults_cool_in_three_hundred_ticks() {
		let layout = Config::default().layout;
		let ticks = (layout.alpha_min.ln() / (1.0 - layout.alpha_decay).ln()).round();
		assert_eq!(ticks, 300.0);
		assert_eq!(layout.velocity_decay, 0.4);
		assert_eq!(layout.collide_radius, Some(40.0));
	}

	#[test]
	fn unknown_theme_is_rejected() {
		assert!(Config::from_json(r#"{ "theme": "sepia" }"#).is_err());
	}
}
