use std::ops::Range;

use glam::Vec3;

use super::error::{SceneError, SceneResult};
use super::graph::GraphParams;

/// Tuning for the spherical technology network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	/// Number of slots on the sphere; content records repeat when there are fewer.
	pub node_count: usize,
	/// Sphere radius in world units.
	pub radius: f32,
	/// Nodes strictly closer than this are connected.
	pub threshold_distance: f32,
	/// Chance that an edge carries a pulse.
	pub pulse_probability: f64,
	/// Pulse cycles per second are drawn from this range.
	pub pulse_speed: Range<f32>,
	/// Pulse phase offsets are drawn from this range.
	pub pulse_phase: Range<f32>,
	/// Height of the per-node bob.
	pub float_amplitude: f32,
	/// Jitter angular speed, radians per second.
	pub jitter_frequency: f32,
	/// Peak jitter angle, radians.
	pub jitter_amplitude: f32,
	/// Group yaw speed, radians per second.
	pub group_spin: f32,
	/// Angular speed of the group wobble.
	pub wobble_frequency: f32,
	/// Peak roll of the group wobble, radians.
	pub wobble_amplitude: f32,
	/// Scale an active node grows to.
	pub active_scale: f32,
	/// Rate of the exponential approach toward the target scale.
	pub scale_damping: f32,
	/// Node radius in world units, for drawing and hit testing.
	pub node_size: f32,
	/// Pulse particle radius in world units.
	pub pulse_size: f32,
	/// Eye position of the network camera.
	pub camera_position: Vec3,
	/// Vertical field of view, degrees.
	pub camera_fov_deg: f32,
	/// Radians of group rotation per pixel dragged.
	pub drag_rotate_speed: f32,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			node_count: 25,
			radius: 18.0,
			threshold_distance: 15.0,
			pulse_probability: 0.3,
			pulse_speed: 0.5..1.5,
			pulse_phase: 0.0..2.0,
			float_amplitude: 0.5,
			jitter_frequency: 0.5,
			jitter_amplitude: 0.1,
			group_spin: 0.02,
			wobble_frequency: 0.05,
			wobble_amplitude: 0.02,
			active_scale: 1.2,
			scale_damping: 10.0,
			node_size: 2.5,
			pulse_size: 0.2,
			camera_position: Vec3::new(0.0, 0.0, 35.0),
			camera_fov_deg: 60.0,
			drag_rotate_speed: 0.01,
		}
	}
}

impl NetworkConfig {
	/// The subset the connection graph is built from.
	pub fn graph_params(&self) -> GraphParams {
		GraphParams {
			threshold_distance: self.threshold_distance,
			pulse_probability: self.pulse_probability,
			pulse_speed: self.pulse_speed.clone(),
			pulse_phase: self.pulse_phase.clone(),
		}
	}

	/// Rejects values the layout and motion code cannot use.
	pub fn validate(&self) -> SceneResult<()> {
		non_negative("network.radius", self.radius)?;
		non_negative("network.threshold_distance", self.threshold_distance)?;
		if !(0.0..=1.0).contains(&self.pulse_probability) {
			return Err(invalid("network.pulse_probability", "must be within [0, 1]"));
		}
		ordered_range("network.pulse_speed", &self.pulse_speed)?;
		ordered_range("network.pulse_phase", &self.pulse_phase)?;
		positive("network.active_scale", self.active_scale)?;
		fov("network.camera_fov_deg", self.camera_fov_deg)
	}
}

/// Tuning for the scrolling showcase of panels.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseConfig {
	/// Distance between neighbouring panels along X.
	pub spacing: f32,
	/// Group X offset at time zero; the far bound is one full span below it.
	pub start_offset: f32,
	/// Units per second toward -X.
	pub scroll_speed: f32,
	/// Scale an expanded panel grows to.
	pub active_scale: f32,
	/// Rate of the exponential approach for scale and yaw.
	pub damping: f32,
	/// Time multiplier for the idle float.
	pub float_speed: f32,
	/// Bob height multiplier for idle panels.
	pub float_intensity: f32,
	/// Sway angle multiplier for idle panels.
	pub float_rotation_intensity: f32,
	/// Screen glow opacity is `base + amplitude·sin(frequency·t)`.
	pub glow_base: f32,
	/// See `glow_base`.
	pub glow_amplitude: f32,
	/// See `glow_base`.
	pub glow_frequency: f32,
	/// Panel width in world units.
	pub panel_width: f32,
	/// Panel height in world units.
	pub panel_height: f32,
	/// Eye position of the showcase camera.
	pub camera_position: Vec3,
	/// Vertical field of view, degrees.
	pub camera_fov_deg: f32,
}

impl Default for ShowcaseConfig {
	fn default() -> Self {
		Self {
			spacing: 8.0,
			start_offset: 8.0,
			scroll_speed: 1.5,
			active_scale: 1.2,
			damping: 5.0,
			float_speed: 2.0,
			float_intensity: 0.5,
			float_rotation_intensity: 0.2,
			glow_base: 0.3,
			glow_amplitude: 0.1,
			glow_frequency: 3.0,
			panel_width: 4.5,
			panel_height: 3.2,
			camera_position: Vec3::new(0.0, 0.0, 14.0),
			camera_fov_deg: 45.0,
		}
	}
}

impl ShowcaseConfig {
	/// Rejects values that would stall or break the scroll.
	pub fn validate(&self) -> SceneResult<()> {
		positive("showcase.spacing", self.spacing)?;
		non_negative("showcase.scroll_speed", self.scroll_speed)?;
		non_negative("showcase.damping", self.damping)?;
		positive("showcase.active_scale", self.active_scale)?;
		fov("showcase.camera_fov_deg", self.camera_fov_deg)
	}
}

/// Both visualizations' settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
	/// Settings for the technology network.
	pub network: NetworkConfig,
	/// Settings for the project showcase.
	pub showcase: ShowcaseConfig,
}

impl SceneConfig {
	/// Validates both parts; the first failure wins.
	pub fn validate(&self) -> SceneResult<()> {
		self.network.validate()?;
		self.showcase.validate()
	}
}

fn invalid(field: &'static str, reason: &str) -> SceneError {
	SceneError::InvalidConfig {
		field,
		reason: reason.into(),
	}
}

fn non_negative(field: &'static str, value: f32) -> SceneResult<()> {
	if value.is_finite() && value >= 0.0 {
		Ok(())
	} else {
		Err(invalid(field, &format!("expected a finite value >= 0, got {value}")))
	}
}

fn positive(field: &'static str, value: f32) -> SceneResult<()> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(invalid(field, &format!("expected a finite value > 0, got {value}")))
	}
}

fn ordered_range(field: &'static str, range: &Range<f32>) -> SceneResult<()> {
	if range.start.is_finite() && range.end.is_finite() && range.start <= range.end {
		Ok(())
	} else {
		Err(invalid(field, "range bounds must be finite and ordered"))
	}
}

fn fov(field: &'static str, degrees: f32) -> SceneResult<()> {
	if degrees > 0.0 && degrees < 180.0 {
		Ok(())
	} else {
		Err(invalid(field, "field of view must be between 0 and 180 degrees"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		assert_eq!(SceneConfig::default().validate(), Ok(()));
	}

	#[test]
	fn rejects_out_of_range_values() {
		let mut config = SceneConfig::default();
		config.network.pulse_probability = 1.5;
		assert!(matches!(
			config.validate(),
			Err(SceneError::InvalidConfig { field: "network.pulse_probability", .. })
		));

		let mut config = SceneConfig::default();
		config.showcase.spacing = 0.0;
		assert!(matches!(
			config.validate(),
			Err(SceneError::InvalidConfig { field: "showcase.spacing", .. })
		));

		let mut config = SceneConfig::default();
		config.network.pulse_speed = 2.0..1.0;
		assert!(config.validate().is_err());
	}
}
