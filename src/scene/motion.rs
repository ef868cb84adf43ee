//! Time-driven transforms. Everything here is a function of elapsed time and
//! index, except [`RingScroll`] and [`damp`], which integrate frame deltas.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};

use super::config::{NetworkConfig, ShowcaseConfig};
use super::error::{SceneError, SceneResult};
use super::types::Pulse;

/// Offset and rotation applied on top of a node's base position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeMotion {
	/// Displacement from the base position.
	pub offset: Vec3,
	/// Euler angles (x, y, z) in radians.
	pub rotation: Vec3,
}

impl NodeMotion {
	/// No displacement, no rotation.
	pub const IDLE: Self = Self {
		offset: Vec3::ZERO,
		rotation: Vec3::ZERO,
	};

	fn checked(self, index: usize) -> SceneResult<Self> {
		if self.offset.is_finite() && self.rotation.is_finite() {
			Ok(self)
		} else {
			Err(SceneError::NonFiniteTransform { index })
		}
	}
}

/// Floating bob on Y plus a small rotational jitter, phase-shifted by `index`.
pub fn node_float(index: usize, elapsed: f32, config: &NetworkConfig) -> SceneResult<NodeMotion> {
	let phase = index as f32;
	let jitter_t = elapsed * config.jitter_frequency + phase;
	NodeMotion {
		offset: Vec3::new(0.0, (elapsed + phase).sin() * config.float_amplitude, 0.0),
		rotation: Vec3::new(
			jitter_t.sin() * config.jitter_amplitude,
			jitter_t.cos() * config.jitter_amplitude,
			0.0,
		),
	}
	.checked(index)
}

/// Slow continuous spin of the whole network with a faint roll wobble.
pub fn group_rotation(elapsed: f32, config: &NetworkConfig) -> Quat {
	let yaw = elapsed * config.group_spin;
	let roll = (elapsed * config.wobble_frequency).sin() * config.wobble_amplitude;
	Quat::from_euler(EulerRot::YXZ, yaw, 0.0, roll)
}

/// Gentle bob and sway for an idle showcase panel. Returns the idle transform
/// when `frozen`.
pub fn panel_float(index: usize, elapsed: f32, frozen: bool, config: &ShowcaseConfig) -> SceneResult<NodeMotion> {
	if frozen {
		return Ok(NodeMotion::IDLE);
	}
	// Panels get a fixed per-index phase so neighbours do not bob in lockstep.
	let t = (elapsed + index as f32 * 1.7) * config.float_speed / 4.0;
	let sway = config.float_rotation_intensity;
	NodeMotion {
		offset: Vec3::new(0.0, t.sin() / 10.0 * config.float_intensity, 0.0),
		rotation: Vec3::new(t.cos() / 8.0 * sway, t.sin() / 8.0 * sway, t.sin() / 20.0 * sway),
	}
	.checked(index)
}

/// Opacity of the glow over an expanded panel's screen.
pub fn screen_glow(elapsed: f32, config: &ShowcaseConfig) -> f32 {
	config.glow_base + (elapsed * config.glow_frequency).sin() * config.glow_amplitude
}

/// Position and opacity of a pulse at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseState {
	/// Cycle parameter in `[0, 1)`.
	pub t: f32,
	/// Point on the edge, before group rotation.
	pub position: Vec3,
	/// `sin(t·π)`.
	pub opacity: f32,
}

/// Cycle parameter of a pulse, always in `[0, 1)`.
pub fn pulse_phase(elapsed: f32, speed: f32, phase_offset: f32) -> f32 {
	let t = (elapsed * speed + phase_offset).rem_euclid(1.0);
	// rem_euclid can round up to exactly 1.0 for tiny negative inputs.
	if t >= 1.0 { 0.0 } else { t }
}

/// Linear interpolation along the edge, fading in and out with `sin(t·π)`.
pub fn pulse_state(pulse: &Pulse, start: Vec3, end: Vec3, elapsed: f32) -> SceneResult<PulseState> {
	let t = pulse_phase(elapsed, pulse.speed, pulse.phase_offset);
	let state = PulseState {
		t,
		position: start.lerp(end, t),
		opacity: (t * PI).sin().max(0.0),
	};
	if state.position.is_finite() && state.opacity.is_finite() {
		Ok(state)
	} else {
		Err(SceneError::NonFinitePulse {
			a: pulse.edge.a,
			b: pulse.edge.b,
		})
	}
}

/// Exponential approach of `current` toward `target`. The step factor is capped
/// at 1 so a long frame lands on the target rather than overshooting.
pub fn damp(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
	let k = (rate * delta).clamp(0.0, 1.0);
	current + (target - current) * k
}

/// Yaw that turns an object at `object` to face a viewer at `viewer` (rotation about +Y).
pub fn facing_yaw(viewer: Vec3, object: Vec3) -> f32 {
	let (dx, dz) = (viewer.x - object.x, viewer.z - object.z);
	if dx == 0.0 && dz == 0.0 { 0.0 } else { dx.atan2(dz) }
}

/// Infinite auto-scroll of a row of slots. The offset starts at `start` and
/// moves toward -X; once it has travelled a full span it wraps back by that span.
#[derive(Clone, Debug, PartialEq)]
pub struct RingScroll {
	start: f32,
	span: f32,
	speed: f32,
	travelled: f32,
}

impl RingScroll {
	/// Scroll for `count` slots, parked at the start offset.
	pub fn new(count: usize, config: &ShowcaseConfig) -> Self {
		Self {
			start: config.start_offset,
			span: count as f32 * config.spacing,
			speed: config.scroll_speed,
			travelled: 0.0,
		}
	}

	/// Advances by `delta` seconds unless `paused`.
	pub fn advance(&mut self, delta: f32, paused: bool) {
		if paused || self.span <= 0.0 || !delta.is_finite() || delta <= 0.0 {
			return;
		}
		self.travelled = (self.travelled + delta * self.speed).rem_euclid(self.span);
	}

	/// Current group offset along X, always within `(start - span, start]`.
	pub fn offset(&self) -> f32 {
		self.start - self.travelled
	}

	/// Back to the initial offset.
	pub fn restart(&mut self) {
		self.travelled = 0.0;
	}
}
