/// Longest step handed to damped or integrated motion; larger host gaps
/// (background tabs) are clamped so panels do not jump.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Elapsed and delta time for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
	/// Seconds since the first tick.
	pub elapsed: f32,
	/// Seconds since the previous tick, capped at [`MAX_FRAME_DELTA`].
	pub delta: f32,
}

/// Monotonic session clock fed with host timestamps in milliseconds.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
	origin_ms: Option<f64>,
	last_ms: f64,
}

impl AnimationClock {
	/// Clock that has not seen a timestamp yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances to `now_ms`. The first finite call defines time zero.
	/// Timestamps that go backwards are treated as no time passing.
	pub fn tick(&mut self, now_ms: f64) -> FrameTime {
		let Some(origin) = self.origin_ms else {
			if now_ms.is_finite() {
				self.origin_ms = Some(now_ms);
				self.last_ms = now_ms;
			}
			return FrameTime::default();
		};
		let now_ms = if now_ms.is_finite() { now_ms.max(self.last_ms) } else { self.last_ms };
		let delta_ms = now_ms - self.last_ms;
		self.last_ms = now_ms;
		FrameTime {
			elapsed: ((now_ms - origin) / 1000.0) as f32,
			delta: ((delta_ms / 1000.0) as f32).min(MAX_FRAME_DELTA),
		}
	}
}
