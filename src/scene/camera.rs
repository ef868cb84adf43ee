use glam::Vec3;

/// A point projected onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
	/// Canvas pixels from the left edge.
	pub x: f64,
	/// Canvas pixels from the top edge.
	pub y: f64,
	/// Pixels per world unit at this depth.
	pub scale: f64,
	/// Distance in front of the camera.
	pub depth: f32,
}

/// Perspective camera looking down -Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Eye position in world space.
	pub position: Vec3,
	/// Vertical field of view, degrees.
	pub fov_deg: f32,
	/// Points at or closer than this depth are culled.
	pub near: f32,
}

impl Camera {
	/// Camera at `position` with the default near plane.
	pub fn new(position: Vec3, fov_deg: f32) -> Self {
		Self {
			position,
			fov_deg,
			near: 0.1,
		}
	}

	fn focal(&self, height: f64) -> f64 {
		let half = (self.fov_deg.to_radians() / 2.0) as f64;
		(height / 2.0) / half.tan()
	}

	/// Projects a world point to canvas pixels. `None` when behind the near plane.
	pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<ScreenPoint> {
		let rel = point - self.position;
		let depth = -rel.z;
		if !depth.is_finite() || depth <= self.near {
			return None;
		}
		let scale = self.focal(height) / depth as f64;
		Some(ScreenPoint {
			x: width / 2.0 + rel.x as f64 * scale,
			y: height / 2.0 - rel.y as f64 * scale,
			scale,
			depth,
		})
	}
}
