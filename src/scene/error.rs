use thiserror::Error;

/// Errors raised by the scene core and its canvas adapters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
	/// A configuration value is outside its usable range.
	#[error("invalid config `{field}`: {reason}")]
	InvalidConfig {
		/// Name of the offending field.
		field: &'static str,
		/// What is wrong with it.
		reason: String,
	},

	/// A node or panel transform came out as NaN or infinite.
	#[error("non-finite transform for node {index}")]
	NonFiniteTransform {
		/// Layout index of the node whose update was skipped.
		index: usize,
	},

	/// A pulse position or opacity came out as NaN or infinite.
	#[error("non-finite pulse on edge {a}-{b}")]
	NonFinitePulse {
		/// Smaller endpoint of the pulse's edge.
		a: usize,
		/// Larger endpoint of the pulse's edge.
		b: usize,
	},

	/// The canvas or its 2D context could not be acquired.
	#[error("canvas error: {0}")]
	Canvas(String),
}

/// Result alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
