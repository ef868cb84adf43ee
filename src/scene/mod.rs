//! Renderer-independent core: layout, connection graph, motion and
//! interaction state for the technology network and the project showcase.

/// Perspective projection onto the canvas.
pub mod camera;
/// Session time from host frame timestamps.
pub mod clock;
/// Tunables with defaults and validation.
pub mod config;
/// Error type shared by the core and the canvas adapters.
pub mod error;
pub mod frame;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod motion;
pub mod network;
pub mod showcase;
/// Content records and graph primitives.
pub mod types;

pub use camera::Camera;
pub use clock::{AnimationClock, FrameTime};
pub use config::{NetworkConfig, SceneConfig, ShowcaseConfig};
pub use error::{SceneError, SceneResult};
pub use frame::{EdgeDraw, Frame, NodeDraw, PulseDraw};
pub use interaction::{InteractionState, Transition};
pub use network::NetworkScene;
pub use showcase::ShowcaseScene;
pub use types::{ContentItem, ContentLink, Edge, Node, Pulse};
