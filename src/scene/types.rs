use glam::Vec3;

/// An outbound link attached to a content record (source code, live demo, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct ContentLink {
	/// Button text, e.g. `CODE`.
	pub label: String,
	/// Target URL.
	pub href: String,
}

/// Content record supplied by the page. Read-only to the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
	/// Stable identifier.
	pub id: String,
	/// Label drawn next to the node or on the panel.
	pub display_name: String,
	/// Grouping shown under an active node (`frontend`, `database`, ...).
	pub category_tag: String,
	/// Icon or screenshot path. Not loaded by the canvas renderers.
	pub image_ref: String,
	/// Outbound links, shown in the showcase overlay.
	pub links: Vec<ContentLink>,
	/// Longer description for the overlay.
	pub summary: Option<String>,
	/// Short keywords for the overlay.
	pub tags: Vec<String>,
}

impl ContentItem {
	/// Minimal record with just an id, name and category.
	pub fn new(id: &str, display_name: &str, category_tag: &str) -> Self {
		Self {
			id: id.into(),
			display_name: display_name.into(),
			category_tag: category_tag.into(),
			image_ref: String::new(),
			links: Vec::new(),
			summary: None,
			tags: Vec::new(),
		}
	}
}

/// A laid-out slot. `item` indexes into the content list the scene was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	/// Position in the layout, `0..count`.
	pub index: usize,
	/// Content record drawn in this slot.
	pub item: usize,
	/// Base position before any motion.
	pub position: Vec3,
}

/// Undirected connection, always stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	/// Smaller node index.
	pub a: usize,
	/// Larger node index.
	pub b: usize,
}

impl Edge {
	/// Normalizes the pair so the smaller index comes first. Returns `None` for self-loops.
	pub fn new(i: usize, j: usize) -> Option<Self> {
		match i.cmp(&j) {
			std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
			std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
			std::cmp::Ordering::Equal => None,
		}
	}
}

/// A particle travelling along an edge. Fixed for the lifetime of the graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
	/// Edge the pulse travels along, from `a` to `b`.
	pub edge: Edge,
	/// Cycles per second.
	pub speed: f32,
	/// Starting point in the cycle.
	pub phase_offset: f32,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_normalizes_order_and_rejects_self_loops() {
		assert_eq!(Edge::new(4, 1), Some(Edge { a: 1, b: 4 }));
		assert_eq!(Edge::new(1, 4), Edge::new(4, 1));
		assert_eq!(Edge::new(3, 3), None);
	}
}
