//! Single-owner "which item is active" state shared by hover and click input.

use log::debug;

/// Outcome of feeding an event to [`InteractionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// Nothing was active; `index` now is.
	Activated(usize),
	/// `from` was active and `to` replaced it directly.
	Replaced {
		/// Previously active item.
		from: usize,
		/// Newly active item.
		to: usize,
	},
	/// `index` was active and now nothing is.
	Deactivated(usize),
	/// Stale or redundant event; state unchanged.
	Ignored,
}

/// `Idle` is `active == None`; `Active(i)` is `Some(i)`. At most one item is
/// ever active. Events whose index is `>= len` are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
	active: Option<usize>,
	len: usize,
}

impl InteractionState {
	/// Idle state over `len` addressable items.
	pub fn new(len: usize) -> Self {
		Self { active: None, len }
	}

	/// The active item, if any.
	pub fn active(&self) -> Option<usize> {
		self.active
	}

	/// True unless idle.
	pub fn is_active(&self) -> bool {
		self.active.is_some()
	}

	/// True when `index` is the active item.
	pub fn is_active_index(&self, index: usize) -> bool {
		self.active == Some(index)
	}

	/// Updates the number of addressable items, dropping an active index that
	/// no longer exists.
	pub fn set_len(&mut self, len: usize) {
		self.len = len;
		if self.active.is_some_and(|i| i >= len) {
			self.active = None;
		}
	}

	/// Toggle on `index`: activates it, replaces another active one, or
	/// deactivates it if it is already the active one.
	pub fn toggle(&mut self, index: usize) -> Transition {
		if index >= self.len {
			return Transition::Ignored;
		}
		let transition = match self.active {
			None => Transition::Activated(index),
			Some(current) if current == index => Transition::Deactivated(index),
			Some(current) => Transition::Replaced { from: current, to: index },
		};
		self.apply(transition)
	}

	/// Hover event; same table as [`toggle`](Self::toggle).
	pub fn hover(&mut self, index: usize) -> Transition {
		self.toggle(index)
	}

	/// Click event; same table as [`toggle`](Self::toggle).
	pub fn click(&mut self, index: usize) -> Transition {
		self.toggle(index)
	}

	/// Pointer entered `index`. Unlike [`toggle`](Self::toggle), re-entering
	/// the active item keeps it active.
	pub fn pointer_enter(&mut self, index: usize) -> Transition {
		if index >= self.len || self.active == Some(index) {
			return Transition::Ignored;
		}
		self.toggle(index)
	}

	/// Pointer left `index`. Only deactivates if `index` is the active one.
	pub fn pointer_leave(&mut self, index: usize) -> Transition {
		if index >= self.len || self.active != Some(index) {
			return Transition::Ignored;
		}
		self.apply(Transition::Deactivated(index))
	}

	/// Explicit close. Safe to call in any state.
	pub fn close(&mut self) -> Transition {
		match self.active {
			Some(index) => self.apply(Transition::Deactivated(index)),
			None => Transition::Ignored,
		}
	}

	/// Back to idle without reporting a transition (mount/unmount).
	pub fn reset(&mut self) {
		self.active = None;
	}

	fn apply(&mut self, transition: Transition) -> Transition {
		match transition {
			Transition::Activated(index) | Transition::Replaced { to: index, .. } => {
				self.active = Some(index)
			}
			Transition::Deactivated(_) => self.active = None,
			Transition::Ignored => {}
		}
		if transition != Transition::Ignored {
			debug!("interaction: {:?}", transition);
		}
		transition
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idle_to_active_on_hover_or_click() {
		let mut state = InteractionState::new(5);
		assert_eq!(state.hover(2), Transition::Activated(2));
		assert_eq!(state.active(), Some(2));

		let mut state = InteractionState::new(5);
		assert_eq!(state.click(4), Transition::Activated(4));
		assert_eq!(state.active(), Some(4));
	}

	#[test]
	fn same_index_toggles_back_to_idle() {
		let mut state = InteractionState::new(5);
		state.click(2);
		assert_eq!(state.click(2), Transition::Deactivated(2));
		assert_eq!(state.active(), None);

		state.hover(1);
		assert_eq!(state.hover(1), Transition::Deactivated(1));
		assert!(!state.is_active());
	}

	#[test]
	fn other_index_replaces_without_idle() {
		let mut state = InteractionState::new(5);
		state.hover(1);
		assert_eq!(state.hover(3), Transition::Replaced { from: 1, to: 3 });
		assert_eq!(state.active(), Some(3));
		assert!(!state.is_active_index(1));
	}

	#[test]
	fn out_of_range_events_are_ignored() {
		let mut state = InteractionState::new(3);
		assert_eq!(state.click(3), Transition::Ignored);
		assert_eq!(state.active(), None);
		state.click(0);
		assert_eq!(state.hover(9), Transition::Ignored);
		assert_eq!(state.pointer_leave(9), Transition::Ignored);
		assert_eq!(state.active(), Some(0));
	}

	#[test]
	fn pointer_enter_and_leave() {
		let mut state = InteractionState::new(4);
		assert_eq!(state.pointer_enter(1), Transition::Activated(1));
		assert_eq!(state.pointer_enter(1), Transition::Ignored);
		assert_eq!(state.pointer_leave(2), Transition::Ignored);
		assert_eq!(state.pointer_enter(2), Transition::Replaced { from: 1, to: 2 });
		assert_eq!(state.pointer_leave(1), Transition::Ignored);
		assert_eq!(state.pointer_leave(2), Transition::Deactivated(2));
	}

	#[test]
	fn close_and_reset_are_idempotent() {
		let mut state = InteractionState::new(2);
		assert_eq!(state.close(), Transition::Ignored);
		state.click(1);
		assert_eq!(state.close(), Transition::Deactivated(1));
		assert_eq!(state.close(), Transition::Ignored);
		state.click(0);
		state.reset();
		state.reset();
		assert_eq!(state.active(), None);
	}

	#[test]
	fn shrinking_drops_stale_active_index() {
		let mut state = InteractionState::new(5);
		state.click(4);
		state.set_len(3);
		assert_eq!(state.active(), None);
		state.click(2);
		state.set_len(4);
		assert_eq!(state.active(), Some(2));
	}
}
