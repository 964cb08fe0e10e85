//! Panel lifecycle: `closed → loading → (populated | errored)`.
//!
//! Each [`PanelSlot`] hands out a fresh [`RequestToken`] whenever it opens or
//! closes. A response may only settle the slot while its token is current, so
//! a slow answer to an earlier selection never overwrites a later one.

/// Identifies one request issued by a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Visible state of a panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel<S, T> {
	/// Hidden.
	Closed,
	/// Open, waiting for the response about `S`.
	Loading(S),
	/// Open with content.
	Populated(S, T),
	/// Open with an inline error message.
	Errored(S, String),
}

/// A panel plus the token of its current request.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSlot<S, T> {
	token: u64,
	state: Panel<S, T>,
}

impl<S, T> Default for PanelSlot<S, T> {
	fn default() -> Self {
		Self {
			token: 0,
			state: Panel::Closed,
		}
	}
}

impl<S, T> PanelSlot<S, T> {
	/// Current state.
	pub fn state(&self) -> &Panel<S, T> {
		&self.state
	}

	/// Whether the panel is visible.
	pub fn is_open(&self) -> bool {
		!matches!(self.state, Panel::Closed)
	}

	/// Open in loading state and return the token the response must carry.
	pub fn open(&mut self, subject: S) -> RequestToken {
		self.token += 1;
		self.state = Panel::Loading(subject);
		RequestToken(self.token)
	}

	/// Close and invalidate any request in flight.
	pub fn close(&mut self) {
		self.token += 1;
		self.state = Panel::Closed;
	}

	/// Whether `token` belongs to the request the panel is waiting for.
	pub fn is_current(&self, token: RequestToken) -> bool {
		token.0 == self.token && matches!(self.state, Panel::Loading(_))
	}

	/// Apply a response. Returns `false` and leaves the slot untouched when
	/// the token is stale.
	pub fn settle(&mut self, token: RequestToken, outcome: Result<T, String>) -> bool {
		if !self.is_current(token) {
			return false;
		}
		let Panel::Loading(subject) = std::mem::replace(&mut self.state, Panel::Closed) else {
			return false;
		};
		self.state = match outcome {
			Ok(content) => Panel::Populated(subject, content),
			Err(message) => Panel::Errored(subject, message),
		};
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	type Slot = PanelSlot<&'static str, u32>;

	#[test]
	fn loading_then_populated() {
		let mut slot = Slot::default();
		assert!(!slot.is_open());
		let token = slot.open("E11");
		assert_eq!(slot.state(), &Panel::Loading("E11"));
		assert!(slot.settle(token, Ok(7)));
		assert_eq!(slot.state(), &Panel::Populated("E11", 7));
	}

	#[test]
	fn errored_keeps_subject() {
		let mut slot = Slot::default();
		let token = slot.open("A→B");
		assert!(slot.settle(token, Err("not found".into())));
		assert_eq!(slot.state(), &Panel::Errored("A→B", "not found".into()));
	}

	#[test]
	fn stale_response_is_discarded() {
		let mut slot = Slot::default();
		let first = slot.open("E11");
		let second = slot.open("I10");
		assert!(!slot.settle(first, Ok(1)));
		assert_eq!(slot.state(), &Panel::Loading("I10"));
		assert!(slot.settle(second, Ok(2)));
		assert_eq!(slot.state(), &Panel::Populated("I10", 2));
	}

	#[test]
	fn close_invalidates_in_flight_request() {
		let mut slot = Slot::default();
		let token = slot.open("E11");
		slot.close();
		assert!(!slot.settle(token, Ok(1)));
		assert_eq!(slot.state(), &Panel::Closed);
	}

	#[test]
	fn settles_only_once() {
		let mut slot = Slot::default();
		let token = slot.open("E11");
		assert!(slot.settle(token, Ok(1)));
		assert!(!slot.settle(token, Ok(2)));
		assert_eq!(slot.state(), &Panel::Populated("E11", 1));
	}
}
