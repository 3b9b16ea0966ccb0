//! Edge-triggered "no clients connected" alert
//!
//! ```text
//!            no_clients == true
//!  Cleared ──────────────────────► Raised
//!     ▲                              │
//!     └──────────────────────────────┘
//!            no_clients == false
//! ```
//!
//! Steady samples never produce an edge, so a notification goes out only
//! when the condition actually changes.

/// Event raised when neither LAN nor WiFi has a client
pub const NO_CLIENTS_EVENT: &str = "no_clients_connected";
pub const NO_CLIENTS_MESSAGE: &str = "No clients connected to LAN or Wi-Fi.";

/// Event clearing [`NO_CLIENTS_EVENT`]
pub const CLIENTS_EVENT: &str = "clients_connected";
pub const CLIENTS_MESSAGE: &str = "Clients reconnected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertState {
    #[default]
    Cleared,
    Raised,
}

/// Transition that must be announced before it is committed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEdge {
    Raise,
    Clear,
}

impl AlertEdge {
    pub fn event_name(&self) -> &'static str {
        match self {
            AlertEdge::Raise => NO_CLIENTS_EVENT,
            AlertEdge::Clear => CLIENTS_EVENT,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AlertEdge::Raise => NO_CLIENTS_MESSAGE,
            AlertEdge::Clear => CLIENTS_MESSAGE,
        }
    }

    fn target(&self) -> AlertState {
        match self {
            AlertEdge::Raise => AlertState::Raised,
            AlertEdge::Clear => AlertState::Cleared,
        }
    }
}

#[derive(Debug, Default)]
pub struct AlertMachine {
    state: AlertState,
}

impl AlertMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AlertState::Raised
    }

    /// Edge implied by the current sample, if any. Does not change state.
    pub fn edge(&self, no_clients: bool) -> Option<AlertEdge> {
        match (self.state, no_clients) {
            (AlertState::Cleared, true) => Some(AlertEdge::Raise),
            (AlertState::Raised, false) => Some(AlertEdge::Clear),
            _ => None,
        }
    }

    /// Commit an edge once its notification went out
    pub fn apply(&mut self, edge: AlertEdge) {
        self.state = edge.target();
    }

    /// `edge` followed by `apply`, for callers with nothing to announce
    pub fn observe(&mut self, no_clients: bool) -> Option<AlertEdge> {
        let edge = self.edge(no_clients)?;
        self.apply(edge);
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared() {
        let machine = AlertMachine::new();
        assert_eq!(machine.state(), AlertState::Cleared);
        assert!(!machine.is_active());
    }

    #[test]
    fn notifies_only_on_edges() {
        let mut machine = AlertMachine::new();
        let edges: Vec<Option<AlertEdge>> = [true, true, false, false, true]
            .into_iter()
            .map(|sample| machine.observe(sample))
            .collect();

        assert_eq!(
            edges,
            vec![
                Some(AlertEdge::Raise),
                None,
                Some(AlertEdge::Clear),
                None,
                Some(AlertEdge::Raise),
            ]
        );
        assert_eq!(edges.iter().flatten().count(), 3);
        assert!(machine.is_active());
    }

    #[test]
    fn edge_without_apply_keeps_state() {
        let machine = AlertMachine::new();
        assert_eq!(machine.edge(true), Some(AlertEdge::Raise));
        assert_eq!(machine.edge(true), Some(AlertEdge::Raise));
        assert_eq!(machine.state(), AlertState::Cleared);
    }

    #[test]
    fn steady_clear_condition_never_notifies() {
        let mut machine = AlertMachine::new();
        for _ in 0..5 {
            assert_eq!(machine.observe(false), None);
        }
    }

    #[test]
    fn edges_carry_fixed_events() {
        assert_eq!(AlertEdge::Raise.event_name(), "no_clients_connected");
        assert_eq!(AlertEdge::Raise.message(), "No clients connected to LAN or Wi-Fi.");
        assert_eq!(AlertEdge::Clear.event_name(), "clients_connected");
        assert_eq!(AlertEdge::Clear.message(), "Clients reconnected");
    }
}
