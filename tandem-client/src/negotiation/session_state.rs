use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Offering,
    Answering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Negotiating(Role),
    Connected,
    Closed,
}

impl SessionState {
    pub fn is_negotiating(&self) -> bool {
        matches!(self, SessionState::Negotiating(_))
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => f.write_str("idle"),
            SessionState::Negotiating(Role::Offering) => f.write_str("offering"),
            SessionState::Negotiating(Role::Answering) => f.write_str("answering"),
            SessionState::Connected => f.write_str("connected"),
            SessionState::Closed => f.write_str("closed"),
        }
    }
}
