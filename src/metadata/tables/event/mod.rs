//! Event table support.
//!
//! The Event table (ID 0x14) declares events; their add and remove methods are attached through
//! method-semantics links.
//!
//! **Table ID**: `0x14`

use std::sync::Arc;

use crate::metadata::{
    tables::{Event, MethodSemanticsLink, TypeDefOrRef},
    token::Token,
};

/// A reference to an `EventRow`
pub type EventRc = Arc<EventRow>;

/// An event declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRow {
    /// The token of this row
    pub token: Token,
    /// Name of the event
    pub name: String,
    /// Delegate type of the event handler
    pub event_type: Option<TypeDefOrRef>,
    /// Accessor links, in table order
    pub semantics: Vec<MethodSemanticsLink>,
}

impl EventRow {
    /// Handle of this row
    #[must_use]
    pub fn handle(&self) -> Event {
        Event::new(self.token.row())
    }
}
