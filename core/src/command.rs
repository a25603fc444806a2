//! The closed set of user actions a rendered dashboard can emit.
//!
//! Buttons carry a `Command` value instead of a handler; the host hands it
//! back to `Dashboard::dispatch` when the button is pressed.

use std::fmt;

use crate::types::ItemId;

/// One of the five synchronized collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Messages,
    Posts,
    Todos,
    Groceries,
    Pantry,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Messages,
        ResourceKind::Posts,
        ResourceKind::Todos,
        ResourceKind::Groceries,
        ResourceKind::Pantry,
    ];

    /// Path segment of the collection under the API prefix.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Messages => "messages",
            ResourceKind::Posts => "posts",
            ResourceKind::Todos => "todos",
            ResourceKind::Groceries => "groceries",
            ResourceKind::Pantry => "pantry",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Collections whose items carry a server-flipped boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggleable {
    Todos,
    Groceries,
}

impl From<Toggleable> for ResourceKind {
    fn from(kind: Toggleable) -> Self {
        match kind {
            Toggleable::Todos => ResourceKind::Todos,
            Toggleable::Groceries => ResourceKind::Groceries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit the create form of a collection.
    Submit(ResourceKind),
    Toggle(Toggleable, ItemId),
    Remove(ResourceKind, ItemId),
    /// Submit the photo recognition form.
    Recognize,
}

impl Command {
    /// Collection the command mutates. Recognition adds to the pantry.
    pub fn resource(&self) -> ResourceKind {
        match self {
            Command::Submit(kind) | Command::Remove(kind, _) => *kind,
            Command::Toggle(kind, _) => (*kind).into(),
            Command::Recognize => ResourceKind::Pantry,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Submit(_) => "submit",
            Command::Toggle(..) => "toggle",
            Command::Remove(..) => "remove",
            Command::Recognize => "recognize",
        }
    }
}
