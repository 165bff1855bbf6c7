//! Command classification
//!
//! Decides how a symbolic command name is turned into a code.

const TOGGLE_PREFIX: &str = "toggle";
const UP_SUFFIX: &str = "up";
const DOWN_SUFFIX: &str = "down";

/// How a command name resolves, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind<'a> {
    /// `toggle<name>`: carries `<name>`
    Toggle(&'a str),

    /// `<stem>up`: carries `<stem>`
    Increment(&'a str),

    /// `<stem>down`: carries `<stem>`
    Decrement(&'a str),

    /// Plain table lookup
    Static(&'a str),
}

impl CommandKind<'_> {
    /// Table key holding the level code for step commands
    pub fn level_key(&self) -> Option<String> {
        match self {
            CommandKind::Increment(stem) | CommandKind::Decrement(stem) => {
                Some(format!("{}level", stem))
            }
            _ => None,
        }
    }
}

/// What the caller gets back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Returns the 2-character payload
    Status,

    /// Returns success only
    Action,
}

pub fn classify(name: &str) -> CommandKind<'_> {
    if let Some(rest) = name.strip_prefix(TOGGLE_PREFIX) {
        CommandKind::Toggle(rest)
    } else if let Some(stem) = name.strip_suffix(UP_SUFFIX) {
        CommandKind::Increment(stem)
    } else if let Some(stem) = name.strip_suffix(DOWN_SUFFIX) {
        CommandKind::Decrement(stem)
    } else {
        CommandKind::Static(name)
    }
}

pub fn is_status_query(name: &str) -> bool {
    name.ends_with("status") || name.ends_with("level")
}

impl QueryKind {
    pub fn of(name: &str) -> Self {
        if is_status_query(name) {
            QueryKind::Status
        } else {
            QueryKind::Action
        }
    }
}
