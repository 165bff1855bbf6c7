//! Command Resolver
//!
//! Turns a symbolic command name into the code to send.
//!
//! Resolution runs in two phases:
//! 1. `plan`: pure. Classifies the name and looks up every code it needs.
//!    Unknown names fail here, before any port is opened.
//! 2. `Plan::complete`: asks a [`StateProbe`] for the device's current value
//!    (toggle and step commands only) and computes the final code.

use std::collections::HashMap;

use crate::codes::{delta_code, same_family, status_code, toggle_code, CodeTable};
use crate::error::{Result, TvError};
use crate::protocol::{classify, CommandKind};
use crate::transport::StateProbe;

/// The two states a `toggle<name>` command alternates between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    /// Command name chosen whenever the device is not in this state
    pub first: String,
    /// Command name chosen when the device reports `first`'s payload
    pub second: String,
}

impl ToggleSpec {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Both states must exist and belong to the same command family
    pub fn validate(&self, table: &CodeTable) -> Result<()> {
        let first = table.lookup(&self.first)?;
        let second = table.lookup(&self.second)?;

        if !same_family(first, second) {
            return Err(TvError::InvalidToggle(format!(
                "{} ({}) and {} ({}) address different settings",
                self.first, first, self.second, second
            )));
        }
        Ok(())
    }
}

/// A resolved command still waiting for device state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Send as is
    Static(String),

    /// Query `query`, then step the reported level by `delta`
    Step { query: String, delta: i16 },

    /// Query `query`, then pick `first` or `second`
    Toggle {
        query: String,
        first: String,
        second: String,
    },
}

impl Plan {
    /// Status code to query first, if this plan depends on device state
    pub fn query(&self) -> Option<&str> {
        match self {
            Plan::Static(_) => None,
            Plan::Step { query, .. } | Plan::Toggle { query, .. } => Some(query.as_str()),
        }
    }

    /// Compute the final code from an already observed state
    pub fn finish(self, observed: Option<&str>) -> Result<String> {
        match self {
            Plan::Static(code) => Ok(code),
            Plan::Step { query, delta } => {
                let state = observed.ok_or_else(|| {
                    TvError::ProtocolFailure(format!("no level reported for {}", query))
                })?;
                delta_code(&query, state, delta)
            }
            Plan::Toggle { first, second, .. } => Ok(toggle_code(observed, &first, &second)),
        }
    }

    /// Observe device state through `probe` and compute the final code.
    ///
    /// A failed query aborts a step command but counts as "not in the first
    /// state" for a toggle.
    pub fn complete<P: StateProbe + ?Sized>(self, probe: &mut P) -> Result<String> {
        let observed = match &self {
            Plan::Static(_) => None,
            Plan::Step { query, .. } => Some(probe.query_data(query)?),
            Plan::Toggle { query, .. } => match probe.query_data(query) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::debug!(query = %query, error = %e, "toggle state unknown");
                    None
                }
            },
        };

        self.finish(observed.as_deref())
    }
}

/// Resolves names against one code table and its registered toggles
pub struct Resolver<'a> {
    table: &'a CodeTable,
    toggles: &'a HashMap<String, ToggleSpec>,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a CodeTable, toggles: &'a HashMap<String, ToggleSpec>) -> Self {
        Self { table, toggles }
    }

    /// Phase one: everything that can be decided without the device
    pub fn plan(&self, name: &str) -> Result<Plan> {
        let kind = classify(name);

        match kind {
            CommandKind::Toggle(toggle) => {
                let spec = self
                    .toggles
                    .get(toggle)
                    .ok_or_else(|| TvError::UnknownToggle(name.to_string()))?;
                let first = self.table.lookup(&spec.first)?;
                let second = self.table.lookup(&spec.second)?;

                Ok(Plan::Toggle {
                    query: status_code(first),
                    first: first.to_string(),
                    second: second.to_string(),
                })
            }
            CommandKind::Increment(_) | CommandKind::Decrement(_) => {
                let key = kind.level_key().unwrap_or_default();
                let level = self
                    .table
                    .get(&key)
                    .ok_or_else(|| TvError::UnknownLevel(name.to_string()))?;
                let delta = if matches!(kind, CommandKind::Increment(_)) {
                    1
                } else {
                    -1
                };

                Ok(Plan::Step {
                    query: status_code(level),
                    delta,
                })
            }
            CommandKind::Static(name) => Ok(Plan::Static(self.table.lookup(name)?.to_string())),
        }
    }

    /// Both phases
    pub fn resolve<P: StateProbe + ?Sized>(&self, name: &str, probe: &mut P) -> Result<String> {
        let code = self.plan(name)?.complete(probe)?;
        tracing::debug!(name, code = %code, "resolved");
        Ok(code)
    }
}
