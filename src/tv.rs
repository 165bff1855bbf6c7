//! Tv Module
//!
//! The single public entry point that ties all components together.
//!
//! ## Responsibilities
//! - Own the code table, toggle and debounce registrations
//! - Resolve, exchange and interpret one command per `send`
//! - Debounce registered commands across processes
//! - Close the port at the end of every `send`

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use crate::codes::{prefix, CodeTable};
use crate::config::Config;
use crate::debounce::{CommandLock, DebounceSpec};
use crate::error::{Result, TvError};
use crate::protocol::{QueryKind, Reply};
use crate::resolver::{Plan, Resolver, ToggleSpec};
use crate::transport::{Connector, SerialConnector, Session};

/// Toggles every display gets: (toggle name, first state, second state)
const DEFAULT_TOGGLES: &[(&str, &str, &str)] = &[
    ("power", "poweron", "poweroff"),
    ("mute", "mute", "unmute"),
];

/// A display reachable through one connector
///
/// ## Concurrency Model
///
/// One command at a time per `Tv` (`send` takes `&mut self`). Separate
/// processes driving the same port only coordinate through the debounce
/// lock, and only for commands registered with `debounce`. Everything else
/// goes straight to the port.
pub struct Tv<C: Connector = SerialConnector> {
    config: Config,
    table: CodeTable,
    toggles: HashMap<String, ToggleSpec>,
    debounces: HashMap<String, DebounceSpec>,
    session: Session<C>,
}

impl Tv<SerialConnector> {
    /// Display on the serial port named in `config`
    pub fn open(config: Config) -> Result<Self> {
        let connector = SerialConnector::from_config(&config);
        Self::with_connector(config, connector)
    }
}

impl<C: Connector> Tv<C> {
    /// Select the code table for `config.model` and use `connector` for I/O
    pub fn with_connector(config: Config, connector: C) -> Result<Self> {
        let table = CodeTable::for_model(&config.model)?;
        Ok(Self::with_table(config, table, connector))
    }

    /// Use an explicit code table.
    ///
    /// Default toggles are registered for the states the table has.
    pub fn with_table(config: Config, table: CodeTable, connector: C) -> Self {
        let session = Session::new(connector, config.open_retry_interval());
        let mut tv = Self {
            config,
            table,
            toggles: HashMap::new(),
            debounces: HashMap::new(),
            session,
        };

        for (name, first, second) in DEFAULT_TOGGLES {
            if let Err(e) = tv.add_toggle(name, first, second) {
                tracing::debug!(toggle = name, error = %e, "default toggle skipped");
            }
        }

        tv
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register `toggle<name>` alternating between two table commands
    pub fn add_toggle(&mut self, name: &str, first: &str, second: &str) -> Result<()> {
        let spec = ToggleSpec::new(first, second);
        spec.validate(&self.table)?;
        self.toggles.insert(name.to_string(), spec);
        Ok(())
    }

    /// Debounce `command` with an explicit settle delay
    pub fn debounce(&mut self, command: &str, settle: Duration) {
        self.debounces
            .insert(command.to_string(), DebounceSpec::new(settle));
    }

    /// Debounce `command` with the configured default settle delay
    pub fn debounce_default(&mut self, command: &str) {
        let settle = self.config.default_settle();
        self.debounce(command, settle);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn toggles(&self) -> &HashMap<String, ToggleSpec> {
        &self.toggles
    }

    pub fn connector(&self) -> &C {
        self.session.connector()
    }

    /// Resolution phase one for `name`, without touching the port
    pub fn plan(&self, name: &str) -> Result<Plan> {
        Resolver::new(&self.table, &self.toggles).plan(name)
    }

    // =========================================================================
    // Sending
    // =========================================================================

    /// Send one command.
    ///
    /// Returns the payload for status queries and `Reply::Done` for actions.
    /// The port is closed afterwards whatever the outcome.
    pub fn send(&mut self, name: &str) -> Result<Reply> {
        let result = match self.debounces.get(name).copied() {
            Some(spec) => self.send_debounced(name, spec.settle),
            None => self.send_direct(name),
        };

        self.session.close();

        if let Err(e) = &result {
            tracing::debug!(command = name, error = %e, "send failed");
        }
        result
    }

    /// Unlocked path: waits for the port if it is not there yet
    fn send_direct(&mut self, name: &str) -> Result<Reply> {
        let plan = self.plan(name)?;
        self.session.open_retrying()?;
        self.execute(name, plan)
    }

    /// Locked path: single open attempt, settle delay before release.
    ///
    /// The port is closed before the lock is released, so the next holder of
    /// the lock never finds it still open.
    fn send_debounced(&mut self, name: &str, settle: Duration) -> Result<Reply> {
        let lock = match CommandLock::try_acquire(&self.config.lock_dir, name) {
            Ok(lock) => lock,
            Err(e) => {
                if matches!(e, TvError::Debounced(_)) {
                    tracing::warn!(command = name, "duplicate suppressed");
                }
                return Err(e);
            }
        };

        let plan = self.plan(name)?;
        self.session.open_once()?;
        let reply = self.execute(name, plan);

        tracing::info!(command = name, settle_ms = settle.as_millis() as u64, "settling");
        thread::sleep(settle);

        self.session.close();
        drop(lock);
        reply
    }

    fn execute(&mut self, name: &str, plan: Plan) -> Result<Reply> {
        let code = plan.complete(&mut self.session)?;
        let frame = self.session.exchange(&code)?;

        Ok(match QueryKind::of(name) {
            QueryKind::Status => Reply::Status(frame.payload().to_string()),
            QueryKind::Action => Reply::Done,
        })
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Every command name this display accepts, with its code, in name order.
    ///
    /// `<stem>level` entries expand to `<stem>up` / `<stem>down` shown with a
    /// `??` payload; toggles show both states.
    pub fn available_commands(&self) -> Vec<(String, String)> {
        let mut commands: Vec<(String, String)> = Vec::new();

        for (name, code) in self.table.iter() {
            commands.push((name.to_string(), code.to_string()));

            if let Some(stem) = name.strip_suffix("level") {
                let dynamic = format!("{}??", prefix(code));
                commands.push((format!("{}up", stem), dynamic.clone()));
                commands.push((format!("{}down", stem), dynamic));
            }
        }

        for (name, spec) in &self.toggles {
            commands.push((
                format!("toggle{}", name),
                format!("{} | {}", spec.first, spec.second),
            ));
        }

        commands.sort();
        commands
    }
}
