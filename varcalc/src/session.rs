use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use anyhow::{anyhow, Result};
use varcalc_lib::Bindings;

/// Session used when a request does not name one.
pub const DEFAULT_SESSION: &str = "default";

fn session_id(session: Option<&str>) -> &str {
    session.unwrap_or(DEFAULT_SESSION)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    Echo,
    Clean,
}

impl TryFrom<&str> for Command {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        let command = match value {
            "echo" => Command::Echo,
            "clean" => Command::Clean,
            _ => return Err(anyhow!("Unknown command: {}", value)),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Echo => write!(f, "echo"),
            Command::Clean => write!(f, "clean"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Request {
    Evaluate {
        expression: String,
        session: Option<String>,
    },
    Command {
        command: String,
        session: Option<String>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Response {
    Value(f64),
    Echo(String),
    /// A command that succeeded without producing a value.
    Empty,
    Error(String),
}

/// Binding tables keyed by session id.
///
/// The map lock is only held to find or create a table. Each table has its own mutex, so
/// calls on one session run one after another while different sessions never wait on
/// each other.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Bindings>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn existing(&self, session: &str) -> Result<Option<Arc<Mutex<Bindings>>>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow!("Session map is poisoned"))?;
        Ok(sessions.get(session).cloned())
    }

    fn table(&self, session: &str) -> Result<Arc<Mutex<Bindings>>> {
        if let Some(table) = self.existing(session)? {
            return Ok(table);
        }
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("Session map is poisoned"))?;
        Ok(sessions.entry(session.to_string()).or_default().clone())
    }

    fn with_bindings<T>(
        table: &Mutex<Bindings>,
        session: &str,
        f: impl FnOnce(&mut Bindings) -> T,
    ) -> Result<T> {
        let mut bindings = table
            .lock()
            .map_err(|_| anyhow!("Session '{}' is poisoned", session))?;
        Ok(f(&mut bindings))
    }

    /// Evaluates `expression` against the table of `session`, creating the table on first use.
    pub fn evaluate(&self, session: Option<&str>, expression: &str) -> Result<f64> {
        let id = session_id(session);
        let table = self.table(id)?;
        Self::with_bindings(&table, id, |bindings| {
            varcalc_lib::evaluate(expression, bindings)
        })?
    }

    /// Removes every binding of `session`. Unknown sessions are left alone.
    pub fn reset(&self, session: Option<&str>) -> Result<()> {
        let id = session_id(session);
        match self.existing(id)? {
            Some(table) => Self::with_bindings(&table, id, Bindings::clear),
            None => Ok(()),
        }
    }

    /// Drops a session entirely. Returns whether it existed.
    pub fn remove(&self, session: &str) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| anyhow!("Session map is poisoned"))?;
        Ok(sessions.remove(session).is_some())
    }

    pub fn sessions(&self) -> Result<Vec<String>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| anyhow!("Session map is poisoned"))?;
        let mut ids: Vec<String> = sessions.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    /// Copy of the bindings of `session`, sorted by name.
    pub fn snapshot(&self, session: Option<&str>) -> Result<Vec<(String, f64)>> {
        let id = session_id(session);
        let Some(table) = self.existing(id)? else {
            return Ok(vec![]);
        };
        Self::with_bindings(&table, id, |bindings| {
            let mut entries: Vec<(String, f64)> = bindings
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries
        })
    }

    pub fn run_command(&self, command: Command, session: Option<&str>) -> Result<Response> {
        match command {
            Command::Echo => Ok(Response::Echo(command.to_string())),
            Command::Clean => {
                self.reset(session)?;
                Ok(Response::Empty)
            }
        }
    }

    /// Answers a request. Failures come back as `Response::Error` carrying the error message.
    pub fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::Evaluate {
                expression,
                session,
            } => self
                .evaluate(session.as_deref(), &expression)
                .map(Response::Value),
            Request::Command { command, session } => Command::try_from(command.as_str())
                .and_then(|command| self.run_command(command, session.as_deref())),
        };
        result.unwrap_or_else(|e| Response::Error(e.to_string()))
    }
}
