//! Server port selection.

use crate::config::{DEFAULT_SERVER_PORT, PORT_ENV_VARS};

/// Picks the port for the file server.
///
/// Precedence: `explicit`, then the first of [`PORT_ENV_VARS`] that holds a
/// valid port, then [`DEFAULT_SERVER_PORT`]. The environment is read through
/// `lookup` so callers decide where variables come from.
pub fn resolve_port<F>(explicit: Option<u16>, lookup: F) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = explicit {
        return port;
    }

    for key in PORT_ENV_VARS {
        let Some(value) = lookup(key) else {
            continue;
        };
        match value.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(_) => log::warn!("Ignoring {key}={value:?}: not a valid port"),
        }
    }

    DEFAULT_SERVER_PORT
}
