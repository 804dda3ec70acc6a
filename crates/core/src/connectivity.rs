// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network connectivity as seen by the host environment.
//!
//! Connectivity is boolean: there is no "reconnecting" or "degraded" state.
//! The host reports changes through [`ConnectivitySignal`]s; nothing in this
//! crate polls the network.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Whether the remote API is believed to be reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// Remote API reachable. Queue draining is allowed.
    Online,
    /// Remote API unreachable. Mutations accumulate in the queue.
    Offline,
}

impl ConnectivityState {
    /// Returns the string representation used in display and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectivityState::Online => "online",
            ConnectivityState::Offline => "offline",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ConnectivityState::Online)
    }

    /// The state the host ends up in after receiving `signal`.
    pub fn after(signal: ConnectivitySignal) -> Self {
        match signal {
            ConnectivitySignal::Reachable => ConnectivityState::Online,
            ConnectivitySignal::Unreachable => ConnectivityState::Offline,
        }
    }
}

impl From<bool> for ConnectivityState {
    fn from(online: bool) -> Self {
        if online {
            ConnectivityState::Online
        } else {
            ConnectivityState::Offline
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConnectivityState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "online" => Ok(ConnectivityState::Online),
            "offline" => Ok(ConnectivityState::Offline),
            _ => Err(Error::InvalidConnectivity(s.to_string())),
        }
    }
}

/// A connectivity change reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivitySignal {
    /// The network became reachable.
    Reachable,
    /// The network became unreachable.
    Unreachable,
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
