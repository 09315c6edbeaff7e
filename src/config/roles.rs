//! Static role lists.
//!
//! Authorization in this system is exactly these two lists; there is no
//! account system behind them.

use serde::Deserialize;
use std::collections::HashSet;

use crate::domain::foundation::ActorId;

/// Actors with privileged capabilities.
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Actors allowed to resolve tickets.
    pub reception: Vec<ActorId>,

    /// Actors allowed to view the unresolved backlog.
    #[serde(default)]
    pub overview: Vec<ActorId>,
}

impl RolesConfig {
    /// Reception role as a set for membership checks.
    pub fn reception_set(&self) -> HashSet<ActorId> {
        self.reception.iter().cloned().collect()
    }

    /// Overview role as a set for membership checks.
    pub fn overview_set(&self) -> HashSet<ActorId> {
        self.overview.iter().cloned().collect()
    }
}
