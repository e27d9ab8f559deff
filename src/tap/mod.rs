//! Remote tapcli access.
//!
//! command   -> RemoteCommand strings for `tapcli` (pure)
//! executor  -> RemoteExecutor trait + SshExecutor (one SSH session per command)
//! parser    -> scrape `assets list` text into Asset records
//! service   -> AssetQueryService (list / info / search / send)

pub mod command;
pub mod executor;
pub mod parser;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;

use serde::Serialize;

pub use executor::{RemoteExecutor, SshExecutor};
pub use service::AssetQueryService;

/// One asset as reported by `tapcli assets list`.
///
/// `supply` is kept exactly as printed by the remote tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub supply: String,
}

impl Asset {
    pub fn new(id: impl Into<String>, name: impl Into<String>, supply: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supply: supply.into(),
        }
    }

    /// Case-insensitive substring match on the display name.
    pub fn name_matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }
}
