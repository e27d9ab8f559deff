//! tapcli command lines.
//!
//! Shape (argument order and flag spelling are what tapcli expects):
//!
//! ```text
//! tapcli --tlscertpath <cert> --rpcserver=<rpc> --network=<net> assets list
//! tapcli --tlscertpath <cert> --rpcserver=<rpc> --network=<net> assets info <id>
//! tapcli --tlscertpath <cert> --rpcserver=<rpc> --network=<net> assets send <id> <amount> --addr=<addr>
//! ```
//!
//! Interpolated values go through `shell_words::quote`: plain values are
//! emitted verbatim, anything with shell metacharacters is single-quoted so
//! the remote shell passes it to tapcli as one argument.

use shell_words::quote;
use std::fmt;

use crate::config::TapdConfig;

pub const TAPCLI: &str = "tapcli";

/// A fully rendered remote shell command. Built once, run once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand(String);

impl RemoteCommand {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds tapcli invocations from the node settings. No I/O.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    tapd: &'a TapdConfig,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(tapd: &'a TapdConfig) -> Self {
        Self { tapd }
    }

    pub fn list_assets(&self) -> RemoteCommand {
        self.render(&["assets", "list"])
    }

    pub fn asset_info(&self, asset_id: &str) -> RemoteCommand {
        self.render(&["assets", "info", &quote(asset_id)])
    }

    pub fn send_asset(&self, asset_id: &str, amount: u64, address: &str) -> RemoteCommand {
        self.render(&[
            "assets",
            "send",
            &quote(asset_id),
            &amount.to_string(),
            &format!("--addr={}", quote(address)),
        ])
    }

    fn render(&self, tail: &[&str]) -> RemoteCommand {
        let mut line = format!(
            "{TAPCLI} --tlscertpath {} --rpcserver={} --network={}",
            quote(&self.tapd.tls_cert_path),
            quote(&self.tapd.rpc_server),
            quote(&self.tapd.network),
        );
        for part in tail {
            line.push(' ');
            line.push_str(part);
        }
        RemoteCommand(line)
    }
}
