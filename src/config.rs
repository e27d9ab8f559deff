//! Connection settings.
//!
//! Values come from (highest first): CLI flag, process environment, `.env`
//! in the working directory. Nothing is validated here; a missing host or
//! key surfaces later as a connection error, a missing tapd setting as a
//! failing remote command.
//!
//! Key items:
//!   ConnectionArgs (clap, flattened into the top-level CLI)
//!   AppConfig { ssh: SshConfig, tapd: TapdConfig }
//!   load_dotenv

use clap::Args;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_SSH_PORT: u16 = 22;

/// Connection flags. Every flag has an environment fallback.
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Connection")]
pub struct ConnectionArgs {
    /// Remote host running tapcli
    #[arg(long = "ssh-host", env = "SSH_HOST", global = true, value_name = "HOST")]
    pub ssh_host: Option<String>,

    /// SSH port (default 22)
    #[arg(long = "ssh-port", env = "SSH_PORT", global = true, value_name = "PORT")]
    pub ssh_port: Option<String>,

    /// SSH user name
    #[arg(long = "ssh-user", env = "SSH_USERNAME", global = true, value_name = "USER")]
    pub ssh_user: Option<String>,

    /// Path to the SSH private key
    #[arg(
        long = "ssh-key",
        env = "SSH_PRIVATE_KEY_PATH",
        global = true,
        value_name = "PATH"
    )]
    pub ssh_key: Option<PathBuf>,

    /// Passphrase for an encrypted private key
    #[arg(
        long = "ssh-key-passphrase",
        env = "SSH_PRIVATE_KEY_PASSPHRASE",
        global = true,
        hide_env_values = true,
        value_name = "PASSPHRASE"
    )]
    pub ssh_key_passphrase: Option<String>,

    /// tapd TLS certificate path on the remote host
    #[arg(
        long = "tls-cert",
        env = "TAPD_TLS_CERT_PATH",
        global = true,
        value_name = "PATH"
    )]
    pub tls_cert: Option<String>,

    /// tapd RPC server address as seen from the remote host
    #[arg(
        long = "rpc-server",
        env = "TAPD_RPC_SERVER",
        global = true,
        value_name = "HOST:PORT"
    )]
    pub rpc_server: Option<String>,

    /// Network passed to tapcli (mainnet, testnet, regtest, ...)
    #[arg(long, env = "TAPD_NETWORK", global = true, value_name = "NETWORK")]
    pub network: Option<String>,
}

/// SSH session settings. Read-only for the process lifetime.
#[derive(Clone, Default)]
pub struct SshConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub private_key_path: Option<PathBuf>,
    pub private_key_passphrase: Option<String>,
}

impl fmt::Debug for SshConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("private_key_path", &self.private_key_path)
            .field(
                "private_key_passphrase",
                &self.private_key_passphrase.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Global flags handed to every tapcli invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapdConfig {
    pub tls_cert_path: String,
    pub rpc_server: String,
    pub network: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub ssh: SshConfig,
    pub tapd: TapdConfig,
}

impl AppConfig {
    pub fn from_args(args: ConnectionArgs) -> Self {
        let ssh = SshConfig {
            host: non_blank(args.ssh_host),
            port: parse_port(args.ssh_port.as_deref()),
            username: non_blank(args.ssh_user),
            private_key_path: args.ssh_key.filter(|p| !p.as_os_str().is_empty()),
            private_key_passphrase: non_blank(args.ssh_key_passphrase),
        };
        let tapd = TapdConfig {
            tls_cert_path: args.tls_cert.unwrap_or_default(),
            rpc_server: args.rpc_server.unwrap_or_default(),
            network: args.network.unwrap_or_default(),
        };
        tracing::debug!(?ssh, ?tapd, "configuration loaded");
        Self { ssh, tapd }
    }
}

/// Load `.env` from the working directory. Existing variables win.
/// A missing file is not an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Unset, empty or unparsable ports fall back to 22.
pub fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_SSH_PORT;
    };
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            tracing::warn!(value = raw, "invalid SSH port; using {DEFAULT_SSH_PORT}");
            DEFAULT_SSH_PORT
        }
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}
