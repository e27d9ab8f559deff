//! Remote command execution over SSH.
//!
//! One command, one session: connect + authenticate, exec, drain stdout
//! (stderr is mirrored to the local terminal as it arrives), read the exit
//! status, disconnect. The session is closed by `SessionGuard` on every
//! path. No retry, no timeout.

use ssh2::{Channel, Session};
use std::future::Future;
use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::time::Duration;
use thiserror::Error;

use super::command::RemoteCommand;
use crate::config::SshConfig;

const READ_CHUNK: usize = 8192;
const IDLE_POLL: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Host unreachable, handshake failed or authentication rejected.
    #[error("SSH connection to {target} failed: {reason}")]
    Connection { target: String, reason: String },

    /// The remote side refused to open a channel or start the process.
    #[error("remote refused to run command: {0}")]
    Exec(String),

    /// The process ran and exited non-zero. Its stdout is discarded.
    #[error("command failed with exit code {code}")]
    CommandExit { code: i32 },

    #[error("remote stream error: {0}")]
    Io(#[from] std::io::Error),

    #[error("remote task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Runs one shell command on the remote host and yields its stdout.
pub trait RemoteExecutor {
    fn execute(&self, command: &RemoteCommand)
    -> impl Future<Output = Result<String, RemoteError>>;
}

/// `RemoteExecutor` backed by libssh2. The blocking session work runs on
/// Tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct SshExecutor {
    config: SshConfig,
}

impl SshExecutor {
    pub fn new(config: &SshConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl RemoteExecutor for SshExecutor {
    async fn execute(&self, command: &RemoteCommand) -> Result<String, RemoteError> {
        tracing::info!(%command, "executing remote command");
        let config = self.config.clone();
        let line = command.as_str().to_owned();
        tokio::task::spawn_blocking(move || run_blocking(&config, &line)).await?
    }
}

/* ---- Session lifecycle ---- */

/// Disconnects the wrapped session when dropped.
struct SessionGuard(Session);

impl std::ops::Deref for SessionGuard {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}

impl std::ops::DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.0
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.disconnect(None, "tap-remote: command finished", None) {
            tracing::trace!("SSH disconnect: {e}");
        }
        tracing::debug!("SSH session closed");
    }
}

fn target_of(config: &SshConfig) -> String {
    format!(
        "{}:{}",
        config.host.as_deref().unwrap_or("<unset>"),
        config.port
    )
}

fn connection_error(config: &SshConfig, reason: impl ToString) -> RemoteError {
    RemoteError::Connection {
        target: target_of(config),
        reason: reason.to_string(),
    }
}

fn connect(config: &SshConfig) -> Result<SessionGuard, RemoteError> {
    let host = config
        .host
        .as_deref()
        .ok_or_else(|| connection_error(config, "SSH host is not set (SSH_HOST)"))?;
    let user = config
        .username
        .as_deref()
        .ok_or_else(|| connection_error(config, "SSH user is not set (SSH_USERNAME)"))?;
    let key = config.private_key_path.as_deref().ok_or_else(|| {
        connection_error(config, "SSH private key is not set (SSH_PRIVATE_KEY_PATH)")
    })?;

    let tcp = TcpStream::connect((host, config.port)).map_err(|e| connection_error(config, e))?;
    let mut session = SessionGuard(Session::new().map_err(|e| connection_error(config, e))?);
    session.set_tcp_stream(tcp);

    session
        .handshake()
        .map_err(|e| connection_error(config, format!("handshake: {e}")))?;
    session
        .userauth_pubkey_file(user, None, key, config.private_key_passphrase.as_deref())
        .map_err(|e| connection_error(config, format!("authentication: {e}")))?;
    if !session.authenticated() {
        return Err(connection_error(config, "authentication rejected"));
    }

    tracing::info!(remote = %target_of(config), "SSH session established");
    Ok(session)
}

/* ---- Command execution ---- */

fn run_blocking(config: &SshConfig, command: &str) -> Result<String, RemoteError> {
    let session = connect(config)?;
    let mut channel = session
        .channel_session()
        .map_err(|e| RemoteError::Exec(e.to_string()))?;
    channel
        .exec(command)
        .map_err(|e| RemoteError::Exec(e.to_string()))?;

    let drained = drain(&session, &mut channel);
    session.set_blocking(true);
    let stdout = drained?;

    let _ = channel.wait_close();
    let code = match channel.exit_signal() {
        Ok(sig) if sig.exit_signal.is_some() => {
            tracing::warn!(signal = ?sig.exit_signal, "remote process killed by signal");
            -1
        }
        _ => channel.exit_status().unwrap_or(-1),
    };
    finish(stdout, code)
}

/// Read stdout and stderr until the channel reaches EOF with nothing left
/// to read on either stream.
fn drain(session: &Session, channel: &mut Channel) -> Result<Vec<u8>, RemoteError> {
    session.set_blocking(false);
    let mut stderr = channel.stderr();
    let mut stdout = Vec::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        let mut progressed = false;

        match channel.read(&mut buf) {
            Ok(n) if n > 0 => {
                stdout.extend_from_slice(&buf[..n]);
                progressed = true;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(e.into()),
        }

        match stderr.read(&mut buf) {
            Ok(n) if n > 0 => {
                mirror_stderr(&buf[..n]);
                progressed = true;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::WouldBlock => {}
            Err(e) => return Err(e.into()),
        }

        if !progressed {
            if channel.eof() {
                break;
            }
            std::thread::sleep(IDLE_POLL);
        }
    }

    Ok(stdout)
}

fn mirror_stderr(chunk: &[u8]) {
    let text = String::from_utf8_lossy(chunk);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        eprintln!("[tapcli] STDERR: {line}");
    }
}

/// Exit status 0 keeps stdout; anything else discards it.
fn finish(stdout: Vec<u8>, exit_code: i32) -> Result<String, RemoteError> {
    if exit_code != 0 {
        return Err(RemoteError::CommandExit { code: exit_code });
    }
    Ok(String::from_utf8_lossy(&stdout).into_owned())
}
