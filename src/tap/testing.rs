//! Test doubles for the remote side.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::command::RemoteCommand;
use super::executor::{RemoteError, RemoteExecutor};

/// Replies from a queue and records every command it was asked to run.
#[derive(Default)]
pub struct ScriptedExecutor {
    replies: RefCell<VecDeque<Result<String, RemoteError>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_ok(self, stdout: impl Into<String>) -> Self {
        self.replies.borrow_mut().push_back(Ok(stdout.into()));
        self
    }

    pub fn reply_err(self, err: RemoteError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl RemoteExecutor for ScriptedExecutor {
    async fn execute(&self, command: &RemoteCommand) -> Result<String, RemoteError> {
        self.calls.borrow_mut().push(command.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Exec("no scripted reply".into())))
    }
}

/// `assets list`-shaped text for (id, name, amount) triples.
pub fn list_output(rows: &[(&str, &str, &str)]) -> String {
    let mut out = String::from("{\n    \"assets\": [\n");
    for (id, name, amount) in rows {
        out.push_str("        {\n            \"asset_genesis\": {\n");
        out.push_str(&format!("                \"asset_id\": \"{id}\",\n"));
        out.push_str(&format!("                \"name\": \"{name}\",\n"));
        out.push_str("                \"output_index\": 0\n            },\n");
        out.push_str(&format!("            \"amount\": \"{amount}\",\n"));
        out.push_str("            \"is_spent\": false\n        },\n");
    }
    out.push_str("    ]\n}\n");
    out
}
