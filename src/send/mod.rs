/*!
Interactive send flow.

```text
Searching --results--> Paginating --select--> Selecting --> Confirming --yes--> Sending --> Done
    ^  |                 |   ^  |                                  |
    |  +--none found--+  |   +--+ next / previous                  +--no--> Done (cancelled)
    |                 |  |
    +-----------------+--+ search again            Paginating --cancel--> Done (cancelled)
```

Each state is one method returning the next state. Nothing aborts the
process: remote failures and prompt failures end in `Done` with an outcome
the caller can report, validation failures are re-asked by the prompter.
*/

pub mod pager;
pub mod prompt;

use anyhow::Result;

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::tap::{Asset, AssetQueryService, RemoteExecutor};
use pager::{PageAction, Pager};
use prompt::Prompter;

pub use pager::DEFAULT_PAGE_SIZE;
pub use prompt::DialoguerPrompter;

/// How the flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// tapcli answered with its own help text; the send most likely did not happen.
    SentWithUsageWarning,
    Cancelled,
    Failed(String),
}

enum State {
    Searching,
    Paginating { assets: Vec<Asset>, pager: Pager },
    Selecting { items: Vec<Asset> },
    Confirming { asset: Asset },
    Sending {
        asset: Asset,
        amount: u64,
        recipient: String,
    },
    Done(SendOutcome),
}

/// True when tapcli printed usage text instead of acting on the command.
pub fn looks_like_usage(output: &str) -> bool {
    output.contains("NAME:") && output.contains("USAGE:")
}

pub struct SendFlow<'f, 'a, E, P> {
    service: &'f AssetQueryService<'a, E>,
    prompter: &'f mut P,
    page_size: usize,
    style: StyleOptions,
}

impl<'f, 'a, E, P> SendFlow<'f, 'a, E, P>
where
    E: RemoteExecutor,
    P: Prompter,
{
    pub fn new(service: &'f AssetQueryService<'a, E>, prompter: &'f mut P) -> Self {
        Self {
            service,
            prompter,
            page_size: DEFAULT_PAGE_SIZE,
            style: StyleOptions::detect(),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub async fn run(mut self) -> SendOutcome {
        let mut state = State::Searching;
        loop {
            state = match state {
                State::Done(outcome) => return outcome,
                current => match self.step(current).await {
                    Ok(next) => next,
                    Err(e) => {
                        tracing::error!("send flow aborted: {e:#}");
                        State::Done(SendOutcome::Failed(format!("{e:#}")))
                    }
                },
            };
        }
    }

    async fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Searching => self.search().await,
            State::Paginating { assets, pager } => self.paginate(assets, pager),
            State::Selecting { items } => self.select(items),
            State::Confirming { asset } => self.confirm(asset),
            State::Sending {
                asset,
                amount,
                recipient,
            } => Ok(self.send(&asset, amount, &recipient).await),
            State::Done(outcome) => Ok(State::Done(outcome)),
        }
    }

    /* ---- Searching ---- */

    async fn search(&mut self) -> Result<State> {
        let term = self.prompter.search_term()?;
        let term = term.trim();

        let assets = if term.is_empty() {
            self.service.list_all().await.unwrap_or_default()
        } else {
            self.service.search_by_name(term).await
        };

        if assets.is_empty() {
            println!(
                "{}",
                color(Role::Warning, "No assets found. Try again.", &self.style)
            );
            return Ok(State::Searching);
        }

        let pager = Pager::new(assets.len(), self.page_size);
        Ok(State::Paginating { assets, pager })
    }

    /* ---- Paginating ---- */

    fn paginate(&mut self, assets: Vec<Asset>, mut pager: Pager) -> Result<State> {
        self.show_page(&assets, &pager);

        let action = self.prompter.page_action(&pager.actions())?;
        Ok(match action {
            PageAction::Next => {
                pager.next();
                State::Paginating { assets, pager }
            }
            PageAction::Previous => {
                pager.previous();
                State::Paginating { assets, pager }
            }
            PageAction::Select => State::Selecting {
                items: pager.page(&assets).to_vec(),
            },
            PageAction::SearchAgain => State::Searching,
            PageAction::Cancel => {
                println!("{}", color(Role::Warning, "Operation cancelled.", &self.style));
                State::Done(SendOutcome::Cancelled)
            }
        })
    }

    fn show_page(&self, assets: &[Asset], pager: &Pager) {
        let range = pager.range();
        println!(
            "{}",
            color(
                Role::Primary,
                format!(
                    "Showing {}-{} of {} assets:",
                    range.start + 1,
                    range.end,
                    pager.total()
                ),
                &self.style
            )
        );
        for (offset, asset) in pager.page(assets).iter().enumerate() {
            println!(
                "{}",
                color(
                    Role::Success,
                    format!("{}. {} (ID: {})", range.start + offset + 1, asset.name, asset.id),
                    &self.style
                )
            );
        }
    }

    /* ---- Selecting ---- */

    fn select(&mut self, items: Vec<Asset>) -> Result<State> {
        let idx = self.prompter.choose_asset(&items)?;
        let asset = items
            .into_iter()
            .nth(idx)
            .ok_or_else(|| anyhow::anyhow!("selection {idx} is out of range"))?;
        Ok(State::Confirming { asset })
    }

    /* ---- Confirming ---- */

    fn confirm(&mut self, asset: Asset) -> Result<State> {
        let amount = self.prompter.amount()?;
        let recipient = self.prompter.recipient()?;
        if !self.prompter.confirm_send()? {
            println!("{}", color(Role::Warning, "Operation cancelled.", &self.style));
            return Ok(State::Done(SendOutcome::Cancelled));
        }
        Ok(State::Sending {
            asset,
            amount,
            recipient,
        })
    }

    /* ---- Sending ---- */

    async fn send(&mut self, asset: &Asset, amount: u64, recipient: &str) -> State {
        let style = &self.style;
        let command = self.service.commands().send_asset(&asset.id, amount, recipient);

        println!(
            "{} {}",
            emoji("send", style),
            color(Role::Warning, "Sending asset...", style)
        );
        println!("{}", color(Role::Warning, format!("Asset ID: {}", asset.id), style));
        println!("{}", color(Role::Warning, format!("Amount: {amount}"), style));
        println!("{}", color(Role::Warning, format!("Address: {recipient}"), style));
        println!("{} {command}", color(Role::Primary, "Command:", style));

        let output = match self.service.send_asset(&asset.id, amount, recipient).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(asset_id = %asset.id, "send failed: {e}");
                eprintln!(
                    "{} {} {e}",
                    emoji("error", style),
                    color(Role::Error, "Error running send command:", style)
                );
                return State::Done(SendOutcome::Failed(e.to_string()));
            }
        };

        println!("{}", color(Role::Success, "Command response:", style));
        println!("{output}");

        if looks_like_usage(&output) {
            tracing::warn!("tapcli printed usage text instead of sending");
            println!(
                "{} {}",
                emoji("warn", style),
                color(
                    Role::Error,
                    "The command did not run as expected; tapcli printed its usage text.",
                    style
                )
            );
            println!(
                "{}",
                color(
                    Role::Warning,
                    "Check that you have the required permissions and that the parameters are correct.",
                    style
                )
            );
            return State::Done(SendOutcome::SentWithUsageWarning);
        }

        State::Done(SendOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TapdConfig;
    use crate::tap::executor::RemoteError;
    use crate::tap::testing::{ScriptedExecutor, list_output};
    use anyhow::anyhow;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedPrompter {
        terms: VecDeque<String>,
        actions: VecDeque<PageAction>,
        choices: VecDeque<usize>,
        amounts: VecDeque<u64>,
        recipients: VecDeque<String>,
        confirms: VecDeque<bool>,
        offered: Vec<Vec<PageAction>>,
        shown: Vec<Vec<String>>,
    }

    fn next<T>(q: &mut VecDeque<T>, what: &str) -> Result<T> {
        q.pop_front().ok_or_else(|| anyhow!("no scripted {what}"))
    }

    impl Prompter for ScriptedPrompter {
        fn search_term(&mut self) -> Result<String> {
            next(&mut self.terms, "search term")
        }
        fn page_action(&mut self, actions: &[PageAction]) -> Result<PageAction> {
            self.offered.push(actions.to_vec());
            next(&mut self.actions, "page action")
        }
        fn choose_asset(&mut self, assets: &[Asset]) -> Result<usize> {
            self.shown.push(assets.iter().map(|a| a.id.clone()).collect());
            next(&mut self.choices, "choice")
        }
        fn amount(&mut self) -> Result<u64> {
            next(&mut self.amounts, "amount")
        }
        fn recipient(&mut self) -> Result<String> {
            next(&mut self.recipients, "recipient")
        }
        fn confirm_send(&mut self) -> Result<bool> {
            next(&mut self.confirms, "confirmation")
        }
    }

    fn tapd() -> TapdConfig {
        TapdConfig {
            tls_cert_path: "/tls.cert".into(),
            rpc_server: "tapd".into(),
            network: "testnet".into(),
        }
    }

    fn three_assets() -> String {
        list_output(&[
            ("a1", "Gold", "1000"),
            ("a2", "Silver", "500"),
            ("a3", "Catnip Token", "42"),
        ])
    }

    fn many_assets(n: usize) -> String {
        let rows: Vec<(String, String)> = (0..n).map(|i| (format!("id{i}"), format!("Asset {i}"))).collect();
        let borrowed: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str(), "1"))
            .collect();
        list_output(&borrowed)
    }

    fn pick_second_and_send(confirm: bool) -> ScriptedPrompter {
        ScriptedPrompter {
            terms: VecDeque::from(vec![String::new()]),
            actions: VecDeque::from(vec![PageAction::Select]),
            choices: VecDeque::from(vec![1]),
            amounts: VecDeque::from(vec![5]),
            recipients: VecDeque::from(vec!["taptb1qqq".to_string()]),
            confirms: VecDeque::from(vec![confirm]),
            ..Default::default()
        }
    }

    async fn run_flow(exec: &ScriptedExecutor, prompter: &mut ScriptedPrompter) -> SendOutcome {
        let cfg = tapd();
        let service = AssetQueryService::new(exec, &cfg);
        SendFlow::new(&service, prompter)
            .style(StyleOptions::plain())
            .run()
            .await
    }

    #[tokio::test]
    async fn declining_never_sends() {
        let exec = ScriptedExecutor::new().reply_ok(three_assets());
        let mut prompter = pick_second_and_send(false);

        let outcome = run_flow(&exec, &mut prompter).await;

        assert_eq!(outcome, SendOutcome::Cancelled);
        let calls = exec.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls.iter().all(|c| !c.contains("assets send")));
    }

    #[tokio::test]
    async fn confirming_runs_send_command() {
        let exec = ScriptedExecutor::new()
            .reply_ok(three_assets())
            .reply_ok("{\n  \"transfer\": {}\n}\n");
        let mut prompter = pick_second_and_send(true);

        let outcome = run_flow(&exec, &mut prompter).await;

        assert_eq!(outcome, SendOutcome::Sent);
        let calls = exec.calls();
        assert_eq!(calls.len(), 2);
        let argv = shell_words::split(&calls[1]).unwrap();
        assert_eq!(
            argv[argv.len() - 5..].to_vec(),
            vec!["assets", "send", "a2", "5", "--addr=taptb1qqq"]
        );
    }

    #[tokio::test]
    async fn usage_text_is_a_warning_not_an_error() {
        let exec = ScriptedExecutor::new()
            .reply_ok(three_assets())
            .reply_ok("NAME:\n   tapcli assets send - send\n\nUSAGE:\n   tapcli assets send [options]\n");
        let mut prompter = pick_second_and_send(true);

        let outcome = run_flow(&exec, &mut prompter).await;
        assert_eq!(outcome, SendOutcome::SentWithUsageWarning);
    }

    #[tokio::test]
    async fn send_failure_is_reported() {
        let exec = ScriptedExecutor::new()
            .reply_ok(three_assets())
            .reply_err(RemoteError::CommandExit { code: 1 });
        let mut prompter = pick_second_and_send(true);

        let outcome = run_flow(&exec, &mut prompter).await;
        assert_eq!(
            outcome,
            SendOutcome::Failed("command failed with exit code 1".into())
        );
    }

    #[tokio::test]
    async fn empty_results_prompt_again() {
        let exec = ScriptedExecutor::new()
            .reply_ok(three_assets())
            .reply_ok(three_assets());
        let mut prompter = ScriptedPrompter {
            terms: VecDeque::from(vec!["platinum".to_string(), "  ".to_string()]),
            actions: VecDeque::from(vec![PageAction::Cancel]),
            ..Default::default()
        };

        let outcome = run_flow(&exec, &mut prompter).await;

        assert_eq!(outcome, SendOutcome::Cancelled);
        assert!(prompter.terms.is_empty(), "both search terms consumed");
        assert_eq!(exec.calls().len(), 2);
    }

    #[tokio::test]
    async fn remote_failure_while_searching_prompts_again() {
        let exec = ScriptedExecutor::new()
            .reply_err(RemoteError::Exec("channel refused".into()))
            .reply_ok(three_assets());
        let mut prompter = ScriptedPrompter {
            terms: VecDeque::from(vec![String::new(), "cat".to_string()]),
            actions: VecDeque::from(vec![PageAction::Select]),
            choices: VecDeque::from(vec![0]),
            amounts: VecDeque::from(vec![1]),
            recipients: VecDeque::from(vec!["taptb1".to_string()]),
            confirms: VecDeque::from(vec![false]),
            ..Default::default()
        };

        let outcome = run_flow(&exec, &mut prompter).await;

        assert_eq!(outcome, SendOutcome::Cancelled);
        assert_eq!(prompter.shown, vec![vec!["a3".to_string()]]);
    }

    #[tokio::test]
    async fn paging_moves_cursor_and_limits_actions() {
        let exec = ScriptedExecutor::new()
            .reply_ok(many_assets(25))
            .reply_ok("ok");
        let mut prompter = ScriptedPrompter {
            terms: VecDeque::from(vec![String::new()]),
            actions: VecDeque::from(vec![
                PageAction::Next,
                PageAction::Next,
                PageAction::Previous,
                PageAction::Select,
            ]),
            choices: VecDeque::from(vec![0]),
            amounts: VecDeque::from(vec![3]),
            recipients: VecDeque::from(vec!["taptb1".to_string()]),
            confirms: VecDeque::from(vec![true]),
            ..Default::default()
        };

        let outcome = run_flow(&exec, &mut prompter).await;
        assert_eq!(outcome, SendOutcome::Sent);

        // page 0: no previous; page 2 (last): no next
        assert!(!prompter.offered[0].contains(&PageAction::Previous));
        assert!(prompter.offered[0].contains(&PageAction::Next));
        assert!(prompter.offered[2].contains(&PageAction::Previous));
        assert!(!prompter.offered[2].contains(&PageAction::Next));

        let expected: Vec<String> = (10..20).map(|i| format!("id{i}")).collect();
        assert_eq!(prompter.shown, vec![expected]);
        assert!(exec.calls()[1].contains("assets send id10 3"));
    }

    #[tokio::test]
    async fn search_again_resets_to_searching() {
        let exec = ScriptedExecutor::new()
            .reply_ok(many_assets(15))
            .reply_ok(three_assets());
        let mut prompter = ScriptedPrompter {
            terms: VecDeque::from(vec![String::new(), "gold".to_string()]),
            actions: VecDeque::from(vec![
                PageAction::Next,
                PageAction::SearchAgain,
                PageAction::Cancel,
            ]),
            ..Default::default()
        };

        let outcome = run_flow(&exec, &mut prompter).await;

        assert_eq!(outcome, SendOutcome::Cancelled);
        // fresh cursor after the new search: first page, single result
        assert_eq!(
            prompter.offered[2],
            vec![
                PageAction::Select,
                PageAction::SearchAgain,
                PageAction::Cancel
            ]
        );
    }

    #[tokio::test]
    async fn prompt_failure_ends_flow() {
        let exec = ScriptedExecutor::new();
        let mut prompter = ScriptedPrompter::default();

        let outcome = run_flow(&exec, &mut prompter).await;

        assert!(matches!(outcome, SendOutcome::Failed(msg) if msg.contains("search term")));
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn usage_heuristic_needs_both_markers() {
        assert!(looks_like_usage("NAME:\n x\nUSAGE:\n y"));
        assert!(!looks_like_usage("NAME: only"));
        assert!(!looks_like_usage("USAGE: only"));
        assert!(!looks_like_usage("{\"transfer\": {}}"));
    }
}
