/*!
`send.rs`

Implements `send`: the interactive search -> page -> select -> confirm ->
send flow (see `crate::send`). Every outcome, including failures, exits 0.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::config::AppConfig;
use crate::send::{DEFAULT_PAGE_SIZE, DialoguerPrompter, SendFlow, SendOutcome};
use crate::tap::{AssetQueryService, SshExecutor};

/// CLI arguments for `tap-remote send`
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Assets shown per page while browsing
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub page_size: u16,
}

pub async fn execute_send(args: SendArgs, config: &AppConfig) -> Result<()> {
    let executor = SshExecutor::new(&config.ssh);
    let service = AssetQueryService::new(&executor, &config.tapd);
    let mut prompter = DialoguerPrompter::default();

    let outcome = SendFlow::new(&service, &mut prompter)
        .page_size(usize::from(args.page_size))
        .run()
        .await;

    report(&outcome);
    Ok(())
}

fn report(outcome: &SendOutcome) {
    let style = StyleOptions::detect();
    match outcome {
        SendOutcome::Sent => println!(
            "{} {}",
            emoji("success", &style),
            color(Role::Success, "Send command completed.", &style)
        ),
        SendOutcome::SentWithUsageWarning | SendOutcome::Cancelled => {}
        SendOutcome::Failed(reason) => eprintln!(
            "{} {} {reason}",
            emoji("error", &style),
            color(Role::Error, "Asset was not sent:", &style)
        ),
    }
}
