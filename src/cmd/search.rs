/*!
`search.rs`

Implements `search <NAME>`: assets whose name contains NAME, ignoring case.
A failed remote call looks the same as "nothing matched".

JSON Output Shape:
{
  "status": "ok",
  "subject": "search",
  "term": "gold",
  "count": 1,
  "assets": [ { "id": "a1", "name": "Gold", "supply": "1000" } ]
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji};
use crate::cmd::shared::{assets_json, render_assets};
use crate::config::AppConfig;
use crate::tap::{AssetQueryService, RemoteExecutor, SshExecutor};

/// CLI arguments for `tap-remote search <NAME>`
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Name (or part of it) to look for
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub async fn execute_search(args: SearchArgs, config: &AppConfig) -> Result<()> {
    let executor = SshExecutor::new(&config.ssh);
    let service = AssetQueryService::new(&executor, &config.tapd);
    search_assets(&service, &args).await
}

async fn search_assets<E: RemoteExecutor>(
    service: &AssetQueryService<'_, E>,
    args: &SearchArgs,
) -> Result<()> {
    let assets = service.search_by_name(&args.name).await;

    if args.json {
        println!(
            "{}",
            assets_json("search", &assets, Some(("term", args.name.as_str())))
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    if assets.is_empty() {
        println!(
            "{} {}",
            emoji("info", &style),
            color(
                Role::Warning,
                format!("No assets found with the name \"{}\".", args.name),
                &style
            )
        );
        return Ok(());
    }

    println!(
        "{}",
        box_header(
            format!(
                "{} Assets matching \"{}\" ({})",
                emoji("search", &style),
                args.name,
                assets.len()
            ),
            None::<&str>,
            &style,
        )
    );
    print!("{}", render_assets(&assets, &style));
    Ok(())
}
