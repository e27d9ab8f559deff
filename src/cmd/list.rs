/*!
`list.rs`

Implements the `list` subcommand: every asset on the node with name,
thousands-grouped supply and asset id.

JSON Output Shape:
{
  "status": "ok",
  "subject": "assets",
  "count": 2,
  "assets": [
    { "id": "a1", "name": "Gold", "supply": "1000" }
  ]
}

A failed remote call prints an error (or `{"status":"error",...}`) and
still exits 0.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, box_header, emoji};
use crate::cmd::shared::{assets_json, output_error, render_assets};
use crate::config::AppConfig;
use crate::tap::{AssetQueryService, RemoteExecutor, SshExecutor};

/// CLI arguments for `tap-remote list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the list subcommand.
pub async fn execute_list(args: ListArgs, config: &AppConfig) -> Result<()> {
    let executor = SshExecutor::new(&config.ssh);
    let service = AssetQueryService::new(&executor, &config.tapd);
    list_assets(&service, &args).await
}

async fn list_assets<E: RemoteExecutor>(
    service: &AssetQueryService<'_, E>,
    args: &ListArgs,
) -> Result<()> {
    let Some(assets) = service.list_all().await else {
        output_error(args.json, "Error listing assets (see log above)");
        return Ok(());
    };

    if args.json {
        println!("{}", assets_json("assets", &assets, None));
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} Assets ({})", emoji("list", &style), assets.len()),
            Some("name, supply and asset id"),
            &style,
        )
    );
    print!("{}", render_assets(&assets, &style));
    Ok(())
}
