/*!
`info.rs`

Implements `info <ASSET_ID>`: prints the raw `tapcli assets info` response.
The detail format is not scraped; what tapcli prints is what you get.
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{StyleOptions, box_header, emoji};
use crate::cmd::shared::output_error;
use crate::config::AppConfig;
use crate::tap::{AssetQueryService, RemoteExecutor, SshExecutor};

/// CLI arguments for `tap-remote info <ASSET_ID>`
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Asset id (hex) to describe
    #[arg(value_name = "ASSET_ID")]
    pub asset_id: String,
}

pub async fn execute_info(args: InfoArgs, config: &AppConfig) -> Result<()> {
    let executor = SshExecutor::new(&config.ssh);
    let service = AssetQueryService::new(&executor, &config.tapd);
    show_info(&service, &args).await
}

async fn show_info<E: RemoteExecutor>(
    service: &AssetQueryService<'_, E>,
    args: &InfoArgs,
) -> Result<()> {
    let Some(detail) = service.get_info(&args.asset_id).await else {
        output_error(false, "Error fetching asset information (see log above)");
        return Ok(());
    };

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} Asset detail", emoji("coin", &style)),
            Some(args.asset_id.as_str()),
            &style,
        )
    );
    println!("{detail}");
    Ok(())
}
