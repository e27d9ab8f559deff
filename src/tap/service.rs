/*!
Asset queries on top of a `RemoteExecutor`.

  list_all        -> Option<Vec<Asset>>   (None when the remote call failed)
  get_info        -> Option<String>       (raw tapcli text, not scraped)
  search_by_name  -> Vec<Asset>           (empty when the remote call failed)
  send_asset      -> Result<String, RemoteError>

Query failures are logged here and flattened to "no result"; callers print
their own "nothing found" message. `send_asset` keeps the error because the send
flow reports it to the user.
*/

use super::command::CommandBuilder;
use super::executor::{RemoteError, RemoteExecutor};
use super::parser::parse_asset_list;
use super::Asset;
use crate::config::TapdConfig;

pub struct AssetQueryService<'a, E> {
    executor: &'a E,
    commands: CommandBuilder<'a>,
}

impl<'a, E: RemoteExecutor> AssetQueryService<'a, E> {
    pub fn new(executor: &'a E, tapd: &'a TapdConfig) -> Self {
        Self {
            executor,
            commands: CommandBuilder::new(tapd),
        }
    }

    pub fn commands(&self) -> CommandBuilder<'a> {
        self.commands
    }

    /// Every asset known to the node.
    pub async fn list_all(&self) -> Option<Vec<Asset>> {
        match self.fetch_assets().await {
            Ok(assets) => {
                tracing::debug!(count = assets.len(), "assets listed");
                Some(assets)
            }
            Err(e) => {
                tracing::error!("listing assets failed: {e}");
                None
            }
        }
    }

    /// Raw `assets info` output for one asset.
    pub async fn get_info(&self, asset_id: &str) -> Option<String> {
        let command = self.commands.asset_info(asset_id);
        match self.executor.execute(&command).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(asset_id, "fetching asset info failed: {e}");
                None
            }
        }
    }

    /// Assets whose name contains `term`, ignoring case.
    pub async fn search_by_name(&self, term: &str) -> Vec<Asset> {
        match self.fetch_assets().await {
            Ok(assets) => assets.into_iter().filter(|a| a.name_matches(term)).collect(),
            Err(e) => {
                tracing::error!(term, "searching assets failed: {e}");
                Vec::new()
            }
        }
    }

    /// Send `amount` units of `asset_id` to a Taproot Assets address.
    pub async fn send_asset(
        &self,
        asset_id: &str,
        amount: u64,
        address: &str,
    ) -> Result<String, RemoteError> {
        let command = self.commands.send_asset(asset_id, amount, address);
        self.executor.execute(&command).await
    }

    async fn fetch_assets(&self) -> Result<Vec<Asset>, RemoteError> {
        let text = self.executor.execute(&self.commands.list_assets()).await?;
        Ok(parse_asset_list(&text))
    }
}
