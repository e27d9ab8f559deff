//! Terminal prompts used by the send flow.
//!
//! `Prompter` is the seam; `DialoguerPrompter` is the real terminal.
//! Amount and recipient are validated inside the prompt and re-asked until
//! valid, so the flow only ever sees accepted values.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use thiserror::Error;

use super::pager::PageAction;
use crate::tap::Asset;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a whole number greater than 0")]
    InvalidAmount,
    #[error("Recipient address cannot be empty")]
    EmptyRecipient,
}

/// Accepts integers > 0 (surrounding whitespace ignored).
pub fn parse_amount(input: &str) -> Result<u64, ValidationError> {
    match input.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ValidationError::InvalidAmount),
    }
}

/// Trimmed, non-empty address.
pub fn parse_recipient(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRecipient);
    }
    Ok(trimmed.to_string())
}

pub trait Prompter {
    /// Optional name filter; blank means "everything".
    fn search_term(&mut self) -> Result<String>;
    /// Pick one of the enabled paging actions.
    fn page_action(&mut self, actions: &[PageAction]) -> Result<PageAction>;
    /// Index into `assets`.
    fn choose_asset(&mut self, assets: &[Asset]) -> Result<usize>;
    fn amount(&mut self) -> Result<u64>;
    fn recipient(&mut self) -> Result<String>;
    /// Final yes/no; defaults to no.
    fn confirm_send(&mut self) -> Result<bool>;
}

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn search_term(&mut self) -> Result<String> {
        let term = Input::<String>::with_theme(&self.theme)
            .with_prompt("Asset name to search (leave blank to list all)")
            .allow_empty(true)
            .interact_text()?;
        Ok(term)
    }

    fn page_action(&mut self, actions: &[PageAction]) -> Result<PageAction> {
        let labels: Vec<&str> = actions.iter().map(PageAction::label).collect();
        let idx = Select::with_theme(&self.theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(actions[idx])
    }

    fn choose_asset(&mut self, assets: &[Asset]) -> Result<usize> {
        let labels: Vec<String> = assets
            .iter()
            .map(|a| format!("{} (ID: {})", a.name, a.id))
            .collect();
        let idx = Select::with_theme(&self.theme)
            .with_prompt("Select the asset to send")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(idx)
    }

    fn amount(&mut self) -> Result<u64> {
        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt("Amount to send")
            .validate_with(|input: &String| parse_amount(input).map(|_| ()))
            .interact_text()?;
        Ok(parse_amount(&raw)?)
    }

    fn recipient(&mut self) -> Result<String> {
        let raw = Input::<String>::with_theme(&self.theme)
            .with_prompt("Recipient Taproot Assets address")
            .validate_with(|input: &String| parse_recipient(input).map(|_| ()))
            .interact_text()?;
        Ok(parse_recipient(&raw)?)
    }

    fn confirm_send(&mut self) -> Result<bool> {
        let yes = Confirm::with_theme(&self.theme)
            .with_prompt("Are you sure you want to send this asset?")
            .default(false)
            .interact()?;
        Ok(yes)
    }
}
