/*!
shared.rs - helpers used by several subcommands.

  - render_assets / assets_json : human and JSON views of an asset list
  - output_error                : one place for "it didn't work" messages
*/

use crate::cmd::format::{Role, StyleOptions, color, emoji, format_supply};
use crate::tap::Asset;

/// Name / supply / id blocks separated by `---`.
pub fn render_assets(assets: &[Asset], style: &StyleOptions) -> String {
    let mut out = String::new();
    for asset in assets {
        out.push_str(&color(Role::Success, format!("Name: {}", asset.name), style));
        out.push('\n');
        out.push_str(&format!("Supply: {}\n", format_supply(&asset.supply)));
        out.push_str(&color(Role::Warning, format!("Asset ID: {}", asset.id), style));
        out.push_str("\n---\n");
    }
    out
}

pub fn assets_json(subject: &str, assets: &[Asset], extra: Option<(&str, &str)>) -> serde_json::Value {
    let mut value = serde_json::json!({
        "status": "ok",
        "subject": subject,
        "count": assets.len(),
        "assets": assets,
    });
    if let (Some((k, v)), Some(obj)) = (extra, value.as_object_mut()) {
        obj.insert(k.to_string(), serde_json::Value::String(v.to_string()));
    }
    value
}

/// Print a failure in the selected output mode. Never changes the exit code.
pub fn output_error(json: bool, message: &str) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "status": "error", "error": message })
        );
    } else {
        let style = StyleOptions::detect();
        eprintln!(
            "{} {}",
            emoji("error", &style),
            color(Role::Error, message, &style)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_plain_blocks() {
        let assets = vec![
            Asset::new("a1", "Gold", "1000"),
            Asset::new("a2", "Silver", "500"),
        ];
        let out = render_assets(&assets, &StyleOptions::plain());
        assert_eq!(
            out,
            "Name: Gold\nSupply: 1,000\nAsset ID: a1\n---\n\
             Name: Silver\nSupply: 500\nAsset ID: a2\n---\n"
        );
    }

    #[test]
    fn render_empty() {
        assert!(render_assets(&[], &StyleOptions::plain()).is_empty());
    }

    #[test]
    fn json_shape() {
        let assets = vec![Asset::new("a1", "Gold", "1000")];
        let v = assets_json("search", &assets, Some(("term", "go")));
        assert_eq!(v["status"], "ok");
        assert_eq!(v["count"], 1);
        assert_eq!(v["term"], "go");
        assert_eq!(v["assets"][0]["supply"], "1000");
    }
}
