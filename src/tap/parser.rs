/*!
Scraper for `tapcli assets list` output.

tapcli prints pretty JSON, but the list is read line by line rather than
deserialized: each asset contributes an `"asset_id"` line, then a `"name"`
line, then an `"amount"` line. `amount` closes the record.

  - value = text between the 3rd and 4th `"` on the line
  - lines without a known key are skipped
  - a trailing record that never reaches `amount` is dropped

Any change in tapcli's field order or quoting breaks extraction silently.
Callers only see `parse_asset_list`, so a structured reader can replace
this without touching them.
*/

use super::Asset;

const ID_KEY: &str = "\"asset_id\":";
const NAME_KEY: &str = "\"name\":";
const AMOUNT_KEY: &str = "\"amount\":";

#[derive(Default)]
struct Pending {
    id: Option<String>,
    name: Option<String>,
}

impl Pending {
    fn finish(&mut self, supply: String) -> Asset {
        let taken = std::mem::take(self);
        Asset {
            id: taken.id.unwrap_or_default(),
            name: taken.name.unwrap_or_default(),
            supply,
        }
    }
}

/// Parse list output into assets, in input order.
pub fn parse_asset_list(text: &str) -> Vec<Asset> {
    let mut assets = Vec::new();
    let mut pending = Pending::default();

    for line in text.lines() {
        if line.contains(ID_KEY) {
            pending.id = Some(quoted_value(line));
        } else if line.contains(NAME_KEY) {
            pending.name = Some(quoted_value(line));
        } else if line.contains(AMOUNT_KEY) {
            assets.push(pending.finish(quoted_value(line)));
        }
    }

    if pending.id.is_some() || pending.name.is_some() {
        tracing::debug!("dropping trailing asset record without amount");
    }
    assets
}

/// `  "name": "Gold",` -> `Gold`
fn quoted_value(line: &str) -> String {
    line.split('"').nth(3).unwrap_or_default().to_string()
}
