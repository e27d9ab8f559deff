/*!
Subcommand dispatcher module.

Layout:
  src/cmd/
    mod.rs      (this file: module declarations + re-exports)
    list.rs     (ListArgs   + execute_list)
    info.rs     (InfoArgs   + execute_info)
    search.rs   (SearchArgs + execute_search)
    send.rs     (SendArgs   + execute_send; flow lives in `crate::send`)
    shared.rs   (asset rendering, error output)
    format.rs   (colour / emoji / box header / supply formatting)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    taking its args plus `&AppConfig` and returning `anyhow::Result<()>`.
  - Remote failures are reported, not returned; `Err` is reserved for
    local problems (e.g. writing to stdout).
  - Argument structs derive `clap::Args` and are kept minimal.
*/

pub mod format;
pub mod info;
pub mod list;
pub mod search;
pub mod send;
pub mod shared;

pub use info::{InfoArgs, execute_info};
pub use list::{ListArgs, execute_list};
pub use search::{SearchArgs, execute_search};
pub use send::{SendArgs, execute_send};
