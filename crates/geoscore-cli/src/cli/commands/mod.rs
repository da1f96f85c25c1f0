//! Command implementations.

mod analyze;
mod config_cmd;
mod serve;

pub use analyze::{cmd_analyze, cmd_compare, cmd_text, cmd_validate};
pub use config_cmd::cmd_config_show;
pub use serve::cmd_serve;
