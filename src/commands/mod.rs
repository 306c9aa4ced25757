//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Each command is in its own submodule. Commands only consume the view
//! model and the lookup cache, never raw HTTP responses.

pub mod generate;
pub mod health;
pub mod lookup;
pub mod output;

pub use generate::{execute_generate, GenerateOptions};
pub use health::execute_health;
pub use lookup::{execute_lookup, LookupOptions};
pub use output::{format_percent, probability_bar, render_failure, render_lookup, render_response};
