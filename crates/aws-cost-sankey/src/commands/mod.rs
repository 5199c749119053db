//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod generate;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use generate::{build_graph, execute_generate, run_generate, validate_args, GenerateOutcome};
pub use models::{GenerateArgs, OutputFormat};
pub use utils::{display_version, validate_dump_file};
