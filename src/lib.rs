//! Fake kernel module source generator
//!
//! Produces C sources for synthetic loadable kernel modules whose exported
//! and called symbols form a realistic dependency graph, plus a kbuild
//! recipe listing one `obj-m` target per module. The sources feed the
//! module-playground of the module-management testsuite.
//!
//! The crate is organized into functional modules:
//! - **error**: Unified error type
//! - **models**: Module descriptors and graph modes
//! - **config**: Generator settings and the TOML loader
//! - **kernel**: Source emitter, built-in graph and consistency check
//! - **orchestrator**: The end-to-end generation run
//! - **log_collector**: `log` backend used by the binary

pub mod config;
pub mod error;
pub mod kernel;
pub mod log_collector;
pub mod models;
pub mod orchestrator;

// Re-export the log crate for macro usage
pub use log;

pub use config::GeneratorSettings;
pub use error::{GenError, Result};
pub use kernel::emitter::{mangle, render, render_with, write, write_to};
pub use kernel::graph::{GenerationReport, ModuleGraph};
pub use kernel::validator::ConsistencyReport;
pub use log_collector::{LogCollector, LogLine};
pub use models::{GraphMode, ModuleDescriptor, SymbolKind};
pub use orchestrator::ConsistencyMode;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
