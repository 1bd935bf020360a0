//! Generation pipeline: select graph -> optional consistency check -> write.

use crate::config::{loader, GeneratorSettings};
use crate::error::Result;
use crate::kernel::graph::{GenerationReport, ModuleGraph};
use crate::kernel::validator;
use crate::models::GraphMode;

/// How to treat graph consistency before writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsistencyMode {
    /// Write without looking at the graph
    #[default]
    Skip,
    /// Log findings, write anyway
    Warn,
    /// Refuse to write anything if there are findings
    Strict,
}

/// Generate every module of the selected graph plus the recipe file.
pub fn run(
    settings: &GeneratorSettings,
    mode: GraphMode,
    consistency: ConsistencyMode,
) -> Result<GenerationReport> {
    loader::validate_settings(settings)?;
    let graph = ModuleGraph::for_settings(settings, mode);
    log::info!(
        "[Orchestrator] generating {} modules (mode: {})",
        graph.len(),
        mode
    );

    if consistency != ConsistencyMode::Skip {
        let report = validator::check(&graph);
        report.log_findings();
        if consistency == ConsistencyMode::Strict {
            report.into_result()?;
        } else if !report.is_clean() {
            log::warn!("[Orchestrator] continuing despite {}", report);
        }
    }

    graph.generate(settings)
}
