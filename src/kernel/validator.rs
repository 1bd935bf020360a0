//! Optional module graph consistency check.
//!
//! Generation never runs this on its own: a call with no provider still
//! renders and only fails when the external build links the objects. The
//! check exists for callers who want to catch such mistakes before writing
//! anything.

use crate::error::{GenError, Result};
use crate::kernel::graph::ModuleGraph;
use crate::models::SymbolKind;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

static C_IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid C identifier regex"));

/// A call that no module in the graph provides with a matching signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedCall {
    pub module: String,
    pub symbol: String,
    pub kind: SymbolKind,
}

/// A symbol defined by more than one module. Mangled names do not encode
/// the signature, so a void and an int export of one name also collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateProvider {
    pub symbol: String,
    pub modules: Vec<String>,
}

/// Findings of [`check`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub unresolved: Vec<UnresolvedCall>,
    pub duplicates: Vec<DuplicateProvider>,
    /// Module symnames and symbols that are not valid C identifiers
    pub invalid_identifiers: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.duplicates.is_empty() && self.invalid_identifiers.is_empty()
    }

    /// Emit every finding as a warning.
    pub fn log_findings(&self) {
        for u in &self.unresolved {
            log::warn!(
                "[Validator] {} calls {} ({}) but no module provides it",
                u.module,
                u.symbol,
                u.kind
            );
        }
        for d in &self.duplicates {
            log::warn!(
                "[Validator] {} is provided by several modules: {}",
                d.symbol,
                d.modules.join(", ")
            );
        }
        for name in &self.invalid_identifiers {
            log::warn!("[Validator] '{}' is not a valid C identifier", name);
        }
    }

    /// Turn a non-clean report into [`GenError::Inconsistent`].
    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(GenError::Inconsistent(self.to_string()))
        }
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} unresolved calls, {} duplicate providers, {} invalid identifiers",
            self.unresolved.len(),
            self.duplicates.len(),
            self.invalid_identifiers.len()
        )
    }
}

pub fn is_c_identifier(name: &str) -> bool {
    C_IDENTIFIER_REGEX.is_match(name)
}

/// Check that every call resolves to exactly one provider.
pub fn check(graph: &ModuleGraph) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();

    // symbol -> (kind, providing modules)
    let mut providers: BTreeMap<&str, Vec<(SymbolKind, &str)>> = BTreeMap::new();
    for module in graph.modules() {
        for kind in SymbolKind::ALL {
            for symbol in module.provided(kind) {
                providers
                    .entry(symbol.as_str())
                    .or_default()
                    .push((kind, module.name.as_str()));
            }
        }
    }

    for module in graph.modules() {
        let symname = module.symname();
        if !is_c_identifier(&symname) {
            report.invalid_identifiers.push(symname);
        }

        for kind in SymbolKind::ALL {
            for symbol in module.called(kind) {
                let resolved = providers
                    .get(symbol.as_str())
                    .is_some_and(|p| p.iter().any(|(k, _)| *k == kind));
                if !resolved {
                    report.unresolved.push(UnresolvedCall {
                        module: module.name.clone(),
                        symbol: symbol.clone(),
                        kind,
                    });
                }
            }
        }
    }

    for (symbol, found) in &providers {
        if !is_c_identifier(symbol) {
            report.invalid_identifiers.push(symbol.to_string());
        }
        if found.len() > 1 {
            report.duplicates.push(DuplicateProvider {
                symbol: symbol.to_string(),
                modules: found.iter().map(|(_, m)| m.to_string()).collect(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GraphMode, ModuleDescriptor};

    #[test]
    fn test_builtin_graph_is_consistent() {
        assert!(check(&ModuleGraph::builtin(GraphMode::Default)).is_clean());
        assert!(check(&ModuleGraph::builtin(GraphMode::Other)).is_clean());
    }

    #[test]
    fn test_dangling_call_reported() {
        let graph = ModuleGraph::from_modules(vec![
            ModuleDescriptor::new("sr_mod").with_calls(["register_cdrom"]),
        ]);
        let report = check(&graph);
        assert_eq!(
            report.unresolved,
            vec![UnresolvedCall {
                module: "sr_mod".to_string(),
                symbol: "register_cdrom".to_string(),
                kind: SymbolKind::Void,
            }]
        );
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_signature_mismatch_is_unresolved() {
        let graph = ModuleGraph::from_modules(vec![
            ModuleDescriptor::new("qla2xxx").with_provides(["qlt_stop_phase2"]),
            ModuleDescriptor::new("tcm_qla2xxx").with_int_calls(["qlt_stop_phase2"]),
        ]);
        let report = check(&graph);
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].kind, SymbolKind::Int);
    }

    #[test]
    fn test_duplicate_provider_across_kinds() {
        let graph = ModuleGraph::from_modules(vec![
            ModuleDescriptor::new("a").with_provides(["shared"]),
            ModuleDescriptor::new("b").with_int_provides(["shared"]),
        ]);
        let report = check(&graph);
        assert_eq!(
            report.duplicates,
            vec![DuplicateProvider {
                symbol: "shared".to_string(),
                modules: vec!["a".to_string(), "b".to_string()],
            }]
        );
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(is_c_identifier("__scsi_iterate_devices"));
        assert!(!is_c_identifier("9lives"));
        assert!(!is_c_identifier("has space"));

        let graph = ModuleGraph::from_modules(vec![
            ModuleDescriptor::new("mod.v2").with_provides(["ok", "not-ok"]),
        ]);
        let report = check(&graph);
        assert_eq!(report.invalid_identifiers, vec!["mod.v2", "not-ok"]);
    }
}
