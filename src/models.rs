//! Core data types for the module generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One synthetic kernel module: its name and the symbols it exports and calls.
///
/// The four symbol lists are independent and owned by the descriptor.
/// Calls are not checked against any provider here; a dangling call only
/// shows up when the external build links the generated objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name, may contain hyphens
    pub name: String,

    /// Exported `void f(void)` symbols
    #[serde(default)]
    pub provides: Vec<String>,

    /// Called `void f(void)` symbols
    #[serde(default)]
    pub calls: Vec<String>,

    /// Exported `void f(int)` symbols
    #[serde(default)]
    pub int_provides: Vec<String>,

    /// Called `void f(int)` symbols
    #[serde(default)]
    pub int_calls: Vec<String>,
}

impl ModuleDescriptor {
    /// Create a descriptor with no symbols.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_provides<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_calls<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calls = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_int_provides<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.int_provides = symbols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_int_calls<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.int_calls = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Name usable inside C identifiers (hyphens become underscores).
    pub fn symname(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Name of the generated `module_init` function.
    pub fn init_fn_name(&self) -> String {
        format!("{}_init", self.symname())
    }

    /// Symbols this module exports with the given signature.
    pub fn provided(&self, kind: SymbolKind) -> &[String] {
        match kind {
            SymbolKind::Void => &self.provides,
            SymbolKind::Int => &self.int_provides,
        }
    }

    /// Symbols this module calls with the given signature.
    pub fn called(&self, kind: SymbolKind) -> &[String] {
        match kind {
            SymbolKind::Void => &self.calls,
            SymbolKind::Int => &self.int_calls,
        }
    }
}

/// Signature of a generated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// `void f(void)`
    Void,
    /// `void f(int)`
    Int,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 2] = [SymbolKind::Void, SymbolKind::Int];
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Void => write!(f, "void(void)"),
            SymbolKind::Int => write!(f, "void(int)"),
        }
    }
}

/// Which variant of the qla2xxx/tcm_qla2xxx pair to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphMode {
    /// `qlt_stop_phase2` is a `void f(void)` export
    #[default]
    Default,
    /// `qlt_stop_phase2` is a `void f(int)` export
    Other,
}

impl GraphMode {
    /// Map the optional positional argument to a mode.
    ///
    /// Only the exact string `other` selects [`GraphMode::Other`].
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("other") => GraphMode::Other,
            _ => GraphMode::Default,
        }
    }
}

impl FromStr for GraphMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GraphMode::from_arg(Some(s)))
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphMode::Default => write!(f, "default"),
            GraphMode::Other => write!(f, "other"),
        }
    }
}
