//! Generator settings.
//!
//! Every setting has a default matching the playground's fixed layout
//! (`ex-<name>.c` sources listed in `gen_mod.mak`), so running without a
//! settings file reproduces the reference output exactly.
//!
//! # Module Structure
//!
//! - `loader`: reads settings (and an optional custom module graph) from TOML

pub mod loader;

use crate::kernel::emitter::templates::{DEFAULT_AUTHOR, DEFAULT_LICENSE};
use crate::models::ModuleDescriptor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Module file name prefix
pub const DEFAULT_PREFIX: &str = "ex";

/// Aggregate build recipe written next to the sources
pub const DEFAULT_RECIPE_FILE: &str = "gen_mod.mak";

/// Settings controlling where and how sources are generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// File name prefix for every generated source and object
    pub prefix: String,

    /// Name of the recipe file listing one `obj-m` target per module
    pub recipe_file: String,

    /// Directory receiving all generated files
    pub output_dir: PathBuf,

    /// `MODULE_AUTHOR` value
    pub author: String,

    /// `MODULE_LICENSE` value
    pub license: String,

    /// Custom module graph; replaces the built-in graph when non-empty
    pub modules: Vec<ModuleDescriptor>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            recipe_file: DEFAULT_RECIPE_FILE.to_string(),
            output_dir: PathBuf::from("."),
            author: DEFAULT_AUTHOR.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            modules: Vec::new(),
        }
    }
}

impl GeneratorSettings {
    /// Path of the recipe file inside the output directory.
    pub fn recipe_path(&self) -> PathBuf {
        self.output_dir.join(&self.recipe_file)
    }

    /// True when the settings carry their own module graph.
    pub fn has_custom_graph(&self) -> bool {
        !self.modules.is_empty()
    }
}
