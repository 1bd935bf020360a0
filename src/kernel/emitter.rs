//! C source emitter for fake kernel modules.
//!
//! Turns a [`ModuleDescriptor`] into a complete translation unit that a
//! kernel module build can compile: forward declarations, exported
//! function bodies, an init function calling every dependency, and
//! the module metadata.
//!
//! Rendering is pure and deterministic. Only [`write`] and [`write_to`]
//! touch the filesystem.

pub mod templates;

use crate::config::GeneratorSettings;
use crate::error::{GenError, Result};
use crate::models::ModuleDescriptor;
use std::fs;
use std::path::{Path, PathBuf};

/// Mangle a symbol name into the identifier used in generated C code.
///
/// Declarations, definitions and call sites all go through here, so a call
/// in one module links against the matching export in another.
pub fn mangle(symbol: &str) -> String {
    format!("{}{}", symbol, templates::MANGLE_SUFFIX)
}

/// `<prefix>-<name>.c`
pub fn source_file_name(prefix: &str, module_name: &str) -> String {
    format!("{}-{}.c", prefix, module_name)
}

/// `<prefix>-<name>.o`, the build target for a generated source.
pub fn object_file_name(prefix: &str, module_name: &str) -> String {
    format!("{}-{}.o", prefix, module_name)
}

/// Render with the default author and license.
pub fn render(module: &ModuleDescriptor) -> String {
    render_with(module, &GeneratorSettings::default())
}

/// Render the C source for `module` using the metadata from `settings`.
pub fn render_with(module: &ModuleDescriptor, settings: &GeneratorSettings) -> String {
    let void_decls = join_mangled(
        module.calls.iter().chain(module.provides.iter()),
        templates::void_decl,
        "\n",
    );
    let int_decls = join_mangled(
        module.int_calls.iter().chain(module.int_provides.iter()),
        templates::int_decl,
        "\n",
    );
    let void_bodies = join_mangled(module.provides.iter(), templates::void_body, "\n");
    let int_bodies = join_mangled(module.int_provides.iter(), templates::int_body, "\n");
    let void_calls = join_mangled(
        module.calls.iter(),
        templates::void_call,
        templates::CALL_SEPARATOR,
    );
    let int_calls = join_mangled(
        module.int_calls.iter(),
        templates::int_call,
        templates::CALL_SEPARATOR,
    );

    let init_fn = module.init_fn_name();
    let mut out = String::with_capacity(1024);

    out.push_str(templates::MODULE_HEADER);
    for section in [&void_decls, &int_decls, &void_bodies, &int_bodies] {
        out.push_str(section);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&templates::init_open(&init_fn));
    for calls in [&void_calls, &int_calls] {
        out.push_str(templates::INIT_INDENT);
        out.push_str(calls);
        out.push('\n');
    }
    out.push_str(&templates::init_close(&init_fn));

    out.push('\n');
    out.push_str(&templates::metadata(&settings.author, &settings.license));
    out
}

fn join_mangled<'a, I, F>(symbols: I, fragment: F, sep: &str) -> String
where
    I: Iterator<Item = &'a String>,
    F: Fn(&str) -> String,
{
    symbols
        .map(|s| fragment(&mangle(s)))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Write the module source into the current working directory.
pub fn write(module: &ModuleDescriptor) -> Result<PathBuf> {
    write_to(module, Path::new("."), &GeneratorSettings::default())
}

/// Write the module source as `<prefix>-<name>.c` inside `dir`.
///
/// An existing file of the same name is overwritten.
pub fn write_to(
    module: &ModuleDescriptor,
    dir: &Path,
    settings: &GeneratorSettings,
) -> Result<PathBuf> {
    let path = dir.join(source_file_name(&settings.prefix, &module.name));
    fs::write(&path, render_with(module, settings)).map_err(|e| GenError::io(&path, e))?;
    log::debug!("[Emitter] wrote {}", path.display());
    Ok(path)
}
