//! C source fragments for generated fake modules.
//!
//! The layout reproduces the playground's reference output byte for byte,
//! including the mixed space/tab indentation of the init function body.

/// Suffix appended to every generated symbol so it cannot clash with a real
/// kernel export of the same base name.
pub const MANGLE_SUFFIX: &str = "_mangled";

/// Log format macro and the three kernel headers every module needs.
pub const MODULE_HEADER: &str = r#"#define pr_fmt(fmt) KBUILD_MODNAME ": " fmt

#include <linux/init.h>
#include <linux/module.h>
#include <linux/printk.h>

"#;

/// Indentation before the first statement of each init-body block.
pub const INIT_INDENT: &str = "        ";

/// Separator between consecutive calls inside one init-body block.
pub const CALL_SEPARATOR: &str = "\n\t";

/// Literal argument passed to `void f(int)` calls.
pub const INT_CALL_ARG: i32 = 0;

pub const DEFAULT_AUTHOR: &str = "Martin Wilck <mwilck@suse.com>";
pub const DEFAULT_LICENSE: &str = "GPL";

/// `void f(void)` forward declaration
pub fn void_decl(mangled: &str) -> String {
    format!("void {}(void);", mangled)
}

/// `void f(void)` definition, logs its own name and exports itself
pub fn void_body(mangled: &str) -> String {
    format!(
        r#"void {name}(void)
{{
        pr_warn("%s\n", __func__);
}}
EXPORT_SYMBOL({name});"#,
        name = mangled
    )
}

pub fn void_call(mangled: &str) -> String {
    format!("{}();", mangled)
}

/// `void f(int)` forward declaration
pub fn int_decl(mangled: &str) -> String {
    format!("void {}(int);", mangled)
}

/// `void f(int)` definition, logs its own name and the argument
pub fn int_body(mangled: &str) -> String {
    format!(
        r#"void {name}(int x)
{{
        pr_warn("%s: %d\n", __func__, x);
}}
EXPORT_SYMBOL({name});"#,
        name = mangled
    )
}

pub fn int_call(mangled: &str) -> String {
    format!("{}({});", mangled, INT_CALL_ARG)
}

/// Opening of the init function up to and including the brace line.
pub fn init_open(init_fn: &str) -> String {
    format!("static int __init {}(void)\n{{\n", init_fn)
}

/// Closing of the init function and its registration.
pub fn init_close(init_fn: &str) -> String {
    format!("{INIT_INDENT}return 0;\n}}\nmodule_init({init_fn});\n")
}

/// Author and license metadata lines.
pub fn metadata(author: &str, license: &str) -> String {
    format!("MODULE_AUTHOR(\"{author}\");\nMODULE_LICENSE(\"{license}\");\n")
}
