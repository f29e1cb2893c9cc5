//! cefbind CLI: generate host bindings from C struct declarations.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cefbind",
    version,
    about = "Binding generator for C struct fields and function pointers"
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print generated host source for a declaration
    Emit {
        /// Declaration file (.toml)
        decl: PathBuf,
        /// Only print this struct (C name, e.g. cef_browser_t)
        #[arg(long = "struct")]
        struct_name: Option<String>,
    },
    /// Print field descriptors as JSON
    Inspect {
        /// Declaration file (.toml)
        decl: PathBuf,
        /// Only describe this struct (C name)
        #[arg(long = "struct")]
        struct_name: Option<String>,
    },
    /// Build every descriptor and report counts
    Check {
        /// Declaration file (.toml)
        decl: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("warning: {e:#}");
    }

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Emit { decl, struct_name } => {
            commands::emit::run(&decl, struct_name.as_deref())
        }
        Commands::Inspect { decl, struct_name } => {
            commands::inspect::run(&decl, struct_name.as_deref())
        }
        Commands::Check { decl } => commands::check::run(&decl),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::path::Path;

    use cefbind_core::BindError;

    const DECL: &str = r#"
[[structs]]
name = "cef_foo_t"
class_equivalent = true
file = "include/capi/cef_foo_capi.h"

[[structs.fields]]
name = "base"
type = "cef_base_ref_counted_t"
line = 40

[[structs.fields]]
name = "get_size"
type = "size_t (*)(struct _cef_foo_t *self)"
line = 45

[[structs]]
name = "cef_rect_t"
file = "include/internal/cef_types.h"

[[structs.fields]]
name = "x"
type = "int"

[[structs.fields]]
name = "y"
type = "int"
"#;

    fn write_decl(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("cef.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn emit_renders_methods_conversions_and_preamble() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_decl(dir.path(), DECL);

        let decl = commands::load_declaration(&path).unwrap();
        let structs = cefbind_emit::generate(&decl).unwrap();
        let text = commands::emit::render(&structs, &decl.generator);

        assert!(text.starts_with("/*\nsize_t gocef_foo_get_size(cef_foo_t *self, "));
        assert!(text.contains("*/\nimport \"C\"\n"));
        assert!(!text.contains("import \"unsafe\""));
        assert!(text.contains(
            "func (d *Foo) GetSize() uint64 {\n\
             \treturn uint64(C.gocef_foo_get_size(d.toNative(), d.get_size))\n}\n"
        ));
        assert!(text.contains(
            "func (d *Rect) toNative(native *C.cef_rect_t) *C.cef_rect_t {\n\
             \tnative.x = C.int(d.X)\n\
             \tnative.y = C.int(d.Y)\n\
             \treturn native\n}\n"
        ));
        assert!(text.contains(
            "func (d *Rect) fromNative(native *C.cef_rect_t) {\n\
             \td.X = int32(native.x)\n\
             \td.Y = int32(native.y)\n}\n"
        ));
        assert!(!text.contains("Base"));

        commands::emit::run(&path, Some("cef_rect_t")).unwrap();
    }

    #[test]
    fn emit_rejects_unknown_struct() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_decl(dir.path(), DECL);
        let err = commands::emit::run(&path, Some("cef_nope_t")).unwrap_err();
        assert!(format!("{err:#}").contains("no struct named 'cef_nope_t'"));
    }

    #[test]
    fn inspect_describes_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_decl(dir.path(), DECL);
        let decl = commands::load_declaration(&path).unwrap();

        let json = commands::inspect::describe(&decl, Some("cef_foo_t")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let structs = value.as_array().unwrap();
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0]["host_name"], "Foo");

        let fields = structs[0]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["raw_name"], "get_size");
        assert_eq!(fields[1]["function_ptr"], true);
        assert_eq!(fields[1]["host_return_type"], "uint64");
        assert_eq!(fields[1]["position"]["line"], 45);
    }

    #[test]
    fn check_counts_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_decl(dir.path(), DECL);
        let decl = commands::load_declaration(&path).unwrap();

        let summary = commands::check::summarize(&decl).unwrap();
        assert_eq!(
            summary,
            commands::check::CheckSummary {
                structs: 2,
                enums: 0,
                fields: 3,
                function_ptrs: 1,
                skipped: 1,
                needs_unsafe: 0,
            }
        );
        commands::check::run(&path).unwrap();
    }

    #[test]
    fn check_reports_malformed_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let broken = DECL.replace(
            "size_t (*)(struct _cef_foo_t *self)",
            "size_t (*)(struct _cef_foo_t *self",
        );
        let path = write_decl(dir.path(), &broken);

        let err = commands::check::run(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("include/capi/cef_foo_capi.h:45"));
        assert!(message.contains("can't handle params in type"));
        assert!(err.downcast_ref::<BindError>().is_some_and(BindError::is_fatal));
    }

    #[test]
    fn missing_declaration_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = commands::check::run(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("declaration file not found"));
    }
}
