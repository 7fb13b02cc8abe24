use colored::Colorize;

use inspect_core::{FileRecord, Function, Registry};

/// Format a single file for terminal output: package, imports, then
/// unexported and exported functions, then interfaces.
pub fn format_file(record: &FileRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} {:?}\n",
        "Package".bold(),
        record.package
    ));
    out.push_str(&format!("{}\n", "=".repeat(40)));

    out.push_str(&section("Imports"));
    for import in &record.imports {
        out.push_str(&format!("  {import}\n"));
    }

    let (exported, unexported): (Vec<&Function>, Vec<&Function>) =
        record.funcs.iter().partition(|f| f.is_exported());

    out.push_str(&section("Unexported functions"));
    for func in unexported {
        push_function(&mut out, func);
    }

    out.push_str(&section("Exported functions"));
    for func in exported {
        push_function(&mut out, func);
    }

    if !record.interfaces.is_empty() {
        out.push_str(&section("Interfaces"));
        for iface in &record.interfaces {
            out.push_str(&format!("  {}\n", iface.name.cyan()));
            for embedded in &iface.embedded_interfaces {
                out.push_str(&format!("    {embedded}\n"));
            }
            for method in &iface.methods {
                out.push_str(&format!("    {method}\n"));
            }
        }
    }

    out
}

/// Format every interface in the registry, grouped by package. Packages
/// without interfaces are skipped.
pub fn format_interfaces(registry: &Registry) -> String {
    let mut out = String::new();

    for pkg in registry.packages().filter(|p| !p.interfaces.is_empty()) {
        let header = format!("Package {}", pkg.name);
        out.push_str(&format!("\n{}\n{}\n", header.bold(), "=".repeat(header.len())));

        for iface in &pkg.interfaces {
            let title = format!("Interface {}", iface.name);
            out.push_str(&format!("\n  {}\n  {}\n", title.cyan(), "-".repeat(title.len())));

            if !iface.embedded_interfaces.is_empty() {
                out.push_str("  Implements:\n");
                for embedded in &iface.embedded_interfaces {
                    out.push_str(&format!("    {embedded}\n"));
                }
            }
            if !iface.methods.is_empty() {
                out.push_str("  Methods:\n");
                for method in &iface.methods {
                    out.push_str(&format!("    {method}\n"));
                }
            }
        }
    }

    out
}

fn section(title: &str) -> String {
    format!("\n{}\n{}\n", title.bold(), "-".repeat(40))
}

fn push_function(out: &mut String, func: &Function) {
    if !func.documentation.is_empty() {
        for line in func.documentation.lines() {
            out.push_str(&format!("  {}\n", format!("// {line}").dimmed()));
        }
    }
    out.push_str(&format!("  {func}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_core::{Interface, Package};
    use std::path::PathBuf;

    fn record() -> FileRecord {
        FileRecord {
            path: PathBuf::from("util.go"),
            package: "util".to_string(),
            imports: vec!["fmt".to_string(), "strings".to_string()],
            funcs: vec![
                Function::new("Foo", "func Foo() string").with_documentation("Foo says hi."),
                Function::new("bar", "func bar() string"),
            ],
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn test_file_lists_unexported_before_exported() {
        let out = format_file(&record());
        let unexported = out.find("Unexported functions").unwrap();
        let bar = out.find("func bar() string").unwrap();
        let exported = out.find("Exported functions").unwrap();
        let foo = out.find("func Foo() string").unwrap();
        assert!(unexported < bar && bar < exported && exported < foo);
        assert!(out.contains("Foo says hi."));
        assert!(out.contains("strings"));
        assert!(!out.contains("Interfaces"));
    }

    #[test]
    fn test_interfaces_grouped_by_package() {
        let mut io = Package::new("io");
        io.interfaces = vec![Interface {
            name: "ReadCloser".to_string(),
            methods: vec!["Close() error".to_string()],
            embedded_interfaces: vec!["Reader".to_string()],
        }];
        let mut util = Package::new("util");
        util.funcs = vec![Function::new("Foo", "func Foo()")];
        let registry: Registry = [io, util].into_iter().collect();

        let out = format_interfaces(&registry);
        assert!(out.contains("Package io"));
        assert!(out.contains("Interface ReadCloser"));
        assert!(out.find("Implements:").unwrap() < out.find("Reader").unwrap());
        assert!(out.contains("Close() error"));
        assert!(!out.contains("Package util"), "packages without interfaces are skipped");
    }

    #[test]
    fn test_interfaces_empty_registry() {
        assert!(format_interfaces(&Registry::new()).is_empty());
    }
}
