use std::collections::HashSet;

use crate::types::{FileRecord, Package};

/// Merge the files of one package into a single [`Package`].
///
/// Imports collapse by path and functions by name (methods by
/// `Type.name`); the first occurrence wins and later duplicates are
/// dropped. Interfaces are concatenated as they come.
pub fn merge_files<I>(name: &str, files: I) -> Package
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut pkg = Package::new(name);
    let mut seen_imports = HashSet::new();
    let mut seen_funcs = HashSet::new();

    for file in files {
        for import in file.imports {
            if seen_imports.insert(import.clone()) {
                pkg.imports.push(import);
            }
        }
        for func in file.funcs {
            if seen_funcs.insert(func.merge_key().into_owned()) {
                pkg.funcs.push(func);
            }
        }
        pkg.interfaces.extend(file.interfaces);
    }

    pkg
}
