use tracing::debug;

use crate::analyzer::{LanguageAnalyzer, ParsedFile};
use crate::error::{InspectError, Result};
use crate::imports::import_paths;
use crate::interface::build_interface;
use crate::signature::{extract_function, Extraction};
use crate::types::{FileRecord, FuncFilter, Function};
use crate::visibility::VisibilityPolicy;

/// Run the import, signature and interface extractors over one parsed
/// file, keeping only the functions `filter` admits under `policy`.
pub fn extract_file(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    filter: FuncFilter,
    policy: &dyn VisibilityPolicy,
) -> Result<FileRecord> {
    let package = analyzer
        .package_name(parsed)
        .ok_or_else(|| InspectError::MissingPackage {
            path: parsed.path.clone(),
        })?;

    let funcs = extract_funcs(analyzer, parsed, filter, policy);

    let interfaces = analyzer
        .interface_decls(parsed)
        .into_iter()
        .map(build_interface)
        .collect();

    Ok(FileRecord {
        path: parsed.path.clone(),
        package,
        imports: import_paths(analyzer.import_literals(parsed)),
        funcs,
        interfaces,
    })
}

fn extract_funcs(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    filter: FuncFilter,
    policy: &dyn VisibilityPolicy,
) -> Vec<Function> {
    let mut funcs = Vec::new();
    for decl in analyzer.function_decls(parsed) {
        if !filter.admits(policy.is_exported(&decl.name)) {
            continue;
        }
        match extract_function(&decl) {
            Extraction::Found(f) => funcs.push(f),
            Extraction::Absent(reason) => {
                debug!(
                    file = %parsed.path.display(),
                    func = %decl.name,
                    ?reason,
                    "skipping declaration"
                );
            }
        }
    }
    funcs
}
