use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::aggregate::extract_file;
use crate::analyzer::LanguageAnalyzer;
use crate::config::Config;
use crate::error::{InspectError, PartialCollection, Result};
use crate::merge::merge_files;
use crate::registry::Registry;
use crate::types::{FileRecord, FuncFilter, Package};
use crate::visibility::{UppercaseExported, VisibilityPolicy};

/// Extraction pipeline shared by the CLI commands.
///
/// Each directory is one compilation unit: its files are parsed, grouped
/// by declared package and merged, then folded into a [`Registry`].
pub struct InspectPipeline {
    analyzer: Box<dyn LanguageAnalyzer>,
    policy: Box<dyn VisibilityPolicy>,
    filter: FuncFilter,
    reserved_dir: Option<PathBuf>,
    ignore_tests: bool,
    exclude: GlobSet,
}

impl InspectPipeline {
    pub fn new(analyzer: Box<dyn LanguageAnalyzer>, config: &Config) -> Result<Self> {
        Ok(Self {
            analyzer,
            policy: Box::new(UppercaseExported),
            filter: config.extract.funcs,
            reserved_dir: config.walk.reserved_dir().map(PathBuf::from),
            ignore_tests: config.walk.ignore_tests,
            exclude: build_globset(&config.walk.exclude_patterns)?,
        })
    }

    /// Replace the default casing-based visibility rule.
    pub fn with_policy(mut self, policy: impl VisibilityPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_filter(mut self, filter: FuncFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn analyzer(&self) -> &dyn LanguageAnalyzer {
        self.analyzer.as_ref()
    }

    /// Read and inspect a single file.
    pub fn inspect_file(&self, path: &Path) -> Result<FileRecord> {
        let content = std::fs::read_to_string(path).map_err(|e| InspectError::io(path, e))?;
        self.inspect_source(path, &content)
    }

    /// Inspect source text that is already in memory.
    pub fn inspect_source(&self, path: &Path, source: &str) -> Result<FileRecord> {
        let parsed = self.analyzer.parse_file(path, source)?;
        extract_file(self.analyzer.as_ref(), &parsed, self.filter, self.policy.as_ref())
    }

    /// Packages declared by the files directly inside `dir`, sorted by name.
    pub fn collect_dir(&self, dir: &Path) -> Result<Vec<Package>> {
        self.collect_unit(dir, dir)
    }

    /// Walk `root` depth-first and fold every directory's packages into a
    /// registry keyed by package name.
    ///
    /// The first read or parse failure stops the walk; the error carries
    /// the packages collected up to that point.
    pub fn collect(&self, root: &Path) -> Result<Registry, PartialCollection> {
        let mut registry = Registry::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_reserved(root, entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    return Err(PartialCollection {
                        partial: registry,
                        source: InspectError::Walk { path, source: err },
                    });
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            match self.collect_unit(root, entry.path()) {
                Ok(packages) => {
                    for pkg in packages {
                        registry.absorb(pkg);
                    }
                }
                Err(source) => {
                    warn!(dir = %entry.path().display(), error = %source, "stopping walk");
                    return Err(PartialCollection {
                        partial: registry,
                        source,
                    })
                }
            }
        }

        debug!(root = %root.display(), packages = registry.len(), "walk complete");
        Ok(registry)
    }

    fn is_reserved(&self, root: &Path, entry: &DirEntry) -> bool {
        let Some(reserved) = &self.reserved_dir else {
            return false;
        };
        entry.file_type().is_dir()
            && entry
                .path()
                .strip_prefix(root)
                .is_ok_and(|rel| rel == reserved.as_path())
    }

    /// Parse the files directly inside `dir` and merge them per package.
    fn collect_unit(&self, root: &Path, dir: &Path) -> Result<Vec<Package>> {
        let files = self.source_files(root, dir)?;
        if files.is_empty() {
            return Ok(Vec::new());
        }
        debug!(dir = %dir.display(), files = files.len(), "inspecting directory");

        let results: Vec<Result<FileRecord>> = files
            .par_iter()
            .map(|path| self.inspect_file(path))
            .collect();
        let records = results.into_iter().collect::<Result<Vec<_>>>()?;

        let mut by_package: BTreeMap<String, Vec<FileRecord>> = BTreeMap::new();
        for record in records {
            by_package
                .entry(record.package.clone())
                .or_default()
                .push(record);
        }

        Ok(by_package
            .into_iter()
            .map(|(name, files)| merge_files(&name, files))
            .collect())
    }

    /// Participating files of one directory, sorted by path.
    fn source_files(&self, root: &Path, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| InspectError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| InspectError::io(dir, e))?.path();
            if !path.is_file() || !self.analyzer.handles(&path) {
                continue;
            }
            if self.ignore_tests && self.analyzer.is_test_file(&path) {
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(&path);
            if self.exclude.is_match(rel) {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| InspectError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| InspectError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}
