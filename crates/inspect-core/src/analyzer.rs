use std::path::{Path, PathBuf};

use tree_sitter::Tree;

use crate::error::Result;
use crate::interface::InterfaceDecl;
use crate::signature::FuncDecl;

/// A parsed source file with its tree-sitter AST and original content.
pub struct ParsedFile {
    pub path: PathBuf,
    pub tree: Tree,
    pub content: String,
}

/// The parser collaborator: turns source text into trees and exposes the
/// declarations the extractors work on.
pub trait LanguageAnalyzer: Send + Sync {
    /// Language name (e.g., "go")
    fn language(&self) -> &'static str;

    /// File extensions this analyzer handles (e.g., &["go"])
    fn file_extensions(&self) -> &[&str];

    /// Whether a file is a test file by the language's naming convention.
    fn is_test_file(&self, path: &Path) -> bool;

    /// Parse a source file. Fails if the tree contains syntax errors.
    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile>;

    /// The package the file declares, if any.
    fn package_name(&self, parsed: &ParsedFile) -> Option<String>;

    /// Raw import path literals, quoting included, in source order.
    fn import_literals(&self, parsed: &ParsedFile) -> Vec<String>;

    /// Function and method declarations in source order.
    fn function_decls(&self, parsed: &ParsedFile) -> Vec<FuncDecl>;

    /// Interface type declarations in source order.
    fn interface_decls(&self, parsed: &ParsedFile) -> Vec<InterfaceDecl>;

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_extensions().contains(&ext))
    }
}
