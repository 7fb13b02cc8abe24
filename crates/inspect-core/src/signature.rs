//! Signature extraction for function and method declarations.
//!
//! The parser renders a declaration without its body, starting at the
//! declaration's leading trivia. When a doc comment is attached, the
//! rendering begins with that comment, so the signature is recovered by
//! cutting the rendered text at the distance between the doc comment and
//! the `func` keyword in the original source.

use crate::doc::clean_comment;
use crate::types::{Function, Pos};

/// The comment group documenting a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Start of the first comment in the group.
    pub pos: Pos,
    /// Raw comment texts, markers included, in source order.
    pub comments: Vec<String>,
}

/// A function or method declaration as seen by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Base type name of the receiver, for methods.
    pub receiver: Option<String>,
    /// Position of the declaration keyword.
    pub keyword: Pos,
    pub doc: Option<DocComment>,
    pub has_body: bool,
    /// The printer's rendering of the body-less declaration, beginning at
    /// the doc comment if there is one. `None` if it could not be printed.
    pub header: Option<String>,
}

/// Why a declaration produced no function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Forward declaration without a body.
    NoBody,
    /// The printer could not render the declaration.
    Unprintable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(Function),
    Absent(Absence),
}

impl Extraction {
    pub fn found(self) -> Option<Function> {
        match self {
            Extraction::Found(f) => Some(f),
            Extraction::Absent(_) => None,
        }
    }
}

/// Build a [`Function`] from a declaration.
pub fn extract_function(decl: &FuncDecl) -> Extraction {
    if !decl.has_body {
        return Extraction::Absent(Absence::NoBody);
    }
    let Some(rendered) = decl.header.as_deref() else {
        return Extraction::Absent(Absence::Unprintable);
    };

    let documentation = decl
        .doc
        .as_ref()
        .map(|doc| clean_comment(&doc.comments))
        .unwrap_or_default();

    let doc_offset = match &decl.doc {
        Some(doc) => decl.keyword - doc.pos,
        None => 0,
    };

    let Some(signature) = rendered.get(doc_offset..) else {
        return Extraction::Absent(Absence::Unprintable);
    };

    let mut function = Function::new(&decl.name, signature).with_documentation(documentation);
    function.receiver = decl.receiver.clone();
    Extraction::Found(function)
}
