use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use inspect_core::analyzer::{LanguageAnalyzer, ParsedFile};
use inspect_core::error::{InspectError, Result};
use inspect_core::{DocComment, FuncDecl, InterfaceDecl, MemberShape, Pos};

mod printer;

use printer::{print_header, span_text};

/// Go language analyzer using tree-sitter.
pub struct GoAnalyzer {
    language: Language,
}

impl GoAnalyzer {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        // Fail early on an ABI mismatch between tree-sitter and the grammar.
        new_parser(&language)?;
        Ok(Self { language })
    }
}

fn new_parser(language: &Language) -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| InspectError::Language {
            language: "go",
            message: e.to_string(),
        })?;
    Ok(parser)
}

impl LanguageAnalyzer for GoAnalyzer {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &[&str] {
        &["go"]
    }

    fn is_test_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("_test.go"))
    }

    fn parse_file(&self, path: &Path, content: &str) -> Result<ParsedFile> {
        let mut parser = new_parser(&self.language)?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| InspectError::parse(path, 1, 1, "parser produced no tree"))?;

        if let Some(bad) = first_error(tree.root_node()) {
            let at = bad.start_position();
            let message = if bad.is_missing() {
                format!("expected {}", bad.kind())
            } else {
                "syntax error".to_string()
            };
            return Err(InspectError::parse(path, at.row + 1, at.column + 1, message));
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            tree,
            content: content.to_string(),
        })
    }

    fn package_name(&self, parsed: &ParsedFile) -> Option<String> {
        let clause = top_level(parsed)
            .into_iter()
            .find(|n| n.kind() == "package_clause")?;
        let ident = named_children(clause)
            .into_iter()
            .find(|n| n.kind() == "package_identifier")?;
        Some(node_text(ident, &parsed.content))
    }

    fn import_literals(&self, parsed: &ParsedFile) -> Vec<String> {
        let mut literals = Vec::new();
        for decl in top_level(parsed) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            for child in named_children(decl) {
                let specs = match child.kind() {
                    "import_spec" => vec![child],
                    "import_spec_list" => named_children(child),
                    _ => continue,
                };
                for spec in specs {
                    if let Some(path) = spec.child_by_field_name("path") {
                        literals.push(node_text(path, &parsed.content));
                    }
                }
            }
        }
        literals
    }

    fn function_decls(&self, parsed: &ParsedFile) -> Vec<FuncDecl> {
        top_level(parsed)
            .into_iter()
            .filter(|n| matches!(n.kind(), "function_declaration" | "method_declaration"))
            .filter_map(|n| func_decl(n, &parsed.content))
            .collect()
    }

    fn interface_decls(&self, parsed: &ParsedFile) -> Vec<InterfaceDecl> {
        let mut decls = Vec::new();
        for decl in top_level(parsed) {
            if decl.kind() != "type_declaration" {
                continue;
            }
            for spec in named_children(decl) {
                if !matches!(spec.kind(), "type_spec" | "type_alias") {
                    continue;
                }
                let (Some(name), Some(ty)) = (
                    spec.child_by_field_name("name"),
                    spec.child_by_field_name("type"),
                ) else {
                    continue;
                };
                if ty.kind() != "interface_type" {
                    continue;
                }
                decls.push(InterfaceDecl {
                    name: node_text(name, &parsed.content),
                    members: named_children(ty)
                        .into_iter()
                        .filter_map(|m| classify_member(m, &parsed.content))
                        .collect(),
                });
            }
        }
        decls
    }
}

fn func_decl(node: Node, source: &str) -> Option<FuncDecl> {
    let name = node_text(node.child_by_field_name("name")?, source);

    let receiver = node
        .child_by_field_name("receiver")
        .and_then(|r| receiver_base_type(r, source));

    let body = node.child_by_field_name("body");
    let doc = doc_comment(node, source);
    let header_end = body.map_or(node.end_byte(), |b| b.start_byte());

    Some(FuncDecl {
        name,
        receiver,
        keyword: Pos::new(node.start_byte()),
        header: print_header(node, header_end, doc.as_ref().map(|d| d.pos), source),
        doc,
        has_body: body.is_some(),
    })
}

/// `(s *Server[K])` -> `Server`
fn receiver_base_type(receiver: Node, source: &str) -> Option<String> {
    let param = named_children(receiver)
        .into_iter()
        .find(|n| n.kind() == "parameter_declaration")?;
    let ty = node_text(param.child_by_field_name("type")?, source);
    let base = ty
        .trim_start_matches(['*', '(', ' '])
        .split(['[', ')', ' '])
        .next()
        .unwrap_or_default();
    (!base.is_empty()).then(|| base.to_string())
}

/// The comment group directly above a declaration.
///
/// Comments belong to the group while each one ends at most one line
/// before the next; the last must end on the line right above the
/// declaration. A comment trailing code on its own line is not part of it.
fn doc_comment(node: Node, source: &str) -> Option<DocComment> {
    let mut group = Vec::new();
    let mut next_row = node.start_position().row;
    let mut prev = node.prev_named_sibling();

    while let Some(comment) = prev {
        if comment.kind() != "comment" {
            break;
        }
        let end_row = comment.end_position().row;
        let adjacent = if group.is_empty() {
            end_row + 1 == next_row
        } else {
            end_row + 1 >= next_row
        };
        if !adjacent {
            break;
        }
        let before = comment.prev_named_sibling();
        if before.is_some_and(|b| {
            b.kind() != "comment" && b.end_position().row == comment.start_position().row
        }) {
            break;
        }
        group.push(comment);
        next_row = comment.start_position().row;
        prev = before;
    }

    let first = *group.last()?;
    group.reverse();
    Some(DocComment {
        pos: Pos::new(first.start_byte()),
        comments: group.into_iter().map(|c| node_text(c, source)).collect(),
    })
}

fn classify_member(member: Node, source: &str) -> Option<MemberShape> {
    match member.kind() {
        "method_elem" => {
            let name = node_text(member.child_by_field_name("name")?, source);
            let params = member.child_by_field_name("parameters")?;
            let mut func_type = format!("func{}", span_text(params, params.end_byte(), source)?);
            if let Some(result) = member.child_by_field_name("result") {
                func_type.push(' ');
                func_type.push_str(&span_text(result, result.end_byte(), source)?);
            }
            Some(MemberShape::Method { name, func_type })
        }
        "type_elem" => {
            let types: Vec<Node> = named_children(member)
                .into_iter()
                .filter(|n| n.kind() != "comment")
                .collect();
            let [ty] = types.as_slice() else {
                return None;
            };
            match ty.kind() {
                "type_identifier" => Some(MemberShape::Embedded(node_text(*ty, source))),
                "qualified_type" => Some(MemberShape::Qualified {
                    package: node_text(ty.child_by_field_name("package")?, source),
                    name: node_text(ty.child_by_field_name("name")?, source),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn top_level(parsed: &ParsedFile) -> Vec<Node<'_>> {
    named_children(parsed.tree.root_node())
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Extract text from a tree-sitter node.
fn node_text(node: Node, source: &str) -> String {
    source[node.byte_range()].to_string()
}
