use crate::ast::{AstNode, Declarator, LoopKind, MAX_TREE_DEPTH};
use crate::error::ParseError;
use anyhow::Result;
use tree_sitter::{Node, Parser};

/// JavaScript parser front end. Owns a configured tree-sitter parser;
/// construct once at startup and pass by reference into callers.
pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_javascript::LANGUAGE;
        parser.set_language(&language.into())?;
        Ok(Self { parser })
    }

    /// Parse `source` and lower the concrete tree into [`AstNode`].
    ///
    /// tree-sitter recovers from syntax errors where the contract demands
    /// rejection, so a tree containing any error or missing node is reported
    /// as a `ParseError` instead of being analyzed partially.
    pub fn parse(&mut self, source: &str) -> Result<AstNode, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new("parser produced no tree"))?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(first_syntax_error(root));
        }
        lower(root, source, 0)
    }
}

fn first_syntax_error(root: Node<'_>) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            let what = if node.is_missing() {
                "missing syntax"
            } else {
                "invalid syntax"
            };
            return ParseError::at(pos.row + 1, pos.column + 1, what);
        }
        let mut cursor = node.walk();
        let mut children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        // Pop order: keep the first offender in source order.
        children.reverse();
        for child in children {
            if child.has_error() || child.is_missing() {
                stack.push(child);
            }
        }
    }
    ParseError::new("invalid syntax")
}

/// Lowering recurses over the concrete tree, so nesting beyond
/// [`MAX_TREE_DEPTH`] is rejected here rather than risking the stack.
fn lower(node: Node<'_>, source: &str, depth: usize) -> Result<AstNode, ParseError> {
    if depth > MAX_TREE_DEPTH {
        let pos = node.start_position();
        return Err(ParseError::at(
            pos.row + 1,
            pos.column + 1,
            &format!("nesting deeper than {MAX_TREE_DEPTH} levels"),
        ));
    }
    Ok(match node.kind() {
        "program" => AstNode::Program {
            body: lower_children(node, source, None, depth)?,
        },
        "lexical_declaration" | "variable_declaration" => AstNode::VariableDeclaration {
            declarations: lower_declarators(node, source, depth)?,
        },
        "function_declaration" | "generator_function_declaration" => {
            let name_node = node.child_by_field_name("name");
            AstNode::FunctionDeclaration {
                name: identifier_text(name_node, source),
                children: lower_children(node, source, name_node, depth)?,
            }
        }
        "function_expression" | "function" | "generator_function" => {
            let name_node = node.child_by_field_name("name");
            AstNode::FunctionExpression {
                name: identifier_text(name_node, source),
                children: lower_children(node, source, name_node, depth)?,
            }
        }
        "arrow_function" => AstNode::ArrowFunction {
            children: lower_children(node, source, None, depth)?,
        },
        "call_expression" => match node.child_by_field_name("function") {
            Some(callee) => AstNode::CallExpression {
                callee: Box::new(lower(callee, source, depth + 1)?),
                arguments: match node.child_by_field_name("arguments") {
                    Some(args) => lower_children(args, source, None, depth)?,
                    None => Vec::new(),
                },
            },
            None => other(node, source, depth)?,
        },
        "member_expression" => match node.child_by_field_name("object") {
            Some(object) => AstNode::MemberExpression {
                object: Box::new(lower(object, source, depth + 1)?),
                property: node
                    .child_by_field_name("property")
                    .map(|prop| node_text(prop, source))
                    .filter(|name| !name.is_empty()),
            },
            None => other(node, source, depth)?,
        },
        "for_statement" => loop_node(node, source, LoopKind::For, depth)?,
        "while_statement" => loop_node(node, source, LoopKind::While, depth)?,
        "do_statement" => loop_node(node, source, LoopKind::DoWhile, depth)?,
        "for_in_statement" => {
            let operator = node
                .child_by_field_name("operator")
                .map(|op| node_text(op, source));
            let kind = if operator.as_deref() == Some("of") {
                LoopKind::ForOf
            } else {
                LoopKind::ForIn
            };
            loop_node(node, source, kind, depth)?
        }
        "if_statement" | "switch_statement" | "ternary_expression" => AstNode::Conditional {
            children: lower_children(node, source, None, depth)?,
        },
        "identifier"
        | "property_identifier"
        | "shorthand_property_identifier"
        | "shorthand_property_identifier_pattern"
        | "private_property_identifier" => AstNode::Identifier {
            name: node_text(node, source),
        },
        _ => other(node, source, depth)?,
    })
}

fn other(node: Node<'_>, source: &str, depth: usize) -> Result<AstNode, ParseError> {
    Ok(AstNode::Other {
        kind: node.kind().to_string(),
        children: lower_children(node, source, None, depth)?,
    })
}

fn loop_node(
    node: Node<'_>,
    source: &str,
    kind: LoopKind,
    depth: usize,
) -> Result<AstNode, ParseError> {
    Ok(AstNode::Loop {
        kind,
        children: lower_children(node, source, None, depth)?,
    })
}

/// Lower named children in declaration order, skipping the node already
/// captured by a dedicated slot (e.g. a function's name).
fn lower_children(
    node: Node<'_>,
    source: &str,
    skip: Option<Node<'_>>,
    depth: usize,
) -> Result<Vec<AstNode>, ParseError> {
    let skip_id = skip.map(|n| n.id());
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| Some(child.id()) != skip_id)
        .map(|child| lower(child, source, depth + 1))
        .collect()
}

fn lower_declarators(
    node: Node<'_>,
    source: &str,
    depth: usize,
) -> Result<Vec<Declarator>, ParseError> {
    let mut declarations = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let name_node = child
            .child_by_field_name("name")
            .filter(|n| n.kind() == "identifier");
        declarations.push(Declarator {
            name: identifier_text(name_node, source),
            children: lower_children(child, source, name_node, depth + 1)?,
        });
    }
    Ok(declarations)
}

fn identifier_text(node: Option<Node<'_>>, source: &str) -> Option<String> {
    node.map(|n| node_text(n, source)).filter(|s| !s.is_empty())
}

fn node_text(node: Node<'_>, source: &str) -> String {
    source
        .get(node.start_byte()..node.end_byte())
        .unwrap_or("")
        .trim()
        .to_string()
}
