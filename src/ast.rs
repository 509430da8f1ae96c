/// Nesting bound shared by the parser and the extractor. The parser rejects
/// sources that lower deeper than this, so every tree it hands out stays
/// within the bound; the extractor refuses deeper hand-built trees instead
/// of walking them.
pub const MAX_TREE_DEPTH: usize = 1000;

/// Syntax tree input for the feature extractor. One variant per node kind the
/// analyzer recognizes, plus a catch-all `Other` that keeps the walk total
/// over the tree. Children live in explicitly declared slots; nothing here is
/// reflective. The extractor only reads the tree, it never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Program {
        body: Vec<AstNode>,
    },
    VariableDeclaration {
        declarations: Vec<Declarator>,
    },
    FunctionDeclaration {
        name: Option<String>,
        children: Vec<AstNode>,
    },
    FunctionExpression {
        name: Option<String>,
        children: Vec<AstNode>,
    },
    ArrowFunction {
        children: Vec<AstNode>,
    },
    CallExpression {
        callee: Box<AstNode>,
        arguments: Vec<AstNode>,
    },
    /// `object.property` access. `property` is `None` for computed access.
    MemberExpression {
        object: Box<AstNode>,
        property: Option<String>,
    },
    Loop {
        kind: LoopKind,
        children: Vec<AstNode>,
    },
    /// if / switch / ternary.
    Conditional {
        children: Vec<AstNode>,
    },
    Identifier {
        name: String,
    },
    Other {
        kind: String,
        children: Vec<AstNode>,
    },
}

/// One binding inside a variable declaration. `name` is set only for a plain
/// identifier binding; destructuring patterns carry no single name and stay
/// reachable through `children` along with the initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: Option<String>,
    pub children: Vec<AstNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    For,
    While,
    DoWhile,
    ForIn,
    ForOf,
}

impl LoopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopKind::For => "ForStatement",
            LoopKind::While => "WhileStatement",
            LoopKind::DoWhile => "DoWhileStatement",
            LoopKind::ForIn => "ForInStatement",
            LoopKind::ForOf => "ForOfStatement",
        }
    }
}
