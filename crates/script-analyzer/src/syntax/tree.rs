use std::{fmt::Write as _, ops::ControlFlow, sync::Arc};

use text_size::{TextRange, TextSize};

use crate::syntax::{kind::SyntaxKind, scanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ListId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Child {
    Node(NodeId),
    List(ListId),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    /// Full start, including leading trivia.
    pub pos: TextSize,
    pub end: TextSize,
    pub parent: Option<NodeId>,
    pub data: NodeData,
    /// Documentation comments attached to a declaration, in source order.
    pub js_doc: Box<[NodeId]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeList {
    pub pos: TextSize,
    pub end: TextSize,
    pub nodes: Vec<NodeId>,
}

/// Kind-specific children, in declaration order.
///
/// Punctuation and most keywords are not stored: they live in the gaps
/// between the declared children and are recovered by re-scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Identifiers, literals, keyword nodes, operator tokens and end-of-file.
    Token,
    SourceFile {
        statements: ListId,
        end_of_file: NodeId,
    },
    VariableStmt {
        modifiers: Option<ListId>,
        declaration_list: NodeId,
    },
    VariableDeclList {
        declarations: ListId,
    },
    VariableDecl {
        name: NodeId,
        ty: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    FunctionDecl {
        modifiers: Option<ListId>,
        name: Option<NodeId>,
        parameters: ListId,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
    },
    ClassDecl {
        modifiers: Option<ListId>,
        name: Option<NodeId>,
        heritage: Option<NodeId>,
        members: ListId,
    },
    PropertyDecl {
        modifiers: Option<ListId>,
        name: NodeId,
        ty: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    MethodDecl {
        modifiers: Option<ListId>,
        name: NodeId,
        parameters: ListId,
        return_type: Option<NodeId>,
        body: Option<NodeId>,
    },
    Constructor {
        modifiers: Option<ListId>,
        parameters: ListId,
        body: Option<NodeId>,
    },
    Parameter {
        modifiers: Option<ListId>,
        name: NodeId,
        ty: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    Block {
        statements: ListId,
    },
    ExprStmt {
        expression: NodeId,
    },
    ReturnStmt {
        expression: Option<NodeId>,
    },
    IfStmt {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    WhileStmt {
        condition: NodeId,
        body: NodeId,
    },
    EmptyStmt,
    CallExpr {
        callee: NodeId,
        arguments: ListId,
    },
    NewExpr {
        callee: NodeId,
        arguments: Option<ListId>,
    },
    MemberExpr {
        object: NodeId,
        name: NodeId,
    },
    IndexExpr {
        object: NodeId,
        index: NodeId,
    },
    BinaryExpr {
        lhs: NodeId,
        operator: NodeId,
        rhs: NodeId,
    },
    PrefixExpr {
        operand: NodeId,
    },
    PostfixExpr {
        operand: NodeId,
    },
    ParenExpr {
        expression: NodeId,
    },
    ArrayExpr {
        elements: ListId,
    },
    ObjectExpr {
        properties: ListId,
    },
    PropertyAssignment {
        name: NodeId,
        initializer: Option<NodeId>,
    },
    ArrowFunction {
        parameters: ListId,
        body: NodeId,
    },
    AsExpr {
        expression: NodeId,
        ty: NodeId,
    },
    ConditionalExpr {
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    },
    TypeRef {
        name: NodeId,
    },
    ArrayType {
        element: NodeId,
    },
    JsDoc {
        tags: Option<ListId>,
    },
    JsDocTag {
        tag_name: NodeId,
        name: Option<NodeId>,
    },
}

impl NodeData {
    /// Visits the declared children in source order. Absent optional slots
    /// are skipped; required lists are visited even when empty.
    pub fn for_each_child<B>(
        &self,
        mut visit: impl FnMut(Child) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        use Child::{List, Node};

        fn opt_node<B>(
            id: Option<NodeId>,
            visit: &mut impl FnMut(Child) -> ControlFlow<B>,
        ) -> ControlFlow<B> {
            match id {
                Some(id) => visit(Child::Node(id)),
                None => ControlFlow::Continue(()),
            }
        }

        fn opt_list<B>(
            id: Option<ListId>,
            visit: &mut impl FnMut(Child) -> ControlFlow<B>,
        ) -> ControlFlow<B> {
            match id {
                Some(id) => visit(Child::List(id)),
                None => ControlFlow::Continue(()),
            }
        }

        match *self {
            NodeData::Token | NodeData::EmptyStmt => ControlFlow::Continue(()),
            NodeData::SourceFile {
                statements,
                end_of_file,
            } => {
                visit(List(statements))?;
                visit(Node(end_of_file))
            },
            NodeData::VariableStmt {
                modifiers,
                declaration_list,
            } => {
                opt_list(modifiers, &mut visit)?;
                visit(Node(declaration_list))
            },
            NodeData::VariableDeclList {
                declarations,
            } => visit(List(declarations)),
            NodeData::VariableDecl {
                name,
                ty,
                initializer,
            } => {
                visit(Node(name))?;
                opt_node(ty, &mut visit)?;
                opt_node(initializer, &mut visit)
            },
            NodeData::FunctionDecl {
                modifiers,
                name,
                parameters,
                return_type,
                body,
            } => {
                opt_list(modifiers, &mut visit)?;
                opt_node(name, &mut visit)?;
                visit(List(parameters))?;
                opt_node(return_type, &mut visit)?;
                opt_node(body, &mut visit)
            },
            NodeData::ClassDecl {
                modifiers,
                name,
                heritage,
                members,
            } => {
                opt_list(modifiers, &mut visit)?;
                opt_node(name, &mut visit)?;
                opt_node(heritage, &mut visit)?;
                visit(List(members))
            },
            NodeData::PropertyDecl {
                modifiers,
                name,
                ty,
                initializer,
            }
            | NodeData::Parameter {
                modifiers,
                name,
                ty,
                initializer,
            } => {
                opt_list(modifiers, &mut visit)?;
                visit(Node(name))?;
                opt_node(ty, &mut visit)?;
                opt_node(initializer, &mut visit)
            },
            NodeData::MethodDecl {
                modifiers,
                name,
                parameters,
                return_type,
                body,
            } => {
                opt_list(modifiers, &mut visit)?;
                visit(Node(name))?;
                visit(List(parameters))?;
                opt_node(return_type, &mut visit)?;
                opt_node(body, &mut visit)
            },
            NodeData::Constructor {
                modifiers,
                parameters,
                body,
            } => {
                opt_list(modifiers, &mut visit)?;
                visit(List(parameters))?;
                opt_node(body, &mut visit)
            },
            NodeData::Block {
                statements,
            } => visit(List(statements)),
            NodeData::ExprStmt {
                expression,
            }
            | NodeData::ParenExpr {
                expression,
            } => visit(Node(expression)),
            NodeData::ReturnStmt {
                expression,
            } => opt_node(expression, &mut visit),
            NodeData::IfStmt {
                condition,
                then_branch,
                else_branch,
            } => {
                visit(Node(condition))?;
                visit(Node(then_branch))?;
                opt_node(else_branch, &mut visit)
            },
            NodeData::WhileStmt {
                condition,
                body,
            } => {
                visit(Node(condition))?;
                visit(Node(body))
            },
            NodeData::CallExpr {
                callee,
                arguments,
            } => {
                visit(Node(callee))?;
                visit(List(arguments))
            },
            NodeData::NewExpr {
                callee,
                arguments,
            } => {
                visit(Node(callee))?;
                opt_list(arguments, &mut visit)
            },
            NodeData::MemberExpr {
                object,
                name,
            } => {
                visit(Node(object))?;
                visit(Node(name))
            },
            NodeData::IndexExpr {
                object,
                index,
            } => {
                visit(Node(object))?;
                visit(Node(index))
            },
            NodeData::BinaryExpr {
                lhs,
                operator,
                rhs,
            } => {
                visit(Node(lhs))?;
                visit(Node(operator))?;
                visit(Node(rhs))
            },
            NodeData::PrefixExpr {
                operand,
            }
            | NodeData::PostfixExpr {
                operand,
            } => visit(Node(operand)),
            NodeData::ArrayExpr {
                elements,
            } => visit(List(elements)),
            NodeData::ObjectExpr {
                properties,
            } => visit(List(properties)),
            NodeData::PropertyAssignment {
                name,
                initializer,
            } => {
                visit(Node(name))?;
                opt_node(initializer, &mut visit)
            },
            NodeData::ArrowFunction {
                parameters,
                body,
            } => {
                visit(List(parameters))?;
                visit(Node(body))
            },
            NodeData::AsExpr {
                expression,
                ty,
            } => {
                visit(Node(expression))?;
                visit(Node(ty))
            },
            NodeData::ConditionalExpr {
                condition,
                when_true,
                when_false,
            } => {
                visit(Node(condition))?;
                visit(Node(when_true))?;
                visit(Node(when_false))
            },
            NodeData::TypeRef {
                name,
            } => visit(Node(name)),
            NodeData::ArrayType {
                element,
            } => visit(Node(element)),
            NodeData::JsDoc {
                tags,
            } => opt_list(tags, &mut visit),
            NodeData::JsDocTag {
                tag_name,
                name,
            } => {
                visit(Node(tag_name))?;
                opt_node(name, &mut visit)
            },
        }
    }
}

/// Immutable parsed source: an arena of nodes addressed by [`NodeId`].
///
/// Ownership runs strictly top-down through `NodeData`; the `parent` field of
/// a node is a plain index back into the same arena.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    text: Arc<str>,
    nodes: Vec<Node>,
    lists: Vec<NodeList>,
    root: NodeId,
    documented: Vec<NodeId>,
}

impl SyntaxTree {
    pub fn parse(text: &str) -> Self {
        crate::syntax::parser::Parser::new(text).parse()
    }

    pub(crate) fn from_parts(
        text: Arc<str>,
        nodes: Vec<Node>,
        lists: Vec<NodeList>,
        root: NodeId,
    ) -> Self {
        let documented = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.js_doc.is_empty())
            .map(|(index, _)| NodeId::from_index(index))
            .collect();
        Self {
            text,
            nodes,
            lists,
            root,
            documented,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(
        &self,
        id: NodeId,
    ) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn list(
        &self,
        id: ListId,
    ) -> &NodeList {
        &self.lists[id.index()]
    }

    pub fn kind(
        &self,
        id: NodeId,
    ) -> SyntaxKind {
        self.node(id).kind
    }

    pub fn pos(
        &self,
        id: NodeId,
    ) -> TextSize {
        self.node(id).pos
    }

    pub fn end(
        &self,
        id: NodeId,
    ) -> TextSize {
        self.node(id).end
    }

    pub fn parent(
        &self,
        id: NodeId,
    ) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn js_doc(
        &self,
        id: NodeId,
    ) -> &[NodeId] {
        &self.node(id).js_doc
    }

    /// Declarations that carry at least one documentation comment.
    pub fn documented_nodes(&self) -> &[NodeId] {
        &self.documented
    }

    /// Start of the node's first real token.
    ///
    /// Missing nodes report their position unchanged and documentation nodes
    /// start exactly at their declared position. With `include_js_doc` a
    /// documented declaration starts at its first comment.
    pub fn start(
        &self,
        id: NodeId,
        include_js_doc: bool,
    ) -> TextSize {
        let node = self.node(id);
        if node.pos == node.end || node.kind.is_jsdoc() {
            return node.pos;
        }
        if include_js_doc && let Some(&doc) = node.js_doc.first() {
            return self.pos(doc);
        }
        scanner::skip_trivia(&self.text, node.pos)
    }

    pub fn text_of(
        &self,
        range: TextRange,
    ) -> &str {
        &self.text[range]
    }

    pub fn for_each_child<B>(
        &self,
        id: NodeId,
        visit: impl FnMut(Child) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        self.node(id).data.for_each_child(visit)
    }

    /// Pre-order walk over declared children, documentation comments first.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.js_doc(id).to_vec();
            let _ = self.for_each_child(id, |child| {
                match child {
                    Child::Node(node) => children.push(node),
                    Child::List(list) => children.extend(self.list(list).nodes.iter().copied()),
                }
                ControlFlow::<()>::Continue(())
            });
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Indented `Kind@pos..end` listing of the declared tree, token text quoted.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(
        &self,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) {
        let node = self.node(id);
        let _ = write!(out, "{:indent$}{:?}@{}..{}", "", node.kind, u32::from(node.pos), u32::from(node.end), indent = depth * 2);
        if node.kind.is_token() && node.pos != node.end {
            let start = self.start(id, false);
            let _ = write!(out, " {:?}", &self.text[TextRange::new(start, node.end)]);
        }
        out.push('\n');
        for &doc in node.js_doc.iter() {
            self.dump_node(doc, depth + 1, out);
        }
        let _ = node.data.for_each_child(|child| {
            match child {
                Child::Node(child) => self.dump_node(child, depth + 1, out),
                Child::List(list) => {
                    let list = self.list(list);
                    let _ = writeln!(out, "{:indent$}[{}..{}]", "", u32::from(list.pos), u32::from(list.end), indent = (depth + 1) * 2);
                    for &member in &list.nodes {
                        self.dump_node(member, depth + 2, out);
                    }
                },
            }
            ControlFlow::<()>::Continue(())
        });
    }
}
