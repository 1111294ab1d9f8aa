use std::{ops::ControlFlow, sync::Arc};

use text_size::TextSize;

use crate::syntax::{
    kind::SyntaxKind,
    scanner::{self, ScannedToken},
    tree::{Child, ListId, Node, NodeData, NodeId, NodeList, SyntaxTree},
};

/// Recursive descent parser producing an arena [`SyntaxTree`].
///
/// Every node spans from the full start of its first token to the end of its
/// last one. Punctuation and statement keywords are consumed without creating
/// nodes; identifiers and literals always become nodes.
pub struct Parser<'a> {
    text: &'a str,
    tokens: Vec<ScannedToken>,
    pos: usize,
    last_end: TextSize,
    nodes: Vec<Node>,
    lists: Vec<NodeList>,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: scanner::tokenize(text),
            pos: 0,
            last_end: TextSize::from(0),
            nodes: Vec::new(),
            lists: Vec::new(),
        }
    }

    pub fn parse(mut self) -> SyntaxTree {
        let statements_pos = self.current().pos;
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::Eof) {
            let before = self.pos;
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            if self.pos == before {
                // Consume unexpected token to make progress
                self.bump();
            }
        }
        let statements = self.list(statements_pos, statements);

        let eof = self.current();
        let end_of_file = self.alloc_span(SyntaxKind::Eof, eof.pos, eof.end, NodeData::Token, Vec::new());
        let root = self.alloc_span(
            SyntaxKind::SourceFile,
            TextSize::from(0),
            eof.end,
            NodeData::SourceFile {
                statements,
                end_of_file,
            },
            Vec::new(),
        );

        SyntaxTree::from_parts(Arc::from(self.text), self.nodes, self.lists, root)
    }

    // --- token cursor ---

    fn current(&self) -> ScannedToken {
        self.nth(0)
    }

    fn nth(
        &self,
        n: usize,
    ) -> ScannedToken {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    fn peek(&self) -> SyntaxKind {
        self.current().kind
    }

    fn peek_nth(
        &self,
        n: usize,
    ) -> SyntaxKind {
        self.nth(n).kind
    }

    fn at(
        &self,
        kind: SyntaxKind,
    ) -> bool {
        self.peek() == kind
    }

    fn bump(&mut self) -> ScannedToken {
        let token = self.current();
        if token.kind != SyntaxKind::Eof {
            self.pos += 1;
            self.last_end = token.end;
        }
        token
    }

    fn eat(
        &mut self,
        kind: SyntaxKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn current_text(&self) -> &'a str {
        let token = self.current();
        &self.text[usize::from(token.start)..usize::from(token.end)]
    }

    // --- node construction ---

    fn alloc(
        &mut self,
        kind: SyntaxKind,
        pos: TextSize,
        data: NodeData,
    ) -> NodeId {
        self.alloc_documented(kind, pos, data, Vec::new())
    }

    fn alloc_documented(
        &mut self,
        kind: SyntaxKind,
        pos: TextSize,
        data: NodeData,
        js_doc: Vec<NodeId>,
    ) -> NodeId {
        let end = pos.max(self.last_end);
        self.alloc_span(kind, pos, end, data, js_doc)
    }

    fn alloc_span(
        &mut self,
        kind: SyntaxKind,
        pos: TextSize,
        end: TextSize,
        data: NodeData,
        js_doc: Vec<NodeId>,
    ) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());

        let mut children: Vec<NodeId> = js_doc.clone();
        let _ = data.for_each_child(|child| {
            match child {
                Child::Node(node) => children.push(node),
                Child::List(list) => children.extend(self.lists[list.index()].nodes.iter().copied()),
            }
            ControlFlow::<()>::Continue(())
        });
        for child in children {
            self.nodes[child.index()].parent = Some(id);
        }

        self.nodes.push(Node {
            kind,
            pos,
            end,
            parent: None,
            data,
            js_doc: js_doc.into_boxed_slice(),
        });
        id
    }

    fn list(
        &mut self,
        pos: TextSize,
        nodes: Vec<NodeId>,
    ) -> ListId {
        let id = ListId::from_index(self.lists.len());
        self.lists.push(NodeList {
            pos,
            end: pos.max(self.last_end),
            nodes,
        });
        id
    }

    fn token_node(&mut self) -> NodeId {
        let token = self.bump();
        self.alloc_span(token.kind, token.pos, token.end, NodeData::Token, Vec::new())
    }

    /// Zero-width identifier standing in for a name the source lacks.
    fn missing_ident(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.alloc_span(SyntaxKind::Ident, pos, pos, NodeData::Token, Vec::new())
    }

    fn ident_or_missing(&mut self) -> NodeId {
        if self.at(SyntaxKind::Ident) {
            self.token_node()
        } else {
            self.missing_ident()
        }
    }

    // --- documentation comments ---

    /// Parses the `/** ... */` comments in the leading trivia of `token`.
    fn js_doc_before(
        &mut self,
        token: ScannedToken,
    ) -> Vec<NodeId> {
        scanner::trivia_in(self.text, token.pos, token.start)
            .into_iter()
            .filter(|&(kind, start, end)| {
                let comment = &self.text[usize::from(start)..usize::from(end)];
                kind == SyntaxKind::BlockComment && comment.starts_with("/**") && comment.len() > 4
            })
            .map(|(_, start, end)| (start, end))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|(start, end)| self.parse_js_doc(start, end))
            .collect()
    }

    fn parse_js_doc(
        &mut self,
        start: TextSize,
        end: TextSize,
    ) -> NodeId {
        let base = usize::from(start);
        let comment = &self.text[base..usize::from(end)];
        let bytes = comment.as_bytes();
        let limit = bytes.len().saturating_sub(2);

        let mut tags = Vec::new();
        let mut i = 3;
        while i < limit {
            let at_tag = bytes[i] == b'@' && matches!(bytes[i - 1], b' ' | b'\t' | b'\n' | b'\r' | b'*');
            if !at_tag {
                i += 1;
                continue;
            }
            let name_start = i + 1;
            let name_end = word_end(bytes, name_start, limit);
            if name_end == name_start {
                i += 1;
                continue;
            }

            let tag_name = self.doc_ident(base + name_start, base + name_end);
            let mut tag_end = name_end;
            let mut name = None;
            if matches!(&comment[name_start..name_end], "param" | "property") {
                let mut j = skip_spaces(bytes, name_end, limit);
                if j < limit && bytes[j] == b'{' {
                    while j < limit && bytes[j] != b'}' {
                        j += 1;
                    }
                    j = skip_spaces(bytes, (j + 1).min(limit), limit);
                }
                let word = word_end(bytes, j, limit);
                if word > j {
                    name = Some(self.doc_ident(base + j, base + word));
                    tag_end = word;
                }
            }

            let tag = self.alloc_span(
                SyntaxKind::JsDocTag,
                offset(base + i),
                offset(base + tag_end),
                NodeData::JsDocTag {
                    tag_name,
                    name,
                },
                Vec::new(),
            );
            tags.push(tag);
            i = tag_end;
        }

        let tags = match (tags.first(), tags.last()) {
            (Some(&first), Some(&last)) => {
                let id = ListId::from_index(self.lists.len());
                self.lists.push(NodeList {
                    pos: self.nodes[first.index()].pos,
                    end: self.nodes[last.index()].end,
                    nodes: tags,
                });
                Some(id)
            },
            _ => None,
        };
        self.alloc_span(
            SyntaxKind::JsDoc,
            start,
            end,
            NodeData::JsDoc {
                tags,
            },
            Vec::new(),
        )
    }

    fn doc_ident(
        &mut self,
        start: usize,
        end: usize,
    ) -> NodeId {
        self.alloc_span(SyntaxKind::Ident, offset(start), offset(end), NodeData::Token, Vec::new())
    }

    // --- statements ---

    fn parse_statement(&mut self) -> Option<NodeId> {
        let first = self.current();
        let statement = match self.peek() {
            SyntaxKind::KwConst | SyntaxKind::KwLet | SyntaxKind::KwVar => {
                let docs = self.js_doc_before(first);
                self.parse_variable_statement(first.pos, None, docs)
            },
            SyntaxKind::KwFunction => {
                let docs = self.js_doc_before(first);
                self.parse_function_decl(first.pos, None, docs)
            },
            SyntaxKind::KwClass => {
                let docs = self.js_doc_before(first);
                self.parse_class_decl(first.pos, None, docs)
            },
            kind if kind.is_modifier() && self.modifiers_lead_to_declaration() => {
                let docs = self.js_doc_before(first);
                let modifiers = self.parse_modifiers();
                match self.peek() {
                    SyntaxKind::KwFunction => self.parse_function_decl(first.pos, modifiers, docs),
                    SyntaxKind::KwClass => self.parse_class_decl(first.pos, modifiers, docs),
                    _ => self.parse_variable_statement(first.pos, modifiers, docs),
                }
            },
            SyntaxKind::LBrace => self.parse_block(),
            SyntaxKind::KwIf => self.parse_if_statement(),
            SyntaxKind::KwWhile => self.parse_while_statement(),
            SyntaxKind::KwReturn => self.parse_return_statement(),
            SyntaxKind::Semicolon => {
                self.bump();
                self.alloc(SyntaxKind::EmptyStmt, first.pos, NodeData::EmptyStmt)
            },
            kind if can_start_expression(kind) => {
                let expression = self.parse_expression();
                self.eat(SyntaxKind::Semicolon);
                self.alloc(
                    SyntaxKind::ExprStmt,
                    first.pos,
                    NodeData::ExprStmt {
                        expression,
                    },
                )
            },
            _ => return None,
        };
        Some(statement)
    }

    /// Statement position where a zero-width empty statement stands in for a
    /// missing body.
    fn parse_statement_or_empty(&mut self) -> NodeId {
        match self.parse_statement() {
            Some(statement) => statement,
            None => {
                let pos = self.current().pos;
                self.alloc_span(SyntaxKind::EmptyStmt, pos, pos, NodeData::EmptyStmt, Vec::new())
            },
        }
    }

    fn modifiers_lead_to_declaration(&self) -> bool {
        let mut n = 0;
        while self.peek_nth(n).is_modifier() {
            n += 1;
        }
        matches!(
            self.peek_nth(n),
            SyntaxKind::KwFunction | SyntaxKind::KwClass | SyntaxKind::KwConst | SyntaxKind::KwLet | SyntaxKind::KwVar
        )
    }

    fn parse_modifiers(&mut self) -> Option<ListId> {
        let pos = self.current().pos;
        let mut modifiers = Vec::new();
        while self.peek().is_modifier() && is_member_name_start(self.peek_nth(1)) {
            modifiers.push(self.token_node());
        }
        (!modifiers.is_empty()).then(|| self.list(pos, modifiers))
    }

    fn parse_variable_statement(
        &mut self,
        pos: TextSize,
        modifiers: Option<ListId>,
        docs: Vec<NodeId>,
    ) -> NodeId {
        let list_pos = self.current().pos;
        self.bump();

        let declarations_pos = self.current().pos;
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_decl());
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let declarations = self.list(declarations_pos, declarations);
        let declaration_list = self.alloc(
            SyntaxKind::VariableDeclList,
            list_pos,
            NodeData::VariableDeclList {
                declarations,
            },
        );

        self.eat(SyntaxKind::Semicolon);
        self.alloc_documented(
            SyntaxKind::VariableStmt,
            pos,
            NodeData::VariableStmt {
                modifiers,
                declaration_list,
            },
            docs,
        )
    }

    fn parse_variable_decl(&mut self) -> NodeId {
        let pos = self.current().pos;
        let name = self.ident_or_missing();
        let ty = self.eat(SyntaxKind::Colon).then(|| self.parse_type());
        let initializer = self.eat(SyntaxKind::Equal).then(|| self.parse_assignment());
        self.alloc(
            SyntaxKind::VariableDecl,
            pos,
            NodeData::VariableDecl {
                name,
                ty,
                initializer,
            },
        )
    }

    fn parse_function_decl(
        &mut self,
        pos: TextSize,
        modifiers: Option<ListId>,
        docs: Vec<NodeId>,
    ) -> NodeId {
        self.bump();
        let name = self.at(SyntaxKind::Ident).then(|| self.token_node());
        let parameters = self.parse_parameter_list();
        let return_type = self.eat(SyntaxKind::Colon).then(|| self.parse_type());
        let body = self.parse_body();
        self.alloc_documented(
            SyntaxKind::FunctionDecl,
            pos,
            NodeData::FunctionDecl {
                modifiers,
                name,
                parameters,
                return_type,
                body,
            },
            docs,
        )
    }

    fn parse_body(&mut self) -> Option<NodeId> {
        if self.at(SyntaxKind::LBrace) {
            Some(self.parse_block())
        } else {
            self.eat(SyntaxKind::Semicolon);
            None
        }
    }

    fn parse_parameter_list(&mut self) -> ListId {
        if !self.eat(SyntaxKind::LParen) {
            let pos = self.current().pos;
            return self.list(pos, Vec::new());
        }
        let list_pos = self.current().pos;
        let mut parameters = Vec::new();
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            parameters.push(self.parse_parameter());
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let parameters = self.list(list_pos, parameters);
        self.eat(SyntaxKind::RParen);
        parameters
    }

    fn parse_parameter(&mut self) -> NodeId {
        let pos = self.current().pos;
        let modifiers = self.parse_modifiers();
        self.eat(SyntaxKind::Ellipsis);
        let name = self.ident_or_missing();
        self.eat(SyntaxKind::Question);
        let ty = self.eat(SyntaxKind::Colon).then(|| self.parse_type());
        let initializer = self.eat(SyntaxKind::Equal).then(|| self.parse_assignment());
        self.alloc(
            SyntaxKind::Parameter,
            pos,
            NodeData::Parameter {
                modifiers,
                name,
                ty,
                initializer,
            },
        )
    }

    fn parse_class_decl(
        &mut self,
        pos: TextSize,
        modifiers: Option<ListId>,
        docs: Vec<NodeId>,
    ) -> NodeId {
        self.bump();
        let name = self.at(SyntaxKind::Ident).then(|| self.token_node());
        let heritage = self.eat(SyntaxKind::KwExtends).then(|| self.parse_left_hand_side());

        let members = if self.eat(SyntaxKind::LBrace) {
            let members_pos = self.current().pos;
            let mut members = Vec::new();
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                if self.eat(SyntaxKind::Semicolon) {
                    continue;
                }
                match self.parse_class_member() {
                    Some(member) => members.push(member),
                    None => {
                        self.bump();
                    },
                }
            }
            let members = self.list(members_pos, members);
            self.eat(SyntaxKind::RBrace);
            members
        } else {
            let pos = self.current().pos;
            self.list(pos, Vec::new())
        };

        self.alloc_documented(
            SyntaxKind::ClassDecl,
            pos,
            NodeData::ClassDecl {
                modifiers,
                name,
                heritage,
                members,
            },
            docs,
        )
    }

    fn parse_class_member(&mut self) -> Option<NodeId> {
        let first = self.current();
        if !is_member_name_start(first.kind) {
            return None;
        }
        let docs = self.js_doc_before(first);
        let modifiers = self.parse_modifiers();

        if self.at(SyntaxKind::KwConstructor) && self.peek_nth(1) == SyntaxKind::LParen {
            self.bump();
            let parameters = self.parse_parameter_list();
            let body = self.parse_body();
            return Some(self.alloc_documented(
                SyntaxKind::Constructor,
                first.pos,
                NodeData::Constructor {
                    modifiers,
                    parameters,
                    body,
                },
                docs,
            ));
        }

        let name = if is_member_name_start(self.peek()) {
            self.token_node()
        } else {
            self.missing_ident()
        };
        self.eat(SyntaxKind::Question);

        if self.at(SyntaxKind::LParen) {
            let parameters = self.parse_parameter_list();
            let return_type = self.eat(SyntaxKind::Colon).then(|| self.parse_type());
            let body = self.parse_body();
            return Some(self.alloc_documented(
                SyntaxKind::MethodDecl,
                first.pos,
                NodeData::MethodDecl {
                    modifiers,
                    name,
                    parameters,
                    return_type,
                    body,
                },
                docs,
            ));
        }

        let ty = self.eat(SyntaxKind::Colon).then(|| self.parse_type());
        let initializer = self.eat(SyntaxKind::Equal).then(|| self.parse_assignment());
        self.eat(SyntaxKind::Semicolon);
        Some(self.alloc_documented(
            SyntaxKind::PropertyDecl,
            first.pos,
            NodeData::PropertyDecl {
                modifiers,
                name,
                ty,
                initializer,
            },
            docs,
        ))
    }

    fn parse_block(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.eat(SyntaxKind::LBrace);
        let statements_pos = self.current().pos;
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            match self.parse_statement() {
                Some(statement) => statements.push(statement),
                None => {
                    self.bump();
                },
            }
        }
        let statements = self.list(statements_pos, statements);
        self.eat(SyntaxKind::RBrace);
        self.alloc(
            SyntaxKind::Block,
            pos,
            NodeData::Block {
                statements,
            },
        )
    }

    fn parse_if_statement(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.bump();
        let condition = self.parse_parenthesized_condition();
        let then_branch = self.parse_statement_or_empty();
        let else_branch = self.eat(SyntaxKind::KwElse).then(|| self.parse_statement_or_empty());
        self.alloc(
            SyntaxKind::IfStmt,
            pos,
            NodeData::IfStmt {
                condition,
                then_branch,
                else_branch,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.bump();
        let condition = self.parse_parenthesized_condition();
        let body = self.parse_statement_or_empty();
        self.alloc(
            SyntaxKind::WhileStmt,
            pos,
            NodeData::WhileStmt {
                condition,
                body,
            },
        )
    }

    fn parse_parenthesized_condition(&mut self) -> NodeId {
        self.eat(SyntaxKind::LParen);
        let condition = self.parse_expression();
        self.eat(SyntaxKind::RParen);
        condition
    }

    fn parse_return_statement(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.bump();
        let expression = can_start_expression(self.peek()).then(|| self.parse_expression());
        self.eat(SyntaxKind::Semicolon);
        self.alloc(
            SyntaxKind::ReturnStmt,
            pos,
            NodeData::ReturnStmt {
                expression,
            },
        )
    }

    // --- expressions ---

    fn parse_expression(&mut self) -> NodeId {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> NodeId {
        if self.at_arrow_function() {
            return self.parse_arrow_function();
        }
        let pos = self.current().pos;
        let lhs = self.parse_conditional();
        if matches!(
            self.peek(),
            SyntaxKind::Equal
                | SyntaxKind::PlusEqual
                | SyntaxKind::MinusEqual
                | SyntaxKind::StarEqual
                | SyntaxKind::SlashEqual
        ) {
            let operator = self.token_node();
            let rhs = self.parse_assignment();
            return self.alloc(
                SyntaxKind::BinaryExpr,
                pos,
                NodeData::BinaryExpr {
                    lhs,
                    operator,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_conditional(&mut self) -> NodeId {
        let pos = self.current().pos;
        let condition = self.parse_binary(0);
        if !self.eat(SyntaxKind::Question) {
            return condition;
        }
        let when_true = self.parse_assignment();
        self.eat(SyntaxKind::Colon);
        let when_false = self.parse_assignment();
        self.alloc(
            SyntaxKind::ConditionalExpr,
            pos,
            NodeData::ConditionalExpr {
                condition,
                when_true,
                when_false,
            },
        )
    }

    fn parse_binary(
        &mut self,
        min_precedence: u8,
    ) -> NodeId {
        let pos = self.current().pos;
        let mut lhs = self.parse_unary();
        loop {
            if self.at(SyntaxKind::Ident) && self.current_text() == "as" {
                if AS_PRECEDENCE <= min_precedence {
                    break;
                }
                self.bump();
                let ty = self.parse_type();
                lhs = self.alloc(
                    SyntaxKind::AsExpr,
                    pos,
                    NodeData::AsExpr {
                        expression: lhs,
                        ty,
                    },
                );
                continue;
            }

            let precedence = binary_precedence(self.peek());
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            let operator = self.token_node();
            let rhs = self.parse_binary(precedence);
            lhs = self.alloc(
                SyntaxKind::BinaryExpr,
                pos,
                NodeData::BinaryExpr {
                    lhs,
                    operator,
                    rhs,
                },
            );
        }
        lhs
    }

    fn parse_unary(&mut self) -> NodeId {
        let pos = self.current().pos;
        if matches!(
            self.peek(),
            SyntaxKind::Exclaim
                | SyntaxKind::Minus
                | SyntaxKind::Plus
                | SyntaxKind::Tilde
                | SyntaxKind::PlusPlus
                | SyntaxKind::MinusMinus
                | SyntaxKind::KwTypeof
                | SyntaxKind::KwVoid
        ) {
            self.bump();
            let operand = self.parse_unary();
            return self.alloc(
                SyntaxKind::PrefixExpr,
                pos,
                NodeData::PrefixExpr {
                    operand,
                },
            );
        }

        let operand = self.parse_left_hand_side();
        if matches!(self.peek(), SyntaxKind::PlusPlus | SyntaxKind::MinusMinus) {
            self.bump();
            return self.alloc(
                SyntaxKind::PostfixExpr,
                pos,
                NodeData::PostfixExpr {
                    operand,
                },
            );
        }
        operand
    }

    fn parse_left_hand_side(&mut self) -> NodeId {
        let pos = self.current().pos;
        let mut expr = if self.at(SyntaxKind::KwNew) {
            self.parse_new_expression()
        } else {
            self.parse_primary()
        };
        loop {
            expr = match self.peek() {
                SyntaxKind::Dot | SyntaxKind::QuestionDot => {
                    self.bump();
                    let name = self.parse_member_name();
                    self.alloc(
                        SyntaxKind::MemberExpr,
                        pos,
                        NodeData::MemberExpr {
                            object: expr,
                            name,
                        },
                    )
                },
                SyntaxKind::LBracket => {
                    self.bump();
                    let index = self.parse_expression();
                    self.eat(SyntaxKind::RBracket);
                    self.alloc(
                        SyntaxKind::IndexExpr,
                        pos,
                        NodeData::IndexExpr {
                            object: expr,
                            index,
                        },
                    )
                },
                SyntaxKind::LParen => {
                    let arguments = self.parse_arguments();
                    self.alloc(
                        SyntaxKind::CallExpr,
                        pos,
                        NodeData::CallExpr {
                            callee: expr,
                            arguments,
                        },
                    )
                },
                _ => return expr,
            };
        }
    }

    fn parse_member_name(&mut self) -> NodeId {
        let kind = self.peek();
        if matches!(kind, SyntaxKind::Ident | SyntaxKind::PrivateIdent) || kind.is_keyword() {
            self.token_node()
        } else {
            self.missing_ident()
        }
    }

    fn parse_new_expression(&mut self) -> NodeId {
        let pos = self.current().pos;
        self.bump();
        let mut callee = self.parse_primary();
        while self.eat(SyntaxKind::Dot) {
            let name = self.parse_member_name();
            callee = self.alloc(
                SyntaxKind::MemberExpr,
                pos,
                NodeData::MemberExpr {
                    object: callee,
                    name,
                },
            );
        }
        let arguments = self.at(SyntaxKind::LParen).then(|| self.parse_arguments());
        self.alloc(
            SyntaxKind::NewExpr,
            pos,
            NodeData::NewExpr {
                callee,
                arguments,
            },
        )
    }

    fn parse_arguments(&mut self) -> ListId {
        self.eat(SyntaxKind::LParen);
        let list_pos = self.current().pos;
        let mut arguments = Vec::new();
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            arguments.push(self.parse_assignment());
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        let arguments = self.list(list_pos, arguments);
        self.eat(SyntaxKind::RParen);
        arguments
    }

    fn parse_primary(&mut self) -> NodeId {
        let pos = self.current().pos;
        match self.peek() {
            SyntaxKind::Ident
            | SyntaxKind::PrivateIdent
            | SyntaxKind::Number
            | SyntaxKind::String
            | SyntaxKind::KwThis
            | SyntaxKind::KwTrue
            | SyntaxKind::KwFalse
            | SyntaxKind::KwNull => self.token_node(),
            SyntaxKind::LParen => {
                self.bump();
                let expression = self.parse_expression();
                self.eat(SyntaxKind::RParen);
                self.alloc(
                    SyntaxKind::ParenExpr,
                    pos,
                    NodeData::ParenExpr {
                        expression,
                    },
                )
            },
            SyntaxKind::LBracket => {
                self.bump();
                let elements_pos = self.current().pos;
                let mut elements = Vec::new();
                while !self.at(SyntaxKind::RBracket) && !self.at(SyntaxKind::Eof) {
                    if self.eat(SyntaxKind::Comma) {
                        continue;
                    }
                    elements.push(self.parse_assignment());
                    if !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
                let elements = self.list(elements_pos, elements);
                self.eat(SyntaxKind::RBracket);
                self.alloc(
                    SyntaxKind::ArrayExpr,
                    pos,
                    NodeData::ArrayExpr {
                        elements,
                    },
                )
            },
            SyntaxKind::LBrace => {
                self.bump();
                let properties_pos = self.current().pos;
                let mut properties = Vec::new();
                while is_member_name_start(self.peek()) {
                    properties.push(self.parse_property_assignment());
                    if !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
                let properties = self.list(properties_pos, properties);
                self.eat(SyntaxKind::RBrace);
                self.alloc(
                    SyntaxKind::ObjectExpr,
                    pos,
                    NodeData::ObjectExpr {
                        properties,
                    },
                )
            },
            SyntaxKind::KwFunction => self.parse_function_decl(pos, None, Vec::new()),
            _ => self.missing_ident(),
        }
    }

    fn parse_property_assignment(&mut self) -> NodeId {
        let pos = self.current().pos;
        let name = self.token_node();
        let initializer = self.eat(SyntaxKind::Colon).then(|| self.parse_assignment());
        self.alloc(
            SyntaxKind::PropertyAssignment,
            pos,
            NodeData::PropertyAssignment {
                name,
                initializer,
            },
        )
    }

    fn at_arrow_function(&self) -> bool {
        match self.peek() {
            SyntaxKind::Ident => self.peek_nth(1) == SyntaxKind::FatArrow,
            SyntaxKind::LParen => {
                let mut depth = 0usize;
                let mut n = 0;
                loop {
                    match self.peek_nth(n) {
                        SyntaxKind::LParen => depth += 1,
                        SyntaxKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return self.peek_nth(n + 1) == SyntaxKind::FatArrow;
                            }
                        },
                        SyntaxKind::Eof => return false,
                        _ => {},
                    }
                    n += 1;
                }
            },
            _ => false,
        }
    }

    fn parse_arrow_function(&mut self) -> NodeId {
        let pos = self.current().pos;
        let parameters = if self.at(SyntaxKind::Ident) {
            let parameter = self.parse_parameter();
            self.list(pos, vec![parameter])
        } else {
            self.parse_parameter_list()
        };
        self.eat(SyntaxKind::FatArrow);
        let body = if self.at(SyntaxKind::LBrace) {
            self.parse_block()
        } else {
            self.parse_assignment()
        };
        self.alloc(
            SyntaxKind::ArrowFunction,
            pos,
            NodeData::ArrowFunction {
                parameters,
                body,
            },
        )
    }

    // --- types ---

    fn parse_type(&mut self) -> NodeId {
        let pos = self.current().pos;
        let mut ty = match self.peek() {
            SyntaxKind::KwNumber
            | SyntaxKind::KwString
            | SyntaxKind::KwBoolean
            | SyntaxKind::KwAny
            | SyntaxKind::KwVoid
            | SyntaxKind::KwNull => self.token_node(),
            SyntaxKind::Ident => {
                let name = self.token_node();
                self.alloc(
                    SyntaxKind::TypeRef,
                    pos,
                    NodeData::TypeRef {
                        name,
                    },
                )
            },
            _ => self.missing_ident(),
        };
        while self.at(SyntaxKind::LBracket) && self.peek_nth(1) == SyntaxKind::RBracket {
            self.bump();
            self.bump();
            ty = self.alloc(
                SyntaxKind::ArrayType,
                pos,
                NodeData::ArrayType {
                    element: ty,
                },
            );
        }
        ty
    }
}

const AS_PRECEDENCE: u8 = 7;

fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::OrOr | SyntaxKind::QuestionQuestion => 1,
        SyntaxKind::AndAnd => 2,
        SyntaxKind::Pipe => 3,
        SyntaxKind::Caret => 4,
        SyntaxKind::Amp => 5,
        SyntaxKind::EqualEqual | SyntaxKind::EqualEqualEqual | SyntaxKind::NotEqual | SyntaxKind::NotEqualEqual => 6,
        SyntaxKind::Less | SyntaxKind::Greater | SyntaxKind::LessEqual | SyntaxKind::GreaterEqual => AS_PRECEDENCE,
        SyntaxKind::Plus | SyntaxKind::Minus => 8,
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => 9,
        _ => 0,
    }
}

fn can_start_expression(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Ident
            | SyntaxKind::PrivateIdent
            | SyntaxKind::Number
            | SyntaxKind::String
            | SyntaxKind::KwThis
            | SyntaxKind::KwTrue
            | SyntaxKind::KwFalse
            | SyntaxKind::KwNull
            | SyntaxKind::KwNew
            | SyntaxKind::KwFunction
            | SyntaxKind::KwTypeof
            | SyntaxKind::KwVoid
            | SyntaxKind::LParen
            | SyntaxKind::LBracket
            | SyntaxKind::LBrace
            | SyntaxKind::Exclaim
            | SyntaxKind::Minus
            | SyntaxKind::Plus
            | SyntaxKind::Tilde
            | SyntaxKind::PlusPlus
            | SyntaxKind::MinusMinus
    )
}

fn is_member_name_start(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Ident | SyntaxKind::PrivateIdent | SyntaxKind::String | SyntaxKind::Number)
        || kind.is_keyword()
}

fn word_end(
    bytes: &[u8],
    mut i: usize,
    limit: usize,
) -> usize {
    while i < limit && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$') {
        i += 1;
    }
    i
}

fn skip_spaces(
    bytes: &[u8],
    mut i: usize,
    limit: usize,
) -> usize {
    while i < limit && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }
    i
}

fn offset(value: usize) -> TextSize {
    TextSize::try_from(value).unwrap_or(TextSize::from(u32::MAX))
}

#[cfg(test)]
#[path = "../../tests/src/syntax/parser_tests.rs"]
mod tests;
