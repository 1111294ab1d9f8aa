use logos::Logos;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    Error = 0,
    Eof,

    // Trivia
    Whitespace,
    LineComment,
    BlockComment,

    // Identifiers & Literals
    Ident,
    PrivateIdent,
    Number,
    String,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Ellipsis,
    Question,
    QuestionDot,
    QuestionQuestion,
    FatArrow,
    At,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusPlus,
    MinusMinus,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    EqualEqual,
    EqualEqualEqual,
    NotEqual,
    NotEqualEqual,
    LessEqual,
    GreaterEqual,
    AndAnd,
    OrOr,

    // Keywords
    KwBreak,
    KwClass,
    KwConst,
    KwConstructor,
    KwContinue,
    KwElse,
    KwExtends,
    KwFalse,
    KwFunction,
    KwIf,
    KwLet,
    KwNew,
    KwNull,
    KwReturn,
    KwThis,
    KwTrue,
    KwTypeof,
    KwVar,
    KwVoid,
    KwWhile,

    // Modifier keywords
    KwExport,
    KwStatic,
    KwReadonly,
    KwPublic,
    KwPrivate,
    KwProtected,
    KwDeclare,
    KwAsync,

    // Type keywords
    KwNumber,
    KwString,
    KwBoolean,
    KwAny,

    // Composite Nodes
    SourceFile,
    SyntaxList,
    VariableStmt,
    VariableDeclList,
    VariableDecl,
    FunctionDecl,
    ClassDecl,
    PropertyDecl,
    MethodDecl,
    Constructor,
    Parameter,
    Block,
    ExprStmt,
    ReturnStmt,
    IfStmt,
    WhileStmt,
    EmptyStmt,
    CallExpr,
    NewExpr,
    MemberExpr,
    IndexExpr,
    BinaryExpr,
    PrefixExpr,
    PostfixExpr,
    ParenExpr,
    ArrayExpr,
    ObjectExpr,
    PropertyAssignment,
    ArrowFunction,
    AsExpr,
    ConditionalExpr,
    TypeRef,
    ArrayType,
    JsDoc,
    JsDocTag,
}

impl SyntaxKind {
    /// Lexical tokens, including the end-of-file marker. Trivia is excluded.
    pub fn is_token(self) -> bool {
        self <= SyntaxKind::KwAny && !self.is_trivia()
    }

    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment)
    }

    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::KwBreak && self <= SyntaxKind::KwAny
    }

    pub fn is_punctuation(self) -> bool {
        self >= SyntaxKind::LParen && self <= SyntaxKind::OrOr
    }

    pub fn is_literal(self) -> bool {
        matches!(self, SyntaxKind::Number | SyntaxKind::String)
    }

    pub fn is_modifier(self) -> bool {
        self >= SyntaxKind::KwExport && self <= SyntaxKind::KwAsync
    }

    pub fn is_jsdoc(self) -> bool {
        matches!(self, SyntaxKind::JsDoc | SyntaxKind::JsDocTag)
    }

    /// Tokens the parser always wraps in a node. Finding one of these while
    /// re-scanning a gap means the tree and the scanner disagree.
    pub fn is_node_only_token(self) -> bool {
        matches!(self, SyntaxKind::Ident | SyntaxKind::PrivateIdent) || self.is_literal()
    }

    /// Kinds a cursor can rest on when asking for the symbol under it.
    pub fn is_property_name_like(self) -> bool {
        matches!(self, SyntaxKind::Ident | SyntaxKind::PrivateIdent) || self.is_literal() || self.is_keyword()
    }

    /// Nodes whose gaps may legitimately hold an identifier-shaped word.
    /// `x as T` keeps `as` as a contextual identifier.
    pub fn admits_stray_identifier(self) -> bool {
        matches!(self, SyntaxKind::AsExpr)
    }
}

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = ())]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token("?.")]
    QuestionDot,
    #[token("??")]
    QuestionQuestion,
    #[token("=>")]
    FatArrow,
    #[token("@")]
    At,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("~")]
    Tilde,
    #[token("!")]
    Exclaim,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEqual,
    #[token("-=")]
    MinusEqual,
    #[token("*=")]
    StarEqual,
    #[token("/=")]
    SlashEqual,
    #[token("==")]
    EqualEqual,
    #[token("===")]
    EqualEqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("!==")]
    NotEqualEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,

    #[token("break")]
    KwBreak,
    #[token("class")]
    KwClass,
    #[token("const")]
    KwConst,
    #[token("constructor")]
    KwConstructor,
    #[token("continue")]
    KwContinue,
    #[token("else")]
    KwElse,
    #[token("extends")]
    KwExtends,
    #[token("false")]
    KwFalse,
    #[token("function")]
    KwFunction,
    #[token("if")]
    KwIf,
    #[token("let")]
    KwLet,
    #[token("new")]
    KwNew,
    #[token("null")]
    KwNull,
    #[token("return")]
    KwReturn,
    #[token("this")]
    KwThis,
    #[token("true")]
    KwTrue,
    #[token("typeof")]
    KwTypeof,
    #[token("var")]
    KwVar,
    #[token("void")]
    KwVoid,
    #[token("while")]
    KwWhile,
    #[token("export")]
    KwExport,
    #[token("static")]
    KwStatic,
    #[token("readonly")]
    KwReadonly,
    #[token("public")]
    KwPublic,
    #[token("private")]
    KwPrivate,
    #[token("protected")]
    KwProtected,
    #[token("declare")]
    KwDeclare,
    #[token("async")]
    KwAsync,
    #[token("number")]
    KwNumber,
    #[token("string")]
    KwString,
    #[token("boolean")]
    KwBoolean,
    #[token("any")]
    KwAny,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,
    #[regex(r"#[a-zA-Z_$][a-zA-Z0-9_$]*")]
    PrivateIdent,
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9A-Fa-f][0-9A-Fa-f_]*")]
    Number,
    #[regex(r#""([^"\\\n]|\\[\s\S])*""#)]
    #[regex(r#"'([^'\\\n]|\\[\s\S])*'"#)]
    String,
}

impl From<TokenKind> for SyntaxKind {
    fn from(token: TokenKind) -> Self {
        match token {
            TokenKind::Whitespace => SyntaxKind::Whitespace,
            TokenKind::LineComment => SyntaxKind::LineComment,
            TokenKind::BlockComment => SyntaxKind::BlockComment,
            TokenKind::LParen => SyntaxKind::LParen,
            TokenKind::RParen => SyntaxKind::RParen,
            TokenKind::LBrace => SyntaxKind::LBrace,
            TokenKind::RBrace => SyntaxKind::RBrace,
            TokenKind::LBracket => SyntaxKind::LBracket,
            TokenKind::RBracket => SyntaxKind::RBracket,
            TokenKind::Semicolon => SyntaxKind::Semicolon,
            TokenKind::Colon => SyntaxKind::Colon,
            TokenKind::Comma => SyntaxKind::Comma,
            TokenKind::Dot => SyntaxKind::Dot,
            TokenKind::Ellipsis => SyntaxKind::Ellipsis,
            TokenKind::Question => SyntaxKind::Question,
            TokenKind::QuestionDot => SyntaxKind::QuestionDot,
            TokenKind::QuestionQuestion => SyntaxKind::QuestionQuestion,
            TokenKind::FatArrow => SyntaxKind::FatArrow,
            TokenKind::At => SyntaxKind::At,
            TokenKind::Plus => SyntaxKind::Plus,
            TokenKind::Minus => SyntaxKind::Minus,
            TokenKind::Star => SyntaxKind::Star,
            TokenKind::Slash => SyntaxKind::Slash,
            TokenKind::Percent => SyntaxKind::Percent,
            TokenKind::Caret => SyntaxKind::Caret,
            TokenKind::Amp => SyntaxKind::Amp,
            TokenKind::Pipe => SyntaxKind::Pipe,
            TokenKind::Tilde => SyntaxKind::Tilde,
            TokenKind::Exclaim => SyntaxKind::Exclaim,
            TokenKind::Equal => SyntaxKind::Equal,
            TokenKind::Less => SyntaxKind::Less,
            TokenKind::Greater => SyntaxKind::Greater,
            TokenKind::PlusPlus => SyntaxKind::PlusPlus,
            TokenKind::MinusMinus => SyntaxKind::MinusMinus,
            TokenKind::PlusEqual => SyntaxKind::PlusEqual,
            TokenKind::MinusEqual => SyntaxKind::MinusEqual,
            TokenKind::StarEqual => SyntaxKind::StarEqual,
            TokenKind::SlashEqual => SyntaxKind::SlashEqual,
            TokenKind::EqualEqual => SyntaxKind::EqualEqual,
            TokenKind::EqualEqualEqual => SyntaxKind::EqualEqualEqual,
            TokenKind::NotEqual => SyntaxKind::NotEqual,
            TokenKind::NotEqualEqual => SyntaxKind::NotEqualEqual,
            TokenKind::LessEqual => SyntaxKind::LessEqual,
            TokenKind::GreaterEqual => SyntaxKind::GreaterEqual,
            TokenKind::AndAnd => SyntaxKind::AndAnd,
            TokenKind::OrOr => SyntaxKind::OrOr,
            TokenKind::KwBreak => SyntaxKind::KwBreak,
            TokenKind::KwClass => SyntaxKind::KwClass,
            TokenKind::KwConst => SyntaxKind::KwConst,
            TokenKind::KwConstructor => SyntaxKind::KwConstructor,
            TokenKind::KwContinue => SyntaxKind::KwContinue,
            TokenKind::KwElse => SyntaxKind::KwElse,
            TokenKind::KwExtends => SyntaxKind::KwExtends,
            TokenKind::KwFalse => SyntaxKind::KwFalse,
            TokenKind::KwFunction => SyntaxKind::KwFunction,
            TokenKind::KwIf => SyntaxKind::KwIf,
            TokenKind::KwLet => SyntaxKind::KwLet,
            TokenKind::KwNew => SyntaxKind::KwNew,
            TokenKind::KwNull => SyntaxKind::KwNull,
            TokenKind::KwReturn => SyntaxKind::KwReturn,
            TokenKind::KwThis => SyntaxKind::KwThis,
            TokenKind::KwTrue => SyntaxKind::KwTrue,
            TokenKind::KwTypeof => SyntaxKind::KwTypeof,
            TokenKind::KwVar => SyntaxKind::KwVar,
            TokenKind::KwVoid => SyntaxKind::KwVoid,
            TokenKind::KwWhile => SyntaxKind::KwWhile,
            TokenKind::KwExport => SyntaxKind::KwExport,
            TokenKind::KwStatic => SyntaxKind::KwStatic,
            TokenKind::KwReadonly => SyntaxKind::KwReadonly,
            TokenKind::KwPublic => SyntaxKind::KwPublic,
            TokenKind::KwPrivate => SyntaxKind::KwPrivate,
            TokenKind::KwProtected => SyntaxKind::KwProtected,
            TokenKind::KwDeclare => SyntaxKind::KwDeclare,
            TokenKind::KwAsync => SyntaxKind::KwAsync,
            TokenKind::KwNumber => SyntaxKind::KwNumber,
            TokenKind::KwString => SyntaxKind::KwString,
            TokenKind::KwBoolean => SyntaxKind::KwBoolean,
            TokenKind::KwAny => SyntaxKind::KwAny,
            TokenKind::Ident => SyntaxKind::Ident,
            TokenKind::PrivateIdent => SyntaxKind::PrivateIdent,
            TokenKind::Number => SyntaxKind::Number,
            TokenKind::String => SyntaxKind::String,
        }
    }
}
