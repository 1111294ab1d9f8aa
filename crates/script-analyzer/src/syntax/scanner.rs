use logos::Logos;
use text_size::TextSize;

use crate::syntax::kind::{SyntaxKind, TokenKind};

/// One non-trivia token with the trivia in front of it folded into `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: SyntaxKind,
    /// Full start, including leading trivia.
    pub pos: TextSize,
    pub start: TextSize,
    pub end: TextSize,
}

/// A re-entrant scanner that resumes tokenization at any offset of the text.
///
/// Trivia is skipped; once the text is exhausted every call to [`Scanner::next_token`]
/// returns an `Eof` token spanning the trailing trivia.
pub struct Scanner<'a> {
    text: &'a str,
    inner: logos::Lexer<'a, TokenKind>,
    base: TextSize,
    pos: TextSize,
}

impl<'a> Scanner<'a> {
    /// `offset` must lie on a char boundary of `text`.
    pub fn new(
        text: &'a str,
        offset: TextSize,
    ) -> Self {
        let start = usize::from(offset).min(text.len());
        let base = TextSize::try_from(start).unwrap_or(offset);
        Self {
            text,
            inner: TokenKind::lexer(&text[start..]),
            base,
            pos: base,
        }
    }

    pub fn next_token(&mut self) -> ScannedToken {
        let pos = self.pos;
        loop {
            let Some(result) = self.inner.next() else {
                let end = TextSize::of(self.text);
                self.pos = end;
                return ScannedToken {
                    kind: SyntaxKind::Eof,
                    pos,
                    start: end,
                    end,
                };
            };

            let kind = match result {
                Ok(token) => token.into(),
                Err(()) => {
                    self.bump_to_char_boundary();
                    SyntaxKind::Error
                },
            };
            if kind.is_trivia() {
                continue;
            }

            let span = self.inner.span();
            let start = self.base + offset(span.start);
            let end = self.base + offset(span.end);
            self.pos = end;
            return ScannedToken {
                kind,
                pos,
                start,
                end,
            };
        }
    }

    /// Errors on multi-byte characters can stop mid-character.
    fn bump_to_char_boundary(&mut self) {
        let rest = self.inner.source();
        let mut end = self.inner.span().end;
        while end < rest.len() && !rest.is_char_boundary(end) {
            end += 1;
        }
        let extra = end - self.inner.span().end;
        if extra > 0 {
            self.inner.bump(extra);
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = ScannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (token.kind != SyntaxKind::Eof).then_some(token)
    }
}

/// Scans the whole text. The result always ends with an `Eof` token.
pub fn tokenize(text: &str) -> Vec<ScannedToken> {
    let mut scanner = Scanner::new(text, TextSize::from(0));
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        tokens.push(token);
        if token.kind == SyntaxKind::Eof {
            return tokens;
        }
    }
}

/// Offset of the first non-trivia character at or after `pos`.
pub fn skip_trivia(
    text: &str,
    pos: TextSize,
) -> TextSize {
    Scanner::new(text, pos).next_token().start
}

/// Raw lexemes, trivia included. Used to read the comments in front of a token.
pub fn trivia_in(
    text: &str,
    pos: TextSize,
    end: TextSize,
) -> Vec<(SyntaxKind, TextSize, TextSize)> {
    let lo = usize::from(pos);
    let hi = usize::from(end).min(text.len());
    if lo >= hi {
        return Vec::new();
    }
    let mut lexer = TokenKind::lexer(&text[lo..hi]);
    let mut pieces = Vec::new();
    while let Some(result) = lexer.next() {
        let kind: SyntaxKind = match result {
            Ok(token) => token.into(),
            Err(()) => SyntaxKind::Error,
        };
        if kind.is_trivia() {
            let span = lexer.span();
            pieces.push((kind, pos + offset(span.start), pos + offset(span.end)));
        }
    }
    pieces
}

fn offset(value: usize) -> TextSize {
    TextSize::try_from(value).unwrap_or(TextSize::from(u32::MAX))
}
