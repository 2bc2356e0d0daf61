use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer<'_>, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        RegexPattern {
            regex: Regex::new(pattern).expect("lexer patterns are static and valid"),
            handler,
        }
    }
}

lazy_static! {
    /// Lexical rules in priority order. Every pattern is anchored at the cursor,
    /// the first one that matches wins.
    static ref PATTERNS: Vec<RegexPattern> = {
        let mut keywords: Vec<&str> = RESERVED_LOOKUP.iter().copied().collect();
        keywords.sort_unstable();

        vec![
            RegexPattern::new(&format!(r"^\b(?:{})\b", keywords.join("|")), MK_DEFAULT_HANDLER!(TokenKind::Keyword)),
            RegexPattern::new(r"^\b[a-zA-Z_][a-zA-Z0-9_]*\b", MK_DEFAULT_HANDLER!(TokenKind::Identifier)),
            RegexPattern::new(r"^\b\d+\.\d+\b", MK_DEFAULT_HANDLER!(TokenKind::Float)),
            RegexPattern::new(r"^\b\d+\b", MK_DEFAULT_HANDLER!(TokenKind::Integer)),
            RegexPattern::new(r"^(?:\|\||&&|==|!=|<=|>=|[+\-*/=<>!;(){},\[\]])", MK_DEFAULT_HANDLER!(TokenKind::Operator)),
            RegexPattern::new(r"^\s+", skip_handler),
            RegexPattern::new(r#"^"[^"]*""#, MK_DEFAULT_HANDLER!(TokenKind::String)),
        ]
    };
}

pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    file: Arc<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Arc::new(file)
        } else {
            Arc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        trace!(kind = %token.kind, value = %token.value, offset = self.pos, "token");
        self.tokens.push(token);
    }

    /// The character under the cursor.
    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// The unscanned rest of the source.
    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Arc::clone(&self.file))
    }

    /// Span covering the next `len` bytes from the cursor.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Arc::clone(&self.file)),
        }
    }
}

fn skip_handler(lexer: &mut Lexer<'_>, matched: &str) {
    lexer.advance_n(matched.len());
}

/// Splits `source` into tokens, dropping whitespace.
///
/// Fails on the first character no rule accepts.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let remainder = lex.remainder();
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(remainder) {
                (pattern.handler)(&mut lex, found.as_str());
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            // The reported offset counts characters; the position stays a byte offset
            let offset = lex.source[..lex.pos].chars().count() as u32;
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken { token, offset },
                lex.position(),
            ));
        }
    }

    debug!(file = %lex.file, tokens = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}
