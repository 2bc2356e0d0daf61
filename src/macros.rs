//! Utility macros for the front-end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a lexer handler that emits the matched text as one token
//!
//! These macros reduce boilerplate in the lexer's rule table.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for rules whose whole match becomes the lexeme.
///
/// The generated handler pushes a token of `$kind` spanning the matched text
/// and advances the lexer past it.
///
/// # Example
///
/// ```ignore
/// RegexPattern::new(r"^\b\d+\b", MK_DEFAULT_HANDLER!(TokenKind::Integer))
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer<'_>, matched: &str| {
            let span = lexer.span_of(matched.len());
            lexer.push(MK_TOKEN!($kind, String::from(matched), span));
            lexer.advance_n(matched.len());
        }
    };
}
