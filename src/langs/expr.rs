//! Expression sub-language highlighter
//!
//! Highlights the expression islands inside templates: identifiers,
//! property chains, calls, literals and punctuation. Exercises the two
//! override points beyond plain classification:
//!
//! - `classify_at`: an identifier preceded by `.` classifies as a property
//! - `parse`/`highlight_tree`: call targets (`name(...)`) are repainted as
//!   functions on the additional-syntax layer

use crate::attrs::{merge_keys, StyleKey};
use crate::highlighter::{HighlightContext, Highlighter};
use crate::markup::HighlightLayer;
use crate::token::{Token, TokenStream, TokenType};
use crate::tree::ParseNode;

pub const IDENT: TokenType = 1;
pub const KEYWORD: TokenType = 2;
pub const BOOLEAN: TokenType = 3;
pub const NUMBER: TokenType = 4;
pub const STRING: TokenType = 5;
pub const LPAREN: TokenType = 6;
pub const RPAREN: TokenType = 7;
pub const DOT: TokenType = 8;
pub const COMMA: TokenType = 9;
pub const COLON: TokenType = 10;
pub const EQUALS: TokenType = 11;
pub const OPERATOR: TokenType = 12;
pub const WS: TokenType = 13;
pub const ERRCHAR: TokenType = 14;

const KEYWORDS: &[&str] = &["if", "elseif", "else", "endif"];

const IDENT_KEYS: &[StyleKey] = &["identifier"];
const KEYWORD_KEYS: &[StyleKey] = &["keyword"];
const BOOLEAN_KEYS: &[StyleKey] = &["constant.builtin"];
const NUMBER_KEYS: &[StyleKey] = &["number"];
const STRING_KEYS: &[StyleKey] = &["string"];
const BRACKET_KEYS: &[StyleKey] = &["punctuation.bracket"];
const DELIMITER_KEYS: &[StyleKey] = &["punctuation.delimiter"];
const OPERATOR_KEYS: &[StyleKey] = &["operator"];
const ERROR_KEYS: &[StyleKey] = &["error"];
const PROPERTY_KEYS: &[StyleKey] = &["property"];
const FUNCTION_KEYS: &[StyleKey] = &["function"];

/// Highlighter for the expression sub-language
#[derive(Debug, Default, Clone, Copy)]
pub struct ExprHighlighter;

impl ExprHighlighter {
    pub fn new() -> Self {
        Self
    }
}

/// Walk backwards to the nearest non-whitespace token before `index`
fn previous_solid(tokens: &TokenStream, index: usize) -> Option<&Token> {
    tokens.tokens()[..index]
        .iter()
        .rev()
        .find(|t| t.ty != WS)
}

/// Walk forwards to the nearest non-whitespace token after `index`,
/// returning its stream index
fn next_solid(tokens: &TokenStream, index: usize) -> Option<usize> {
    (index + 1..tokens.len()).find(|&j| tokens.get(j).map_or(false, |t| t.ty != WS))
}

impl Highlighter for ExprHighlighter {
    fn tokenize(&self, text: &str) -> TokenStream {
        let mut tokens = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c.is_whitespace() {
                let mut stop = i + c.len_utf8() - 1;
                while let Some(&(j, d)) = chars.peek() {
                    if !d.is_whitespace() {
                        break;
                    }
                    stop = j + d.len_utf8() - 1;
                    chars.next();
                }
                tokens.push(Token::new(WS, i, stop));
            } else if c == '"' {
                // String literal; an unterminated one runs to end of input
                let mut stop = i;
                let mut escaped = false;
                for (j, d) in chars.by_ref() {
                    stop = j + d.len_utf8() - 1;
                    if escaped {
                        escaped = false;
                    } else if d == '\\' {
                        escaped = true;
                    } else if d == '"' {
                        break;
                    }
                }
                tokens.push(Token::new(STRING, i, stop));
            } else if c.is_ascii_digit() {
                let mut stop = i;
                while let Some(&(j, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    stop = j;
                    chars.next();
                }
                tokens.push(Token::new(NUMBER, i, stop));
            } else if c.is_alphabetic() || c == '_' {
                let mut stop = i + c.len_utf8() - 1;
                while let Some(&(j, d)) = chars.peek() {
                    if !d.is_alphanumeric() && d != '_' {
                        break;
                    }
                    stop = j + d.len_utf8() - 1;
                    chars.next();
                }
                let word = &text[i..=stop];
                let ty = if KEYWORDS.contains(&word) {
                    KEYWORD
                } else if word == "true" || word == "false" {
                    BOOLEAN
                } else {
                    IDENT
                };
                tokens.push(Token::new(ty, i, stop));
            } else {
                let ty = match c {
                    '(' => LPAREN,
                    ')' => RPAREN,
                    '.' => DOT,
                    ',' => COMMA,
                    ':' => COLON,
                    '=' => EQUALS,
                    '+' | '-' | '*' | '/' | '!' | '%' | '&' | '|' | '<' | '>' => OPERATOR,
                    _ => ERRCHAR,
                };
                tokens.push(Token::new(ty, i, i + c.len_utf8() - 1));
            }
        }

        TokenStream::terminated(tokens, text.len())
    }

    fn classify(&self, ty: TokenType) -> Option<&[StyleKey]> {
        match ty {
            IDENT => Some(IDENT_KEYS),
            KEYWORD => Some(KEYWORD_KEYS),
            BOOLEAN => Some(BOOLEAN_KEYS),
            NUMBER => Some(NUMBER_KEYS),
            STRING => Some(STRING_KEYS),
            LPAREN | RPAREN => Some(BRACKET_KEYS),
            DOT | COMMA | COLON => Some(DELIMITER_KEYS),
            EQUALS | OPERATOR => Some(OPERATOR_KEYS),
            ERRCHAR => Some(ERROR_KEYS),
            _ => None,
        }
    }

    fn classify_at(&self, tokens: &TokenStream, index: usize) -> Option<&[StyleKey]> {
        let token = tokens.get(index)?;
        if token.ty == IDENT {
            if let Some(prev) = previous_solid(tokens, index) {
                if prev.ty == DOT {
                    return Some(PROPERTY_KEYS);
                }
            }
        }
        self.classify(token.ty)
    }

    /// Builds a flat tree of call expressions: every identifier directly
    /// followed by `(` becomes a "call" node spanning up to its matching `)`.
    fn parse(&self, tokens: &TokenStream) -> Option<ParseNode> {
        if tokens.len() <= 1 {
            return None;
        }
        let mut root = ParseNode::new("expr", 0, tokens.len() - 2);
        for (i, token) in tokens.iter().enumerate() {
            if token.ty != IDENT {
                continue;
            }
            let Some(j) = next_solid(tokens, i) else {
                continue;
            };
            if tokens.get(j).map_or(true, |t| t.ty != LPAREN) {
                continue;
            }
            // Find the matching close paren; an unbalanced call just spans
            // to the open paren
            let mut depth = 1usize;
            let mut last = j;
            for (k, t) in tokens.iter().enumerate().skip(j + 1) {
                match t.ty {
                    LPAREN => depth += 1,
                    RPAREN => {
                        depth -= 1;
                        if depth == 0 {
                            last = k;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            root.children.push(ParseNode::new("call", i, last));
        }
        Some(root)
    }

    fn highlight_tree(
        &self,
        tree: &ParseNode,
        tokens: &TokenStream,
        base: usize,
        ctx: &mut HighlightContext<'_>,
    ) {
        tree.walk(&mut |node| {
            if node.rule != "call" {
                return;
            }
            if let Some(target) = tokens.get(node.first_token) {
                let attrs = merge_keys(ctx.scheme, FUNCTION_KEYS);
                ctx.markup.add_range(
                    base + target.start,
                    base + target.stop + 1,
                    HighlightLayer::AdditionalSyntax,
                    attrs,
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(text: &str) -> Vec<TokenType> {
        ExprHighlighter
            .tokenize(text)
            .iter()
            .map(|t| t.ty)
            .collect()
    }

    #[test]
    fn test_tokenize_basics() {
        use crate::token::TOKEN_EOF;
        assert_eq!(
            types("user.name"),
            vec![IDENT, DOT, IDENT, TOKEN_EOF]
        );
        assert_eq!(
            types("f(1, \"x\")"),
            vec![IDENT, LPAREN, NUMBER, COMMA, WS, STRING, RPAREN, TOKEN_EOF]
        );
    }

    #[test]
    fn test_tokenize_keywords_and_booleans() {
        assert_eq!(types("if"), vec![KEYWORD, crate::token::TOKEN_EOF]);
        assert_eq!(types("true"), vec![BOOLEAN, crate::token::TOKEN_EOF]);
        assert_eq!(types("iffy"), vec![IDENT, crate::token::TOKEN_EOF]);
    }

    #[test]
    fn test_tokenize_unterminated_string_runs_to_end() {
        let tokens = ExprHighlighter.tokenize("\"abc");
        assert_eq!(tokens.get(0).unwrap().ty, STRING);
        assert_eq!(tokens.get(0).unwrap().stop, 3);
        assert!(tokens.get(1).unwrap().is_eof());
    }

    #[test]
    fn test_tokenize_string_escapes() {
        let tokens = ExprHighlighter.tokenize(r#""a\"b" x"#);
        assert_eq!(tokens.get(0).unwrap().ty, STRING);
        assert_eq!(tokens.get(0).unwrap().stop, 5);
    }

    #[test]
    fn test_tokenize_garbage_degrades_to_error_tokens() {
        let tokens = ExprHighlighter.tokenize("a # b");
        let tys: Vec<_> = tokens.iter().map(|t| t.ty).collect();
        assert!(tys.contains(&ERRCHAR));
        assert!(tokens.get(tokens.len() - 1).unwrap().is_eof());
    }

    #[test]
    fn test_classify_at_property_after_dot() {
        let h = ExprHighlighter;
        let tokens = h.tokenize("user. name");
        // "name" at index 3 (IDENT DOT WS IDENT) follows a dot across whitespace
        assert_eq!(tokens.get(3).unwrap().ty, IDENT);
        assert_eq!(h.classify_at(&tokens, 3), Some(&["property"][..]));
        // leading "user" stays a plain identifier
        assert_eq!(h.classify_at(&tokens, 0), Some(&["identifier"][..]));
    }

    #[test]
    fn test_parse_finds_calls() {
        let h = ExprHighlighter;
        let tokens = h.tokenize("first(rest(names))");
        let tree = h.parse(&tokens).unwrap();
        let mut calls = Vec::new();
        tree.walk(&mut |n| {
            if n.rule == "call" {
                calls.push((n.first_token, n.last_token));
            }
        });
        // outer call spans to its matching close paren, not the first one
        assert_eq!(calls, vec![(0, 6), (2, 5)]);
    }

    #[test]
    fn test_parse_empty_input_returns_no_tree() {
        let h = ExprHighlighter;
        let tokens = h.tokenize("");
        assert!(h.parse(&tokens).is_none());
    }
}
