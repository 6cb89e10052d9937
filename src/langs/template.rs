//! Template language highlighter
//!
//! A template is plain text with expression islands between a configurable
//! delimiter pair (default `<`...`>`). Island contents belong to the
//! embedded expression language: the embedded hook re-runs the span pass
//! over the island sub-text with a shifted base offset, layering its ranges
//! on top of the host document's.

use crate::highlighter::{highlight_span, HighlightContext, Highlighter};
use crate::langs::expr::ExprHighlighter;
use crate::token::{Token, TokenStream, TokenType};

pub const TEXT: TokenType = 1;
pub const LDELIM: TokenType = 2;
pub const RDELIM: TokenType = 3;
pub const EXPR: TokenType = 4;

const DELIM_KEYS: &[crate::attrs::StyleKey] = &["punctuation.special"];

/// Highlighter for templates with embedded expression islands
#[derive(Debug, Clone, Copy)]
pub struct TemplateHighlighter {
    delims: (char, char),
    expr: ExprHighlighter,
}

impl TemplateHighlighter {
    /// Template highlighter with the default `<`...`>` delimiters
    pub fn new() -> Self {
        Self::with_delimiters('<', '>')
    }

    /// Template highlighter with a custom delimiter pair, e.g. `$`...`$`
    pub fn with_delimiters(open: char, close: char) -> Self {
        Self {
            delims: (open, close),
            expr: ExprHighlighter::new(),
        }
    }
}

impl Default for TemplateHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for TemplateHighlighter {
    fn tokenize(&self, text: &str) -> TokenStream {
        let (open, close) = self.delims;
        let mut tokens = Vec::new();
        let mut chars = text.char_indices();
        let mut text_start: Option<usize> = None;

        while let Some((i, c)) = chars.next() {
            if c != open {
                if text_start.is_none() {
                    text_start = Some(i);
                }
                continue;
            }

            if let Some(s) = text_start.take() {
                tokens.push(Token::new(TEXT, s, i - 1));
            }
            tokens.push(Token::new(LDELIM, i, i + open.len_utf8() - 1));

            let island_start = i + open.len_utf8();
            let mut closing: Option<(usize, usize)> = None;
            for (j, d) in chars.by_ref() {
                if d == close {
                    closing = Some((j, j + close.len_utf8() - 1));
                    break;
                }
            }
            match closing {
                Some((j, stop)) => {
                    if j > island_start {
                        tokens.push(Token::new(EXPR, island_start, j - 1));
                    }
                    tokens.push(Token::new(RDELIM, j, stop));
                }
                // Unterminated island: the rest of the input is treated as
                // expression text so highlighting still degrades gracefully
                None => {
                    if text.len() > island_start {
                        tokens.push(Token::new(EXPR, island_start, text.len() - 1));
                    }
                }
            }
        }

        if let Some(s) = text_start {
            tokens.push(Token::new(TEXT, s, text.len() - 1));
        }

        TokenStream::terminated(tokens, text.len())
    }

    fn classify(&self, ty: TokenType) -> Option<&[crate::attrs::StyleKey]> {
        match ty {
            LDELIM | RDELIM => Some(DELIM_KEYS),
            // Plain template text is left unhighlighted on purpose
            _ => None,
        }
    }

    fn is_embedded(&self, ty: TokenType) -> bool {
        ty == EXPR
    }

    fn highlight_embedded(
        &self,
        token: &Token,
        text: &str,
        base: usize,
        ctx: &mut HighlightContext<'_>,
    ) {
        let island = &text[token.start..=token.stop];
        highlight_span(&self.expr, island, base + token.start, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TOKEN_EOF;

    fn types(text: &str) -> Vec<TokenType> {
        TemplateHighlighter::new()
            .tokenize(text)
            .iter()
            .map(|t| t.ty)
            .collect()
    }

    #[test]
    fn test_tokenize_text_and_island() {
        assert_eq!(
            types("hi <name>!"),
            vec![TEXT, LDELIM, EXPR, RDELIM, TEXT, TOKEN_EOF]
        );
    }

    #[test]
    fn test_tokenize_empty_island_has_no_expr() {
        assert_eq!(types("a<>b"), vec![TEXT, LDELIM, RDELIM, TEXT, TOKEN_EOF]);
    }

    #[test]
    fn test_tokenize_unterminated_island() {
        assert_eq!(types("a<name"), vec![TEXT, LDELIM, EXPR, TOKEN_EOF]);
    }

    #[test]
    fn test_tokenize_trailing_open_delim() {
        assert_eq!(types("a<"), vec![TEXT, LDELIM, TOKEN_EOF]);
    }

    #[test]
    fn test_tokenize_custom_delimiters() {
        let h = TemplateHighlighter::with_delimiters('$', '$');
        let tys: Vec<_> = h.tokenize("a $x$ b").iter().map(|t| t.ty).collect();
        assert_eq!(tys, vec![TEXT, LDELIM, EXPR, RDELIM, TEXT, TOKEN_EOF]);
    }

    #[test]
    fn test_island_offsets_are_relative_to_template() {
        let tokens = TemplateHighlighter::new().tokenize("hi <name>");
        let expr = tokens.iter().find(|t| t.ty == EXPR).unwrap();
        assert_eq!((expr.start, expr.stop), (4, 7));
    }

    #[test]
    fn test_embedded_marker() {
        let h = TemplateHighlighter::new();
        assert!(h.is_embedded(EXPR));
        assert!(!h.is_embedded(TEXT));
        assert!(!h.is_embedded(LDELIM));
    }
}
