//! The highlight adapter
//!
//! Converts a flat token sequence (and optionally a parse tree) into range
//! highlights, in a fixed sequence: clear → tokenize → classify tokens →
//! paint ranges → parse → highlight tree nodes.
//!
//! Languages implement [`Highlighter`]; the hooks default to no-ops so a
//! minimal language only supplies `tokenize` and `classify`.

use crate::attrs::{merge_keys, StyleKey};
use crate::markup::{HighlightLayer, MarkupModel};
use crate::scheme::ColorScheme;
use crate::token::{Token, TokenStream, TokenType};
use crate::tree::ParseNode;

/// Explicit collaborator handles for one highlight pass: the scheme that
/// resolves style keys and the markup model that stores the output.
pub struct HighlightContext<'a> {
    pub scheme: &'a ColorScheme,
    pub markup: &'a mut MarkupModel,
}

impl<'a> HighlightContext<'a> {
    pub fn new(scheme: &'a ColorScheme, markup: &'a mut MarkupModel) -> Self {
        Self { scheme, markup }
    }
}

/// Capability set for one language/grammar.
///
/// `tokenize` must be total: it always terminates and always returns a
/// stream ending in the EOF sentinel, degrading to error tokens on
/// malformed input rather than panicking. Highlighting must never take
/// down the editing session.
pub trait Highlighter {
    /// Produce a token stream covering all input characters.
    /// Characters not covered by any token simply won't be highlighted.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Map a token type to its style keys.
    ///
    /// `None` is the "no highlighting" sentinel: checked, nothing to paint.
    fn classify(&self, ty: TokenType) -> Option<&[StyleKey]>;

    /// Classify one token occurrence with access to its neighbors.
    ///
    /// Override for limited context-sensitive decisions (the token before or
    /// after this one). Anything deeper belongs in [`Highlighter::highlight_tree`].
    fn classify_at(&self, tokens: &TokenStream, index: usize) -> Option<&[StyleKey]> {
        tokens.get(index).and_then(|t| self.classify(t.ty))
    }

    /// Whether tokens of this type belong to an embedded sub-language
    fn is_embedded(&self, _ty: TokenType) -> bool {
        false
    }

    /// Parse the token stream into a tree. `None` skips tree highlighting.
    fn parse(&self, _tokens: &TokenStream) -> Option<ParseNode> {
        None
    }

    /// Hook for embedded-language tokens. Concrete adapters re-invoke
    /// [`highlight_span`] with the sub-text and a shifted base offset.
    fn highlight_embedded(
        &self,
        _token: &Token,
        _text: &str,
        _base: usize,
        _ctx: &mut HighlightContext<'_>,
    ) {
    }

    /// Hook for grammar-aware highlighting, called with the parse tree.
    /// Implementations paint on [`HighlightLayer::AdditionalSyntax`] so
    /// their ranges win over token-level ones.
    fn highlight_tree(
        &self,
        _tree: &ParseNode,
        _tokens: &TokenStream,
        _base: usize,
        _ctx: &mut HighlightContext<'_>,
    ) {
    }
}

/// Full highlight pass over a document.
///
/// Clears every previously registered range, then runs the span pass at
/// base offset 0. Running this twice over unchanged text yields the same
/// final range set.
pub fn highlight_document<H: Highlighter + ?Sized>(
    highlighter: &H,
    text: &str,
    ctx: &mut HighlightContext<'_>,
) {
    ctx.markup.clear_all();
    highlight_span(highlighter, text, 0, ctx);
}

/// Highlight pass over a text span whose token offsets are relative to
/// `base`. Used for embedded languages; never clears prior ranges, since
/// embedded output layers on top of an already-highlighted host document.
pub fn highlight_span<H: Highlighter + ?Sized>(
    highlighter: &H,
    text: &str,
    base: usize,
    ctx: &mut HighlightContext<'_>,
) {
    let tokens = highlighter.tokenize(text);
    tracing::debug!(tokens = tokens.len(), base, "highlighting span");

    for (i, token) in tokens.iter().enumerate() {
        if token.is_eof() {
            continue;
        }
        if highlighter.is_embedded(token.ty) {
            highlighter.highlight_embedded(token, text, base, ctx);
        } else if let Some(keys) = highlighter.classify_at(&tokens, i) {
            let attrs = merge_keys(ctx.scheme, keys);
            ctx.markup.add_range(
                base + token.start,
                base + token.stop + 1,
                HighlightLayer::Syntax,
                attrs,
            );
        }
    }

    if let Some(tree) = highlighter.parse(&tokens) {
        highlighter.highlight_tree(&tree, &tokens, base, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TOKEN_EOF;

    const WORD: TokenType = 1;
    const GAP: TokenType = 2;

    /// Splits on spaces; words are WORD, single spaces are GAP
    struct WordHighlighter;

    impl Highlighter for WordHighlighter {
        fn tokenize(&self, text: &str) -> TokenStream {
            let mut tokens = Vec::new();
            let mut start = None;
            for (i, c) in text.char_indices() {
                if c == ' ' {
                    if let Some(s) = start.take() {
                        tokens.push(Token::new(WORD, s, i - 1));
                    }
                    tokens.push(Token::new(GAP, i, i));
                } else if start.is_none() {
                    start = Some(i);
                }
            }
            if let Some(s) = start {
                tokens.push(Token::new(WORD, s, text.len() - 1));
            }
            TokenStream::terminated(tokens, text.len())
        }

        fn classify(&self, ty: TokenType) -> Option<&[StyleKey]> {
            match ty {
                WORD => Some(&["identifier"]),
                _ => None,
            }
        }
    }

    #[test]
    fn test_one_range_per_classified_token() {
        let scheme = ColorScheme::empty("test");
        let mut markup = MarkupModel::new();
        let mut ctx = HighlightContext::new(&scheme, &mut markup);

        highlight_document(&WordHighlighter, "ab cd", &mut ctx);

        let ranges = markup.ranges();
        assert_eq!(ranges.len(), 2);
        assert_eq!((ranges[0].start, ranges[0].end), (0, 2));
        assert_eq!((ranges[1].start, ranges[1].end), (3, 5));
    }

    #[test]
    fn test_eof_emits_nothing() {
        let scheme = ColorScheme::empty("test");
        let mut markup = MarkupModel::new();
        let mut ctx = HighlightContext::new(&scheme, &mut markup);

        highlight_document(&WordHighlighter, "", &mut ctx);
        assert!(markup.is_empty());
    }

    #[test]
    fn test_span_pass_shifts_by_base() {
        let scheme = ColorScheme::empty("test");
        let mut markup = MarkupModel::new();
        let mut ctx = HighlightContext::new(&scheme, &mut markup);

        highlight_span(&WordHighlighter, "ab", 10, &mut ctx);

        let ranges = markup.ranges();
        assert_eq!((ranges[0].start, ranges[0].end), (10, 12));
    }

    #[test]
    fn test_span_pass_does_not_clear() {
        let scheme = ColorScheme::empty("test");
        let mut markup = MarkupModel::new();
        markup.add_range(
            0,
            1,
            HighlightLayer::Syntax,
            crate::attrs::TextAttributes::default(),
        );

        let mut ctx = HighlightContext::new(&scheme, &mut markup);
        highlight_span(&WordHighlighter, "ab", 10, &mut ctx);
        assert_eq!(markup.len(), 2);
    }

    #[test]
    fn test_full_pass_replaces_prior_ranges() {
        let scheme = ColorScheme::empty("test");
        let mut markup = MarkupModel::new();

        let mut ctx = HighlightContext::new(&scheme, &mut markup);
        highlight_document(&WordHighlighter, "ab cd", &mut ctx);
        let first: Vec<_> = markup.ranges().to_vec();

        let mut ctx = HighlightContext::new(&scheme, &mut markup);
        highlight_document(&WordHighlighter, "ab cd", &mut ctx);
        assert_eq!(markup.ranges(), first.as_slice());
    }

    #[test]
    fn test_default_classify_at_delegates() {
        let h = WordHighlighter;
        let tokens = h.tokenize("ab");
        assert_eq!(h.classify_at(&tokens, 0), Some(&["identifier"][..]));
        assert_eq!(h.classify_at(&tokens, 1), None); // EOF
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let h = WordHighlighter;
        let tokens = h.tokenize("ab");
        assert!(h.parse(&tokens).is_none());
        assert!(!h.is_embedded(WORD));
        assert!(!h.is_embedded(TOKEN_EOF));
    }
}
