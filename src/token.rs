//! Token stream model
//!
//! Tokens carry an integer type tag and zero-based inclusive start/stop byte
//! offsets, relative to the text handed to the tokenizer. A stream is always
//! terminated by exactly one end-of-input sentinel token.

/// Integer tag identifying a token kind within one language
pub type TokenType = u16;

/// Type tag reserved for the end-of-input sentinel.
/// Languages number their own token kinds from 1.
pub const TOKEN_EOF: TokenType = 0;

/// Smallest lexical unit: a type tag plus an offset span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Token type tag
    pub ty: TokenType,
    /// Start offset (inclusive)
    pub start: usize,
    /// Stop offset (inclusive)
    pub stop: usize,
}

impl Token {
    pub fn new(ty: TokenType, start: usize, stop: usize) -> Self {
        Self { ty, start, stop }
    }

    /// End-of-input sentinel positioned at `text_len`.
    /// The sentinel carries no span; it is never painted.
    pub fn eof(text_len: usize) -> Self {
        Self {
            ty: TOKEN_EOF,
            start: text_len,
            stop: text_len,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.ty == TOKEN_EOF
    }
}

/// Random-accessible token sequence terminated by the EOF sentinel.
///
/// Construction guarantees the terminator, so `len()` is always at least 1
/// and the last token is always EOF.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Build a stream from lexed tokens, appending the EOF sentinel at
    /// `text_len` if the lexer did not already emit one.
    pub fn terminated(mut tokens: Vec<Token>, text_len: usize) -> Self {
        if tokens.last().map_or(true, |t| !t.is_eof()) {
            tokens.push(Token::eof(text_len));
        }
        Self { tokens }
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens including the EOF sentinel
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: a stream holds at least the EOF sentinel
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminated_appends_eof() {
        let stream = TokenStream::terminated(vec![Token::new(1, 0, 2)], 3);
        assert_eq!(stream.len(), 2);
        assert!(stream.get(1).unwrap().is_eof());
        assert_eq!(stream.get(1).unwrap().start, 3);
    }

    #[test]
    fn test_terminated_keeps_existing_eof() {
        let stream = TokenStream::terminated(vec![Token::new(1, 0, 2), Token::eof(3)], 3);
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_lone_eof() {
        let stream = TokenStream::terminated(Vec::new(), 0);
        assert_eq!(stream.len(), 1);
        assert!(stream.get(0).unwrap().is_eof());
        assert!(!stream.is_empty());
    }

    #[test]
    fn test_eof_tag_is_reserved() {
        assert_eq!(TOKEN_EOF, 0);
        assert!(Token::new(1, 0, 0).ty != TOKEN_EOF);
    }
}
