//! Minimal parse tree for grammar-aware highlighting
//!
//! The optional `parse` capability produces one of these; only the
//! tree-highlighting hook consumes it.

/// A parse tree node spanning a range of token indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode {
    /// Grammar rule that produced this node
    pub rule: &'static str,
    /// Index of the first token covered by this node (inclusive)
    pub first_token: usize,
    /// Index of the last token covered by this node (inclusive)
    pub last_token: usize,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn new(rule: &'static str, first_token: usize, last_token: usize) -> Self {
        Self {
            rule,
            first_token,
            last_token,
            children: Vec::new(),
        }
    }

    /// Visit this node and all descendants in pre-order
    pub fn walk(&self, visit: &mut impl FnMut(&ParseNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
