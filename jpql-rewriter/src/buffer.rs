use crate::token::{Token, Trailing};

/// An ordered sequence of [`Token`]s produced by one visit.
///
/// Buffers are never shared: each walker visit method returns its own
/// buffer, which the caller appends into its own.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn extend(&mut self, other: TokenBuffer) {
        self.tokens.extend(other.tokens);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

/// `clip`: if non-empty, drops the last token.
pub fn clip(buf: &mut TokenBuffer) {
    buf.tokens.pop();
}

/// `nospace`: if non-empty, sets the last token's trailing to `NoSpace`.
pub fn nospace(buf: &mut TokenBuffer) {
    if let Some(last) = buf.tokens.last_mut() {
        last.trailing = Trailing::NoSpace;
    }
}

/// `space`: if non-empty, sets the last token's trailing to `Space`.
pub fn space(buf: &mut TokenBuffer) {
    if let Some(last) = buf.tokens.last_mut() {
        last.trailing = Trailing::Space;
    }
}

/// Forces every token currently in `buf` to `NoSpace`, then restores `Space`
/// on the last one. This is the whitespace rule shared by every path-style
/// production.
pub fn close_path_run(buf: &mut TokenBuffer, run_start: usize) {
    for token in buf.tokens[run_start..].iter_mut() {
        token.trailing = Trailing::NoSpace;
    }
    space(buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NodeKind;

    #[test]
    fn clip_drops_last_token_only() {
        let mut buf = TokenBuffer::new();
        buf.push(Token::literal("a", NodeKind::Generic, Trailing::Space));
        buf.push(Token::literal(",", NodeKind::Punctuation, Trailing::Space));
        clip(&mut buf);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn clip_on_empty_buffer_is_a_no_op() {
        let mut buf = TokenBuffer::new();
        clip(&mut buf);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn close_path_run_sets_nospace_then_restores_space_on_last() {
        let mut buf = TokenBuffer::new();
        buf.push(Token::literal("a", NodeKind::Path, Trailing::Space));
        buf.push(Token::literal(".", NodeKind::Path, Trailing::Space));
        buf.push(Token::literal("b", NodeKind::Path, Trailing::Space));
        close_path_run(&mut buf, 0);
        let tokens = buf.as_slice();
        assert_eq!(tokens[0].trailing, Trailing::NoSpace);
        assert_eq!(tokens[1].trailing, Trailing::NoSpace);
        assert_eq!(tokens[2].trailing, Trailing::Space);
    }
}
