use crate::state::WalkerState;
use crate::token::{Token, Trailing};

/// Concatenates a token sequence into a string.
///
/// Filters out debug-only tokens, resolves each token's text against the
/// finished `state` (so [`crate::token::TokenText::Deferred`] tokens see the
/// final alias), appends a single space when a token's trailing policy is
/// `Space`, and trims trailing whitespace from the result.
pub fn render(tokens: &[Token], state: &WalkerState) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.debug_only {
            continue;
        }
        out.push_str(&token.text.resolve(state));
        if token.trailing == Trailing::Space {
            out.push(' ');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Debug-render variant: includes every token (debug-only
/// ones too), prefixes a newline when `line_break` is set, and appends a
/// bracketed `[NodeKind]` tag after each token for diagnostic inspection.
pub fn render_debug(tokens: &[Token], state: &WalkerState) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.line_break {
            out.push('\n');
        }
        out.push_str(&token.text.resolve(state));
        out.push_str(&format!("[{:?}]", token.context));
        if token.trailing == Trailing::Space {
            out.push(' ');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NodeKind;

    #[test]
    fn render_trims_trailing_space() {
        let tokens = vec![
            Token::literal("select", NodeKind::Select, Trailing::Space),
            Token::literal("u", NodeKind::Path, Trailing::Space),
        ];
        assert_eq!(render(&tokens, &WalkerState::new()), "select u");
    }

    #[test]
    fn render_honours_nospace() {
        let tokens = vec![
            Token::literal("u", NodeKind::Path, Trailing::NoSpace),
            Token::literal(".", NodeKind::Path, Trailing::NoSpace),
            Token::literal("name", NodeKind::Path, Trailing::Space),
        ];
        assert_eq!(render(&tokens, &WalkerState::new()), "u.name");
    }

    #[test]
    fn render_skips_debug_only_tokens() {
        let tokens = vec![
            Token::literal("select", NodeKind::Select, Trailing::Space),
            Token::literal("DEBUG", NodeKind::Generic, Trailing::Space).debug(),
            Token::literal("u", NodeKind::Path, Trailing::Space),
        ];
        assert_eq!(render(&tokens, &WalkerState::new()), "select u");
    }

    #[test]
    fn render_resolves_deferred_tokens_against_final_state() {
        let mut state = WalkerState::new();
        state.capture_alias("u");
        let tokens = vec![Token::new(
            crate::token::TokenText::deferred(|s: &WalkerState| format!("{}.name", s.alias())),
            NodeKind::Sort,
            Trailing::Space,
        )];
        assert_eq!(render(&tokens, &state), "u.name");
    }
}
