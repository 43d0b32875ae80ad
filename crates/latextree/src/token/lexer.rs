//! The lexer, which converts source text into category-coded tokens.
//!
//! The lexer makes a single left-to-right pass with no backtracking and never fails:
//!     every character is representable as some token.
//! Category codes are fixed, so unlike in TeX the whole input can be lexed up front.
//!
//! Whitespace following a control sequence is not discarded.
//! It is emitted as a single [CatCode::IgnoredSpace] token so that the parser can record it
//!     and reproduce it exactly when the tree is converted back to source.

use crate::token::{CatCode, Token, TokenStream};
use std::iter::Peekable;
use std::str::CharIndices;

/// Tokenizes the input and returns a stream that ends in the end-of-input sentinel.
pub fn tokenize(source: &str) -> TokenStream {
    let mut tokens = lex(source);
    tokens.push(Token::end_of_input());
    TokenStream::new(tokens)
}

/// Tokenizes the input without appending the end-of-input sentinel.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    while let Some((position, c)) = chars.next() {
        let cat_code = CatCode::of(c);
        if cat_code != CatCode::Escape {
            tokens.push(Token::new(cat_code, c, position));
            continue;
        }
        let name = match read_control_sequence_name(&mut chars) {
            None => {
                // a backslash at the very end of the input
                tokens.push(Token::new(CatCode::Other, c, position));
                continue;
            }
            Some(name) => name,
        };
        tokens.push(Token::new(CatCode::Escape, name, position));
        let mut whitespace = String::new();
        let mut whitespace_position = None;
        while let Some((p, w)) = chars.next_if(|(_, w)| w.is_whitespace()) {
            whitespace_position.get_or_insert(p);
            whitespace.push(w);
        }
        if let Some(p) = whitespace_position {
            tokens.push(Token::new(CatCode::IgnoredSpace, whitespace, p));
        }
    }
    tokens
}

fn read_control_sequence_name(chars: &mut Peekable<CharIndices>) -> Option<String> {
    let (_, first) = chars.next()?;
    let mut name = String::from(first);
    if first.is_alphabetic() {
        while let Some((_, c)) = chars.next_if(|(_, c)| c.is_alphabetic()) {
            name.push(c);
        }
    }
    Some(name)
}
