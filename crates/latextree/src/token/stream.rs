//! A stack of tokens supporting lookahead and push-back.

use crate::token::Token;

/// A stream of tokens.
///
/// The tokens are stored in reverse order so that the next token is at the end of the vector,
///     which makes [pop](TokenStream::pop) and [push](TokenStream::push) O(1).
///
/// A stream produced by the lexer ends in the end-of-input sentinel.
/// [next_token](TokenStream::next_token) does not return the sentinel;
///     it stays in the stream so that every enclosing parse level sees the end of input,
///     and only the code that spliced a stream in removes it.
#[derive(Debug, Default, Clone)]
pub struct TokenStream {
    stack: Vec<Token>,
}

impl TokenStream {
    /// Creates a stream from tokens in source order.
    pub fn new(mut tokens: Vec<Token>) -> TokenStream {
        tokens.reverse();
        TokenStream { stack: tokens }
    }

    /// Removes and returns the next token, including the sentinel.
    pub fn pop(&mut self) -> Option<Token> {
        self.stack.pop()
    }

    /// Returns a token to the front of the stream.
    pub fn push(&mut self, token: Token) {
        self.stack.push(token)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.stack.last()
    }

    /// Removes and returns the next token unless the stream is exhausted.
    ///
    /// Returns [None] without consuming anything if the next token is the sentinel.
    pub fn next_token(&mut self) -> Option<Token> {
        match self.stack.last() {
            None => None,
            Some(token) if token.is_end_of_input() => None,
            Some(_) => self.stack.pop(),
        }
    }

    /// Returns the next token unless the stream is exhausted.
    pub fn peek_token(&self) -> Option<&Token> {
        self.stack.last().filter(|token| !token.is_end_of_input())
    }

    /// Removes the next token if it satisfies the predicate.
    pub fn next_if<F: FnOnce(&Token) -> bool>(&mut self, f: F) -> Option<Token> {
        match self.peek_token() {
            Some(token) if f(token) => self.stack.pop(),
            _ => None,
        }
    }

    /// Places all of the other stream's tokens, sentinel included, at the front of this stream.
    pub fn splice(&mut self, other: TokenStream) {
        self.stack.extend(other.stack)
    }

    /// Whether the next token is the sentinel or the stream is empty.
    pub fn is_exhausted(&self) -> bool {
        self.peek_token().is_none()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
