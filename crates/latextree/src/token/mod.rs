//! LaTeX tokens and category codes.

mod catcode;
pub mod lexer;
pub mod stream;
pub use catcode::CatCode;
pub use lexer::tokenize;
pub use stream::TokenStream;

/// A LaTeX token.
///
/// For control sequences the value is the control sequence name without the escape character.
/// For every other category code the value is the literal source text,
///     which is a single character except for [CatCode::IgnoredSpace] tokens.
///
/// Two tokens are equal if their category codes and values are equal;
///     the source position is ignored.
#[derive(Debug, Eq, Clone)]
pub struct Token {
    cat_code: CatCode,
    value: String,
    position: usize,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.cat_code == other.cat_code && self.value == other.value
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cat_code {
            CatCode::Escape => write![f, "\\{}", self.value],
            _ => write![f, "{}", self.value],
        }
    }
}

macro_rules! token_constructor {
    ($name: ident, $cat_code: expr) => {
        pub fn $name<S: Into<String>>(value: S) -> Token {
            Token {
                cat_code: $cat_code,
                value: value.into(),
                position: 0,
            }
        }
    };
}

impl Token {
    token_constructor!(new_control_sequence, CatCode::Escape);
    token_constructor!(new_begin_group, CatCode::BeginGroup);
    token_constructor!(new_end_group, CatCode::EndGroup);
    token_constructor!(new_math_shift, CatCode::MathShift);
    token_constructor!(new_alignment_tab, CatCode::AlignmentTab);
    token_constructor!(new_end_of_line, CatCode::EndOfLine);
    token_constructor!(new_parameter, CatCode::Parameter);
    token_constructor!(new_space, CatCode::Space);
    token_constructor!(new_letter, CatCode::Letter);
    token_constructor!(new_other, CatCode::Other);
    token_constructor!(new_active_character, CatCode::Active);
    token_constructor!(new_ignored_space, CatCode::IgnoredSpace);

    pub fn new<S: Into<String>>(cat_code: CatCode, value: S, position: usize) -> Token {
        Token {
            cat_code,
            value: value.into(),
            position,
        }
    }

    /// The sentinel token placed at the end of every tokenized input.
    pub fn end_of_input() -> Token {
        Token {
            cat_code: CatCode::Invalid,
            value: String::new(),
            position: 0,
        }
    }

    #[inline]
    pub fn cat_code(&self) -> CatCode {
        self.cat_code
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte offset of the token in the text it was read from.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_end_of_input(&self) -> bool {
        self.cat_code == CatCode::Invalid && self.value.is_empty()
    }

    /// Returns true if this is the control sequence with the given name.
    pub fn is_control_sequence(&self, name: &str) -> bool {
        self.cat_code == CatCode::Escape && self.value == name
    }

    /// Returns the control sequence name, if this is a control sequence token.
    pub fn control_sequence_name(&self) -> Option<&str> {
        match self.cat_code {
            CatCode::Escape => Some(&self.value),
            _ => None,
        }
    }

    /// Returns true if this is an other token holding the given character.
    pub fn is_other(&self, c: char) -> bool {
        self.cat_code == CatCode::Other && self.value.len() == c.len_utf8() && self.value.starts_with(c)
    }
}
