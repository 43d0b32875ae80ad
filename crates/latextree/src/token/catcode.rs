//! Category codes and the fixed character table that assigns them.
use CatCode::*;

/// Enum representing the 16 category codes of TeX plus one internal code.
///
/// Each variant's documentation contains an example character which is mapped to that category code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum CatCode {
    /// Marks the beginning of a control sequence.
    /// Example: `\`.
    ///
    /// Tokens with this code carry the control sequence name, not the escape character.
    Escape = 0,
    /// Begins a new group.
    /// Example: `{`.
    BeginGroup = 1,
    /// Ends an existing new group.
    /// Example: `}`.
    EndGroup = 2,
    /// Starts or ends math mode.
    /// Example: `$`.
    MathShift = 3,
    /// Used in tables to align cells.
    /// Example: `&`.
    AlignmentTab = 4,
    /// Marks a new line in the input.
    /// Example: `\n`.
    ///
    /// Two of these separated only by [Space] characters form a paragraph break.
    /// This code also terminates a comment.
    EndOfLine = 5,
    /// Marks the beginning of a parameter number in a macro body.
    /// Example: `#`.
    Parameter = 6,
    /// Puts following character or group in a superscript.
    /// Example: `^`.
    Superscript = 7,
    /// Puts following character or group in a subscript.
    /// Example: `_`.
    Subscript = 8,
    /// Character that is dropped by the parser.
    /// Example: ASCII null (0).
    Ignored = 9,
    /// Whitespace. Example: ` `.
    Space = 10,
    /// A character that can be used as a control word name.
    /// Examples: `[a-zA-z]`.
    Letter = 11,
    /// A printable character that cannot be used as a control word name.
    /// Example: `@`.
    #[default]
    Other = 12,
    /// A single character that behaves like a control sequence.
    /// Example: `~`.
    Active = 13,
    /// Marks the beginning of a comment.
    /// All characters until the next [EndOfLine] belong to the comment.
    /// Example: `%`.
    Comment = 14,
    /// An invalid character.
    /// Example: ASCII delete (127).
    ///
    /// The end-of-input sentinel also has this code.
    Invalid = 15,
    /// Whitespace that followed a control sequence.
    ///
    /// TeX discards this whitespace; it is kept here so that the source can be reconstructed.
    IgnoredSpace = 16,
}

impl TryFrom<u8> for CatCode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Escape),
            1 => Ok(BeginGroup),
            2 => Ok(EndGroup),
            3 => Ok(MathShift),
            4 => Ok(AlignmentTab),
            5 => Ok(EndOfLine),
            6 => Ok(Parameter),
            7 => Ok(Superscript),
            8 => Ok(Subscript),
            9 => Ok(Ignored),
            10 => Ok(Space),
            11 => Ok(Letter),
            12 => Ok(Other),
            13 => Ok(Active),
            14 => Ok(Comment),
            15 => Ok(Invalid),
            16 => Ok(IgnoredSpace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} ({})", self, *self as u8)?;
        Ok(())
    }
}

impl CatCode {
    /// Returns the category code of a character outside of a control sequence.
    ///
    /// The table is fixed: there is no `\catcode` primitive.
    pub fn of(c: char) -> CatCode {
        match c {
            '\\' => Escape,
            '{' => BeginGroup,
            '}' => EndGroup,
            '$' => MathShift,
            '&' => AlignmentTab,
            '\n' => EndOfLine,
            '#' => Parameter,
            '^' => Superscript,
            '_' => Subscript,
            '\0' => Ignored,
            '~' => Active,
            '%' => Comment,
            '\x7f' => Invalid,
            c if c.is_whitespace() => Space,
            c if c.is_alphabetic() => Letter,
            _ => Other,
        }
    }

    /// Whether tokens with this code are accumulated into text by the parser.
    pub fn is_printable(&self) -> bool {
        matches!(self, Space | Letter | Other | IgnoredSpace)
    }

    /// Whether tokens with this code hold whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Space | EndOfLine | IgnoredSpace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! catcode_tests {
        ($( ($name: ident, $c: expr, $expected: expr),)+) => {
            $(
            #[test]
            fn $name() {
                assert_eq!(CatCode::of($c), $expected);
            }
            )+
        };
    }

    catcode_tests![
        (escape, '\\', Escape),
        (begin_group, '{', BeginGroup),
        (end_group, '}', EndGroup),
        (math_shift, '$', MathShift),
        (alignment_tab, '&', AlignmentTab),
        (end_of_line, '\n', EndOfLine),
        (parameter, '#', Parameter),
        (superscript, '^', Superscript),
        (subscript, '_', Subscript),
        (null, '\0', Ignored),
        (space, ' ', Space),
        (tab, '\t', Space),
        (letter, 'q', Letter),
        (non_ascii_letter, 'ŵ', Letter),
        (digit, '7', Other),
        (punctuation, '!', Other),
        (tilde, '~', Active),
        (comment, '%', Comment),
        (delete, '\x7f', Invalid),
    ];

    #[test]
    fn try_from_round_trip() {
        for i in 0..17_u8 {
            let cat_code = CatCode::try_from(i).unwrap();
            assert_eq!(cat_code as u8, i);
        }
        assert_eq!(CatCode::try_from(17), Err(()));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Letter), "Letter (11)");
    }
}
