//! The built-in definition set
//!
//! This covers standard LaTeX together with the commands of a few common packages
//!     (graphicx, hyperref, lipsum) and bilingual English/Welsh documents.

use super::overlay::Definitions;
use latextree_stdext::collections::orderedmap::OrderedMap;

const COMMANDS: &[(&str, &[&str])] = &[
    (
        "Accent",
        &[
            "\"{char}", "'{char}", "`{char}", "^{char}", "~{char}", ".{char}", "={char}",
            "c{char}", "k{char}", "b{char}", "d{char}", "r{char}", "u{char}", "v{char}",
        ],
    ),
    ("Bibtex", &["bibliographystyle{style}"]),
    ("Box", &["fbox{contents}"]),
    ("Caption", &["caption[*][lst-entry]{caption_text}"]),
    (
        "FontStyle",
        &[
            "emph{text}",
            "textrm{text}",
            "textit{text}",
            "textbf{text}",
            "textsl{text}",
            "textsf{text}",
            "texttt{text}",
            "textsc{text}",
            "underline{text}",
        ],
    ),
    ("Footnote", &["footnote{text}", "mpfootnote{text}"]),
    (
        "Horizontal",
        &[" ", ",", "!", "quad", "qquad", "noindent", "mbox{contents}", "hfill"],
    ),
    ("Input", &["input{file}", "include{file}", "bibliography{bibtex_file}"]),
    ("Item", &["item[marker]", "bibitem[marker]{key}"]),
    ("Label", &["label{key}"]),
    (
        "Macro",
        &[
            "def{name}[numargs]{def}",
            "newcommand{name}[numargs][opt]{def}",
            "renewcommand{name}[numargs][opt]{def}",
            "providecommand{name}[numargs][opt]{def}",
            "newenvironment{name}[numargs]{begdef}{enddef}",
            "renewenvironment{name}[numargs]{begdef}{enddef}",
            "newtheorem{name}[numbered_like]{caption}[numbered_within]",
        ],
    ),
    ("Maths", &["[", "]", "(", ")"]),
    (
        "Misc",
        &[
            "addtocontents{file}{text}",
            "addcontentsline{file}{sec_unit}{entry}",
            "address{return_address}",
        ],
    ),
    (
        "Numeral",
        &[
            "arabic{counter}",
            "alph{counter}",
            "Alph{counter}",
            "roman{counter}",
            "Roman{counter}",
            "fnsymbol{counter}",
        ],
    ),
    (
        "Preamble",
        &[
            "title[short_title]{title}",
            "author{names}",
            "date{date}",
            "usepackage[options]{name}",
            "documentclass[options]{name}",
        ],
    ),
    (
        "Section",
        &[
            "chapter[*][short-title]{title}",
            "section[*][short-title]{title}",
            "subsection[*][short-title]{title}",
            "subsubsection[*][short-title]{title}",
            "paragraph[*][short-title]{title}",
            "subparagraph[*][short-title]{title}",
        ],
    ),
    ("Special", &["$", "&", "%", "{", "}", "_"]),
    (
        "Symbol",
        &["i", "j", "l", "o", "dag", "ddag", "S", "P", "copyright", "pounds"],
    ),
    ("Tabular", &["\\[*][length]"]),
    (
        "Vertical",
        &["par", "smallskip", "bigskip", "vspace[*]{length}"],
    ),
    ("Vspace", &["addvspace{length}", "bigskip"]),
    (
        "Xref",
        &["ref{key}", "cite[text]{key_list}", "pageref{key}", "eqref{key}"],
    ),
    (
        "Binotes",
        &[
            "includevideo[*][options]{url}",
            "bi",
            "cy",
            "en",
            "fr",
            "de",
            "eng{text}",
            "cym{text}",
            "wel{text}",
        ],
    ),
    (
        "Graphicx",
        &[
            "includegraphics[*][options]{file}",
            "graphicspath{paths}",
            "DeclareGraphicsExtensions{ext_list}",
        ],
    ),
    (
        "Hyperref",
        &[
            "autoref{key}",
            "nameref{key}",
            "hyperref[key]{text}",
            "url{url}",
            "href{url}{text}",
        ],
    ),
    ("Lipsum", &["lipsum[num]"]),
];

const ENVIRONMENTS: &[(&str, &[&str])] = &[
    ("Document", &["document"]),
    ("Tabular", &["tabular[pos]{cols}", "tabular*{width}[pos]{cols}"]),
    (
        "List",
        &[
            "list{label}{spacing}",
            "itemize[options]",
            "enumerate[options]",
            "description[options]",
            "trivlist",
            "thebibliography{widest_label}",
        ],
    ),
    (
        "Float",
        &["table[*][options]", "figure[*][options]", "video[*][options]"],
    ),
    (
        "Picture",
        &["picture[options]", "tikzpicture[options]", "pspicture[options]"],
    ),
    (
        "Displaymath",
        &[
            "displaymath",
            "equation[*]",
            "eqnarray[*]",
            "align[*]",
            "gather[*]",
        ],
    ),
    ("Verbatim", &["verbatim", "lstlisting"]),
    ("Align", &["center", "flushleft", "flushright"]),
    (
        "Box",
        &["abstract[options]", "quote[options]", "minipage{width}[options]"],
    ),
    ("Binotes", &["english", "cymraeg", "welsh"]),
];

const DECLARATIONS: &[(&str, &[&str])] = &[
    (
        "Counters",
        &[
            "newcounter{name}[master]",
            "addtocounter{counter}{value}",
            "setcounter{counter}{value}",
            "usecounter{counter}",
            "value{counter}",
            "counterwithin{name}{master}",
            "counterwithout{name}{master}",
        ],
    ),
    (
        "Length",
        &["addtolength{name}{len}", "baselineskip", "baselinestretch"],
    ),
    ("Alignment", &["centering", "raggedleft", "raggedright"]),
    (
        "FontStyle",
        &[
            "rm", "rmfamily", "sf", "sffamily", "bf", "bfseries", "it", "itshape", "sl",
            "slshape", "sc", "scshape", "tt", "ttshape", "em", "normalfont",
        ],
    ),
    (
        "FontSize",
        &[
            "tiny",
            "scriptsize",
            "footnotesize",
            "small",
            "normalsize",
            "large",
            "Large",
            "LARGE",
            "huge",
            "Huge",
        ],
    ),
    ("Language", &["bi", "cy", "en", "fr", "de"]),
];

const BLOCK_DECLARATIONS: &[&str] = &["Alignment", "FontStyle", "FontSize", "Language"];

const BLOCK_COMMANDS: &[(&str, &[&str])] = &[
    ("chapter", &["document"]),
    ("section", &["chapter", "document"]),
    ("subsection", &["section", "chapter", "document"]),
    ("subsubsection", &["subsection", "section", "chapter", "document"]),
    (
        "paragraph",
        &["subsubsection", "subsection", "section", "chapter", "document"],
    ),
    (
        "subparagraph",
        &[
            "paragraph",
            "subsubsection",
            "subsection",
            "section",
            "chapter",
            "document",
        ],
    ),
    ("item", &["itemize", "enumerate", "list"]),
    ("bibitem", &["thebibliography"]),
];

const NUMBERED: &[(&str, &str)] = &[
    ("chapter", "document"),
    ("section", "chapter"),
    ("subsection", "section"),
    ("subsubsection", "subsection"),
    ("paragraph", "subsubsection"),
    ("subparagraph", "paragraph"),
    ("page", "document"),
    ("equation", "chapter"),
    ("figure", "chapter"),
    ("table", "chapter"),
    ("footnote", "chapter"),
    ("mpfootnote", "chapter"),
    ("enumi", "document"),
    ("enumii", "enumi"),
    ("enumiii", "enumii"),
    ("enumiv", "enumiii"),
    ("thebibliography", "document"),
    ("bibitem", "thebibliography"),
    ("subfigure", "figure"),
    ("subtable", "table"),
    ("video", "chapter"),
];

const NUMBERED_LIKE: &[(&str, &str)] = &[("eqnarray", "equation"), ("align", "equation")];

const MARKER_FORMATS: &[(&str, &str)] = &[
    ("chapter", ""),
    ("section", "\\arabic{section}"),
    ("subsection", "\\thesection.\\arabic{subsection}"),
    ("subsubsection", "\\thesubsection.\\arabic{subsubsection}"),
    ("paragraph", "\\thesubsubsection.\\arabic{paragraph}"),
    ("subparagraph", "\\theparagraph.\\arabic{subparagraph}"),
    ("equation", "\\thesection.\\arabic{equation}"),
    ("figure", "\\arabic{figure}"),
    ("subfigure", "\\alph{subfigure}"),
    ("table", "\\arabic{table}"),
    ("subtable", "\\alph{subtable}"),
    ("page", "\\arabic{page}"),
    ("footnote", "\\arabic{footnote}"),
    ("mpfootnote", "\\alph{footnote}"),
    ("enumi", "\\arabic{enumi}."),
    ("enumii", "(\\alph{enumii})"),
    ("enumiii", "\\roman{enumiii}."),
    ("enumiv", "\\Alph{enumiv}."),
];

const NAMES: &[(&str, &str, &str)] = &[
    ("videoname", "Video", "Fideo"),
    ("prefacename", "Preface", "Rhagair"),
    ("refname", "References", "Cyfeiriadau"),
    ("abstractname", "Abstract", "Crynodeb"),
    ("bibname", "Bibliography", "Llyfryddiaeth"),
    ("chaptername", "Chapter", "Pennod"),
    ("sectionname", "Section", "Adran"),
    ("subsectionname", "Subsection", "Isadran"),
    ("subsubsectionname", "Subsubsection", "Isisadran"),
    ("paragraphname", "Paragraph", "Paragraff"),
    ("subparagraphname", "Subparagraph", "Isbaragraff"),
    ("appendixname", "Appendix", "Atodiad"),
    ("contentsname", "Contents", "Cynnwys"),
    ("listfigurename", "List of Figures", "Rhestr Ffigurau"),
    ("listtablename", "List of Tables", "Rhestr Tablau"),
    ("indexname", "Index", "Mynegai"),
    ("figurename", "Figure", "Ffigur"),
    ("tablename", "Table", "Tabl"),
    ("partname", "Part", "Rhan"),
    ("enclname", "encl", "amgae"),
    ("ccname", "cc", "cc"),
    ("headtoname", "To", "At"),
    ("pagename", "Page", "Tudalen"),
    ("seename", "see", "gweler"),
    ("alsoname", "see also", "gweler hefyd"),
    ("proofname", "Proof", "Prawf"),
    ("glossaryname", "Glossary", "Geirfa"),
];

const CHARACTER_NAMES: &[(char, &str)] = &[
    ('!', "Exclamation"),
    ('$', "Dollar"),
    ('\'', "Acute"),
    ('*', "Asterisk"),
    ('-', "Minus"),
    (':', "Colon"),
    ('=', "Equals"),
    ('@', "At"),
    (']', "Right_bracket"),
    ('`', "Grave"),
    ('}', "Right_brace"),
    ('"', "Double_quote"),
    ('%', "Percent"),
    ('(', "Left_paren"),
    ('+', "Plus"),
    ('.', "Point"),
    (';', "Semicolon"),
    ('>', "Greater_than"),
    ('[', "Left_bracket"),
    ('^', "Circumflex"),
    ('{', "Left_brace"),
    ('~', "Tilde"),
    ('#', "Hash"),
    ('&', "Ampersand"),
    (')', "Right_paren"),
    (',', "Comma"),
    ('/', "Solidus"),
    ('<', "Less_than"),
    ('?', "Question_mark"),
    ('\\', "Backslash"),
    ('_', "Underscore"),
    ('|', "Vertical_bar"),
    (' ', "Space"),
];

/// Returns the descriptive name of an ASCII punctuation character.
///
/// These names are used wherever a control symbol needs an identifier, for example as an XML element name.
pub fn character_name(c: char) -> Option<&'static str> {
    CHARACTER_NAMES
        .iter()
        .find(|(d, _)| *d == c)
        .map(|(_, name)| *name)
}

fn table(entries: &[(&str, &[&str])]) -> OrderedMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
        .collect()
}

fn pairs(entries: &[(&str, &str)]) -> OrderedMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Returns the built-in definition set.
pub fn definitions() -> Definitions {
    Definitions {
        active: table(&[("default", &["~"])]),
        commands: table(COMMANDS),
        environments: table(ENVIRONMENTS),
        declarations: table(DECLARATIONS),
        block_commands: table(BLOCK_COMMANDS),
        block_declarations: BLOCK_DECLARATIONS.iter().map(|s| s.to_string()).collect(),
        numbered: pairs(NUMBERED),
        numbered_like: pairs(NUMBERED_LIKE),
        marker_formats: pairs(MARKER_FORMATS),
        names: NAMES
            .iter()
            .map(|(key, en, cy)| (key.to_string(), pairs(&[("en", *en), ("cy", *cy)])))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::definition::parse_definition;

    #[test]
    fn every_definition_string_is_well_formed() {
        let defs = definitions();
        for table in [&defs.commands, &defs.environments, &defs.declarations] {
            for (genus, strings) in table.iter() {
                for s in strings {
                    assert!(parse_definition(s).is_some(), "{genus}: {s}");
                }
            }
        }
    }

    #[test]
    fn name_keys_end_in_name() {
        for (key, _, _) in NAMES {
            assert!(key.ends_with("name") && key.len() > 4, "{key}");
        }
    }

    #[test]
    fn character_names() {
        assert_eq!(character_name('$'), Some("Dollar"));
        assert_eq!(character_name('\\'), Some("Backslash"));
        assert_eq!(character_name('a'), None);
    }
}
