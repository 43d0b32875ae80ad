//! Every character of the input is recorded in the tree.

mod control_symbols {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (dollar, r"pre \$100 post"),
        (dollar_then_spaces, r"pre \$   100 post"),
        (spaces_before_argument, r"pre \textbf  {hello \$y}  post"),
        (row_end_with_length, r"pre \\[2ex] post"),
        (row_end_spaces_before_length, r"pre \\  [2ex] post"),
        (accent_with_group, r#"pre Hell\"{o}  post"#),
        (dollars_with_and_without_space, r"pre \$3 mid \$ 3 post"),
        (circumflex_both_forms, r"pre \^{o} and \^o post"),
    ),];
}

mod parameters {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (item_marker_outside_list, r"pre \item[*]  post"),
        (optional_and_mandatory, r"pre \title[short]{Long} post"),
        (mandatory, r"pre \textbf{hello} post"),
        (undelimited_digit, r"pre \textbf1 post"),
        (undelimited_letter_after_space, r"pre \textbf A post"),
        (undelimited_control_word, r"pre \textit\LaTeX post"),
        (undelimited_control_symbol, r"pre \textbf\$ post"),
        (unknown_command_with_brackets, r"pre \unknown[1] post"),
        (unknown_command_with_group, r"pre \foobar{x} post"),
        (points, r"pre \points[3] post"),
    ),];
}

mod groups {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (nested, r"pre {one {two} three} post"),
        (declarations_in_groups, r"first {\bf second {\it third} fourth} fifth"),
        (empty, r"{}{{}}"),
    ),];
}

mod declarations {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (font_styles, r"{pre \bf hello \it world \normalfont post}"),
        (alignment, r"first \raggedleft second \centering third \raggedright fourth"),
        (font_sizes, r"first \small second \large third \normalsize fourth"),
        (nested_scopes, r"{pre zero {\bf pre first {\it second} post first} post zero}"),
        (languages, r"{pre \bi both \en english \cy cymraeg \bi post}"),
        (languages_with_accents, r"pre \en Hello world! \cy Hel\^{o} byd! \bi post"),
    ),];
}

mod sections {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (short_titles, r"Hello\section[one]{First section}Welcome\section[two]{Second section}Goodbye"),
        (nested, r"A\chapter{B}C\section{D}E\subsection{F}G\section{H}I\chapter{J}K"),
        (math_in_title, r"pre \section[intro]{Introduction to $E=mc^{2+\epsilon}$} post"),
        (labels, r"\chapter{Introduction}\label{ch:intro} Hello \chapter{Background}\label{ch:back} Goodbye"),
        (
            sections_in_chapters,
            r"\chapter{Introduction}\label{ch:intro} Hello \section{Shw mae} helo \chapter{Background} background Goodbye"
        ),
        (chapters, r"\chapter{Intro}Hello\section{First}blah\section{Second}blah\chapter{Background}"),
    ),];
}

mod lists {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (itemize, r"pre \begin{itemize} \item First \item Second \end{itemize} post"),
        (
            enumerate_in_itemize,
            r"pre \begin{itemize}\item A\item B\begin{enumerate}\item C\item D\end{enumerate}\item E\item F\end{itemize} post"
        ),
        (
            itemize_in_itemize,
            r"pre \begin{itemize}\item A\item B\begin{itemize}\item C\item D\end{itemize}\item E\item F\end{itemize} post"
        ),
        (description, r"\begin{description}\item[Cat] Meow \item[Dog] Woof\end{description}"),
        (
            bibliography,
            r"\begin{thebibliography}{99}\bibitem{knuth} Knuth \bibitem[LL]{lamport} Lamport\end{thebibliography}"
        ),
    ),];
}

mod texstyle {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (center, r"pre \center inside \endcenter post"),
        (itemize, r"pre \itemize \item First \item Second \enditemize post"),
        (itemize_short_items, r"pre \itemize \item a \item b \enditemize post"),
        (closed_latex_style, r"pre \center inside \end{center} post"),
        (starred, r"\figure* inside \endfigure* post"),
    ),];
}

mod starred {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (figure, r"\begin{figure*} Hello \end{figure*}"),
        (vspace, r"\vspace*{2ex}"),
        (row_end, r"\\*"),
        (section, r"\section*{Preface} text"),
    ),];
}

mod maths {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (inline_tex, r"pre $\alpha+\beta$ post"),
        (inline_latex, r"pre \(\alpha+\beta\) post"),
        (display_latex, r"pre \[\alpha+\beta\] post"),
        (display_tex, r"pre $$\alpha+\beta$$ post"),
        (scripts, r"pre $\int_0^1x^2\dx=\frac{1}{3}$ post"),
        (scripts_with_spaces, r"$\int_0^1 x^2\,dx = \frac{1}{3}$"),
        (braced_scripts, r"pre \[\int_{-\pi}^{\pi} x^3\cos(x)\,dx\] post"),
        (two_formulas, r"pre $E = mc^2$ mid $\alpha+\beta=\gamma$ post"),
        (align, r"pre \begin{align} x & = a + b \\ y & = c + d\end{align} post"),
        (labelled_equation, r"pre \begin{equation}\label{eq:euler} blah \end{equation} post"),
        (font, r"pre $\mathbf{x}$ post"),
        (sum, r"$\sum_{i=1}^n \frac{1}{n^2} = \frac{\pi}{6}$"),
        (display_sum, r"$$\sum_{i=1}^n \frac{1}{n^2} = \frac{\pi}{6}$$"),
        (equation, r"\begin{equation}e^{i\pi}+1=0\end{equation}"),
        (starred_equation, r"\begin{equation*}S=k\log W\end{equation*}"),
    ),];
}

mod environments {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (document, r"\begin{document}Hello world!\end{document}"),
        (unknown, r"pre \begin{myenv} inside \end{myenv} post"),
        (unknown_nested, r"pre \begin{myenv} first \begin{myenv} inside \end{myenv} second \end{myenv} post"),
        (verbatim, r"pre \begin{verbatim}\oops\setcounter[naughty]\end{verbatim} post"),
        (minipage, r"pre \begin{minipage}{\linewidth} inside \end{minipage} post"),
        (spaces_around_names, r"\begin {center} x \end {center}"),
    ),];
}

mod macros {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (newtheorem_within_non_counter, r"\newtheorem{lemma}{Lemma}[theorem]"),
        (newenvironment, r"\newenvironment{myenv}{pre}{post}"),
        (newcommand, r"\newcommand{\strong}[1]{\textbf{#1}}"),
        (newcommand_italic, r"\newcommand{\nice}[1]{\textit{#1}}"),
        (renewcommand, r"\renewcommand{\emph}[1]{\textbf{#1}}"),
        (def, r"\def\hello{shw mae}"),
        (def_with_arguments, r"\def\strong[1]{\textbf{#1}}"),
        (empty_environment, r"\newenvironment{myenv}{}{} \begin{myenv}inside\end{myenv}"),
        (
            environment_with_argument,
            r"\newenvironment{myenv}[1]{\textbf{start #1}}{\textbf{finish}} \begin{myenv}{note}inside\end{myenv}"
        ),
        (environment_never_used, r"\newenvironment{myenv}[2]{\textbf{start #1--#2}}{\par\textbf{finish}}"),
        (theorem, r"\newtheorem{theo}{Theorem}\begin{theo} inside \end{theo}"),
        (theorem_within_section, r"\newtheorem{theo}{Theorem}[section]\begin{theo} inside \end{theo}"),
        (
            theorem_shared_counter,
            r"\newtheorem{theo}{Theorem}\newtheorem{lem}[theo]{Lemma}\begin{theo} inside \end{theo}\begin{lem} hello \end{lem}"
        ),
        (theorem_unknown_shared_counter, r"\newtheorem{lem}[theo]{Lemma}\begin{lem} hello \end{lem}"),
        (command_with_argument, r"\newcommand{\hello}[1]{Hi #1} \hello{Bob}"),
        (command_with_math_argument, r"\newcommand{\hello}[1]{Hi #1} \hello{Bob $\alpha=\beta$}"),
        (command_with_two_arguments, r"\newcommand{\isa}[2]{#1 is a #2} \isa{Bingo}{dog}"),
        (command_with_default, r"\newcommand{\greet}[2][Hello]{#1 #2} \greet{you} \greet[Bye]{now}"),
        (redefined_command, r"\newcommand{\x}{one}\x\renewcommand{\x}[1]{two #1}\x{y}\x{z}"),
        (providecommand, r"\providecommand{\x}{one}\x"),
    ),];
}

mod counters {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (setcounter_unknown, r"pre \setcounter{mycounter}{3} post"),
        (arabic, r"\arabic{section}\section{Intro}\arabic{section}"),
        (the_counter, r"\thesection\section{Intro}\arabic{section}"),
        (the_figure, r"\thefigure"),
        (the_nested_counter, r"\thesubsubsection"),
        (newcounter, r"\newcounter{box}[section]\addtocounter{box}{2}\roman{box}"),
    ),];
}

mod misc {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (lengths, r"pre \setlength{\parskip}{3ex} post"),
        (active_character, r"no~break"),
        (comment_line, "%\\def\\bit{\\itemize}\n    "),
        (comment_after_text, "text % remark\nmore"),
        (comment_after_control_word, "\\bf% remark\n  text"),
        (paragraph_break, "one\n\ntwo\n  \n  three"),
        (parameter_character, r"cost: # and & alone"),
        (unicode, "caf\u{e9} \\'{e} \u{175}"),
    ),];
}

mod tabular {
    use latextree_testing::*;

    test_suite![round_trip_tests(
        (no_rows, "\n        \\begin{tabular}{ccc} inside \\end{tabular}\n        "),
        (
            rules,
            r"\begin{tabular}{cc}\hline a & b \\ \hline c & d \\ \hline\end{tabular}"
        ),
        (
            multiline,
            "
        \\begin{tabular}{cccc}
        \\hline
        a & b & c & d \\\\
        e & f & g & h \\\\
        \\hline
        \\hline
        i & j & k & l \\\\
        \\hline
        \\end{tabular}
        "
        ),
        (column_rules, r"\begin{tabular}{|l|p{3cm}|}x & y\\\end{tabular}"),
        (tex_style, r"\tabular{cc}a & b\endtabular"),
        (nested_group_with_ampersand, r"\begin{tabular}{c}{a & b}\end{tabular}"),
    ),];
}

mod exam {
    use latextree_testing::*;

    const EXAM: &str = r#"{
        "commands": {
            "Question": ["question[points]", "part[points]"],
            "Choice": ["choice", "correctchoice"],
            "Answer": ["ans{answer}"]
        },
        "environments": {
            "List": ["questions", "parts", "choices", "checkboxes"]
        },
        "block_commands": {
            "question": ["questions"],
            "part": ["question", "parts"],
            "choice": ["correctchoice", "choices", "checkboxes"],
            "correctchoice": ["choice", "choices", "checkboxes"]
        },
        "numbered": {"question": "document", "part": "question"},
        "marker_formats": {"question": "\\arabic{question}.", "part": "(\\alph{part})"}
    }"#;

    test_suite![
        options(TestOption::Definitions(EXAM)),
        round_trip_tests(
            (
                questions,
                r"
    pre
    \begin{questions}
    \question[10] How?
    \question[20] Why?
    \end{questions}
    post
    "
            ),
            (
                answers,
                r"
    \begin{questions}
    \question[5] $1 + 1$ \ans{2}
    \question[5] $2 + 2$ \ans{3}
    \end{questions}
    "
            ),
            (
                choices_in_question,
                r"
    \begin{questions}
    \question
    The product of an odd and even function is
    \begin{choices}
    \correctchoice Odd
    \choice Even
    \choice Neither
    \end{choices}
    \end{questions}
    "
            ),
            (
                choices,
                r"
    \begin{choices}
    \choice dog
    \correctchoice cat
    \choice mouse
    \end{choices}
    "
            ),
        ),
        marker_tests(
            (
                question_markers,
                r"\begin{questions}\question[1] A \question B\end{questions}",
                "question",
                ["1.", "2."]
            ),
            (
                part_markers,
                r"\begin{questions}\question A \begin{parts}\part x\part y\end{parts}\question B\begin{parts}\part z\end{parts}\end{questions}",
                "part",
                ["(a)", "(b)", "(a)"]
            ),
        ),
    ];
}
