//! The shape of parsed trees and the searches and serializations built on them.

use latextree::tree::{NodeKind, TocEntry, Tree};
use latextree_testing::*;

fn species(tree: &Tree, ids: &[latextree::tree::NodeId]) -> Vec<String> {
    ids.iter().map(|id| tree.species(*id).to_string()).collect()
}

#[test]
fn command_between_text() {
    let (_, tree) = parse(r"pre \textbf{Hello} post", &[]);
    let top = tree.top_level();
    assert_eq!(species(&tree, top), vec!["Text", "textbf", "Text"]);
    assert_eq!(tree[top[0]].kind(), &NodeKind::Text("pre ".into()));
    assert_eq!(tree[top[2]].kind(), &NodeKind::Text(" post".into()));
    let group = tree.arg(top[1], "text").unwrap();
    assert_eq!(tree[group].kind(), &NodeKind::Group);
    assert_eq!(tree.text(group), "Hello");
    assert_eq!(tree.chars(), r"pre \textbf{Hello} post");
}

#[test]
fn chapters_contain_their_sections() {
    let (_, tree) = parse(
        r"\chapter{Intro}Hello\section{First}blah\section{Second}blah\chapter{Background}",
        &[],
    );
    let chapters = tree.find_all("chapter");
    assert_eq!(tree.top_level(), chapters.as_slice());
    assert_eq!(tree.number(chapters[0]), Some(1));
    assert_eq!(tree.number(chapters[1]), Some(2));
    let sections = tree.find_all("section");
    assert_eq!(sections.len(), 2);
    for (section, number) in sections.iter().zip([1, 2]) {
        assert_eq!(tree[*section].parent(), Some(chapters[0]));
        assert_eq!(tree.ancestor(*section, "chapter"), Some(chapters[0]));
        assert_eq!(tree.number(*section), Some(number));
    }
}

#[test]
fn section_counter_resets_in_the_next_chapter() {
    let (_, tree) = parse(
        r"\chapter{Intro}\section{First}\section{Second}\chapter{Background}\section{Third}",
        &[],
    );
    let numbers: Vec<Option<i64>> = tree
        .find_all("section")
        .into_iter()
        .map(|id| tree.number(id))
        .collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(1)]);
}

#[test]
fn macro_expansion_is_kept_beside_the_source() {
    let (_, tree) = parse(r"\newcommand{\hello}[1]{Hi #1} \hello{Bob}", &[]);
    let hello = tree.find_all("hello")[0];
    let expansion: String = tree[hello]
        .children()
        .iter()
        .map(|id| tree.node_chars(*id))
        .collect();
    assert_eq!(expansion, "Hi Bob");
    assert_eq!(tree.node_chars(hello), r"\hello{Bob}");
}

#[test]
fn scripts_follow_the_integral() {
    let source = r"$\int_0^1 x^2\,dx = \frac{1}{3}$";
    let (_, tree) = parse(source, &[]);
    let math = tree.top_level()[0];
    assert!(matches!(tree[math].kind(), NodeKind::Inline(_)));
    let children = tree[math].children();
    assert_eq!(tree.species(children[0]), "int");
    let scripts: Vec<(String, String)> = children[1..3]
        .iter()
        .map(|id| {
            let contents = tree.arg(*id, "contents").unwrap();
            (tree.species(*id).to_string(), tree.text(contents))
        })
        .collect();
    assert_eq!(
        scripts,
        vec![
            ("Subscript".to_string(), "0".to_string()),
            ("Superscript".to_string(), "1".to_string())
        ]
    );
    assert_eq!(tree.chars(), source);
}

#[test]
fn tabular_rows_and_rules() {
    let source = r"\begin{tabular}{cc}\hline a & b \\ \hline c & d \\ \hline\end{tabular}";
    let (_, tree) = parse(source, &[]);
    let rows: Vec<(String, usize)> = tree
        .find_all("Row")
        .into_iter()
        .map(|id| match tree[id].kind() {
            NodeKind::Row { format } => (
                format.clone(),
                tree[id]
                    .children()
                    .iter()
                    .filter(|c| tree.species(**c) == "Cell")
                    .count(),
            ),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(rows, vec![("T".to_string(), 2), ("TB".to_string(), 2)]);
    assert_eq!(tree.chars(), source);
}

#[test]
fn unknown_commands_are_leaves() {
    let mut parser = new_parser(&[]);
    let tree = parser.parse(r"\foobar{x}").unwrap();
    let foobar = tree.top_level()[0];
    assert_eq!(tree.species(foobar), "foobar");
    assert!(tree[foobar].children().is_empty());
    assert!(parser.registry().get("foobar").unwrap().auto);
    assert_eq!(tree.chars(), r"\foobar{x}");
}

#[test]
fn renewed_command_leaves_earlier_nodes_alone() {
    let (parser, tree) = parse(r"\newcommand{\x}{one}\x\renewcommand{\x}[1]{two #1}\x{y}", &[]);
    let xs = tree.find_all("x");
    let expansion = |id| -> String {
        tree[id]
            .children()
            .iter()
            .map(|c| tree.node_chars(*c))
            .collect()
    };
    assert_eq!(expansion(xs[0]), "one");
    assert_eq!(tree.node_chars(xs[0]), r"\x");
    assert_eq!(expansion(xs[1]), "two y");
    assert_eq!(parser.registry().params("x").len(), 1);
}

#[test]
fn parses_do_not_share_state() {
    let mut parser = new_parser(&[]);
    parser.parse(r"\newcommand{\x}{one}\section{A}").unwrap();
    let tree = parser.parse(r"\x\section{B}").unwrap();
    assert!(parser.registry().custom("x").is_none());
    assert_eq!(tree.number(tree.find_all("section")[0]), Some(1));
}

const DOCUMENT: &str = r"\documentclass{article}
\title{Notes}
\author{Ann}
\begin{document}
\chapter{Intro}\label{ch:intro}
See \cite{knuth}.
\section{Motivation}
\begin{figure}\caption{A}\label{fig:a}\end{figure}
\begin{equation}\label{eq:one} x \end{equation}
\subsection{Detail}
\section{Plan}
\chapter{Work}
\begin{thebibliography}{9}
\bibitem{knuth} Knuth
\end{thebibliography}
\end{document}
";

#[test]
fn document_round_trip() {
    run_round_trip_test(DOCUMENT, &[]);
}

#[test]
fn labels_point_to_numbered_nodes() {
    let (parser, tree) = parse(DOCUMENT, &[]);
    let labels = tree.labels(parser.registry());
    let species_of = |key: &str| tree.species(labels[key]).to_string();
    assert_eq!(species_of("ch:intro"), "chapter");
    assert_eq!(species_of("fig:a"), "figure");
    assert_eq!(species_of("eq:one"), "equation");
    assert_eq!(species_of("knuth"), "bibitem");
}

#[test]
fn citations() {
    let (_, tree) = parse(DOCUMENT, &[]);
    let citations = tree.citations();
    assert_eq!(citations.keys().collect::<Vec<_>>(), vec!["knuth"]);
}

#[test]
fn table_of_contents() {
    let (_, tree) = parse(DOCUMENT, &[]);
    fn outline(tree: &Tree, entry: &TocEntry) -> String {
        let children: Vec<String> = entry.children.iter().map(|e| outline(tree, e)).collect();
        if children.is_empty() {
            tree.species(entry.node).to_string()
        } else {
            format!("{}({})", tree.species(entry.node), children.join(" "))
        }
    }
    let toc = tree.toc().unwrap();
    assert_eq!(
        outline(&tree, &toc),
        "document(chapter(section(subsection) section) chapter)"
    );
}

#[test]
fn preamble() {
    let (_, tree) = parse(DOCUMENT, &[]);
    let preamble = tree.preamble();
    assert_eq!(tree.text(preamble.title.unwrap()), "Notes");
    assert_eq!(tree.text(preamble.author.unwrap()), "Ann");
    assert_eq!(tree.text(preamble.documentclass.unwrap()), "article");
    assert_eq!(preamble.date, None);
}

#[test]
fn containers_and_ancestors() {
    let (parser, tree) = parse(DOCUMENT, &[]);
    let caption = tree.find_all("caption")[0];
    let figure = tree.find_all("figure")[0];
    assert_eq!(tree.container(caption, parser.registry()), Some(figure));
    let subsection = tree.find_all("subsection")[0];
    let section = tree.ancestor(subsection, "section").unwrap();
    assert_eq!(tree.text(tree.arg(section, "title").unwrap()), "Motivation");
    assert_eq!(tree.ancestor(subsection, "document"), tree.document());
}

#[test]
fn find_all_searches_arguments() {
    let (_, tree) = parse(r"\section{On $\alpha$}\emph{$\alpha$}", &[]);
    assert_eq!(tree.find_all("alpha").len(), 2);
}

#[test]
fn pretty_print() {
    let (_, tree) = parse(r"pre \textbf{Hello} post\section{A}", &[]);
    assert_eq!(
        tree.pretty_print(),
        "Node:Root\n\
         ----Content:Text(pre )\n\
         ----FontStyle:textbf\n\
         --------arg:text\n\
         ------------Node:Group\n\
         ----------------Content:Text(Hello)\n\
         ----Content:Text( post)\n\
         ----Section:section(1)\n\
         --------arg:title\n\
         ------------Node:Group\n\
         ----------------Content:Text(A)"
    );
}

#[test]
fn xml() {
    let (_, tree) = parse(r"\section*{A \& B}\begin{itemize}\item x\end{itemize}", &[]);
    let xml = tree.xml().unwrap();
    assert!(xml.starts_with("<Root>"));
    assert!(xml.contains("<section starred=\"True\">"));
    assert!(xml.contains("<title>"));
    assert!(xml.contains("<itemize>"));
    assert!(xml.contains("<item>"));
    assert!(xml.trim_end().ends_with("</Root>"));
}
