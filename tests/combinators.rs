mod common;

use common::build_forest;
use either::Either;
use lrpeg::pattern::patterns::*;
use lrpeg::pattern::{Literal, Sym};
use lrpeg::{Input, Outcome, Parse, ParseContext, ParseOptions, Pattern};

fn chars(src: &str) -> Vec<char> {
    src.chars().collect()
}

fn partial() -> ParseOptions {
    ParseOptions {
        require_full_input: false,
        ..Default::default()
    }
}

#[test]
fn terminal_advances_by_one() {
    let src = chars("ab");
    let out: Outcome<()> = sym('a').parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 1);
}

#[test]
fn terminal_failure_leaves_position_and_records_it() {
    let src = chars("b");
    let mut cx: ParseContext<char, ()> = ParseContext::new(Input::text(&src));
    assert!(!Parse::parse(&sym('a'), &mut cx));
    assert_eq!(cx.current().offset(), 0);
    assert_eq!(cx.furthest_failure().offset(), 0);
}

#[test]
fn one_of_matches_set_members() {
    let src = chars("-");
    let out: Outcome<()> = one_of("+-").parse(Input::text(&src));
    assert!(out.ok);
    let src = chars("*");
    let out: Outcome<()> = one_of("+-").parse(Input::text(&src));
    assert!(!out.ok);
}

#[test]
fn range_rejects_outside_bounds() {
    let src = chars("c");
    let out: Outcome<()> = range('d'..='f').parse(Input::text(&src));
    assert!(!out.ok);
    assert_eq!(out.end.offset(), 0);
}

#[test]
fn literal_over_non_char_symbols() {
    let src = [1u8, 2, 3];
    let out: Outcome<()> = lit([1u8, 2]).parse_with(Input::new(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 2);
}

#[test]
fn sequence_restores_position_and_matches_on_failure() {
    let src = chars("ab");
    let grammar = sym('a').mark("a") + 'c';
    let mut cx: ParseContext<char, &str> = ParseContext::new(Input::text(&src));
    assert!(!Parse::parse(&grammar, &mut cx));
    assert_eq!(cx.current().offset(), 0);
    assert_eq!(cx.match_count(), 0);
    // The failed attempt still pushed the failure frontier past 'a'.
    assert_eq!(cx.furthest_failure().offset(), 1);
}

#[test]
fn choice_tries_alternatives_in_order() {
    let src = chars("b");
    let out: Outcome<()> = (sym('a') | sym('b')).parse(Input::text(&src));
    assert!(out.ok);
}

#[test]
fn choice_restores_between_alternatives() {
    let src = chars("ab");
    let grammar = (sym('a').mark("first") + 'x') | (sym('a').mark("second") + 'b');
    let out = grammar.parse(Input::text(&src));
    assert!(out.ok);
    assert_eq!(out.matches.len(), 1);
    assert_eq!(out.matches[0].id, "second");
}

#[test]
fn zero_or_more_never_fails() {
    let src = chars("aaab");
    let out: Outcome<()> = sym('a')
        .zero_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 3);

    let src = chars("b");
    let out: Outcome<()> = sym('a')
        .zero_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 0);
}

#[test]
fn one_or_more_requires_a_first_repetition() {
    let src = chars("b");
    let out: Outcome<()> = sym('a')
        .one_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(!out.ok);

    let src = chars("aa");
    let out: Outcome<()> = sym('a')
        .one_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 2);
}

#[test]
fn non_consuming_repetition_terminates() {
    let src = chars("xxx");
    let out: Outcome<()> = peek(sym('x'))
        .zero_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 0);

    let out: Outcome<()> = peek(sym('x'))
        .one_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 0);
}

#[test]
fn optional_matches_zero_or_one() {
    let src = chars("ab");
    let out: Outcome<()> = (sym('a').opt() + 'b').parse(Input::text(&src));
    assert!(out.ok);

    let src = chars("b");
    let out: Outcome<()> = (sym('a').opt() + 'b').parse(Input::text(&src));
    assert!(out.ok);

    // Greedy: the optional does not give back what it consumed.
    let src = chars("ab");
    let out: Outcome<()> = (sym('a').opt() + 'a' + sym('b')).parse(Input::text(&src));
    assert!(!out.ok);

    let out: Outcome<()> = (sym('x').opt() + "ab").parse(Input::text(&src));
    assert!(out.ok);
}

#[test]
fn peek_is_zero_width_and_captures_nothing() {
    let src = chars("ab");
    let grammar = peek(sym('a').mark("probe")) + lit("ab").mark("body");
    let out = grammar.parse(Input::text(&src));
    assert!(out.ok);
    let ids: Vec<_> = out.matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["body"]);
}

#[test]
fn not_inverts_and_captures_nothing() {
    let src = chars("ab");
    let grammar = !sym('b').mark("probe") + lit("ab").mark("body");
    let out = grammar.parse(Input::text(&src));
    assert!(out.ok);
    let ids: Vec<_> = out.matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec!["body"]);

    let grammar = not(sym('a').mark("probe")) + lit("ab").mark("body");
    let out = grammar.parse(Input::text(&src));
    assert!(!out.ok);
    assert!(out.matches.is_empty());
}

#[test]
fn end_matches_only_at_the_end() {
    let src = chars("a");
    let out: Outcome<()> = (sym('a') + end()).parse(Input::text(&src));
    assert!(out.ok);
    let out: Outcome<()> = end().parse_with(Input::text(&src), &partial());
    assert!(!out.ok);
}

#[test]
fn either_branches_are_parsers() {
    fn pick(left: bool) -> Pattern<Either<Pattern<Sym<char>>, Pattern<Literal<char>>>> {
        if left {
            Pattern::new(Either::Left(sym('a')))
        } else {
            Pattern::new(Either::Right(lit("bb")))
        }
    }
    let src = chars("a");
    let out: Outcome<()> = pick(true).parse(Input::text(&src));
    assert!(out.ok);
    let src = chars("bb");
    let out: Outcome<()> = pick(false).parse(Input::text(&src));
    assert!(out.ok);
}

#[test]
fn partial_parses_report_their_end() {
    let src = chars("aab");
    let out: Outcome<()> = sym('a')
        .one_or_more()
        .parse_with(Input::text(&src), &partial());
    assert!(out.ok);
    assert_eq!(out.end.offset(), 2);

    // With the default options the same parse is a failure.
    let out: Outcome<()> = sym('a').one_or_more().parse(Input::text(&src));
    assert!(!out.ok);
    assert_eq!(out.furthest_failure.offset(), 2);
}

#[test]
fn preallocated_log_behaves_identically() {
    let src = chars("aaa");
    let options = ParseOptions {
        preallocate_log: 64,
        ..Default::default()
    };
    let out = sym('a')
        .mark("a")
        .one_or_more()
        .parse_with(Input::text(&src), &options);
    assert!(out.ok);
    assert_eq!(out.matches.len(), 3);
    assert_eq!(build_forest(&out.matches).map(|f| f.len()), Some(3));
}

#[test]
fn nested_marks_count_immediate_children_only() {
    let src = chars("abc");
    let grammar = ((sym('a').mark("a") + sym('b').mark("b")).mark("ab") + 'c').mark("abc");
    let out = grammar.parse(Input::text(&src));
    assert!(out.ok);
    let log: Vec<_> = out
        .matches
        .iter()
        .map(|m| (m.id, m.begin.offset(), m.end.offset(), m.child_count))
        .collect();
    assert_eq!(
        log,
        vec![
            ("a", 0, 1, 0),
            ("b", 1, 2, 0),
            ("ab", 0, 2, 2),
            ("abc", 0, 3, 1),
        ],
    );
}
