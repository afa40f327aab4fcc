mod common;

use common::{assert_span, build_forest, single_root};
use lrpeg::pattern::patterns::*;
use lrpeg::{Input, Outcome, Rule};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    Digit,
    Factor,
    Term,
    Expr,
}
use Tag::*;

/// `expr <- expr '+' term | expr '-' term | term`
/// `term <- term '*' factor | term '/' factor | factor`
/// `factor <- digit+ | '(' expr ')'`
///
/// Every rule body is marked with its tag; digits are marked individually.
/// The returned handles must stay alive while parsing.
fn grammar() -> (Rule<char, Tag>, Rule<char, Tag>, Rule<char, Tag>) {
    let expr = Rule::named("expr");
    let term = Rule::named("term");
    let factor = Rule::named("factor");

    let digit = range('0'..='9').mark(Digit);
    factor.set((digit.one_or_more() | '(' + &expr + ')').mark(Factor));
    term.set((&term + '*' + &factor | &term + '/' + &factor | &factor).mark(Term));
    expr.set((&expr + '+' + &term | &expr + '-' + &term | &term).mark(Expr));
    (expr, term, factor)
}

fn parse(src: &str) -> Outcome<Tag> {
    let (expr, _term, _factor) = grammar();
    let chars: Vec<char> = src.chars().collect();
    expr.parse(Input::text(&chars))
}

fn log_of(out: &Outcome<Tag>) -> Vec<(Tag, usize, usize, usize)> {
    out.matches
        .iter()
        .map(|m| (m.id, m.begin.offset(), m.end.offset(), m.child_count))
        .collect()
}

#[test]
fn single_addition() {
    let out = parse("1+2");
    assert!(out.ok);
    assert_eq!(out.end.offset(), 3);
    assert_eq!(
        log_of(&out),
        vec![
            (Digit, 0, 1, 0),
            (Factor, 0, 1, 1),
            (Term, 0, 1, 1),
            (Expr, 0, 1, 1),
            (Digit, 2, 3, 0),
            (Factor, 2, 3, 1),
            (Term, 2, 3, 1),
            (Expr, 0, 3, 2),
        ],
    );

    let root = single_root(&out);
    assert_span(&root, Expr, 0, 3);
    assert_eq!(root.children.len(), 2);
    assert_span(&root.children[0], Expr, 0, 1);
    assert_span(&root.children[1], Term, 2, 3);
}

#[test]
fn chained_addition_is_left_associative() {
    let out = parse("1+2+3");
    assert!(out.ok);
    assert_eq!(
        log_of(&out),
        vec![
            (Digit, 0, 1, 0),
            (Factor, 0, 1, 1),
            (Term, 0, 1, 1),
            (Expr, 0, 1, 1),
            (Digit, 2, 3, 0),
            (Factor, 2, 3, 1),
            (Term, 2, 3, 1),
            (Expr, 0, 3, 2),
            (Digit, 4, 5, 0),
            (Factor, 4, 5, 1),
            (Term, 4, 5, 1),
            (Expr, 0, 5, 2),
        ],
    );

    // ((1+2)+3): the root's first child is itself the 0..3 addition.
    let root = single_root(&out);
    assert_span(&root, Expr, 0, 5);
    assert_span(&root.children[0], Expr, 0, 3);
    assert_span(&root.children[1], Term, 4, 5);
    assert_span(&root.children[0].children[0], Expr, 0, 1);
    assert_span(&root.children[0].children[1], Term, 2, 3);
}

#[test]
fn parentheses_and_precedence() {
    let out = parse("(1+2)*3");
    assert!(out.ok);

    let root = single_root(&out);
    assert_span(&root, Expr, 0, 7);
    assert_eq!(root.children.len(), 1);

    let product = &root.children[0];
    assert_span(product, Term, 0, 7);
    assert_eq!(product.children.len(), 2);
    assert_span(&product.children[0], Term, 0, 5);
    assert_span(&product.children[1], Factor, 6, 7);

    let grouped = &product.children[0].children[0];
    assert_span(grouped, Factor, 0, 5);
    let inner = &grouped.children[0];
    assert_span(inner, Expr, 1, 4);
    assert_span(&inner.children[0], Expr, 1, 2);
    assert_span(&inner.children[1], Term, 3, 4);
}

#[test]
fn digit_run_is_one_factor() {
    let out = parse("12345");
    assert!(out.ok);

    let root = single_root(&out);
    assert_span(&root, Expr, 0, 5);
    let factor = &root.children[0].children[0];
    assert_span(factor, Factor, 0, 5);
    assert_eq!(factor.children.len(), 5);
    for (i, digit) in factor.children.iter().enumerate() {
        assert_span(digit, Digit, i, i + 1);
    }
}

#[test]
fn nested_parentheses() {
    let out = parse("((1))");
    assert!(out.ok);

    let root = single_root(&out);
    let factors: Vec<(usize, usize)> = out
        .matches
        .iter()
        .filter(|m| m.id == Factor)
        .map(|m| (m.begin.offset(), m.end.offset()))
        .collect();
    assert_eq!(factors, vec![(2, 3), (1, 4), (0, 5)]);
    assert_span(&root, Expr, 0, 5);
}

#[test]
fn trailing_operator_fails_at_offset_two() {
    let out = parse("1+");
    assert!(!out.ok);
    assert_eq!(out.furthest_failure.offset(), 2);
    // Whatever was committed must still be well nested.
    assert!(build_forest(&out.matches).is_some());
}

#[test]
fn single_digit_through_simple_recursion_stays_digit_rooted() {
    let e = Rule::named("E");
    let digit = || range('0'..='9').mark("digit");
    e.set((&e + '+' + digit()).mark("add") | digit());

    let chars: Vec<char> = "1".chars().collect();
    let out = e.parse(Input::text(&chars));
    let root = single_root(&out);
    assert_span(&root, "digit", 0, 1);
    assert!(root.children.is_empty());
}

#[test]
fn simple_recursion_grows_left_to_right() {
    let e = Rule::named("E");
    let digit = || range('0'..='9').mark("digit");
    e.set((&e + '+' + digit()).mark("add") | digit());

    let chars: Vec<char> = "1+2+3".chars().collect();
    let out = e.parse(Input::text(&chars));
    let root = single_root(&out);
    assert_span(&root, "add", 0, 5);
    assert_span(&root.children[0], "add", 0, 3);
    assert_span(&root.children[1], "digit", 4, 5);
    assert_span(&root.children[0].children[0], "digit", 0, 1);
    assert_span(&root.children[0].children[1], "digit", 2, 3);
}

#[test]
fn ordered_choice_prefers_the_first_alternative() {
    let a = (lit("ab").mark("ab") | lit("a").mark("a")).mark("A");
    let chars: Vec<char> = "ab".chars().collect();
    let out = a.parse(Input::text(&chars));
    let root = single_root(&out);
    assert_span(&root, "A", 0, 2);
    assert_span(&root.children[0], "ab", 0, 2);
}

#[test]
fn zero_width_seed_is_accepted_without_growth() {
    let r = Rule::named("r");
    r.set((&r + 'x').mark("rx") | sym('y').opt().mark("maybe"));

    let chars: Vec<char> = vec![];
    let out = r.parse(Input::text(&chars));
    let root = single_root(&out);
    assert_span(&root, "maybe", 0, 0);
}

#[test]
fn failure_positions_carry_line_and_column() {
    let grammar = lit("ab") + '\n' + lit("cx");
    let chars: Vec<char> = "ab\ncd".chars().collect();
    let out: Outcome<()> = grammar.parse(Input::text(&chars));
    let err = out.into_result().unwrap_err();
    assert_eq!(err.position.offset(), 4);
    assert_eq!(err.position.line(), 2);
    assert_eq!(err.position.column(), 2);
    assert!(err.to_string().contains("line 2, column 2"));
}

#[test]
#[should_panic(expected = "indirect left recursion")]
fn indirect_left_recursion_is_rejected() {
    let a: Rule<char, ()> = Rule::named("a");
    let b: Rule<char, ()> = Rule::named("b");
    a.set(&b + 'x' | sym('y'));
    b.set(&a + 'z' | sym('w'));

    let chars: Vec<char> = "y".chars().collect();
    let _ = a.parse(Input::text(&chars));
}

#[test]
#[should_panic(expected = "has no body")]
fn parsing_an_unset_rule_panics() {
    let r: Rule<char, ()> = Rule::named("pending");
    let chars: Vec<char> = "x".chars().collect();
    let _ = r.parse(Input::text(&chars));
}

#[test]
#[should_panic(expected = "was dropped")]
fn parsing_through_a_dropped_rule_panics() {
    let orphan = {
        let r: Rule<char, ()> = Rule::named("gone");
        r.set(sym('a'));
        pat(&r)
    };
    let chars: Vec<char> = "a".chars().collect();
    let _: Outcome<()> = orphan.parse(Input::text(&chars));
}
