mod mark;
mod operators;
mod predicate;
mod repeat;
mod terminals;
mod traits;

pub use mark::Mark;
pub use operators::{OrElse, Then};
pub use predicate::{not, peek, Peek, Reject};
pub use repeat::{OneOrMore, Opt, ZeroOrMore};
pub use terminals::{end, lit, one_of, range, sym, End, Literal, OneOf, Sym, SymRange};
pub use traits::{DebugPrecedence, FmtParser, IntoPattern, IntoSymbols, Parse};

use core::fmt;

use crate::context::{LeftRecursion, ParseContext};
use crate::input::Input;
use crate::outcome::{run, Outcome, ParseOptions};

/// Everything needed to write a grammar expression.
pub mod patterns {
    pub use super::{end, lit, not, one_of, pat, peek, range, sym};
}

/// Wraps a grammar expression into a [`Pattern`].
pub fn pat<X: IntoPattern>(x: X) -> Pattern<X::Parser> {
    x.into_pattern()
}

/// A grammar expression. Built from the constructors in [`patterns`] and
/// composed with `+` (sequence), `|` (ordered choice), `!` (negative
/// lookahead) and the `mark`/`opt`/`zero_or_more`/`one_or_more` methods.
#[derive(Clone)]
pub struct Pattern<P> {
    inner: P,
}

impl<P> Pattern<P> {
    /// Wraps a raw [`Parse`] implementation.
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    pub(crate) fn into_inner(self) -> P {
        self.inner
    }

    /// Runs this grammar over `input` with default options (the whole input
    /// must be consumed).
    pub fn parse<S, T>(&self, input: Input<'_, S>) -> Outcome<T>
    where
        P: Parse<S, T>,
    {
        self.parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with<S, T>(&self, input: Input<'_, S>, options: &ParseOptions) -> Outcome<T>
    where
        P: Parse<S, T>,
    {
        run(&self.inner, input, options)
    }
}

impl<P: FmtParser> fmt::Debug for Pattern<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_parser(f, DebugPrecedence::Initial)
    }
}

impl<P: FmtParser> FmtParser for Pattern<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        self.inner.fmt_parser(f, prec)
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for Pattern<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        self.inner.parse(cx)
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        self.inner.parse_extend(cx, lr)
    }
}

#[test]
fn simple_sequence_and_choice() {
    let grammar = ('a' + sym('b').one_or_more() | lit("xy")).mark("pair");
    let chars: Vec<char> = "abb".chars().collect();
    let out = grammar.parse(Input::text(&chars));
    assert!(out.ok);
    assert_eq!(out.end.offset(), 3);
    assert_eq!(out.matches.len(), 1);
    assert_eq!(out.matches[0].id, "pair");

    let chars: Vec<char> = "xy".chars().collect();
    let out = grammar.parse(Input::text(&chars));
    assert!(out.ok);
    assert_eq!(out.matches[0].end.offset(), 2);
}

#[test]
fn debug_rendering_uses_grammar_operators() {
    let grammar = ('a' + sym('b') | sym('c').zero_or_more()).mark("top");
    let rendered = format!("{:?}", grammar);
    assert_eq!(rendered, "('a' + 'b' | 'c'*).mark(\"top\")");
}
