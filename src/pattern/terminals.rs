use core::fmt;
use core::ops::RangeInclusive;

use crate::context::ParseContext;

use super::traits::{DebugPrecedence, FmtParser, IntoPattern, IntoSymbols, Parse};
use super::Pattern;

/// Matches one symbol equal to `value`.
#[derive(Clone)]
pub struct Sym<S> {
    value: S,
}

impl<S: fmt::Debug> FmtParser for Sym<S> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl<S, T> Parse<S, T> for Sym<S>
where
    S: PartialEq + fmt::Debug,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        match cx.symbol() {
            Some(s) if *s == self.value => {
                cx.advance();
                true
            }
            _ => {
                cx.record_failure(cx.current());
                false
            }
        }
    }
}

pub fn sym<S>(value: S) -> Pattern<Sym<S>> {
    Pattern::new(Sym { value })
}

/// Matches one symbol inside an inclusive range.
#[derive(Clone)]
pub struct SymRange<S> {
    lo: S,
    hi: S,
}

impl<S: fmt::Debug> FmtParser for SymRange<S> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        write!(f, "[{:?}..={:?}]", self.lo, self.hi)
    }
}

impl<S, T> Parse<S, T> for SymRange<S>
where
    S: PartialOrd + fmt::Debug,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        match cx.symbol() {
            Some(s) if *s >= self.lo && *s <= self.hi => {
                cx.advance();
                true
            }
            _ => {
                cx.record_failure(cx.current());
                false
            }
        }
    }
}

pub fn range<S>(bounds: RangeInclusive<S>) -> Pattern<SymRange<S>> {
    let (lo, hi) = bounds.into_inner();
    Pattern::new(SymRange { lo, hi })
}

/// Matches one symbol contained in a set.
#[derive(Clone)]
pub struct OneOf<S> {
    values: Box<[S]>,
}

impl<S: fmt::Debug> FmtParser for OneOf<S> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        write!(f, "one_of({:?})", self.values)
    }
}

impl<S, T> Parse<S, T> for OneOf<S>
where
    S: PartialEq + fmt::Debug,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        match cx.symbol() {
            Some(s) if self.values.iter().any(|v| v == s) => {
                cx.advance();
                true
            }
            _ => {
                cx.record_failure(cx.current());
                false
            }
        }
    }
}

pub fn one_of<S>(values: impl IntoSymbols<S>) -> Pattern<OneOf<S>> {
    Pattern::new(OneOf {
        values: values.into_symbols(),
    })
}

/// Matches a fixed sequence of symbols, consuming all of it or nothing.
#[derive(Clone)]
pub struct Literal<S> {
    symbols: Box<[S]>,
}

impl<S: fmt::Debug> FmtParser for Literal<S> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        write!(f, "lit({:?})", self.symbols)
    }
}

impl<S, T> Parse<S, T> for Literal<S>
where
    S: PartialEq + fmt::Debug,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        for expected in self.symbols.iter() {
            match cx.symbol() {
                Some(s) if s == expected => {
                    cx.advance();
                }
                _ => {
                    cx.record_failure(cx.current());
                    cx.restore(start);
                    return false;
                }
            }
        }
        true
    }
}

pub fn lit<S>(symbols: impl IntoSymbols<S>) -> Pattern<Literal<S>> {
    Pattern::new(Literal {
        symbols: symbols.into_symbols(),
    })
}

/// Matches the end of input without consuming anything.
#[derive(Clone)]
pub struct End;

impl FmtParser for End {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        f.write_str("end()")
    }
}

impl<S, T> Parse<S, T> for End {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        if cx.at_end() {
            true
        } else {
            cx.record_failure(cx.current());
            false
        }
    }
}

pub fn end() -> Pattern<End> {
    Pattern::new(End)
}

impl IntoPattern for char {
    type Parser = Sym<char>;

    fn into_pattern(self) -> Pattern<Sym<char>> {
        sym(self)
    }
}

impl IntoPattern for &str {
    type Parser = Literal<char>;

    fn into_pattern(self) -> Pattern<Literal<char>> {
        lit(self)
    }
}
