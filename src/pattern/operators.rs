use core::fmt;
use core::ops::{Add, BitOr};

use crate::context::{LeftRecursion, ParseContext};

use super::terminals::{lit, sym, Literal, Sym};
use super::traits::{DebugPrecedence, FmtParser, Parse};
use super::Pattern;

/// Runs two parsers in order; both must succeed.
#[derive(Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A: FmtParser, B: FmtParser> FmtParser for Then<A, B> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Seq, f, |f| {
            self.first.fmt_parser(f, DebugPrecedence::Seq)?;
            f.write_str(" + ")?;
            self.second.fmt_parser(f, DebugPrecedence::Seq)
        })
    }
}

impl<S, T, A, B> Parse<S, T> for Then<A, B>
where
    A: Parse<S, T>,
    B: Parse<S, T>,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        if self.first.parse(cx) && self.second.parse(cx) {
            true
        } else {
            cx.restore(start);
            false
        }
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        // Only the head of a sequence stays on the left spine.
        let start = cx.checkpoint();
        if self.first.parse_extend(cx, lr) && self.second.parse(cx) {
            true
        } else {
            cx.restore(start);
            false
        }
    }
}

/// Ordered choice: tries the left parser and falls back to the right one.
#[derive(Clone)]
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A: FmtParser, B: FmtParser> FmtParser for OrElse<A, B> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Or, f, |f| {
            self.first.fmt_parser(f, DebugPrecedence::Or)?;
            f.write_str(" | ")?;
            self.second.fmt_parser(f, DebugPrecedence::Or)
        })
    }
}

impl<S, T, A, B> Parse<S, T> for OrElse<A, B>
where
    A: Parse<S, T>,
    B: Parse<S, T>,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        if self.first.parse(cx) {
            return true;
        }
        cx.restore(start);
        if self.second.parse(cx) {
            return true;
        }
        cx.restore(start);
        false
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        // Each alternative gets a fresh answer to "did this attempt reach the
        // recursion point", so alternatives that never recurse still count on
        // their own merits.
        let start = cx.checkpoint();
        cx.lr_set_resolved(lr.key, false);
        if self.first.parse_extend(cx, lr) {
            return true;
        }
        cx.restore(start);
        cx.lr_set_resolved(lr.key, false);
        if self.second.parse_extend(cx, lr) {
            return true;
        }
        cx.restore(start);
        false
    }
}

pub(crate) fn then<A, B>(first: A, second: B) -> Pattern<Then<A, B>> {
    Pattern::new(Then { first, second })
}

pub(crate) fn or_else<A, B>(first: A, second: B) -> Pattern<OrElse<A, B>> {
    Pattern::new(OrElse { first, second })
}

impl<A, B> Add<Pattern<B>> for Pattern<A> {
    type Output = Pattern<Then<A, B>>;

    fn add(self, rhs: Pattern<B>) -> Self::Output {
        then(self.into_inner(), rhs.into_inner())
    }
}

impl<A, B> BitOr<Pattern<B>> for Pattern<A> {
    type Output = Pattern<OrElse<A, B>>;

    fn bitor(self, rhs: Pattern<B>) -> Self::Output {
        or_else(self.into_inner(), rhs.into_inner())
    }
}

impl<A> Add<char> for Pattern<A> {
    type Output = Pattern<Then<A, Sym<char>>>;

    fn add(self, rhs: char) -> Self::Output {
        self + sym(rhs)
    }
}

impl<A> Add<Pattern<A>> for char {
    type Output = Pattern<Then<Sym<char>, A>>;

    fn add(self, rhs: Pattern<A>) -> Self::Output {
        sym(self) + rhs
    }
}

impl<A> Add<&'static str> for Pattern<A> {
    type Output = Pattern<Then<A, Literal<char>>>;

    fn add(self, rhs: &'static str) -> Self::Output {
        self + lit(rhs)
    }
}

impl<A> Add<Pattern<A>> for &'static str {
    type Output = Pattern<Then<Literal<char>, A>>;

    fn add(self, rhs: Pattern<A>) -> Self::Output {
        lit(self) + rhs
    }
}

impl<A> BitOr<char> for Pattern<A> {
    type Output = Pattern<OrElse<A, Sym<char>>>;

    fn bitor(self, rhs: char) -> Self::Output {
        self | sym(rhs)
    }
}

impl<A> BitOr<Pattern<A>> for char {
    type Output = Pattern<OrElse<Sym<char>, A>>;

    fn bitor(self, rhs: Pattern<A>) -> Self::Output {
        sym(self) | rhs
    }
}

impl<A> BitOr<&'static str> for Pattern<A> {
    type Output = Pattern<OrElse<A, Literal<char>>>;

    fn bitor(self, rhs: &'static str) -> Self::Output {
        self | lit(rhs)
    }
}

impl<A> BitOr<Pattern<A>> for &'static str {
    type Output = Pattern<OrElse<Literal<char>, A>>;

    fn bitor(self, rhs: Pattern<A>) -> Self::Output {
        lit(self) | rhs
    }
}
