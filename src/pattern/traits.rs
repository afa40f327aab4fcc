use core::fmt;

use either::Either;

use crate::context::{LeftRecursion, ParseContext};
use crate::utils::{simple_name, DebugFn};

use super::Pattern;

/// Debug rendering for parsers, precedence-aware so composite grammars print
/// with the same operators they were built from.
pub trait FmtParser {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        let _ = prec;
        f.write_str(simple_name::<Self>())
    }

    fn as_debug(&self, prec: DebugPrecedence) -> impl fmt::Debug + '_
    where
        Self: Sized,
    {
        DebugFn(move |f| self.fmt_parser(f, prec))
    }
}

/// A parser over symbols of type `S`, emitting matches tagged with `T`.
///
/// `parse` either succeeds with the context position advanced by zero or more
/// symbols and the match log extended, or fails with both restored to their
/// values at the call; only the furthest-failure position survives a failed
/// attempt.
///
/// `parse_extend` is the left-recursion continuation path: while a rule is
/// extending an accepted span, the call travels down the left spine of its
/// body so that sequence heads stay on it, ordered choice can re-arm the
/// recursion detection per alternative, and marks can span from the original
/// entry position. Everything off the left spine parses normally, which is
/// what the default implementation does.
pub trait Parse<S, T>: FmtParser {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool;

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        let _ = lr;
        self.parse(cx)
    }
}

impl<P: FmtParser + ?Sized> FmtParser for &P {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        (**self).fmt_parser(f, prec)
    }
}

impl<S, T, P: Parse<S, T> + ?Sized> Parse<S, T> for &P {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        (**self).parse(cx)
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        (**self).parse_extend(cx, lr)
    }
}

impl<P: FmtParser + ?Sized> FmtParser for Box<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        (**self).fmt_parser(f, prec)
    }
}

impl<S, T, P: Parse<S, T> + ?Sized> Parse<S, T> for Box<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        (**self).parse(cx)
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        (**self).parse_extend(cx, lr)
    }
}

impl<L: FmtParser, R: FmtParser> FmtParser for Either<L, R> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        match self {
            Either::Left(l) => l.fmt_parser(f, prec),
            Either::Right(r) => r.fmt_parser(f, prec),
        }
    }
}

impl<S, T, L, R> Parse<S, T> for Either<L, R>
where
    L: Parse<S, T>,
    R: Parse<S, T>,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        match self {
            Either::Left(l) => l.parse(cx),
            Either::Right(r) => r.parse(cx),
        }
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        match self {
            Either::Left(l) => l.parse_extend(cx, lr),
            Either::Right(r) => r.parse_extend(cx, lr),
        }
    }
}

/// Conversion into a [`Pattern`]; lets `char` and `&str` operands appear where
/// a grammar expects a parser. The conversion is structural; whether the
/// resulting parser suits a given symbol and tag type is checked where it is
/// used.
pub trait IntoPattern {
    type Parser;

    fn into_pattern(self) -> Pattern<Self::Parser>;
}

impl<P> IntoPattern for Pattern<P> {
    type Parser = P;

    fn into_pattern(self) -> Pattern<P> {
        self
    }
}

/// Conversion into an owned symbol sequence for literal parsers.
pub trait IntoSymbols<S> {
    fn into_symbols(self) -> Box<[S]>;
}

impl IntoSymbols<char> for &str {
    fn into_symbols(self) -> Box<[char]> {
        self.chars().collect()
    }
}

impl<S: Clone> IntoSymbols<S> for &[S] {
    fn into_symbols(self) -> Box<[S]> {
        self.into()
    }
}

impl<S> IntoSymbols<S> for Vec<S> {
    fn into_symbols(self) -> Box<[S]> {
        self.into_boxed_slice()
    }
}

impl<S, const N: usize> IntoSymbols<S> for [S; N] {
    fn into_symbols(self) -> Box<[S]> {
        Vec::from(self).into_boxed_slice()
    }
}

/// Binding strength of the grammar operators, loosest last. Used by
/// [`FmtParser`] implementations to decide when a sub-expression needs
/// parentheses.
#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugPrecedence {
    Atom,
    Postfix,
    Seq,
    Or,
    #[default]
    Initial,
}

impl DebugPrecedence {
    pub(crate) fn wrap_below(
        self,
        prec: DebugPrecedence,
        f: &mut fmt::Formatter,
        block: impl FnOnce(&mut fmt::Formatter) -> fmt::Result,
    ) -> fmt::Result {
        if self < prec {
            f.write_str("(")?;
            block(f)?;
            f.write_str(")")
        } else {
            block(f)
        }
    }
}
