use core::fmt;
use core::ops::Not;

use crate::context::ParseContext;

use super::traits::{DebugPrecedence, FmtParser, IntoPattern, Parse};
use super::Pattern;

/// Zero-width lookahead: succeeds when `inner` would match here. All of the
/// probe's effects are discarded, including any matches it appended.
#[derive(Clone)]
pub struct Peek<P> {
    inner: P,
}

impl<P: FmtParser> FmtParser for Peek<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        f.write_str("peek(")?;
        self.inner.fmt_parser(f, DebugPrecedence::Initial)?;
        f.write_str(")")
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for Peek<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        let matched = self.inner.parse(cx);
        cx.restore(start);
        matched
    }
}

/// Zero-width negative lookahead: succeeds when `inner` would not match here.
#[derive(Clone)]
pub struct Reject<P> {
    inner: P,
}

impl<P: FmtParser> FmtParser for Reject<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        f.write_str("!")?;
        self.inner.fmt_parser(f, DebugPrecedence::Atom)
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for Reject<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        let matched = self.inner.parse(cx);
        cx.restore(start);
        if matched {
            cx.record_failure(start.position());
            false
        } else {
            true
        }
    }
}

pub fn peek<X: IntoPattern>(inner: X) -> Pattern<Peek<X::Parser>> {
    Pattern::new(Peek {
        inner: inner.into_pattern().into_inner(),
    })
}

pub fn not<X: IntoPattern>(inner: X) -> Pattern<Reject<X::Parser>> {
    Pattern::new(Reject {
        inner: inner.into_pattern().into_inner(),
    })
}

impl<P> Not for Pattern<P> {
    type Output = Pattern<Reject<P>>;

    fn not(self) -> Self::Output {
        Pattern::new(Reject {
            inner: self.into_inner(),
        })
    }
}
