use core::fmt;

use crate::context::{LeftRecursion, ParseContext};

use super::traits::{DebugPrecedence, FmtParser, Parse};
use super::Pattern;

/// Repeats `parser` while it succeeds and moves the cursor. A success that
/// consumes nothing keeps its effects and ends the loop, so non-consuming
/// children cannot spin forever.
fn parse_remaining<S, T, P: Parse<S, T>>(parser: &P, cx: &mut ParseContext<'_, S, T>) {
    loop {
        let rep = cx.checkpoint();
        if !parser.parse(cx) {
            cx.restore(rep);
            break;
        }
        if cx.current() == rep.position() {
            break;
        }
    }
}

/// Matches any number of repetitions, including none.
#[derive(Clone)]
pub struct ZeroOrMore<P> {
    inner: P,
}

impl<P: FmtParser> FmtParser for ZeroOrMore<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Postfix, f, |f| {
            self.inner.fmt_parser(f, DebugPrecedence::Postfix)?;
            f.write_str("*")
        })
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for ZeroOrMore<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        parse_remaining(&self.inner, cx);
        true
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        let rep = cx.checkpoint();
        if !self.inner.parse_extend(cx, lr) {
            cx.restore(rep);
            return true;
        }
        if cx.current() == rep.position() {
            return true;
        }
        parse_remaining(&self.inner, cx);
        true
    }
}

/// Matches at least one repetition.
#[derive(Clone)]
pub struct OneOrMore<P> {
    inner: P,
}

impl<P: FmtParser> FmtParser for OneOrMore<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Postfix, f, |f| {
            self.inner.fmt_parser(f, DebugPrecedence::Postfix)?;
            f.write_str("+")
        })
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for OneOrMore<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let first = cx.checkpoint();
        if !self.inner.parse(cx) {
            cx.restore(first);
            return false;
        }
        if cx.current() == first.position() {
            return true;
        }
        parse_remaining(&self.inner, cx);
        true
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        let first = cx.checkpoint();
        if !self.inner.parse_extend(cx, lr) {
            cx.restore(first);
            return false;
        }
        if cx.current() == first.position() {
            return true;
        }
        parse_remaining(&self.inner, cx);
        true
    }
}

/// Matches zero or one occurrence; never fails.
#[derive(Clone)]
pub struct Opt<P> {
    inner: P,
}

impl<P: FmtParser> FmtParser for Opt<P> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Postfix, f, |f| {
            self.inner.fmt_parser(f, DebugPrecedence::Postfix)?;
            f.write_str("?")
        })
    }
}

impl<S, T, P: Parse<S, T>> Parse<S, T> for Opt<P> {
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let start = cx.checkpoint();
        if !self.inner.parse(cx) {
            cx.restore(start);
        }
        true
    }

    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        let start = cx.checkpoint();
        if !self.inner.parse_extend(cx, lr) {
            cx.restore(start);
        }
        true
    }
}

impl<P> Pattern<P> {
    pub fn zero_or_more(self) -> Pattern<ZeroOrMore<P>> {
        Pattern::new(ZeroOrMore {
            inner: self.into_inner(),
        })
    }

    pub fn one_or_more(self) -> Pattern<OneOrMore<P>> {
        Pattern::new(OneOrMore {
            inner: self.into_inner(),
        })
    }

    pub fn opt(self) -> Pattern<Opt<P>> {
        Pattern::new(Opt {
            inner: self.into_inner(),
        })
    }
}
