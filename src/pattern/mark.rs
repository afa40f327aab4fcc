use core::fmt;

use crate::context::{LeftRecursion, ParseContext};

use super::traits::{DebugPrecedence, FmtParser, Parse};
use super::Pattern;

/// Appends a tagged match covering whatever `inner` consumed. The match's
/// `child_count` is the number of match-tree roots `inner` left in the log.
#[derive(Clone)]
pub struct Mark<P, T> {
    inner: P,
    id: T,
}

impl<P: FmtParser, T: fmt::Debug> FmtParser for Mark<P, T> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, prec: DebugPrecedence) -> fmt::Result {
        prec.wrap_below(DebugPrecedence::Postfix, f, |f| {
            self.inner.fmt_parser(f, DebugPrecedence::Postfix)?;
            write!(f, ".mark({:?})", self.id)
        })
    }
}

impl<S, T, P> Parse<S, T> for Mark<P, T>
where
    P: Parse<S, T>,
    T: Clone + fmt::Debug,
{
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let begin = cx.current();
        let match_len = cx.match_count();
        if self.inner.parse(cx) {
            let child_count = cx.roots_since(match_len);
            let end = cx.current();
            cx.append_match(self.id.clone(), begin, end, child_count);
            true
        } else {
            false
        }
    }

    /// While a recursive rule extends its span, the mark on the left spine
    /// covers the whole accepted span: it begins at the rule's original entry
    /// position and counts children from the log length at that entry, which
    /// includes the matches retained from the best iteration so far.
    fn parse_extend(&self, cx: &mut ParseContext<'_, S, T>, lr: &LeftRecursion) -> bool {
        if self.inner.parse_extend(cx, lr) {
            let child_count = cx.roots_since(lr.start_match_len());
            let end = cx.current();
            cx.append_match(self.id.clone(), lr.start(), end, child_count);
            true
        } else {
            false
        }
    }
}

impl<P> Pattern<P> {
    /// Tags this parser: on success a match record with `id` is appended.
    pub fn mark<T>(self, id: T) -> Pattern<Mark<P, T>> {
        Pattern::new(Mark {
            inner: self.into_inner(),
            id,
        })
    }
}
