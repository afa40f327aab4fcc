/*!
 * Named grammar rules. A rule is created first and given its body afterwards,
 * so grammars can refer to rules before they are defined, including to the
 * rule being defined. Rule dispatch owns the seed/grow machinery that makes
 * directly left-recursive rules parse with left-associative results.
 */
use core::fmt;
use core::ops::{Add, BitOr};
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use crate::context::{LeftRecursion, LrKey, LrPhase, ParseContext, RuleId};
use crate::input::Input;
use crate::outcome::{run, Outcome, ParseOptions};
use crate::pattern::{
    lit, sym, DebugPrecedence, FmtParser, IntoPattern, Literal, OrElse, Parse, Pattern, Sym, Then,
};

struct RuleInner<S, T> {
    name: Option<&'static str>,
    body: OnceCell<Box<dyn Parse<S, T> + Send + Sync>>,
}

/// A named handle to a parser, assigned in two phases: `Rule::new()` (or
/// [`Rule::named`]) creates the identity, [`Rule::set`] installs the body.
/// Grammar expressions reference the rule through `&rule` operands, which
/// hold the body weakly; the handle must stay alive for the duration of any
/// parse that reaches it.
pub struct Rule<S, T> {
    inner: Arc<RuleInner<S, T>>,
}

impl<S, T> Clone for Rule<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T> Default for Rule<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> fmt::Debug for Rule<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.inner.name)
            .field("defined", &self.inner.body.get().is_some())
            .finish()
    }
}

impl<S, T> Rule<S, T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RuleInner {
                name: None,
                body: OnceCell::new(),
            }),
        }
    }

    /// A rule carrying a name for `Debug` output and grammar-error panics.
    pub fn named(name: &'static str) -> Self {
        Self {
            inner: Arc::new(RuleInner {
                name: Some(name),
                body: OnceCell::new(),
            }),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        self.inner.name
    }

    fn display_name(&self) -> &'static str {
        self.inner.name.unwrap_or("?")
    }

    /// Installs the rule body. Assigning a body twice is a programmer error
    /// and panics.
    pub fn set<P>(&self, body: Pattern<P>)
    where
        P: Parse<S, T> + Send + Sync + 'static,
    {
        let body: Box<dyn Parse<S, T> + Send + Sync> = Box::new(body);
        if self.inner.body.set(body).is_err() {
            panic!("rule `{}` already has a body", self.display_name());
        }
    }

    fn make_ref(&self) -> RuleRef<S, T> {
        RuleRef {
            target: Arc::downgrade(&self.inner),
            name: self.inner.name,
        }
    }

    /// Runs this rule as the grammar root with default options.
    pub fn parse(&self, input: Input<'_, S>) -> Outcome<T> {
        self.parse_with(input, &ParseOptions::default())
    }

    pub fn parse_with(&self, input: Input<'_, S>, options: &ParseOptions) -> Outcome<T> {
        run(&self.make_ref(), input, options)
    }
}

/// A weak reference to a rule, stored inside grammar expressions. Cycles
/// between rules therefore never leak; parsing through a reference whose
/// rule handle was dropped is a programmer error and panics.
pub struct RuleRef<S, T> {
    target: Weak<RuleInner<S, T>>,
    name: Option<&'static str>,
}

impl<S, T> Clone for RuleRef<S, T> {
    fn clone(&self) -> Self {
        Self {
            target: Weak::clone(&self.target),
            name: self.name,
        }
    }
}

impl<S, T> RuleRef<S, T> {
    fn display_name(&self) -> &'static str {
        self.name.unwrap_or("?")
    }

    fn target(&self) -> Arc<RuleInner<S, T>> {
        self.target.upgrade().unwrap_or_else(|| {
            panic!(
                "rule `{}` was dropped while a grammar using it is still parsed",
                self.display_name()
            )
        })
    }
}

impl<S, T> FmtParser for RuleRef<S, T> {
    fn fmt_parser(&self, f: &mut fmt::Formatter, _: DebugPrecedence) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => f.write_str("<rule>"),
        }
    }
}

impl<S, T> Parse<S, T> for RuleRef<S, T> {
    /// Rule dispatch. Besides resolving the reference, this is where left
    /// recursion is recognized and driven to its fixpoint:
    ///
    /// - First entry at a position seeds: the body parses with re-entry at
    ///   the same position failing, so ordered choice settles on the first
    ///   non-recursive alternative.
    /// - If the seed consumed input and was re-entered, the accepted span is
    ///   grown: the body re-parses from the start position with re-entry now
    ///   succeeding by jumping over the best span so far, until an attempt
    ///   stops improving.
    fn parse(&self, cx: &mut ParseContext<'_, S, T>) -> bool {
        let inner = self.target();
        let body = inner.body.get().unwrap_or_else(|| {
            panic!("rule `{}` has no body; call set() first", self.display_name())
        });
        let start = cx.current();
        let key = LrKey {
            rule: RuleId(Arc::as_ptr(&inner) as *const () as usize),
            at: start.offset(),
        };

        match cx.lr_phase(key) {
            Some(LrPhase::Grow) => {
                // Recursion point during growth: accept the best span parsed
                // so far. Its matches are already in the log.
                let best_end = cx.lr_best_end(key);
                cx.jump(best_end);
                cx.lr_set_resolved(key, true);
                true
            }
            Some(LrPhase::Seed) => {
                if let Some(other) = cx.lr_intervening_seed(key) {
                    panic!(
                        "indirect left recursion between rule `{}` and rule `{}` at {}",
                        self.display_name(),
                        other,
                        start,
                    );
                }
                cx.lr_mark_hit(key);
                cx.record_failure(start);
                false
            }
            None => {
                let start_match_len = cx.match_count();
                cx.lr_insert_seed(key, self.display_name());
                if !body.parse(cx) {
                    cx.lr_remove(key);
                    return false;
                }
                if cx.current() == start || !cx.lr_was_hit(key) {
                    // Nothing consumed, or the body never recursed here:
                    // there is no span to grow.
                    cx.lr_remove(key);
                    return true;
                }

                let mut best = cx.checkpoint();
                cx.lr_begin_grow(key, best.position());
                let lr = LeftRecursion::new(key, start, start_match_len);
                loop {
                    cx.lr_set_resolved(key, false);
                    cx.jump(start);
                    let improved = body.parse_extend(cx, &lr)
                        && cx.lr_resolved(key)
                        && cx.current() > best.position();
                    if improved {
                        best = cx.checkpoint();
                        cx.lr_update_best(key, best.position());
                    } else {
                        cx.restore(best);
                        break;
                    }
                }
                cx.lr_remove(key);
                true
            }
        }
    }
}

impl<'r, S, T> IntoPattern for &'r Rule<S, T> {
    type Parser = RuleRef<S, T>;

    fn into_pattern(self) -> Pattern<RuleRef<S, T>> {
        Pattern::new(self.make_ref())
    }
}

impl<'r, S, T, B> Add<Pattern<B>> for &'r Rule<S, T> {
    type Output = Pattern<Then<RuleRef<S, T>, B>>;

    fn add(self, rhs: Pattern<B>) -> Self::Output {
        self.into_pattern() + rhs
    }
}

impl<'r, S, T, A> Add<&'r Rule<S, T>> for Pattern<A> {
    type Output = Pattern<Then<A, RuleRef<S, T>>>;

    fn add(self, rhs: &'r Rule<S, T>) -> Self::Output {
        self + rhs.into_pattern()
    }
}

impl<'a, 'b, S, T> Add<&'b Rule<S, T>> for &'a Rule<S, T> {
    type Output = Pattern<Then<RuleRef<S, T>, RuleRef<S, T>>>;

    fn add(self, rhs: &'b Rule<S, T>) -> Self::Output {
        self.into_pattern() + rhs.into_pattern()
    }
}

impl<'r, T> Add<char> for &'r Rule<char, T> {
    type Output = Pattern<Then<RuleRef<char, T>, Sym<char>>>;

    fn add(self, rhs: char) -> Self::Output {
        self.into_pattern() + sym(rhs)
    }
}

impl<'r, T> Add<&'r Rule<char, T>> for char {
    type Output = Pattern<Then<Sym<char>, RuleRef<char, T>>>;

    fn add(self, rhs: &'r Rule<char, T>) -> Self::Output {
        sym(self) + rhs.into_pattern()
    }
}

impl<'r, T> Add<&'static str> for &'r Rule<char, T> {
    type Output = Pattern<Then<RuleRef<char, T>, Literal<char>>>;

    fn add(self, rhs: &'static str) -> Self::Output {
        self.into_pattern() + lit(rhs)
    }
}

impl<'r, T> Add<&'r Rule<char, T>> for &'static str {
    type Output = Pattern<Then<Literal<char>, RuleRef<char, T>>>;

    fn add(self, rhs: &'r Rule<char, T>) -> Self::Output {
        lit(self) + rhs.into_pattern()
    }
}

impl<'r, S, T, B> BitOr<Pattern<B>> for &'r Rule<S, T> {
    type Output = Pattern<OrElse<RuleRef<S, T>, B>>;

    fn bitor(self, rhs: Pattern<B>) -> Self::Output {
        self.into_pattern() | rhs
    }
}

impl<'r, S, T, A> BitOr<&'r Rule<S, T>> for Pattern<A> {
    type Output = Pattern<OrElse<A, RuleRef<S, T>>>;

    fn bitor(self, rhs: &'r Rule<S, T>) -> Self::Output {
        self | rhs.into_pattern()
    }
}

impl<'a, 'b, S, T> BitOr<&'b Rule<S, T>> for &'a Rule<S, T> {
    type Output = Pattern<OrElse<RuleRef<S, T>, RuleRef<S, T>>>;

    fn bitor(self, rhs: &'b Rule<S, T>) -> Self::Output {
        self.into_pattern() | rhs.into_pattern()
    }
}

impl<'r, T> BitOr<char> for &'r Rule<char, T> {
    type Output = Pattern<OrElse<RuleRef<char, T>, Sym<char>>>;

    fn bitor(self, rhs: char) -> Self::Output {
        self.into_pattern() | sym(rhs)
    }
}

impl<'r, T> BitOr<&'r Rule<char, T>> for char {
    type Output = Pattern<OrElse<Sym<char>, RuleRef<char, T>>>;

    fn bitor(self, rhs: &'r Rule<char, T>) -> Self::Output {
        sym(self) | rhs.into_pattern()
    }
}

impl<'r, T> BitOr<&'static str> for &'r Rule<char, T> {
    type Output = Pattern<OrElse<RuleRef<char, T>, Literal<char>>>;

    fn bitor(self, rhs: &'static str) -> Self::Output {
        self.into_pattern() | lit(rhs)
    }
}

impl<'r, T> BitOr<&'r Rule<char, T>> for &'static str {
    type Output = Pattern<OrElse<Literal<char>, RuleRef<char, T>>>;

    fn bitor(self, rhs: &'r Rule<char, T>) -> Self::Output {
        lit(self) | rhs.into_pattern()
    }
}
