/*!
 * PEG parser combinators with support for direct left recursion.
 *
 * A grammar is a [`Pattern`] built from terminals and composed with `+`
 * (sequence), `|` (ordered choice), `!` / [`not`](pattern::not) (negative
 * lookahead), [`peek`](pattern::peek) (lookahead) and the
 * `mark`/`opt`/`zero_or_more`/`one_or_more` methods. [`Rule`] handles allow
 * forward declaration and self reference; a rule whose body refers to itself
 * at its left edge is parsed by a seed/grow fixpoint instead of diverging, so
 * `expr <- expr '+' term | term` accepts `1+2+3` left-associatively.
 *
 * ```
 * use lrpeg::{pattern::patterns::*, Input, Rule};
 *
 * let expr = Rule::named("expr");
 * expr.set((&expr + '+' + range('0'..='9') | range('0'..='9')).mark("expr"));
 *
 * let chars: Vec<char> = "1+2+3".chars().collect();
 * let out = expr.parse(Input::text(&chars));
 * assert!(out.ok);
 * ```
 *
 * Running a grammar yields an [`Outcome`]: a verdict, the final position, the
 * furthest position any attempt failed at, and a flat log of [`Match`] spans
 * from which a parse tree can be rebuilt.
 */
pub mod context;
pub mod input;
pub mod outcome;
pub mod pattern;
pub mod rule;
pub(crate) mod utils;

pub use context::{Checkpoint, LeftRecursion, Match, ParseContext};
pub use input::{Input, Pos};
pub use outcome::{Outcome, ParseFailure, ParseOptions};
pub use pattern::{Parse, Pattern};
pub use rule::{Rule, RuleRef};
