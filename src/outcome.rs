/*!
 * Running a grammar over an input and reporting the result.
 */
use core::fmt;

use crate::context::{Match, ParseContext};
use crate::input::{Input, Pos};
use crate::pattern::Parse;

/// Options recognized by the parse entry points.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Fail the outcome when the root succeeds without consuming the whole
    /// input. Defaults to true.
    pub require_full_input: bool,
    /// Capacity hint for the match log. Defaults to 0.
    pub preallocate_log: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_full_input: true,
            preallocate_log: 0,
        }
    }
}

/// The result of running a grammar: verdict, final position, the rightmost
/// position any attempt failed at, and the match log in append order.
#[derive(Clone, Debug)]
pub struct Outcome<T> {
    pub ok: bool,
    pub end: Pos,
    pub furthest_failure: Pos,
    pub matches: Vec<Match<T>>,
}

impl<T> Outcome<T> {
    /// Converts into a `Result`, keeping the match log on success and the
    /// furthest-failure position on failure.
    pub fn into_result(self) -> Result<Vec<Match<T>>, ParseFailure> {
        if self.ok {
            Ok(self.matches)
        } else {
            Err(ParseFailure {
                position: self.furthest_failure,
            })
        }
    }
}

/// A failed parse, reported at the furthest position any alternative reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseFailure {
    pub position: Pos,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse failed at line {}, column {} (offset {})",
            self.position.line(),
            self.position.column(),
            self.position.offset(),
        )
    }
}

impl std::error::Error for ParseFailure {}

pub(crate) fn run<S, T, P: Parse<S, T>>(
    parser: &P,
    input: Input<'_, S>,
    options: &ParseOptions,
) -> Outcome<T> {
    let mut cx = ParseContext::with_log_capacity(input, options.preallocate_log);
    let mut ok = parser.parse(&mut cx);
    if ok && options.require_full_input && !cx.at_end() {
        let stop = cx.current();
        cx.record_failure(stop);
        ok = false;
    }
    let end = cx.current();
    let furthest_failure = cx.furthest_failure();
    Outcome {
        ok,
        end,
        furthest_failure,
        matches: cx.into_matches(),
    }
}
