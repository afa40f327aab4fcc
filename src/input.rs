use core::cmp::Ordering;
use core::fmt;

/// A read-only view over a slice of symbols, optionally equipped with a
/// newline predicate that drives line/column bookkeeping.
///
/// The view itself is `Copy`; it borrows the symbols for the duration of a
/// parse. Positions produced by one view are only meaningful with that view.
pub struct Input<'s, S> {
    symbols: &'s [S],
    newline: Option<fn(&S) -> bool>,
}

impl<'s, S> Clone for Input<'s, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'s, S> Copy for Input<'s, S> {}

impl<'s, S> Input<'s, S> {
    /// Wraps a symbol slice without line tracking; every position reports
    /// line 1 and column `offset + 1`.
    pub fn new(symbols: &'s [S]) -> Self {
        Self {
            symbols,
            newline: None,
        }
    }

    /// Wraps a symbol slice with a custom newline predicate. Consuming a
    /// symbol the predicate accepts advances the line counter and resets the
    /// column to 1.
    pub fn with_newline(symbols: &'s [S], newline: fn(&S) -> bool) -> Self {
        Self {
            symbols,
            newline: Some(newline),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The position of the first symbol.
    pub fn begin(&self) -> Pos {
        Pos {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// True if `pos` is the end sentinel (one past the last symbol).
    pub fn is_end(&self, pos: Pos) -> bool {
        pos.offset >= self.symbols.len()
    }

    /// The symbol under `pos`, or `None` at the end sentinel.
    pub fn get(&self, pos: Pos) -> Option<&'s S> {
        self.symbols.get(pos.offset)
    }

    /// The position after consuming the symbol under `pos`.
    ///
    /// Must not be called on the end sentinel.
    pub fn next(&self, pos: Pos) -> Pos {
        debug_assert!(pos.offset < self.symbols.len());
        let is_newline = match self.newline {
            Some(pred) => pred(&self.symbols[pos.offset]),
            None => false,
        };
        if is_newline {
            Pos {
                offset: pos.offset + 1,
                line: pos.line + 1,
                column: 1,
            }
        } else {
            Pos {
                offset: pos.offset + 1,
                line: pos.line,
                column: pos.column + 1,
            }
        }
    }
}

impl<'s> Input<'s, char> {
    /// Character input with the `'\n'` newline predicate.
    pub fn text(symbols: &'s [char]) -> Self {
        Self::with_newline(symbols, |c| *c == '\n')
    }
}

/// A cursor into an [`Input`]. Carries the line and column it was advanced
/// through; ordering and equality compare the offset alone.
#[derive(Clone, Copy, Debug)]
pub struct Pos {
    offset: usize,
    line: u32,
    column: u32,
}

impl Pos {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl PartialEq for Pos {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Pos {}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[test]
fn line_column_tracking() {
    let chars: Vec<char> = "ab\ncd".chars().collect();
    let input = Input::text(&chars);
    let mut pos = input.begin();
    assert_eq!((pos.line(), pos.column()), (1, 1));
    pos = input.next(pos); // past 'a'
    assert_eq!((pos.line(), pos.column()), (1, 2));
    pos = input.next(pos); // past 'b'
    pos = input.next(pos); // past '\n'
    assert_eq!((pos.line(), pos.column()), (2, 1));
    pos = input.next(pos); // past 'c'
    assert_eq!((pos.offset(), pos.line(), pos.column()), (4, 2, 2));
}

#[test]
fn untracked_input_stays_on_line_one() {
    let symbols = [10u8, 20, 30];
    let input = Input::new(&symbols);
    let mut pos = input.begin();
    pos = input.next(pos);
    pos = input.next(pos);
    assert_eq!((pos.offset(), pos.line(), pos.column()), (2, 1, 3));
}
