use std::collections::VecDeque;
use std::iter;

use crate::grid::Position;

/// Ordered snake body, head first.
///
/// The head is stored apart from the rest of the body so a snake can never be
/// empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            head: start,
            body: VecDeque::new(),
        }
    }

    /// Creates a snake from explicit segments, head first.
    ///
    /// Returns `None` when `segments` is empty.
    #[must_use]
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut segments = segments.into_iter();
        let head = segments.next()?;
        Some(Self {
            head,
            body: segments.collect(),
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Returns the last segment; for a one-cell snake this is the head.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments().any(|segment| segment == position)
    }

    /// Returns true if moving the head onto `next_head` would hit the body.
    ///
    /// When the snake is not growing its tail vacates its cell in the same
    /// move, so the current tail cell is free to enter.
    #[must_use]
    pub fn would_collide(&self, next_head: Position, growing: bool) -> bool {
        let occupied = if growing { self.len() } else { self.len() - 1 };
        self.segments().take(occupied).any(|segment| segment == next_head)
    }

    /// Moves the head onto `next_head`, dropping the tail unless `grow` is set.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(self.head);
        self.head = next_head;
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always false: a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Returns a copy of the segments, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.segments().collect()
    }
}
