use std::{collections::HashSet, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::grid::{self, Coordinate, GridInt};
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit displacement. Right and Down increment, Left and Up decrement.
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "top" => Ok(Up),
            "down" | "bottom" => Ok(Down),
            "left" => Ok(Left),
            "right" => Ok(Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// The creature's cells in tail-to-head order: index 0 is the tail and the
/// last cell is the head. Every move produces a new `Snake`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Coordinate>,
}

impl Snake {
    pub fn new(body: Vec<Coordinate>) -> Self {
        Snake { body }
    }

    /// The opening body: three cells along the top row, head on the right.
    pub fn initial() -> Self {
        Snake::new(vec![Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0)])
    }

    pub fn body(&self) -> &[Coordinate] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Option<Coordinate> {
        self.body.last().copied()
    }

    pub fn tail(&self) -> Option<Coordinate> {
        self.body.first().copied()
    }

    pub fn contains(&self, cell: &Coordinate) -> bool {
        self.body.iter().any(|c| grid::equals(c, cell))
    }

    /// Shifts every cell one place towards the tail and puts the next head
    /// cell at the front. The old tail drops off, so the length is kept.
    pub fn advance(&self, direction: Direction, grid_size: GridInt) -> Snake {
        let head = match self.head() {
            Some(head) => head,
            None => return self.clone(),
        };

        let (dx, dy) = direction.delta();
        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.extend_from_slice(&self.body[1..]);
        body.push(head.offset(dx, dy, grid_size));

        Snake { body }
    }

    /// Adds one cell behind the tail, against the movement axis, so the head
    /// keeps its trajectory.
    pub fn grow(&self, direction: Direction, grid_size: GridInt) -> Snake {
        let tail = match self.tail() {
            Some(tail) => tail,
            None => return self.clone(),
        };

        let (dx, dy) = direction.delta();
        let mut body = Vec::with_capacity(self.body.len() + 1);
        body.push(tail.offset(-dx, -dy, grid_size));
        body.extend_from_slice(&self.body);

        Snake { body }
    }

    /// True iff two distinct indices hold the same cell.
    pub fn has_self_collision(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        !self.body.iter().all(|cell| seen.insert(*cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snake(cells: &[(GridInt, GridInt)]) -> Snake {
        Snake::new(cells.iter().copied().map(Coordinate::from).collect())
    }

    #[test]
    fn test_opposites() {
        assert!(Up.is_opposite(Down));
        assert!(Left.is_opposite(Right));
        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("UP".parse::<Direction>().unwrap(), Up);
        assert_eq!("top".parse::<Direction>().unwrap(), Up);
        assert_eq!("bottom".parse::<Direction>().unwrap(), Down);
        assert_eq!("Left".parse::<Direction>().unwrap(), Left);
        assert!(matches!("sideways".parse::<Direction>(), Err(GameError::InvalidDirection(_))));
    }

    #[test]
    fn test_advance_right() {
        let moved = Snake::initial().advance(Right, 20);
        assert_eq!(moved, snake(&[(1, 0), (2, 0), (3, 0)]));
    }

    #[test]
    fn test_advance_each_axis() {
        let start = snake(&[(5, 4), (5, 5)]);
        assert_eq!(start.advance(Down, 20).head(), Some(Coordinate::new(5, 6)));
        assert_eq!(start.advance(Up, 20).head(), Some(Coordinate::new(5, 4)));
        assert_eq!(start.advance(Left, 20).head(), Some(Coordinate::new(4, 5)));
        assert_eq!(start.advance(Right, 20).head(), Some(Coordinate::new(6, 5)));
    }

    #[test]
    fn test_advance_wraps_right_edge() {
        let moved = snake(&[(17, 0), (18, 0), (19, 0)]).advance(Right, 20);
        assert_eq!(moved.head(), Some(Coordinate::new(0, 0)));
        assert_eq!(moved.len(), 3);
    }

    #[test]
    fn test_advance_wraps_top_edge() {
        let moved = snake(&[(3, 2), (3, 1), (3, 0)]).advance(Up, 10);
        assert_eq!(moved.head(), Some(Coordinate::new(3, 9)));
    }

    #[test]
    fn test_advance_leaves_original_untouched() {
        let original = Snake::initial();
        let _ = original.advance(Right, 20);
        assert_eq!(original, Snake::initial());
    }

    #[test]
    fn test_grow_extends_behind_tail() {
        let grown = snake(&[(1, 0), (2, 0), (3, 0)]).grow(Right, 20);
        assert_eq!(grown, snake(&[(0, 0), (1, 0), (2, 0), (3, 0)]));

        let grown = snake(&[(4, 4), (4, 3)]).grow(Up, 20);
        assert_eq!(grown.tail(), Some(Coordinate::new(4, 5)));
        assert_eq!(grown.head(), Some(Coordinate::new(4, 3)));
    }

    #[test]
    fn test_grow_wraps_tail() {
        let grown = Snake::initial().grow(Right, 20);
        assert_eq!(grown.tail(), Some(Coordinate::new(19, 0)));
        assert_eq!(grown.len(), 4);
    }

    #[test]
    fn test_self_collision() {
        assert!(snake(&[(5, 5), (4, 5), (5, 5)]).has_self_collision());
        assert!(!Snake::initial().has_self_collision());
    }

    #[test]
    fn test_looped_body_collides() {
        // A closed ring whose head has just re-entered its own tail cell.
        let ring = snake(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)]);
        assert!(ring.has_self_collision());
    }

    fn arb_body() -> impl Strategy<Value = Vec<Coordinate>> {
        prop::collection::vec((0i32..8, 0i32..8).prop_map(Coordinate::from), 3..30)
    }

    fn pairwise_duplicate(body: &[Coordinate]) -> bool {
        (0..body.len()).any(|i| (0..body.len()).any(|j| i != j && body[i] == body[j]))
    }

    proptest! {
        #[test]
        fn prop_collision_matches_pairwise_scan(body in arb_body()) {
            let snake = Snake::new(body.clone());
            prop_assert_eq!(snake.has_self_collision(), pairwise_duplicate(&body));
        }

        #[test]
        fn prop_advance_keeps_length_and_grow_adds_one(
            body in arb_body(),
            dir in prop_oneof![Just(Up), Just(Down), Just(Left), Just(Right)],
        ) {
            let snake = Snake::new(body);
            let moved = snake.advance(dir, 8);
            prop_assert_eq!(moved.len(), snake.len());
            prop_assert_eq!(moved.grow(dir, 8).len(), snake.len() + 1);
            prop_assert!(moved.body().iter().all(|c| (0..8).contains(&c.x) && (0..8).contains(&c.y)));
        }
    }
}
