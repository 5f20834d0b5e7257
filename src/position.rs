use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum PosError {
    OutOfBounds(usize, usize)
}

impl Display for PosError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PosError::OutOfBounds(x, y) => write!(f, "position ({}, {}) is outside the board", x, y)
        }
    }
}

impl std::error::Error for PosError {}

/// A location on the board: a zero-based column and row.
///
/// The column grows rightward and the row grows upward, so `(0, 0)` is the
/// bottom-left cell. Positions are bounded by the board dimensions at
/// construction, which means an out-of-bounds location is unrepresentable
/// once a `Pos` exists.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {

    /// The column of the position
    x: usize,

    /// The row of the position
    y: usize

}

impl<const W: usize, const H: usize> Pos<W, H> {

    /// Creates a new position from a column and a row.
    ///
    /// # Arguments
    ///
    /// * `x` - the column of the position
    /// * `y` - the row of the position
    ///
    /// # Panics
    ///
    /// Panics if the given coordinates are outside the board.
    pub fn new(x: usize, y: usize) -> Pos<W, H> {
        if x >= W || y >= H {
            panic!("Tried to create position outside board: ({}, {})", x, y);
        }

        Pos { x, y }
    }

    /// Attempts to create a new position from a column and a row, returning
    /// an error if the location is outside the board's bounds.
    ///
    /// # Arguments
    ///
    /// * `x` - the column of the position
    /// * `y` - the row of the position
    pub fn try_new(x: usize, y: usize) -> Result<Pos<W, H>, PosError> {
        if x >= W || y >= H {
            return Err(PosError::OutOfBounds(x, y));
        }

        Ok(Pos { x, y })
    }

    /// Returns the column of the position.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Returns the row of the position.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Checks if another position is directly adjacent to this one.
    ///
    /// Two positions are neighbours when their Manhattan distance is exactly
    /// one. Diagonal cells are not neighbours, and a position is not its own
    /// neighbour.
    ///
    /// # Arguments
    ///
    /// * `other` - the position to compare against
    pub fn is_neighbour(&self, other: Pos<W, H>) -> bool {
        let dx = if self.x > other.x { self.x - other.x } else { other.x - self.x };
        let dy = if self.y > other.y { self.y - other.y } else { other.y - self.y };
        dx + dy == 1
    }

    /// Returns the position one column to the right, if it is on the board.
    pub fn right(&self) -> Option<Pos<W, H>> {
        Pos::try_new(self.x + 1, self.y).ok()
    }

    /// Returns the position one row up, if it is on the board.
    pub fn above(&self) -> Option<Pos<W, H>> {
        Pos::try_new(self.x, self.y + 1).ok()
    }

    // Cells are stored column-major.
    pub(crate) fn index(&self) -> usize {
        self.x * H + self.y
    }

}

impl<const W: usize, const H: usize> Display for Pos<W, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::position::{Pos, PosError};

    #[test]
    #[should_panic]
    fn new_x_out_of_bounds() {
        Pos::<3, 6>::new(3, 4);
    }

    #[test]
    #[should_panic]
    fn new_y_out_of_bounds() {
        Pos::<3, 6>::new(1, 6);
    }

    #[test]
    #[should_panic]
    fn new_large_x_out_of_bounds() {
        Pos::<3, 6>::new(usize::MAX, 4);
    }

    #[test]
    fn new_in_bounds_components_kept() {
        let pos: Pos<3, 6> = Pos::new(1, 4);
        assert_eq!(1, pos.x());
        assert_eq!(4, pos.y());
    }

    #[test]
    fn try_new_x_out_of_bounds() {
        assert_eq!(Pos::<3, 6>::try_new(3, 4), Err(PosError::OutOfBounds(3, 4)));
    }

    #[test]
    fn try_new_y_out_of_bounds() {
        assert_eq!(Pos::<3, 6>::try_new(1, 6), Err(PosError::OutOfBounds(1, 6)));
    }

    #[test]
    fn try_new_in_bounds_components_kept() {
        let pos: Pos<3, 6> = Pos::try_new(2, 5).unwrap();
        assert_eq!(2, pos.x());
        assert_eq!(5, pos.y());
    }

    #[test]
    fn neighbour_left_right() {
        let pos: Pos<5, 5> = Pos::new(2, 2);
        assert!(pos.is_neighbour(Pos::new(1, 2)));
        assert!(pos.is_neighbour(Pos::new(3, 2)));
    }

    #[test]
    fn neighbour_above_below() {
        let pos: Pos<5, 5> = Pos::new(2, 2);
        assert!(pos.is_neighbour(Pos::new(2, 1)));
        assert!(pos.is_neighbour(Pos::new(2, 3)));
    }

    #[test]
    fn neighbour_self_not_adjacent() {
        let pos: Pos<5, 5> = Pos::new(2, 2);
        assert!(!pos.is_neighbour(pos));
    }

    #[test]
    fn neighbour_diagonal_not_adjacent() {
        let pos: Pos<5, 5> = Pos::new(2, 2);
        assert!(!pos.is_neighbour(Pos::new(3, 3)));
        assert!(!pos.is_neighbour(Pos::new(1, 1)));
        assert!(!pos.is_neighbour(Pos::new(1, 3)));
        assert!(!pos.is_neighbour(Pos::new(3, 1)));
    }

    #[test]
    fn neighbour_two_apart_not_adjacent() {
        let pos: Pos<5, 5> = Pos::new(2, 2);
        assert!(!pos.is_neighbour(Pos::new(0, 2)));
        assert!(!pos.is_neighbour(Pos::new(2, 4)));
    }

    #[test]
    fn right_inside_board() {
        let pos: Pos<3, 6> = Pos::new(1, 0);
        assert_eq!(Some(Pos::new(2, 0)), pos.right());
    }

    #[test]
    fn right_at_last_column_none() {
        let pos: Pos<3, 6> = Pos::new(2, 0);
        assert_eq!(None, pos.right());
    }

    #[test]
    fn above_inside_board() {
        let pos: Pos<3, 6> = Pos::new(1, 4);
        assert_eq!(Some(Pos::new(1, 5)), pos.above());
    }

    #[test]
    fn above_at_top_row_none() {
        let pos: Pos<3, 6> = Pos::new(1, 5);
        assert_eq!(None, pos.above());
    }

    #[test]
    fn format_shows_components() {
        let pos: Pos<3, 6> = Pos::new(1, 4);
        assert_eq!("(1, 4)", format!("{}", pos));
    }
}
