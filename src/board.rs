use std::fmt::{Display, Formatter};

use crate::position::Pos;
use crate::tile::{Tile, TileFactory, TileId, TileType};

#[derive(Debug, PartialEq, Eq)]
pub enum BoardError {

    /// A swap was requested between two cells that cannot be swapped:
    /// the locations are equal, not neighbours, or one of them is empty.
    InvalidSwap((usize, usize), (usize, usize)),

    /// The board would have no cells.
    EmptyBoard

}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvalidSwap((x1, y1), (x2, y2)) => {
                write!(f, "cannot swap ({}, {}) with ({}, {})", x1, y1, x2, y2)
            }
            BoardError::EmptyBoard => write!(f, "board dimensions must be non-zero")
        }
    }
}

impl std::error::Error for BoardError {}

/// Owns the grid of tiles and enforces its invariants.
///
/// Every cell holds at most one tile, and every live tile's position always
/// matches the cell it occupies; both sides of that link are re-established
/// on each mutation. Dimensions are fixed by the type and never change.
///
/// A cell is empty only between a removal and the refill that follows it.
/// The board validates swaps but knows nothing about matches; match
/// detection and cascades live in [crate::CascadeBoard].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    cells: Vec<Option<Tile<BOARD_WIDTH, BOARD_HEIGHT>>>,
    next_id: u32
}

impl<const W: usize, const H: usize> Board<W, H> {

    /// Creates a board with every cell filled by the factory.
    ///
    /// Cells are filled row by row from the bottom, so a scripted factory
    /// produces a predictable grid.
    ///
    /// # Arguments
    ///
    /// * `factory` - produces the type of each created tile
    ///
    /// # Panics
    ///
    /// Panics if either board dimension is zero.
    pub fn filled(factory: &mut impl TileFactory) -> Board<W, H> {
        match Board::try_filled(factory) {
            Ok(board) => board,
            Err(_) => panic!("Tried to create a board with no cells: {}x{}", W, H)
        }
    }

    /// Attempts to create a board with every cell filled by the factory,
    /// returning an error if either dimension is zero.
    ///
    /// # Arguments
    ///
    /// * `factory` - produces the type of each created tile
    pub fn try_filled(factory: &mut impl TileFactory) -> Result<Board<W, H>, BoardError> {
        if W == 0 || H == 0 {
            return Err(BoardError::EmptyBoard);
        }

        let mut board = Board { cells: vec![None; W * H], next_id: 0 };

        for y in 0..H {
            for x in 0..W {
                board.spawn(Pos::new(x, y), factory.next_type());
            }
        }

        Ok(board)
    }

    /// Returns the board width.
    pub fn width(&self) -> usize {
        W
    }

    /// Returns the board height.
    pub fn height(&self) -> usize {
        H
    }

    /// Gets the tile at a position. `None` is an empty cell.
    pub fn tile(&self, pos: Pos<W, H>) -> Option<&Tile<W, H>> {
        self.cells[pos.index()].as_ref()
    }

    /// Gets the type of the live tile at a position. Returns `None` for an
    /// empty cell and for a tile already marked for removal.
    pub fn live_type(&self, pos: Pos<W, H>) -> Option<TileType> {
        self.tile(pos)
            .filter(|tile| !tile.is_destroyed())
            .map(Tile::tile_type)
    }

    /// Exchanges the tiles in two neighbouring cells.
    ///
    /// Both cell contents and both tile positions are updated before the
    /// call returns, so no observer can see a half-applied swap. A rejected
    /// swap mutates nothing.
    ///
    /// Returns the ids of the tiles now occupying `first` and `second`, in
    /// that order, for the caller to drive animation.
    ///
    /// # Arguments
    ///
    /// * `first` - one of the cells to swap
    /// * `second` - the other cell to swap
    pub fn swap(&mut self, first: Pos<W, H>, second: Pos<W, H>)
                -> Result<(TileId, TileId), BoardError> {
        let invalid = || BoardError::InvalidSwap(
            (first.x(), first.y()),
            (second.x(), second.y())
        );

        if !first.is_neighbour(second) {
            return Err(invalid());
        }

        let i = first.index();
        let j = second.index();
        if self.cells[i].is_none() || self.cells[j].is_none() {
            return Err(invalid());
        }

        self.cells.swap(i, j);

        let mut ids = (TileId(0), TileId(0));
        if let Some(tile) = &mut self.cells[i] {
            tile.relocate(first);
            ids.0 = tile.id();
        }
        if let Some(tile) = &mut self.cells[j] {
            tile.relocate(second);
            ids.1 = tile.id();
        }

        Ok(ids)
    }

    /// Puts a tile into a cell, re-linking the tile's position to the cell.
    /// Returns the tile previously occupying the cell, if any.
    ///
    /// # Arguments
    ///
    /// * `pos` - the cell to fill
    /// * `tile` - the tile to place there
    pub fn set_tile(&mut self, pos: Pos<W, H>, mut tile: Tile<W, H>) -> Option<Tile<W, H>> {
        tile.relocate(pos);
        self.cells[pos.index()].replace(tile)
    }

    /// Empties a cell and returns the tile that occupied it. Removing an
    /// already-empty cell does nothing.
    ///
    /// # Arguments
    ///
    /// * `pos` - the cell to empty
    pub fn remove_at(&mut self, pos: Pos<W, H>) -> Option<Tile<W, H>> {
        self.cells[pos.index()].take()
    }

    /// Marks the tile at a position for removal without freeing its cell,
    /// so fall order can still be computed from the pre-compaction grid.
    ///
    /// Returns the tile's id the first time it is marked; marking an empty
    /// cell or an already-marked tile does nothing.
    ///
    /// # Arguments
    ///
    /// * `pos` - the cell whose tile to mark
    pub fn mark_destroyed(&mut self, pos: Pos<W, H>) -> Option<TileId> {
        match &mut self.cells[pos.index()] {
            Some(tile) if !tile.is_destroyed() => {
                tile.mark_destroyed();
                Some(tile.id())
            }
            _ => None
        }
    }

    /// Checks that every cell is occupied by a live tile.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| {
            cell.as_ref().map_or(false, |tile| !tile.is_destroyed())
        })
    }

    // Creates a tile with a fresh id. Overwrites whatever is in the cell.
    pub(crate) fn spawn(&mut self, pos: Pos<W, H>, tile_type: TileType) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        self.cells[pos.index()] = Some(Tile::new(id, tile_type, pos));
        id
    }

}
