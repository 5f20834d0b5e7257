use crate::position::Pos;
use crate::tile::TileId;

/// Points awarded for each removed tile.
pub const POINTS_PER_TILE: u32 = 100;

/// A notification for the presentation layer, reported as plain data from
/// the call that produced it. The engine never invokes callbacks.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardEvent<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {

    /// A tile changed cells, either through a swap or a compaction drop.
    TileMoved {
        tile: TileId,
        from: Pos<BOARD_WIDTH, BOARD_HEIGHT>,
        to: Pos<BOARD_WIDTH, BOARD_HEIGHT>
    },

    /// A matched tile was destroyed. Worth [POINTS_PER_TILE] points.
    TileRemoved {
        tile: TileId,
        pos: Pos<BOARD_WIDTH, BOARD_HEIGHT>
    },

    /// A fresh tile filled a vacated cell. `fall_order` is the cell's
    /// distance from the first emptied row of the refill pass, a hint for
    /// staggering fall animation.
    TileSpawned {
        tile: TileId,
        pos: Pos<BOARD_WIDTH, BOARD_HEIGHT>,
        fall_order: usize
    },

    /// A cascade ran to stability.
    CascadeComplete {
        rounds: u32,
        tiles_removed: u32
    },

    /// No adjacent swap can produce a match; the game is over.
    NoLegalMoves

}
