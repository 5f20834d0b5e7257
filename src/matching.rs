use bitvec::prelude::*;

use crate::board::Board;
use crate::position::Pos;
use crate::tile::TileType;

/// The axis a run of tiles lies along.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical
}

/// A maximal run of at least three live tiles sharing a type along one axis.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MatchRun<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    axis: Axis,
    tile_type: TileType,
    positions: Vec<Pos<BOARD_WIDTH, BOARD_HEIGHT>>
}

impl<const W: usize, const H: usize> MatchRun<W, H> {

    pub(crate) fn new(axis: Axis, tile_type: TileType,
                      positions: Vec<Pos<W, H>>) -> MatchRun<W, H> {
        MatchRun { axis, tile_type, positions }
    }

    /// Gets the axis this run lies along.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Gets the type shared by every tile in this run.
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Returns the number of tiles in this run, always at least three.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Checks if the given position is part of this run.
    ///
    /// # Arguments
    ///
    /// * `pos` - position to check for in this run
    pub fn contains(&self, pos: Pos<W, H>) -> bool {
        self.positions.contains(&pos)
    }

    /// Returns an iterator of the positions in this run, in axis order.
    pub fn iter(&self) -> impl Iterator<Item = &Pos<W, H>> {
        self.positions.iter()
    }

}

/// Finds the runs anchored at the given origins.
///
/// For each origin, its row is scanned left to right and its column bottom
/// to top, accumulating runs of live tiles sharing the origin's type; a run
/// counts only if it contains the origin and has at least three tiles. A
/// run elsewhere on the board is deliberately not a trigger: it will be
/// picked up by the whole-board rescan during a cascade instead.
///
/// The result is deduplicated across origins and axes, so two origins
/// sitting in the same run contribute it once.
pub(crate) fn matches_at<const W: usize, const H: usize>(
    board: &Board<W, H>,
    origins: &[Pos<W, H>]
) -> Vec<MatchRun<W, H>> {
    let mut runs = Vec::new();
    let mut covered = bitvec![0; W * H];

    for &origin in origins {
        for &axis in &[Axis::Horizontal, Axis::Vertical] {
            if let Some(run) = run_through(board, origin, axis) {
                push_unless_covered(&mut runs, &mut covered, run);
            }
        }
    }

    runs
}

/// Scans every row and column of the board for runs of at least three live
/// same-typed tiles. Used for the cascade rescan and stability checks.
pub(crate) fn scan_board<const W: usize, const H: usize>(
    board: &Board<W, H>
) -> Vec<MatchRun<W, H>> {
    let mut runs = Vec::new();

    for y in 0..H {
        scan_line(board, Axis::Horizontal, y, &mut runs);
    }
    for x in 0..W {
        scan_line(board, Axis::Vertical, x, &mut runs);
    }

    runs
}

// One linear pass along the origin's row or column. Runs that close before
// the origin is reached are discarded; the first run closing after it is
// the only candidate.
fn run_through<const W: usize, const H: usize>(
    board: &Board<W, H>,
    origin: Pos<W, H>,
    axis: Axis
) -> Option<MatchRun<W, H>> {
    let origin_type = board.live_type(origin)?;

    let (len, origin_index) = match axis {
        Axis::Horizontal => (W, origin.x()),
        Axis::Vertical => (H, origin.y())
    };

    let mut run: Vec<Pos<W, H>> = Vec::new();
    for i in 0..len {
        let pos = match axis {
            Axis::Horizontal => Pos::new(i, origin.y()),
            Axis::Vertical => Pos::new(origin.x(), i)
        };

        if board.live_type(pos) == Some(origin_type) {
            run.push(pos);
        } else if i > origin_index {
            break;
        } else {
            run.clear();
        }
    }

    if run.len() >= 3 && run.iter().any(|&pos| pos == origin) {
        Some(MatchRun::new(axis, origin_type, run))
    } else {
        None
    }
}

fn scan_line<const W: usize, const H: usize>(
    board: &Board<W, H>,
    axis: Axis,
    line: usize,
    runs: &mut Vec<MatchRun<W, H>>
) {
    let len = match axis {
        Axis::Horizontal => W,
        Axis::Vertical => H
    };

    let mut run: Vec<Pos<W, H>> = Vec::new();
    let mut run_type = None;

    for i in 0..len {
        let pos = match axis {
            Axis::Horizontal => Pos::new(i, line),
            Axis::Vertical => Pos::new(line, i)
        };
        let live = board.live_type(pos);

        if live.is_some() && live == run_type {
            run.push(pos);
            continue;
        }

        if let Some(tile_type) = run_type {
            if run.len() >= 3 {
                runs.push(MatchRun::new(axis, tile_type, std::mem::take(&mut run)));
            }
        }

        run.clear();
        run_type = live;
        if live.is_some() {
            run.push(pos);
        }
    }

    if let Some(tile_type) = run_type {
        if run.len() >= 3 {
            runs.push(MatchRun::new(axis, tile_type, run));
        }
    }
}

fn push_unless_covered<const W: usize, const H: usize>(
    runs: &mut Vec<MatchRun<W, H>>,
    covered: &mut BitVec,
    run: MatchRun<W, H>
) {
    if run.iter().all(|pos| covered[pos.index()]) {
        return;
    }

    for pos in run.iter() {
        covered.set(pos.index(), true);
    }
    runs.push(run);
}
