use crate::board::{Board, BoardError};
use crate::events::{BoardEvent, POINTS_PER_TILE};
use crate::matching::{self, MatchRun};
use crate::position::Pos;
use crate::tile::{TileFactory, TileType};

/// Report of a single cascade round: one removal step, one compaction step,
/// one refill step.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RoundReport<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    pub tiles_removed: u32,
    pub events: Vec<BoardEvent<BOARD_WIDTH, BOARD_HEIGHT>>
}

/// Totals for a cascade driven to stability. `rounds == 0` means the
/// triggers produced no match and the board was not touched.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CascadeOutcome<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    pub rounds: u32,
    pub tiles_removed: u32,
    pub events: Vec<BoardEvent<BOARD_WIDTH, BOARD_HEIGHT>>
}

/// Result of a full swap turn: the swap, the cascade it triggered or the
/// revert when nothing matched, and the follow-up deadlock check.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SwapResolution<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    pub matched: bool,
    pub rounds: u32,
    pub tiles_removed: u32,
    pub events: Vec<BoardEvent<BOARD_WIDTH, BOARD_HEIGHT>>
}

/// Keeps track of the current board and resolves matches into cascades.
///
/// The resolver owns the board and the tile factory. A turn is a swap
/// followed by an anchored match check at the two swapped cells; a match
/// starts the cascade loop of removal, per-column gravity compaction,
/// refill, and a whole-board rescan, repeated until no run remains.
///
/// Every operation reports what happened as [BoardEvent] values, so a
/// presentation layer can animate swaps, falls, and spawns without the
/// engine ever blocking or sleeping. The stepwise pieces
/// ([CascadeBoard::find_matches], [CascadeBoard::resolve_round],
/// [CascadeBoard::scan_matches]) are public, letting a caller interleave
/// each round with its own timing; [CascadeBoard::resolve_cascade] is the
/// convenience loop over exactly those calls.
pub struct CascadeBoard<F, const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    board: Board<BOARD_WIDTH, BOARD_HEIGHT>,
    factory: F,
    score: u32,
    game_over: bool
}

impl<F: TileFactory, const W: usize, const H: usize> CascadeBoard<F, W, H> {

    /// Creates a resolver over a freshly filled board.
    ///
    /// # Arguments
    ///
    /// * `factory` - produces tile types for the initial fill and every
    ///               refill
    ///
    /// # Panics
    ///
    /// Panics if either board dimension is zero.
    pub fn new(mut factory: F) -> CascadeBoard<F, W, H> {
        let board = Board::filled(&mut factory);
        CascadeBoard { board, factory, score: 0, game_over: false }
    }

    /// Attempts to create a resolver over a freshly filled board, returning
    /// an error if either board dimension is zero.
    ///
    /// # Arguments
    ///
    /// * `factory` - produces tile types for the initial fill and every
    ///               refill
    pub fn try_new(mut factory: F) -> Result<CascadeBoard<F, W, H>, BoardError> {
        let board = Board::try_filled(&mut factory)?;
        Ok(CascadeBoard { board, factory, score: 0, game_over: false })
    }

    /// Gets the current board.
    pub fn board(&self) -> &Board<W, H> {
        &self.board
    }

    /// Gets the running score: [POINTS_PER_TILE] per removed tile.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Checks whether a completed turn found the board dead. The flag
    /// latches once set; callers typically offer a restart.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ends the current game by returning the final board.
    pub fn end_game(self) -> Board<W, H> {
        self.board
    }

    /// Exchanges two neighbouring tiles, reporting the moves as events.
    ///
    /// # Arguments
    ///
    /// * `first` - one of the cells to swap
    /// * `second` - the other cell to swap
    pub fn swap(&mut self, first: Pos<W, H>, second: Pos<W, H>)
                -> Result<[BoardEvent<W, H>; 2], BoardError> {
        let (at_first, at_second) = self.board.swap(first, second)?;
        Ok([
            BoardEvent::TileMoved { tile: at_first, from: second, to: first },
            BoardEvent::TileMoved { tile: at_second, from: first, to: second }
        ])
    }

    /// Finds the runs anchored at the given origins, usually the two cells
    /// of the swap that just happened.
    ///
    /// # Arguments
    ///
    /// * `origins` - positions a run must include to count
    pub fn find_matches(&self, origins: &[Pos<W, H>]) -> Vec<MatchRun<W, H>> {
        matching::matches_at(&self.board, origins)
    }

    /// Scans the whole board for runs, every row and every column. Drops
    /// and refills can create matches far from the original trigger, so
    /// cascade continuation is never anchored.
    pub fn scan_matches(&self) -> Vec<MatchRun<W, H>> {
        matching::scan_board(&self.board)
    }

    /// Resolves one cascade round for the given runs: marks and removes
    /// their tiles, compacts every column, and refills the vacated cells.
    ///
    /// The round is atomic and synchronous. Overlapping runs are handled
    /// once per tile, so an L-shaped double match removes each tile a
    /// single time.
    ///
    /// # Arguments
    ///
    /// * `runs` - the matches to resolve, from [CascadeBoard::find_matches]
    ///            or [CascadeBoard::scan_matches]
    pub fn resolve_round(&mut self, runs: &[MatchRun<W, H>]) -> RoundReport<W, H> {
        let mut events = Vec::new();
        let mut removed = 0;

        for run in runs {
            for &pos in run.iter() {
                if let Some(id) = self.board.mark_destroyed(pos) {
                    events.push(BoardEvent::TileRemoved { tile: id, pos });
                    removed += 1;
                    self.score += POINTS_PER_TILE;
                }
            }
        }

        self.compact(&mut events);
        self.refill(&mut events);

        RoundReport { tiles_removed: removed, events }
    }

    /// Resolves a full cascade starting from the runs anchored at the
    /// trigger positions.
    ///
    /// Returns a zero-round outcome when the triggers match nothing; the
    /// caller decides whether to revert its swap. Otherwise rounds are
    /// resolved until a whole-board rescan comes back empty, and the board
    /// is stable when this returns.
    ///
    /// # Arguments
    ///
    /// * `triggers` - positions a run must include to start the cascade
    pub fn resolve_cascade(&mut self, triggers: &[Pos<W, H>]) -> CascadeOutcome<W, H> {
        let mut outcome = CascadeOutcome { rounds: 0, tiles_removed: 0, events: Vec::new() };

        let mut current = self.find_matches(triggers);
        while !current.is_empty() {
            let report = self.resolve_round(&current);
            outcome.rounds += 1;
            outcome.tiles_removed += report.tiles_removed;
            outcome.events.extend(report.events);

            current = self.scan_matches();
        }

        if outcome.rounds > 0 {
            outcome.events.push(BoardEvent::CascadeComplete {
                rounds: outcome.rounds,
                tiles_removed: outcome.tiles_removed
            });
        }

        outcome
    }

    /// Plays a complete turn: swap, resolve, revert when nothing matched,
    /// then check for remaining moves.
    ///
    /// When the anchored check at the two swapped cells finds no run, the
    /// tiles are swapped straight back and the events report both moves.
    /// After either outcome the board is checked for a legal move; a dead
    /// board appends [BoardEvent::NoLegalMoves] and latches the game-over
    /// flag.
    ///
    /// # Arguments
    ///
    /// * `first` - one of the cells to swap
    /// * `second` - the other cell to swap
    pub fn swap_and_resolve(&mut self, first: Pos<W, H>, second: Pos<W, H>)
                            -> Result<SwapResolution<W, H>, BoardError> {
        let mut events = self.swap(first, second)?.to_vec();

        let outcome = self.resolve_cascade(&[first, second]);
        let matched = outcome.rounds > 0;

        if matched {
            events.extend(outcome.events);
        } else {
            let revert = self.swap(first, second)?;
            events.extend(revert.iter().copied());
        }

        if !self.has_any_legal_move() {
            self.game_over = true;
            events.push(BoardEvent::NoLegalMoves);
        }

        Ok(SwapResolution {
            matched,
            rounds: outcome.rounds,
            tiles_removed: outcome.tiles_removed,
            events
        })
    }

    /// Checks whether any adjacent swap would produce a match.
    ///
    /// Every cell is tested against its right and its upper neighbour, so
    /// each adjacent pair is considered exactly once. The check simulates
    /// the swap over a read-only view of the board and never mutates it.
    pub fn has_any_legal_move(&self) -> bool {
        self.first_legal_move().is_some()
    }

    /// Finds the first adjacent pair whose swap would produce a match,
    /// scanning columns left to right and rows bottom to top. Returns
    /// `None` when the board is dead.
    pub fn first_legal_move(&self) -> Option<(Pos<W, H>, Pos<W, H>)> {
        for x in 0..W {
            for y in 0..H {
                let pos = Pos::new(x, y);

                if let Some(right) = pos.right() {
                    if self.swap_creates_match(pos, right) {
                        return Some((pos, right));
                    }
                }

                if let Some(above) = pos.above() {
                    if self.swap_creates_match(pos, above) {
                        return Some((pos, above));
                    }
                }
            }
        }

        None
    }

    fn swap_creates_match(&self, first: Pos<W, H>, second: Pos<W, H>) -> bool {
        self.run_after_swap(first, second, first)
            || self.run_after_swap(first, second, second)
    }

    // Counts the run through `origin` as if `first` and `second` had been
    // swapped, reading the board through a transposing view instead of
    // mutating it.
    fn run_after_swap(&self, first: Pos<W, H>, second: Pos<W, H>,
                      origin: Pos<W, H>) -> bool {
        let swapped_type = |pos: Pos<W, H>| -> Option<TileType> {
            if pos == first {
                self.board.live_type(second)
            } else if pos == second {
                self.board.live_type(first)
            } else {
                self.board.live_type(pos)
            }
        };

        let origin_type = match swapped_type(origin) {
            Some(tile_type) => tile_type,
            None => return false
        };
        let (x, y) = (origin.x(), origin.y());

        let mut count = 1;
        let mut i = x;
        while i > 0 && swapped_type(Pos::new(i - 1, y)) == Some(origin_type) {
            count += 1;
            i -= 1;
        }
        let mut i = x + 1;
        while i < W && swapped_type(Pos::new(i, y)) == Some(origin_type) {
            count += 1;
            i += 1;
        }
        if count >= 3 {
            return true;
        }

        let mut count = 1;
        let mut j = y;
        while j > 0 && swapped_type(Pos::new(x, j - 1)) == Some(origin_type) {
            count += 1;
            j -= 1;
        }
        let mut j = y + 1;
        while j < H && swapped_type(Pos::new(x, j)) == Some(origin_type) {
            count += 1;
            j += 1;
        }
        count >= 3
    }

    // Gravity: each column collapses independently, bottom to top, keeping
    // the relative order of surviving tiles. Marked tiles vacate their
    // cells here.
    fn compact(&mut self, events: &mut Vec<BoardEvent<W, H>>) {
        for x in 0..W {
            let mut write = 0;
            for y in 0..H {
                let pos = Pos::new(x, y);
                let destroyed = match self.board.tile(pos) {
                    Some(tile) => tile.is_destroyed(),
                    None => continue
                };

                if destroyed {
                    self.board.remove_at(pos);
                    continue;
                }

                if y != write {
                    if let Some(tile) = self.board.remove_at(pos) {
                        let id = tile.id();
                        let dest = Pos::new(x, write);
                        self.board.set_tile(dest, tile);
                        events.push(BoardEvent::TileMoved { tile: id, from: pos, to: dest });
                    }
                }
                write += 1;
            }
        }
    }

    // After compaction every hole sits at the top of its column. New tiles
    // spawn bottom row first; the hint tells the caller how far each cell
    // is from the first emptied row so falls can be staggered.
    fn refill(&mut self, events: &mut Vec<BoardEvent<W, H>>) {
        let mut first_empty = None;

        for y in 0..H {
            for x in 0..W {
                let pos = Pos::new(x, y);
                if self.board.tile(pos).is_some() {
                    continue;
                }

                let first_row = *first_empty.get_or_insert(y);
                let tile_type = self.factory.next_type();
                let id = self.board.spawn(pos, tile_type);
                events.push(BoardEvent::TileSpawned {
                    tile: id,
                    pos,
                    fall_order: y - first_row
                });
            }
        }
    }

}
