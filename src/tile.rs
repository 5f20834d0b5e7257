use enumset::{EnumSet, EnumSetType};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::position::Pos;

/// A tile colour from the fixed palette.
///
/// Palettes are [EnumSet]s of tile types, so a game that wants fewer than
/// six colours passes a smaller set to its factory.
#[derive(EnumSetType, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileType {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow
}

/// Identity of a single tile, stable for the lifetime of its board.
///
/// Events refer to tiles by id so a presentation layer can keep tracking the
/// same sprite while the tile moves, falls, or is destroyed.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub(crate) u32);

/// A single grid-occupying tile: a type, an authoritative position, and a
/// removal mark.
///
/// Tiles are inert data. Only the board mutates a tile's position or mark,
/// which keeps the cell-to-tile link consistent on every mutation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Tile<const BOARD_WIDTH: usize, const BOARD_HEIGHT: usize> {
    id: TileId,
    tile_type: TileType,
    pos: Pos<BOARD_WIDTH, BOARD_HEIGHT>,
    destroyed: bool
}

impl<const W: usize, const H: usize> Tile<W, H> {

    pub(crate) fn new(id: TileId, tile_type: TileType, pos: Pos<W, H>) -> Tile<W, H> {
        Tile { id, tile_type, pos, destroyed: false }
    }

    /// Returns the identity of this tile.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the type of this tile.
    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    /// Returns the position this tile currently occupies.
    pub fn pos(&self) -> Pos<W, H> {
        self.pos
    }

    /// Checks whether this tile has been marked for removal. A marked tile
    /// still occupies its cell until the next compaction.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn relocate(&mut self, pos: Pos<W, H>) {
        self.pos = pos;
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

}

/// Produces the type of every newly created tile.
///
/// The factory is injected at construction so callers control randomness:
/// seeded play uses [SeededTileFactory], tests use closures or scripted
/// sequences. Any `FnMut() -> TileType` closure is a factory.
pub trait TileFactory {

    /// Returns the type for the next tile to create.
    fn next_type(&mut self) -> TileType;

}

impl<F: FnMut() -> TileType> TileFactory for F {
    fn next_type(&mut self) -> TileType {
        self()
    }
}

/// A factory drawing uniformly from a palette with a seeded generator, so
/// the same seed always produces the same board.
pub struct SeededTileFactory {
    rng: SmallRng,
    palette: Vec<TileType>
}

impl SeededTileFactory {

    /// Creates a factory over the full six-colour palette.
    ///
    /// # Arguments
    ///
    /// * `seed` - seed for the tile type sequence
    pub fn new(seed: u64) -> SeededTileFactory {
        SeededTileFactory::with_palette(seed, EnumSet::all())
    }

    /// Creates a factory drawing only from the given palette.
    ///
    /// # Arguments
    ///
    /// * `seed` - seed for the tile type sequence
    /// * `palette` - tile types the factory may produce
    ///
    /// # Panics
    ///
    /// Panics if the palette is empty.
    pub fn with_palette(seed: u64, palette: EnumSet<TileType>) -> SeededTileFactory {
        if palette.is_empty() {
            panic!("Tile palette must not be empty");
        }

        SeededTileFactory {
            rng: SmallRng::seed_from_u64(seed),
            palette: palette.iter().collect()
        }
    }

}

impl TileFactory for SeededTileFactory {
    fn next_type(&mut self) -> TileType {
        self.palette[self.rng.gen_range(0..self.palette.len())]
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use crate::tile::{SeededTileFactory, TileFactory, TileType};

    #[test]
    fn seeded_factory_same_seed_same_sequence() {
        let mut first = SeededTileFactory::new(42);
        let mut second = SeededTileFactory::new(42);

        for _ in 0..100 {
            assert_eq!(first.next_type(), second.next_type());
        }
    }

    #[test]
    fn seeded_factory_stays_inside_palette() {
        let palette = TileType::Red | TileType::Blue;
        let mut factory = SeededTileFactory::with_palette(7, palette);

        for _ in 0..100 {
            assert!(palette.contains(factory.next_type()));
        }
    }

    #[test]
    fn seeded_factory_covers_full_palette() {
        let mut factory = SeededTileFactory::new(3);
        let mut seen = EnumSet::empty();

        for _ in 0..1000 {
            seen |= factory.next_type();
        }

        assert_eq!(EnumSet::all(), seen);
    }

    #[test]
    #[should_panic]
    fn seeded_factory_empty_palette_rejected() {
        SeededTileFactory::with_palette(0, EnumSet::empty());
    }

    #[test]
    fn closure_is_a_factory() {
        let mut factory = || TileType::Magenta;
        assert_eq!(TileType::Magenta, factory.next_type());
        assert_eq!(TileType::Magenta, factory.next_type());
    }
}
