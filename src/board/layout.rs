//! Standard board geometry.

use rustc_hash::FxHashMap;

use crate::core::{Cell, PlayerColor, HOME_STRETCH_LENGTH, TRACK_SIZE};

/// Track indices where tokens cannot be captured: each color's start plus the
/// four star cells.
pub const STANDARD_SAFE_POSITIONS: [usize; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Track index where each color enters the ring, in `PlayerColor::ALL` order.
pub const STANDARD_START_POSITIONS: [usize; 4] = [0, 13, 26, 39];

/// Immutable, shareable board geometry.
///
/// For each color the layout holds the ordered full path
/// `Base -> 52 track cells from the color's start -> 5 home-stretch cells -> Home`
/// and a reverse index from cell to path position.
///
/// ## Path indices
///
/// | index  | cell                                 |
/// |--------|--------------------------------------|
/// | 0      | `Base`                               |
/// | 1..=52 | track, starting at the color's start |
/// | 53..=57| home stretch 0..=4                   |
/// | 58     | `Home`                               |
#[derive(Clone, Debug)]
pub struct BoardLayout {
    track_size: usize,
    home_stretch_length: usize,
    safe_positions: Vec<usize>,
    start_positions: [usize; 4],
    paths: [Vec<Cell>; 4],
    path_index: [FxHashMap<Cell, usize>; 4],
}

impl BoardLayout {
    /// The standard 52-cell cross board.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(&STANDARD_SAFE_POSITIONS, STANDARD_START_POSITIONS)
    }

    /// A 52-cell board with custom safe cells and start positions.
    ///
    /// # Panics
    ///
    /// Panics if any index is outside the track.
    #[must_use]
    pub fn new(safe_positions: &[usize], start_positions: [usize; 4]) -> Self {
        assert!(
            safe_positions.iter().chain(&start_positions).all(|&i| i < TRACK_SIZE),
            "track indices must be below {TRACK_SIZE}"
        );

        let mut safe: Vec<usize> = safe_positions.to_vec();
        safe.sort_unstable();
        safe.dedup();

        let paths = PlayerColor::ALL.map(|color| {
            let start = start_positions[color.index()];
            let mut path = Vec::with_capacity(TRACK_SIZE + HOME_STRETCH_LENGTH + 2);
            path.push(Cell::Base(color));
            for step in 0..TRACK_SIZE {
                let index = (start + step) % TRACK_SIZE;
                path.push(Cell::Track {
                    index: index as u8,
                    is_safe: safe.binary_search(&index).is_ok(),
                });
            }
            for index in 0..HOME_STRETCH_LENGTH {
                path.push(Cell::HomeStretch { color, index: index as u8 });
            }
            path.push(Cell::Home(color));
            path
        });

        let path_index = std::array::from_fn(|i| {
            paths[i]
                .iter()
                .enumerate()
                .map(|(pos, &cell)| (cell, pos))
                .collect()
        });

        Self {
            track_size: TRACK_SIZE,
            home_stretch_length: HOME_STRETCH_LENGTH,
            safe_positions: safe,
            start_positions,
            paths,
            path_index,
        }
    }

    #[must_use]
    pub fn track_size(&self) -> usize {
        self.track_size
    }

    #[must_use]
    pub fn home_stretch_length(&self) -> usize {
        self.home_stretch_length
    }

    /// Length of every color's full path (59 on the standard board).
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.track_size + self.home_stretch_length + 2
    }

    /// Sorted safe track indices.
    #[must_use]
    pub fn safe_positions(&self) -> &[usize] {
        &self.safe_positions
    }

    #[must_use]
    pub fn is_safe(&self, track_index: usize) -> bool {
        self.safe_positions.binary_search(&track_index).is_ok()
    }

    /// Track index where `color` enters the ring.
    #[must_use]
    pub fn start_position(&self, color: PlayerColor) -> usize {
        self.start_positions[color.index()]
    }

    /// Last track index `color` visits before turning into its home stretch:
    /// one full lap from its start.
    #[must_use]
    pub fn home_stretch_entry(&self, color: PlayerColor) -> usize {
        (self.track_size - 1 + self.start_position(color)) % self.track_size
    }

    /// The canonical ordered path of `color`.
    #[must_use]
    pub fn full_path(&self, color: PlayerColor) -> &[Cell] {
        &self.paths[color.index()]
    }

    /// The track cell at `index`, with its safety flag filled in.
    #[must_use]
    pub fn track_cell(&self, index: usize) -> Cell {
        Cell::Track {
            index: (index % self.track_size) as u8,
            is_safe: self.is_safe(index % self.track_size),
        }
    }

    /// Position of `cell` within `color`'s path, or `None` if the cell is not
    /// on that path (another color's base, home stretch or home).
    ///
    /// Track cells are matched by index alone.
    #[must_use]
    pub fn path_index_of(&self, color: PlayerColor, cell: Cell) -> Option<usize> {
        let key = match cell {
            Cell::Track { index, .. } => self.track_cell(index as usize),
            other => other,
        };
        self.path_index[color.index()].get(&key).copied()
    }

    /// Cell at `index` of `color`'s path.
    #[must_use]
    pub fn cell_at(&self, color: PlayerColor, index: usize) -> Option<Cell> {
        self.paths[color.index()].get(index).copied()
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}
