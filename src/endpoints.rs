//! Random start and end cells

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::maze::{Cell, WallLayout};
use crate::orientation::Orientation;

/// Picks start and end cells for a layout
pub struct RandomEndpoints {
    random: StdRng,
}

impl RandomEndpoints {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Random `(start, end)` pair
    ///
    /// The two cells are distinct whenever the layout has more than one cell.
    pub fn pick(&mut self, layout: &WallLayout) -> (Cell, Cell) {
        let cells: Vec<Cell> = layout.cells().collect();
        let picked: Vec<Cell> = cells
            .choose_multiple(&mut self.random, 2)
            .copied()
            .collect();
        match picked.as_slice() {
            [start, end] => (*start, *end),
            // 1x1 layout
            _ => (Cell::new(0, 0), Cell::new(0, 0)),
        }
    }

    /// Random initial facing
    pub fn orientation(&mut self) -> Orientation {
        Orientation::ALL[self.random.gen_range(0..Orientation::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use crate::endpoints::RandomEndpoints;
    use crate::maze::{Cell, WallLayout};

    #[test]
    fn endpoints_are_distinct_and_inside() {
        let layout = WallLayout::open(4, 3).unwrap();
        let mut endpoints = RandomEndpoints::new(Some(0));
        for _ in 0..50 {
            let (start, end) = endpoints.pick(&layout);
            assert_ne!(start, end);
            assert!(layout.contains(start));
            assert!(layout.contains(end));
        }
    }

    #[test]
    fn single_cell_maze_starts_at_end() {
        let layout = WallLayout::open(1, 1).unwrap();
        let mut endpoints = RandomEndpoints::new(Some(3));
        assert_eq!(endpoints.pick(&layout), (Cell::new(0, 0), Cell::new(0, 0)));
    }

    #[test]
    fn same_seed_same_picks() {
        let layout = WallLayout::open(10, 10).unwrap();
        let mut a = RandomEndpoints::new(Some(42));
        let mut b = RandomEndpoints::new(Some(42));
        for _ in 0..10 {
            assert_eq!(a.pick(&layout), b.pick(&layout));
            assert_eq!(a.orientation(), b.orientation());
        }
    }
}
