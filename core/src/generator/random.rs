use rand::prelude::*;

use super::*;

/// Places mines by sampling uniformly random coordinates until enough distinct ones are drawn.
///
/// Seeded, so the same seed reproduces the same sequence of boards across restarts.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        // placement below only terminates with at least one safe cell left
        config.validate()?;

        let target = usize::from(config.mines);
        let mut mines = HashSet::with_capacity(target);
        let mut draws = 0usize;

        while mines.len() < target {
            let coords = (
                self.rng.random_range(0..config.cols),
                self.rng.random_range(0..config.rows),
            );
            draws += 1;
            if mines.insert(coords) {
                log::trace!("Placed mine at {:?}", coords);
            }
        }

        log::debug!(
            "Generated {}x{} board with {} mines in {} draws",
            config.cols,
            config.rows,
            config.mines,
            draws
        );
        Board::from_mine_set(config.size(), mines)
    }
}
