use alloc::vec::Vec;

use super::*;

/// Always yields the same mine layout, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let board = Board::from_mine_coords(config.size(), &self.mines)?;
        if board.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} mines, requested {}",
                board.mine_count(),
                config.mines
            );
            return Err(GameError::InvalidConfiguration {
                rows: config.rows,
                cols: config.cols,
                mines: config.mines,
            });
        }

        Ok(board)
    }
}
