use hashbrown::HashSet;
use serde::Serialize;

use crate::*;

/// Presentation class of a single cell as a renderer should draw it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Visible {
    Hidden,
    Flagged,
    Revealed(u8),
    /// Only exposed once the game is over.
    Mine,
}

/// Read-only view of a session handed to the renderer after every input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub revealed: &'a HashSet<Coord2>,
    pub flagged: &'a HashSet<Coord2>,
    pub score: u32,
    pub mines_remaining: i32,
    pub game_over: bool,
}

impl Snapshot<'_> {
    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// What the player gets to see at `coords`, `None` when out of bounds.
    ///
    /// After a loss every unrevealed mine shows through, flags included.
    pub fn visible_at(&self, coords: Coord2) -> Option<Visible> {
        let cell = self.board.cell_at(coords)?;

        Some(match cell {
            Cell::Mine if self.game_over => Visible::Mine,
            _ if self.flagged.contains(&coords) => Visible::Flagged,
            Cell::Count(count) if self.revealed.contains(&coords) => Visible::Revealed(count),
            _ => Visible::Hidden,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession<FixedBoardGenerator> {
        let config = GameConfig::new(2, 3, 2).unwrap();
        GameSession::new(config, FixedBoardGenerator::new([(0, 0), (2, 1)])).unwrap()
    }

    #[test]
    fn maps_revealed_and_flagged_cells() {
        let mut session = session();

        session.reveal_at((1, 0));
        session.toggle_flag_at((0, 0));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.visible_at((1, 0)), Some(Visible::Revealed(2)));
        assert_eq!(snapshot.visible_at((0, 0)), Some(Visible::Flagged));
        assert_eq!(snapshot.visible_at((2, 1)), Some(Visible::Hidden));
        assert_eq!(snapshot.visible_at((3, 0)), None);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.mines_remaining, 1);
    }

    #[test]
    fn game_over_exposes_mines() {
        let mut session = session();

        session.toggle_flag_at((0, 0));
        session.toggle_flag_at((1, 1));
        session.reveal_at((2, 1));

        let snapshot = session.snapshot();
        assert!(snapshot.game_over);
        assert_eq!(snapshot.visible_at((0, 0)), Some(Visible::Mine));
        assert_eq!(snapshot.visible_at((2, 1)), Some(Visible::Mine));
        assert_eq!(snapshot.visible_at((1, 1)), Some(Visible::Flagged));
        assert_eq!(snapshot.visible_at((0, 1)), Some(Visible::Hidden));
    }
}
