use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    /// A mine was revealed, only a restart is accepted.
    Over,
}

impl SessionState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Active
    }
}

/// Discrete player input, in cell coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    RevealAt(Coord2),
    ToggleFlagAt(Coord2),
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
    Restarted,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
            Self::Restarted => true,
        }
    }
}

/// Single game from the first move until a restart, sole owner of all play state.
#[derive(Clone, Debug)]
pub struct GameSession<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    board: Board,
    revealed: HashSet<Coord2>,
    flagged: HashSet<Coord2>,
    score: u32,
    mines_remaining: i32,
    state: SessionState,
}

impl<G: BoardGenerator> GameSession<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let board = generate_checked(&mut generator, config)?;
        log::debug!("New session on {}x{} board", config.cols, config.rows);

        Ok(Self {
            config,
            generator,
            board,
            revealed: HashSet::new(),
            flagged: HashSet::new(),
            score: 0,
            mines_remaining: config.mines.into(),
            state: Default::default(),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Mines minus flags placed, negative once more flags than mines are down.
    pub fn mines_remaining(&self) -> i32 {
        self.mines_remaining
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed.contains(&coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flagged.contains(&coords)
    }

    pub fn apply(&mut self, input: Input) -> Result<Outcome> {
        Ok(match input {
            Input::RevealAt(coords) => Outcome::Reveal(self.reveal_at(coords)),
            Input::ToggleFlagAt(coords) => Outcome::Mark(self.toggle_flag_at(coords)),
            Input::Restart => {
                self.restart()?;
                Outcome::Restarted
            }
        })
    }

    /// Reveals a single cell, neighbors are never opened along with it.
    ///
    /// Flagged and already revealed cells, out-of-bounds coordinates and any move after the game is over are
    /// ignored.
    pub fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.can_interact_at(coords) || self.flagged.contains(&coords) {
            return RevealOutcome::NoChange;
        }

        match self.board[coords] {
            Cell::Mine => {
                log::debug!("Hit mine at {:?}, score {}", coords, self.score);
                self.state = SessionState::Over;
                RevealOutcome::HitMine
            }
            Cell::Count(count) => {
                self.revealed.insert(coords);
                self.score += 1;
                log::debug!("Revealed cell at {:?}, mine count: {}", coords, count);
                RevealOutcome::Revealed
            }
        }
    }

    /// Flags an unrevealed cell, or removes its flag.
    pub fn toggle_flag_at(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.can_interact_at(coords) {
            return MarkOutcome::NoChange;
        }

        let outcome = if self.flagged.remove(&coords) {
            self.mines_remaining += 1;
            MarkOutcome::Unflagged
        } else {
            self.flagged.insert(coords);
            self.mines_remaining -= 1;
            MarkOutcome::Flagged
        };
        log::debug!(
            "{:?} at {:?}, mines remaining: {}",
            outcome,
            coords,
            self.mines_remaining
        );
        debug_assert_eq!(
            self.mines_remaining,
            i32::from(self.config.mines) - self.flagged.len() as i32
        );
        outcome
    }

    /// Starts over on a freshly generated board with the same configuration.
    ///
    /// On failure the current game is kept as is.
    pub fn restart(&mut self) -> Result<()> {
        let board = generate_checked(&mut self.generator, self.config)?;

        self.board = board;
        self.revealed.clear();
        self.flagged.clear();
        self.score = 0;
        self.mines_remaining = self.config.mines.into();
        self.state = SessionState::Active;
        log::debug!("Session restarted");
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            revealed: &self.revealed,
            flagged: &self.flagged,
            score: self.score,
            mines_remaining: self.mines_remaining,
            game_over: self.state.is_over(),
        }
    }

    fn can_interact_at(&self, coords: Coord2) -> bool {
        !self.state.is_over() && self.board.contains(coords) && !self.revealed.contains(&coords)
    }
}

/// Runs `generator`, rejecting boards that do not have the size and mine count `config` asks for.
fn generate_checked<G: BoardGenerator>(generator: &mut G, config: GameConfig) -> Result<Board> {
    let board = generator.generate(config)?;

    if board.size() != config.size() || board.mine_count() != config.mines {
        log::warn!(
            "Generated board is {:?} with {} mines, requested {:?} with {}",
            board.size(),
            board.mine_count(),
            config.size(),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession<FixedBoardGenerator> {
        let config = GameConfig::new(size.1, size.0, mines.len() as CellCount).unwrap();
        GameSession::new(config, FixedBoardGenerator::new(mines)).unwrap()
    }

    #[test]
    fn new_session_starts_active_and_empty() {
        let session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.score(), 0);
        assert_eq!(session.mines_remaining(), 1);
        assert!(session.snapshot().revealed.is_empty());
        assert!(session.snapshot().flagged.is_empty());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GameConfig::new_unchecked(2, 2, 4);
        let result = GameSession::new(config, RandomBoardGenerator::new(0));

        assert!(matches!(
            result,
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn reveal_safe_cell_scores() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.reveal_at((2, 2)), RevealOutcome::Revealed);
        assert_eq!(session.score(), 1);
        assert!(session.is_revealed((2, 2)));
    }

    #[test]
    fn reveal_does_not_cascade() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.reveal_at((2, 2));

        assert_eq!(session.board()[(2, 2)], Cell::Count(0));
        assert!(!session.is_revealed((2, 1)));
        assert!(!session.is_revealed((1, 2)));
        assert_eq!(session.snapshot().revealed.len(), 1);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.reveal_at((1, 1));
        assert_eq!(session.reveal_at((1, 1)), RevealOutcome::NoChange);
        assert_eq!(session.score(), 1);
        assert_eq!(session.snapshot().revealed.len(), 1);
    }

    #[test]
    fn reveal_mine_ends_game() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.reveal_at((0, 0)), RevealOutcome::HitMine);
        assert!(session.is_over());
        assert!(!session.is_revealed((0, 0)));
        assert!(session.snapshot().game_over);
    }

    #[test]
    fn reveal_flagged_cell_is_ignored() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.toggle_flag_at((0, 0));
        assert_eq!(session.reveal_at((0, 0)), RevealOutcome::NoChange);
        assert!(!session.is_over());

        session.toggle_flag_at((2, 2));
        assert_eq!(session.reveal_at((2, 2)), RevealOutcome::NoChange);
        assert_eq!(session.score(), 0);
        assert!(!session.is_revealed((2, 2)));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.reveal_at((3, 0)), RevealOutcome::NoChange);
        assert_eq!(session.reveal_at((0, 3)), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag_at((255, 255)), MarkOutcome::NoChange);
        assert_eq!(session.mines_remaining(), 1);
    }

    #[test]
    fn toggle_flag_updates_counter() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.toggle_flag_at((1, 1)), MarkOutcome::Flagged);
        assert_eq!(session.mines_remaining(), 0);
        assert_eq!(session.toggle_flag_at((2, 2)), MarkOutcome::Flagged);
        assert_eq!(session.mines_remaining(), -1);
        assert_eq!(session.toggle_flag_at((1, 1)), MarkOutcome::Unflagged);
        assert_eq!(session.mines_remaining(), 0);
        assert!(session.is_flagged((2, 2)));
        assert!(!session.is_flagged((1, 1)));
    }

    #[test]
    fn cannot_flag_revealed_cell() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.reveal_at((2, 2));
        assert_eq!(session.toggle_flag_at((2, 2)), MarkOutcome::NoChange);
        assert!(!session.is_flagged((2, 2)));
        assert_eq!(session.mines_remaining(), 1);
    }

    #[test]
    fn moves_after_game_over_are_ignored() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.toggle_flag_at((1, 0));
        session.reveal_at((0, 0));

        assert_eq!(session.reveal_at((2, 2)), RevealOutcome::NoChange);
        assert_eq!(session.toggle_flag_at((2, 2)), MarkOutcome::NoChange);
        assert_eq!(session.toggle_flag_at((1, 0)), MarkOutcome::NoChange);
        assert!(session.is_flagged((1, 0)));
        assert_eq!(session.score(), 0);
        assert_eq!(session.mines_remaining(), 0);
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = session((3, 3), &[(0, 0)]);

        session.reveal_at((2, 2));
        session.toggle_flag_at((1, 1));
        session.toggle_flag_at((1, 0));
        session.reveal_at((0, 0));
        session.restart().unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.mines_remaining, 1);
        assert!(snapshot.revealed.is_empty());
        assert!(snapshot.flagged.is_empty());
        assert!(!snapshot.game_over);
    }

    #[test]
    fn restart_draws_a_new_board() {
        let config = GameConfig::new(9, 10, 10).unwrap();
        let mut generated = 0;
        let generator = |config: GameConfig| {
            generated += 1;
            // shift the single row of mines down on every call
            let row = (generated - 1) as Coord;
            let mines: alloc::vec::Vec<_> = (0..config.cols).map(|x| (x, row)).collect();
            Board::from_mine_coords(config.size(), &mines)
        };
        let mut session = GameSession::new(config, generator).unwrap();
        assert!(session.board().contains_mine((0, 0)));

        session.restart().unwrap();

        assert!(!session.board().contains_mine((0, 0)));
        assert!(session.board().contains_mine((0, 1)));
    }

    #[test]
    fn failed_restart_keeps_game() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut calls = 0;
        let generator = |config: GameConfig| {
            calls += 1;
            if calls > 1 {
                Err(GameError::InvalidConfiguration {
                    rows: config.rows,
                    cols: config.cols,
                    mines: config.mines,
                })
            } else {
                Board::from_mine_coords(config.size(), &[(0, 0)])
            }
        };
        let mut session = GameSession::new(config, generator).unwrap();
        session.reveal_at((2, 2));

        assert!(session.restart().is_err());
        assert_eq!(session.score(), 1);
        assert!(session.is_revealed((2, 2)));
    }

    #[test]
    fn new_rejects_board_with_wrong_mine_count() {
        let config = GameConfig::new(3, 3, 4).unwrap();
        let generator = |config: GameConfig| Board::from_mine_coords(config.size(), &[(0, 0)]);

        assert_eq!(
            GameSession::new(config, generator).map(|session| session.mines_remaining()),
            Err(GameError::InvalidConfiguration {
                rows: 3,
                cols: 3,
                mines: 4
            })
        );
    }

    #[test]
    fn new_rejects_board_with_wrong_size() {
        let config = GameConfig::new(2, 2, 1).unwrap();
        let generator = |_: GameConfig| Board::from_mine_coords((5, 5), &[(4, 4)]);

        let result = GameSession::new(config, generator);

        assert!(matches!(
            result,
            Err(GameError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn restart_rejects_mismatched_board_and_keeps_game() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut calls = 0;
        let generator = |config: GameConfig| {
            calls += 1;
            let mines: &[Coord2] = if calls > 1 { &[(0, 0), (1, 0)] } else { &[(0, 0)] };
            Board::from_mine_coords(config.size(), mines)
        };
        let mut session = GameSession::new(config, generator).unwrap();
        session.reveal_at((2, 2));
        session.toggle_flag_at((1, 1));

        assert!(matches!(
            session.restart(),
            Err(GameError::InvalidConfiguration { .. })
        ));
        assert_eq!(session.score(), 1);
        assert!(session.is_flagged((1, 1)));
        assert_eq!(session.mines_remaining(), 0);
        assert_eq!(session.board().mine_count(), 1);
    }

    #[test]
    fn apply_dispatches_inputs() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(
            session.apply(Input::ToggleFlagAt((1, 1))).unwrap(),
            Outcome::Mark(MarkOutcome::Flagged)
        );
        assert_eq!(
            session.apply(Input::RevealAt((2, 2))).unwrap(),
            Outcome::Reveal(RevealOutcome::Revealed)
        );
        assert_eq!(
            session.apply(Input::RevealAt((0, 0))).unwrap(),
            Outcome::Reveal(RevealOutcome::HitMine)
        );
        assert!(!session.apply(Input::RevealAt((2, 1))).unwrap().has_update());
        assert_eq!(session.apply(Input::Restart).unwrap(), Outcome::Restarted);
        assert!(!session.is_over());
    }
}
