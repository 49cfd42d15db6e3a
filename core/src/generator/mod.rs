use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of boards for a session, called once at start and once per restart.
pub trait BoardGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<Board>;
}

impl<F> BoardGenerator for F
where
    F: FnMut(GameConfig) -> Result<Board>,
{
    fn generate(&mut self, config: GameConfig) -> Result<Board> {
        self(config)
    }
}
