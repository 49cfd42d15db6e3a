use std::fmt;
use sapper_core::{Snapshot, Visible};

pub const GAME_OVER: &str = "Game Over! Type \"restart\" to play again.";

/// Plain-text rendering of a snapshot: status bar, then the grid with axis labels.
pub struct TextView<'a>(pub Snapshot<'a>);

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = &self.0;
        let (cols, rows) = snapshot.size();

        writeln!(
            f,
            "Score: {}   Mines Left: {}",
            snapshot.score, snapshot.mines_remaining
        )?;

        write!(f, "   ")?;
        for x in 0..cols {
            write!(f, " {}", x % 10)?;
        }
        writeln!(f)?;

        for y in 0..rows {
            write!(f, "{y:>3}")?;
            for x in 0..cols {
                write!(f, " {}", glyph(snapshot.visible_at((x, y))))?;
            }
            writeln!(f)?;
        }

        if snapshot.game_over {
            writeln!(f, "{GAME_OVER}")?;
        }
        Ok(())
    }
}

fn glyph(visible: Option<Visible>) -> char {
    match visible {
        Some(Visible::Hidden) | None => '#',
        Some(Visible::Flagged) => 'F',
        Some(Visible::Mine) => '*',
        Some(Visible::Revealed(0)) => '.',
        Some(Visible::Revealed(count)) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}
