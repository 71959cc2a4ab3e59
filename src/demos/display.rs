//! Console rendering of up/down frames.
//!
//! One row per cell-in-column, one cell per column:
//!
//! ```text
//! ---------------------------------------------------
//! | Cycle: 01 | Step: 03 | Value: 02 | Anomaly: 1.0 |
//! ---------------------------------------------------
//! | Column  | 00 | 01 | 02 | 03 | 04 | 05 | 06 | 07 |
//! ---------------------------------------------------
//! | Cell    | 00 | 02 | 04 | 06 | 08 | 10 | 12 | 14 |
//! | Cell    | 01 | 03 | 05 | 07 | 09 | 11 | 13 | 15 |
//! ```
//!
//! Cell ids are `column * cells_per_column + row`. Active cells get a
//! yellow foreground, winner cells a green background and predictive cells a
//! yellow background.

use std::fmt;

use owo_colors::{OwoColorize, Style};

use super::up_down::Frame;

const SEPARATOR_WIDTH: usize = 51;

/// Cell grid geometry and colour mode
#[derive(Clone, Copy, Debug)]
pub struct FrameRenderer {
    pub columns: usize,
    pub cells_per_column: usize,
    pub colored: bool,
}

impl FrameRenderer {
    pub fn new(columns: usize, cells_per_column: usize) -> Self {
        Self {
            columns,
            cells_per_column,
            colored: false,
        }
    }

    /// Colour only when stdout is a terminal
    pub fn auto(columns: usize, cells_per_column: usize) -> Self {
        Self {
            colored: console::Term::stdout().is_term(),
            ..Self::new(columns, cells_per_column)
        }
    }

    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Render a full frame, header included
    pub fn render(&self, frame: &Frame) -> String {
        RenderedFrame { renderer: self, frame }.to_string()
    }
}

struct RenderedFrame<'a> {
    renderer: &'a FrameRenderer,
    frame: &'a Frame,
}

impl fmt::Display for RenderedFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RenderedFrame { renderer, frame } = *self;
        let separator = "-".repeat(SEPARATOR_WIDTH);

        writeln!(f, "{}", separator)?;
        writeln!(
            f,
            "| Cycle: {:02} | Step: {:02} | Value: {:02} | Anomaly: {:.1} |",
            frame.cycle, frame.step, frame.value, frame.anomaly
        )?;
        writeln!(f, "{}", separator)?;

        f.write_str("| Column  |")?;
        for column in 0..renderer.columns {
            write!(f, " {:02} |", column)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", separator)?;

        let active = frame.active.get_dense();
        let winner = frame.winner.get_dense();
        let predictive = frame.predictive.get_dense();

        for row in 0..renderer.cells_per_column {
            f.write_str("| Cell    |")?;
            for column in 0..renderer.columns {
                let cell = column * renderer.cells_per_column + row;
                let label = format!("{:02}", cell);
                let style = cell_style(
                    is_set(&active, cell),
                    is_set(&winner, cell),
                    is_set(&predictive, cell),
                );
                if renderer.colored {
                    write!(f, " {} |", label.style(style))?;
                } else {
                    write!(f, " {} |", label)?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Positions beyond the end of a short SDR read as inactive
fn is_set(dense: &[u8], cell: usize) -> bool {
    dense.get(cell).copied() == Some(1)
}

/// Predictive background wins over winner background
fn cell_style(active: bool, winner: bool, predictive: bool) -> Style {
    let mut style = Style::new().white().on_black();
    if active {
        style = style.yellow();
    }
    if winner {
        style = style.on_green();
    }
    if predictive {
        style = style.on_yellow();
    }
    style
}
