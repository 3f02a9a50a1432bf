//! Plain-text rendering of the grid interior.

use std::fmt::Write;

use crate::compute::Grid;

const ALIVE: &str = "\u{2B1C} ";
const DEAD: &str = "   ";

/// Render the interior, one line per row.
pub fn render_text(grid: &Grid) -> String {
    let n = grid.size();
    let mut out = String::with_capacity(n * (n * ALIVE.len() + 1));
    for (i, alive) in grid.interior_status().into_iter().enumerate() {
        out.push_str(if alive { ALIVE } else { DEAD });
        if (i + 1) % n == 0 {
            out.push('\n');
        }
    }
    out
}

/// Render with a generation header, as shown between animation frames.
pub fn render_frame(grid: &Grid, generation: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n-------------- GENERATION {} ----------------", generation);
    out.push_str(&render_text(grid));
    out
}
