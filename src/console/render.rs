//! Console Rendering
//!
//! Tabular probability matrix and the die selection menu.

use prettytable::{format, Cell, Row, Table};

use crate::game::dice::DiceCatalog;
use crate::game::probability::ProbabilityMatrix;

/// Render the matrix: cell `[i][j]` is the probability that die `i` beats die `j`.
///
/// Labels use the same indices as the selection menu. A non-transitive
/// cycle, if any, is listed under the table.
pub fn render_matrix(catalog: &DiceCatalog, matrix: &ProbabilityMatrix) -> String {
    let label = |i: usize| match catalog.get(i) {
        Some(die) => format!("#{} {}", i, die),
        None => format!("#{}", i),
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);

    let mut titles = vec![Cell::new("row beats column")];
    titles.extend((0..matrix.size()).map(|j| Cell::new(&label(j))));
    table.set_titles(Row::new(titles));

    for i in 0..matrix.size() {
        let mut cells = vec![Cell::new(&label(i))];
        cells.extend((0..matrix.size()).map(|j| match matrix.get(i, j) {
            Some(matchup) => Cell::new(&matchup.to_string()),
            None => Cell::new("-"),
        }));
        table.add_row(Row::new(cells));
    }

    let mut out = table.to_string();
    if let Some(cycle) = matrix.non_transitive_cycle() {
        let mut names: Vec<String> = cycle.iter().map(|i| format!("#{}", i)).collect();
        names.push(format!("#{}", cycle[0]));
        out.push_str(&format!("Non-transitive cycle: {}\n", names.join(" > ")));
    }
    out
}

/// Menu lines for dice the user may pick.
pub fn die_menu(catalog: &DiceCatalog, forbidden: Option<usize>) -> Vec<String> {
    let mut lines: Vec<String> = catalog
        .available(forbidden)
        .into_iter()
        .filter_map(|i| catalog.get(i).map(|die| format!("{} - {}", i, die)))
        .collect();
    lines.push("? - show win probabilities".to_string());
    lines.push("x - exit".to_string());
    lines
}
