use crate::FrozenLake;
use itertools::Itertools;

/// Text frame: the last action (or an empty line), then the lake with the
/// agent's tile on a red background.
pub fn render_ansi(env: &FrozenLake) -> String {
    let grid = env.grid();
    let agent = grid.to_rc(env.state());

    let mut out = match env.last_action() {
        Some(a) => format!("  ({})\n", a.name()),
        None => "\n".to_string(),
    };
    for row in 0..grid.nrow() {
        let line = (0..grid.ncol())
            .map(|col| {
                let tile = grid.tile(row, col);
                if (row, col) == agent {
                    format!("\u{1b}[41m{tile}\u{1b}[0m")
                } else {
                    tile.to_string()
                }
            })
            .join("");
        out.push_str(&line);
        out.push('\n');
    }

    out
}
