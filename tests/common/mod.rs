use frozen_lake::*;
use std::collections::VecDeque;

#[allow(dead_code)]
pub fn discrete_value(space: &ObsActSpace) -> Discrete {
    match space {
        ObsActSpace::Discrete { n } => *n,
        _ => panic!("{space:?} is not ObsActSpace::Discrete."),
    }
}

#[allow(dead_code)]
pub fn discrete_item_value(obs: &Observation) -> Discrete {
    match obs.discrete_value() {
        Some(n) => n,
        None => panic!("{obs:?} is not a single discrete value."),
    }
}

/// Breadth-first walk over the letters, independent of the crate's own search.
#[allow(dead_code)]
pub fn solvable(desc: &[String]) -> bool {
    let rows = desc.iter().map(|r| r.as_bytes()).collect::<Vec<_>>();
    let (nrow, ncol) = (rows.len(), rows[0].len());
    let start = (0..nrow)
        .flat_map(|r| (0..ncol).map(move |c| (r, c)))
        .find(|&(r, c)| rows[r][c] == b'S')
        .expect("map has a start");

    let mut seen = vec![vec![false; ncol]; nrow];
    let mut queue = VecDeque::from([start]);
    seen[start.0][start.1] = true;
    while let Some((r, c)) = queue.pop_front() {
        if rows[r][c] == b'G' {
            return true;
        }
        let mut neighbours = vec![(r + 1, c), (r, c + 1)];
        if r > 0 {
            neighbours.push((r - 1, c));
        }
        if c > 0 {
            neighbours.push((r, c - 1));
        }
        for (nr, nc) in neighbours {
            if nr < nrow && nc < ncol && !seen[nr][nc] && rows[nr][nc] != b'H' {
                seen[nr][nc] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    false
}
