use std::collections::HashMap;

use spark_core::ConnectionIndex;

use super::forces::distance;

/// Two particles close enough to be joined by a line; `a < b` always
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

/// Line strength in [0, 1]: 1 for coincident points, 0 at `threshold`
pub fn strength(distance: f32, threshold: f32) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// Find every unordered pair closer than `threshold`, sorted by `(a, b)`
pub fn find_connections(
    positions: &[[f32; 2]],
    threshold: f32,
    index: ConnectionIndex,
) -> Vec<Connection> {
    match index {
        ConnectionIndex::AllPairs => all_pairs(positions, threshold),
        ConnectionIndex::Grid => SpatialGrid::build(positions, threshold).connections(positions, threshold),
    }
}

/// Brute-force pair scan. O(n²) per call.
pub fn all_pairs(positions: &[[f32; 2]], threshold: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    for (a, &pa) in positions.iter().enumerate() {
        for (b, &pb) in positions.iter().enumerate().skip(a + 1) {
            let d = distance(pa, pb);
            if d < threshold {
                out.push(Connection { a, b, distance: d });
            }
        }
    }
    out
}

/// Uniform grid with cells one threshold wide.
/// Any pair within the threshold lies in the same or an adjacent cell.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    pub fn build(positions: &[[f32; 2]], cell_size: f32) -> Self {
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        let mut cells: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, &p) in positions.iter().enumerate() {
            cells.entry(cell_of(p, cell_size)).or_default().push(i);
        }
        Self { cell_size, cells }
    }

    pub fn connections(&self, positions: &[[f32; 2]], threshold: f32) -> Vec<Connection> {
        let mut out = Vec::new();
        for (a, &pa) in positions.iter().enumerate() {
            let (cx, cy) = cell_of(pa, self.cell_size);
            for nx in cx - 1..=cx + 1 {
                for ny in cy - 1..=cy + 1 {
                    let Some(bucket) = self.cells.get(&(nx, ny)) else {
                        continue;
                    };
                    for &b in bucket {
                        if b <= a {
                            continue;
                        }
                        let d = distance(pa, positions[b]);
                        if d < threshold {
                            out.push(Connection { a, b, distance: d });
                        }
                    }
                }
            }
        }
        out.sort_by_key(|c| (c.a, c.b));
        out
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

fn cell_of(p: [f32; 2], cell_size: f32) -> (i32, i32) {
    ((p[0] / cell_size).floor() as i32, (p[1] / cell_size).floor() as i32)
}
