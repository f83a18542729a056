use rand::Rng;

/// A grid cell identified by (row, col).
pub type Position = (usize, usize);

/// Immutable 2-D occupancy grid. `true` marks a blocked cell.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// An all-free grid of the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![vec![false; cols]; rows],
        }
    }

    /// Parses an ASCII layout: `.` free, `#` blocked, one row per line.
    pub fn from_str(layout: &str) -> Self {
        let cells: Vec<Vec<bool>> = layout
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|ch| ch != '.').collect())
            .collect();
        let rows = cells.len();
        let cols = cells.first().map_or(0, |row| row.len());
        Grid { rows, cols, cells }
    }

    /// A grid where each cell is independently blocked with probability
    /// `block_prob`. Start and goal are cleared afterwards so the instance
    /// is not trivially unsolvable.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        block_prob: f64,
        start: Position,
        goal: Position,
        rng: &mut R,
    ) -> Self {
        let mut grid = Grid::new(rows, cols);
        for row in grid.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.gen_bool(block_prob);
            }
        }
        grid.cells[start.0][start.1] = false;
        grid.cells[goal.0][goal.1] = false;
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn set_blocked(&mut self, position: Position, blocked: bool) {
        self.cells[position.0][position.1] = blocked;
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.0 < self.rows && position.1 < self.cols
    }

    pub fn is_free(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.cells[position.0][position.1]
    }

    /// In-bounds free cells one 4-directional step away.
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        let directions = [(-1, 0), (1, 0), (0, -1), (0, 1)]; // Up, down, left, right
        let mut neighbors = Vec::new();

        for &(dr, dc) in &directions {
            let new_r = position.0 as i64 + dr;
            let new_c = position.1 as i64 + dc;
            if new_r >= 0
                && new_c >= 0
                && new_r < self.rows as i64
                && new_c < self.cols as i64
                && !self.cells[new_r as usize][new_c as usize]
            {
                neighbors.push((new_r as usize, new_c as usize));
            }
        }

        neighbors
    }

    /// Number of free cells reachable from `from`, `from` included.
    pub fn reachable_free_cells(&self, from: Position) -> usize {
        let mut visited = vec![vec![false; self.cols]; self.rows];
        let mut stack = vec![from];
        let mut count = 0;
        visited[from.0][from.1] = true;
        while let Some(current) = stack.pop() {
            count += 1;
            for neighbor in self.neighbors(current) {
                if !visited[neighbor.0][neighbor.1] {
                    visited[neighbor.0][neighbor.1] = true;
                    stack.push(neighbor);
                }
            }
        }
        count
    }
}
