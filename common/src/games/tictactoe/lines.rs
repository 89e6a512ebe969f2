/// Row-major cell indices that win when one mark owns all of them.
pub type Line = Vec<usize>;

/// Every winning line of an `n x n` board: rows, then columns, then the main
/// and anti diagonals. The order is stable and decides which line is reported
/// when several complete at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<Line>,
}

impl LineSet {
    pub fn new(size: usize) -> Self {
        Self { lines: lines(size) }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }
}

pub fn lines(n: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(2 * n + 2);

    for row in 0..n {
        lines.push((0..n).map(|col| row * n + col).collect());
    }

    for col in 0..n {
        lines.push((0..n).map(|row| row * n + col).collect());
    }

    lines.push((0..n).map(|i| i * n + i).collect());
    lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());

    lines
}
