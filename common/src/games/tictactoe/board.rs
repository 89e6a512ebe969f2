use super::types::Mark;

/// One snapshot of play: `size * size` marks in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Mark>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Mark::Empty; size * size],
        }
    }

    /// Builds a board from row-major marks. Fails unless `cells.len()` is a perfect square.
    pub fn from_cells(cells: Vec<Mark>) -> Result<Self, String> {
        let size = (cells.len() as f64).sqrt() as usize;
        if size * size != cells.len() {
            return Err(format!("{} cells do not form a square board", cells.len()));
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        self.is_empty(index)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|mark| !mark.is_empty())
    }

    pub fn center(&self) -> usize {
        self.size * self.size / 2
    }

    pub fn corners(&self) -> [usize; 4] {
        let n = self.size;
        [0, n - 1, n * (n - 1), n * n - 1]
    }

    /// Copy of this board with `index` set to `mark`; the original is untouched.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = self.clone();
        next.cells[index] = mark;
        next
    }
}
