/// Height index for one vertical stack of chunks: which chunk-Y range has
/// been written and the highest non-empty voxel of every column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightEntry {
    pub chunk_i: i32,
    pub chunk_k: i32,
    pub min_chunk_j: i32,
    pub max_chunk_j: i32,
    size: usize,
    max_y: Vec<Option<i32>>,
}

impl HeightEntry {
    pub fn new(size: usize, chunk_i: i32, chunk_j: i32, chunk_k: i32) -> Self {
        Self {
            chunk_i,
            chunk_k,
            min_chunk_j: chunk_j,
            max_chunk_j: chunk_j,
            size,
            max_y: vec![None; size * size],
        }
    }

    #[inline]
    fn slot(&self, i: usize, k: usize) -> usize {
        i + k * self.size
    }

    /// Highest non-empty world Y of local column `(i, k)`.
    #[inline]
    pub fn max_y(&self, i: usize, k: usize) -> Option<i32> {
        self.max_y[self.slot(i, k)]
    }

    #[inline]
    pub fn set_max_y(&mut self, i: usize, k: usize, y: Option<i32>) {
        let s = self.slot(i, k);
        self.max_y[s] = y;
    }

    /// Widens the written chunk-Y range to include `chunk_j`.
    #[inline]
    pub fn include_chunk_j(&mut self, chunk_j: i32) {
        self.min_chunk_j = self.min_chunk_j.min(chunk_j);
        self.max_chunk_j = self.max_chunk_j.max(chunk_j);
    }

    /// World Y of the top voxel row of the highest written chunk.
    #[inline]
    pub fn ceiling_y(&self) -> i32 {
        self.max_chunk_j * self.size as i32 + self.size as i32 - 1
    }

    /// Folds another entry for the same column into this one.
    pub fn merge(&mut self, other: &HeightEntry) {
        self.include_chunk_j(other.min_chunk_j);
        self.include_chunk_j(other.max_chunk_j);
        for (mine, theirs) in self.max_y.iter_mut().zip(&other.max_y) {
            *mine = (*mine).max(*theirs);
        }
    }
}
