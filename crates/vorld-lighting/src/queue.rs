use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::VoxelPos;

/// FIFO of distinct voxel positions. Pushing a position that is already
/// queued is a no-op; popping frees it to be queued again.
#[derive(Clone, Debug, Default)]
pub struct WorkQueue {
    order: VecDeque<VoxelPos>,
    members: HashSet<VoxelPos>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `pos` was already queued.
    #[inline]
    pub fn push(&mut self, pos: VoxelPos) -> bool {
        if !self.members.insert(pos) {
            return false;
        }
        self.order.push_back(pos);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<VoxelPos> {
        let pos = self.order.pop_front()?;
        self.members.remove(&pos);
        Some(pos)
    }

    #[inline]
    pub fn peek(&self) -> Option<VoxelPos> {
        self.order.front().copied()
    }

    #[inline]
    pub fn contains(&self, pos: VoxelPos) -> bool {
        self.members.contains(&pos)
    }

    /// Empties the queue, keeping allocations for reuse.
    pub fn reset(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
