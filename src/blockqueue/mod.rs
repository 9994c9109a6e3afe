//! Provides a queue of index ranges (blocks) that worker threads pull
//! their work from. The queue itself is not changed after creation,
//! we simply work through it with an atomic counter to track the
//! index of the next block to work on.

use std::sync::atomic::{AtomicUsize, Ordering};

// see github/tray_rust/src/sampler/block_queue.rs

/// The queue of blocks to be worked on shared immutably between worker threads.
#[derive(Debug)]
pub struct BlockQueue {
    /// Half-open `(start, end)` ranges covering `0..n_items`
    blocks: Vec<(usize, usize)>,
    /// Number of items per block (the last block may be shorter)
    block_size: usize,
    /// Index of the next block to be worked on
    next: AtomicUsize,
}

impl BlockQueue {
    /// Split `0..n_items` into consecutive blocks of `block_size`
    /// items. A `block_size` of 0 is treated as 1.
    pub fn new(n_items: usize, block_size: usize) -> BlockQueue {
        let block_size: usize = block_size.max(1);
        let blocks: Vec<(usize, usize)> = (0..n_items)
            .step_by(block_size)
            .map(|start| (start, (start + block_size).min(n_items)))
            .collect();
        if blocks.is_empty() {
            log::debug!("This block queue is empty!");
        }
        BlockQueue {
            blocks,
            block_size,
            next: AtomicUsize::new(0),
        }
    }
    /// Get the number of items in a full block
    pub fn block_size(&self) -> usize {
        self.block_size
    }
    /// Get an iterator to work through the queue
    pub fn iter(&self) -> BlockQueueIterator {
        BlockQueueIterator { queue: self }
    }
    /// Get the next block in the queue or None if the queue is finished
    pub fn next(&self) -> Option<(usize, usize)> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        if i >= self.blocks.len() {
            None
        } else {
            Some(self.blocks[i])
        }
    }
    /// Get the length of the queue
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Acquire) >= self.blocks.len()
    }
}

/// Iterator to work through the queue safely
pub struct BlockQueueIterator<'a> {
    queue: &'a BlockQueue,
}

impl<'a> Iterator for BlockQueueIterator<'a> {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<(usize, usize)> {
        self.queue.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_cover_all_items_once() {
        let bq = BlockQueue::new(10, 4);
        assert_eq!(bq.len(), 3);
        assert_eq!(bq.block_size(), 4);
        let blocks: Vec<(usize, usize)> = bq.iter().collect();
        assert_eq!(blocks, vec![(0, 4), (4, 8), (8, 10)]);
        assert!(bq.is_empty());
        assert_eq!(bq.next(), None);
    }

    #[test]
    fn empty_and_degenerate_sizes() {
        let bq = BlockQueue::new(0, 16);
        assert_eq!(bq.len(), 0);
        assert!(bq.is_empty());
        let bq = BlockQueue::new(3, 0);
        assert_eq!(bq.iter().count(), 3);
    }
}
