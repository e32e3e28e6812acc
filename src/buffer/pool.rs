//! Thread-local pool of scratch buffers for stream copies.

use std::cell::RefCell;

/// Size of a pooled scratch buffer.
pub const SCRATCH_SIZE: usize = 8 * 1024; // 8 KiB

/// Maximum number of scratch buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable read buffer of [`SCRATCH_SIZE`] bytes.
pub struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        let mut data = SCRATCH_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_else(|| Vec::with_capacity(SCRATCH_SIZE));
        data.resize(SCRATCH_SIZE, 0);
        Self { data }
    }

    /// Returns the whole scratch area for a reader to fill.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        if self.data.capacity() <= SCRATCH_SIZE * 2 {
            self.data.clear();
            SCRATCH_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static SCRATCH_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_take() {
        let mut buf = ScratchBuffer::take();
        assert_eq!(buf.as_mut_slice().len(), SCRATCH_SIZE);
    }

    #[test]
    fn test_scratch_reuse_is_full_length() {
        {
            let mut buf = ScratchBuffer::take();
            buf.as_mut_slice()[0] = 0xFF;
        }

        // The returned buffer comes back cleared and resized.
        let mut buf = ScratchBuffer::take();
        assert_eq!(buf.as_mut_slice().len(), SCRATCH_SIZE);
        assert_eq!(buf.as_mut_slice()[0], 0);
    }

    #[test]
    fn test_pool_is_bounded() {
        let held: Vec<_> = (0..MAX_POOL_SIZE + 2).map(|_| ScratchBuffer::take()).collect();
        drop(held);
        let pooled = SCRATCH_POOL.with(|pool| pool.borrow().len());
        assert!(pooled <= MAX_POOL_SIZE);
    }
}
