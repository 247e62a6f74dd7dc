use std::fmt;

use crate::error::{CodecError, Result};

/// Where a buffer's backing memory lives, as negotiated with the engine's
/// I/O path.
///
/// `OffHeap` buffers are the ones the engine allocates for direct I/O; some
/// algorithm bindings only have a call path for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferPlacement {
    OnHeap,
    OffHeap,
}

impl fmt::Display for BufferPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferPlacement::OnHeap => f.write_str("on-heap"),
            BufferPlacement::OffHeap => f.write_str("off-heap"),
        }
    }
}

/// A cursor-bearing window over a byte region.
///
/// # Cursor contract
/// `start <= position <= limit <= capacity` holds at all times. All four
/// values are absolute indexes into the backing storage.
///
/// - As an **input**, the bytes in `position..limit` are what a call consumes.
///   A call that consumes everything leaves `position == limit`.
/// - As an **output**, writing starts at `position` and may use up to
///   `limit`. After the call `position` marks the end of what was written.
///
/// [`flip`](Self::flip) turns a freshly written output into an input over the
/// written bytes, the same way the engine hands a compressed chunk to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferView {
    bytes: Vec<u8>,
    start: usize,
    position: usize,
    limit: usize,
    placement: BufferPlacement,
}

impl BufferView {
    /// Zero-filled view of `capacity` bytes, positioned for writing.
    pub fn allocate(capacity: usize, placement: BufferPlacement) -> Self {
        Self::wrap(vec![0u8; capacity], placement)
    }

    pub fn allocate_direct(capacity: usize) -> Self {
        Self::allocate(capacity, BufferPlacement::OffHeap)
    }

    pub fn allocate_heap(capacity: usize) -> Self {
        Self::allocate(capacity, BufferPlacement::OnHeap)
    }

    /// View over the whole of `bytes`: position 0, limit = capacity.
    pub fn wrap(bytes: Vec<u8>, placement: BufferPlacement) -> Self {
        let limit = bytes.len();
        Self {
            bytes,
            start: 0,
            position: 0,
            limit,
            placement,
        }
    }

    /// View over `bytes[start..limit]`, positioned at `start`.
    pub fn with_window(
        bytes: Vec<u8>,
        start: usize,
        limit: usize,
        placement: BufferPlacement,
    ) -> Result<Self> {
        if start > limit || limit > bytes.len() {
            return Err(CodecError::InvalidCursor {
                position: start,
                limit,
                capacity: bytes.len(),
            });
        }
        Ok(Self {
            bytes,
            start,
            position: start,
            limit,
            placement,
        })
    }

    /// Copy `src` into a new view that is ready to be read (position 0,
    /// limit = `src.len()`).
    pub fn copy_from_slice(src: &[u8], placement: BufferPlacement) -> Self {
        Self::wrap(src.to_vec(), placement)
    }

    #[inline]
    pub fn placement(&self) -> BufferPlacement {
        self.placement
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Move the cursor to `position`, which must lie in `start..=limit`.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position < self.start || position > self.limit {
            return Err(self.invalid_cursor(position, self.limit));
        }
        self.position = position;
        Ok(())
    }

    /// Advance the cursor by `n` bytes, which must not exceed `remaining()`.
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(CodecError::BufferTooSmall {
                needed: n,
                available: self.remaining(),
            });
        }
        self.position += n;
        Ok(())
    }

    /// Limit to what has been written, rewind to the start.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = self.start;
    }

    /// Bytes in `position..limit`.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.bytes[self.position..self.limit]
    }

    pub fn remaining_slice_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[self.position..self.limit]
    }

    /// Copy of the bytes in `position..limit`; the cursor is not moved.
    pub fn to_remaining_vec(&self) -> Vec<u8> {
        self.remaining_slice().to_vec()
    }

    fn invalid_cursor(&self, position: usize, limit: usize) -> CodecError {
        CodecError::InvalidCursor {
            position,
            limit,
            capacity: self.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_open_for_writing() {
        let view = BufferView::allocate_direct(16);
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 16);
        assert_eq!(view.remaining(), 16);
        assert_eq!(view.placement(), BufferPlacement::OffHeap);
    }

    #[test]
    fn advance_then_flip_exposes_written_bytes() {
        let mut view = BufferView::allocate_heap(8);
        view.remaining_slice_mut()[..3].copy_from_slice(b"abc");
        view.advance(3).unwrap();
        assert_eq!(view.position(), 3);
        view.flip();
        assert_eq!(view.position(), 0);
        assert_eq!(view.limit(), 3);
        assert_eq!(view.remaining_slice(), b"abc");
    }

    #[test]
    fn advance_past_limit_is_rejected() {
        let mut view = BufferView::allocate_heap(2);
        let err = view.advance(3).unwrap_err();
        assert!(matches!(
            err,
            CodecError::BufferTooSmall {
                needed: 3,
                available: 2
            }
        ));
        assert_eq!(view.position(), 0);
    }

    #[test]
    fn window_respects_start_offset() {
        let view =
            BufferView::with_window(b"xxhelloyy".to_vec(), 2, 7, BufferPlacement::OffHeap).unwrap();
        assert_eq!(view.start(), 2);
        assert_eq!(view.remaining_slice(), b"hello");

        let mut view = view;
        view.advance(5).unwrap();
        view.flip();
        assert_eq!(view.position(), 2);
        assert_eq!(view.remaining_slice(), b"hello");
    }

    #[test]
    fn window_out_of_range_is_rejected() {
        assert!(BufferView::with_window(vec![0; 4], 3, 2, BufferPlacement::OnHeap).is_err());
        assert!(BufferView::with_window(vec![0; 4], 0, 5, BufferPlacement::OnHeap).is_err());
    }

    #[test]
    fn cursor_moves_stay_within_window() {
        let mut view =
            BufferView::with_window(vec![0; 10], 2, 6, BufferPlacement::OffHeap).unwrap();
        view.set_position(6).unwrap();
        assert_eq!(view.remaining(), 0);
        assert!(view.set_position(1).is_err());
        assert!(view.set_position(7).is_err());
        assert!(view.advance(1).is_err());
    }

    #[test]
    fn placement_display() {
        assert_eq!(BufferPlacement::OnHeap.to_string(), "on-heap");
        assert_eq!(BufferPlacement::OffHeap.to_string(), "off-heap");
    }
}
