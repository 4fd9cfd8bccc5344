//! User-memory access.
//!
//! Mirrors `copy_to_user` / `copy_from_user`: both return the number of
//! bytes that could **not** be copied, 0 meaning success. Callers decide how
//! to turn a non-zero count into an errno.

/// Destination buffer supplied by a `read(2)` caller.
pub trait UserSliceWriter {
    /// Bytes the caller asked for.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `src` to the start of the user buffer.
    ///
    /// `src.len()` must not exceed [`len`](Self::len).
    fn copy_to_user(&mut self, src: &[u8]) -> usize;
}

/// Source buffer supplied by a `write(2)` caller.
pub trait UserSliceReader {
    /// Bytes the caller passed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `dst` from the start of the user buffer.
    ///
    /// `dst.len()` must not exceed [`len`](Self::len).
    fn copy_from_user(&mut self, dst: &mut [u8]) -> usize;
}

/// Memory the caller can always access; copies never fault.
pub struct SliceWriter<'a> {
    data: &'a mut [u8],
}

impl<'a> SliceWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }
}

impl UserSliceWriter for SliceWriter<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn copy_to_user(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.data.len());
        self.data[..n].copy_from_slice(&src[..n]);
        src.len() - n
    }
}

pub struct SliceReader<'a> {
    data: &'a [u8],
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl UserSliceReader for SliceReader<'_> {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn copy_from_user(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.data.len());
        dst[..n].copy_from_slice(&self.data[..n]);
        dst.len() - n
    }
}
