//! Echo device: one message buffer behind the four file operations.
//!
//!  * write stores `<data>(<count> letters)`, replacing whatever was there.
//!  * read hands the stored message out once, then the buffer is empty.
//!
//! Every opener shares the same buffer; the lock keeps buffer and length
//! consistent with each other.

use core::fmt::{self, Write};

use log::{info, warn};
use shared::constants::{ANNOTATION_PREFIX, ANNOTATION_SUFFIX, MSG_CAPACITY};
use shared::{Errno, KResult};
use spin::Mutex;

use crate::dispatch::{File, FileOperations};
use crate::uaccess::{UserSliceReader, UserSliceWriter};

/// Longest possible `(<usize> letters)` annotation.
const ANNOTATION_MAX: usize = 32;

/*──────────────────────────────── message ──────────────────────────────*/

/// Fixed-capacity message. `len <= MSG_CAPACITY` always holds.
#[derive(Clone)]
pub struct Message {
    buf: [u8; MSG_CAPACITY],
    len: usize,
}

impl Message {
    pub const fn new() -> Self {
        Self { buf: [0; MSG_CAPACITY], len: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Replace the content with `payload` followed by `(<count> letters)`.
    ///
    /// `payload` stops at its first NUL byte. When the result would not fit,
    /// the payload is cut short; the annotation is always kept whole.
    pub fn set_annotated(&mut self, payload: &[u8], count: usize) {
        let mut note = StackBuf::<ANNOTATION_MAX>::new();
        let res = write!(note, "{ANNOTATION_PREFIX}{count}{ANNOTATION_SUFFIX}");
        // 1 + 20 digits + 9 always fits in ANNOTATION_MAX
        debug_assert!(res.is_ok());
        let note = note.as_bytes();

        let payload = match payload.iter().position(|&b| b == 0) {
            Some(nul) => &payload[..nul],
            None => payload,
        };
        let take = payload.len().min(MSG_CAPACITY - note.len());

        self.buf[..take].copy_from_slice(&payload[..take]);
        self.buf[take..take + note.len()].copy_from_slice(note);
        self.len = take + note.len();
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("len", &self.len)
            .field("text", &core::str::from_utf8(self.as_bytes()))
            .finish()
    }
}

/// `fmt::Write` sink over a stack array; refuses to overflow.
struct StackBuf<const N: usize> {
    buf: [u8; N],
    pos: usize,
}

impl<const N: usize> StackBuf<N> {
    const fn new() -> Self {
        Self { buf: [0; N], pos: 0 }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl<const N: usize> Write for StackBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

/*──────────────────────────────── device ───────────────────────────────*/

pub struct EchoDevice {
    message: Mutex<Message>,
}

impl EchoDevice {
    pub const fn new() -> Self {
        Self { message: Mutex::new(Message::new()) }
    }

    /// Bytes the next read would return.
    pub fn pending(&self) -> usize {
        self.message.lock().len()
    }
}

impl Default for EchoDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOperations for EchoDevice {
    fn open(&self, file: &File) -> KResult<()> {
        info!("device opened (file {})", file.id);
        Ok(())
    }

    fn read(
        &self,
        file: &File,
        buf: &mut dyn UserSliceWriter,
        _offset: &mut u64,
    ) -> KResult<usize> {
        let mut msg = self.message.lock();
        let n = msg.len().min(buf.len());

        let failed = buf.copy_to_user(&msg.as_bytes()[..n]);
        if failed != 0 {
            warn!("failed to send {} characters to the user (file {})", failed, file.id);
            return Err(Errno::EFAULT);
        }

        info!("sent {} characters to the user (file {})", n, file.id);
        msg.clear();
        Ok(n)
    }

    fn write(
        &self,
        file: &File,
        buf: &mut dyn UserSliceReader,
        _offset: &mut u64,
    ) -> KResult<usize> {
        let count = buf.len();

        // Nothing past MSG_CAPACITY can end up in the message.
        let mut staged = [0u8; MSG_CAPACITY];
        let want = count.min(MSG_CAPACITY);
        let failed = buf.copy_from_user(&mut staged[..want]);
        if failed != 0 {
            warn!("failed to receive {} characters from the user (file {})", failed, file.id);
            return Err(Errno::EFAULT);
        }

        self.message.lock().set_annotated(&staged[..want], count);
        info!("received {} characters from the user (file {})", count, file.id);
        Ok(count)
    }

    fn release(&self, file: &File) -> KResult<()> {
        info!("device closed (file {})", file.id);
        Ok(())
    }
}
