//! Byte sources
//!
//! The decoder reads from anything that can block for one byte and probe
//! for a pending one. The probe is what lets a modal tell a bare ESC press
//! apart from the first byte of an arrow-key sequence.

use std::collections::VecDeque;
use std::io;

/// A stream of raw input bytes
pub trait ByteSource {
    /// Block until one byte is available
    fn next_byte(&mut self) -> io::Result<u8>;

    /// Return a byte only if one is already pending; never blocks
    fn poll_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> io::Result<u8> {
        (**self).next_byte()
    }

    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).poll_byte()
    }
}

/// A deterministic in-memory source for tests and headless runs.
///
/// `next_byte` on an exhausted script reports `UnexpectedEof`, which the
/// reader surfaces as a closed input.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
}

impl ScriptedSource {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        ScriptedSource {
            bytes: bytes.as_ref().iter().copied().collect(),
        }
    }

    /// Append more scripted bytes
    pub fn push(&mut self, bytes: impl AsRef<[u8]>) {
        self.bytes.extend(bytes.as_ref().iter().copied());
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for ScriptedSource {
    fn next_byte(&mut self) -> io::Result<u8> {
        self.bytes
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }
}
