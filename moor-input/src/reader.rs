//! Blocking event reader
//!
//! Combines a [`ByteSource`] with the [`Decoder`]: one call to `next()`
//! blocks until exactly one logical event is available. While the decoder
//! sits mid-sequence the reader switches to the source's non-blocking
//! probe, so a bare ESC press resolves to [`Event::Escape`] instead of
//! waiting forever for a bracket that is not coming.

use std::io;

use thiserror::Error;

use crate::decoder::Decoder;
use crate::event::Event;
use crate::source::ByteSource;

#[derive(Error, Debug)]
pub enum InputError {
    /// The input stream ended (stdin closed, script exhausted)
    #[error("input source closed")]
    Closed,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// A blocking stream of logical events over any byte source
pub struct Events<S> {
    source: S,
    decoder: Decoder,
}

impl<S: ByteSource> Events<S> {
    pub fn new(source: S) -> Self {
        Events {
            source,
            decoder: Decoder::new(),
        }
    }

    /// Block until the next logical event.
    ///
    /// Never returns a partial escape sequence as printable characters: a
    /// pending sequence is either completed from already-buffered bytes or
    /// resolved to a bare [`Event::Escape`].
    pub fn next(&mut self) -> Result<Event, InputError> {
        loop {
            let byte = match self.source.next_byte() {
                Ok(byte) => byte,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(InputError::Closed)
                }
                Err(e) => return Err(e.into()),
            };
            if let Some(event) = self.decoder.advance(byte) {
                return Ok(event);
            }
            while self.decoder.mid_sequence() {
                match self.source.poll_byte()? {
                    Some(byte) => {
                        if let Some(event) = self.decoder.advance(byte) {
                            return Ok(event);
                        }
                    }
                    None => {
                        // nothing pending behind the ESC: it was a key press
                        self.decoder.reset();
                        return Ok(Event::Escape);
                    }
                }
            }
        }
    }
}
