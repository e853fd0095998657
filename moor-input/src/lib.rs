//! Moor Input Decoding
//!
//! Turns the raw byte stream of a terminal in raw mode into discrete
//! logical events. The decoder is a small state machine over single bytes;
//! [`Events`] adds the blocking read loop and bare-escape resolution on top
//! of any [`ByteSource`].

pub mod decoder;
pub mod event;
pub mod reader;
pub mod source;

pub use decoder::Decoder;
pub use event::Event;
pub use reader::{Events, InputError};
pub use source::{ByteSource, ScriptedSource};
