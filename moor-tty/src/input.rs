//! Stdin byte source
//!
//! Implements the decoder's [`ByteSource`] over the real terminal: a
//! blocking single-byte read plus a zero-timeout poll used to tell a bare
//! ESC press apart from the head of an arrow-key sequence.

use std::io;

use moor_input::ByteSource;
use nix::libc;
use nix::poll::{poll, PollFd, PollFlags};
use nix::unistd;

/// Raw keyboard bytes from the controlling terminal
#[derive(Debug, Default)]
pub struct TtyInput;

impl TtyInput {
    pub fn new() -> Self {
        TtyInput
    }

    fn read_byte(&self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            match unistd::read(libc::STDIN_FILENO, &mut buf) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "stdin closed",
                    ))
                }
                Ok(_) => return Ok(buf[0]),
                Err(nix::Error::EINTR) => continue,
                Err(e) => return Err(io::Error::from_raw_os_error(e as i32)),
            }
        }
    }
}

impl ByteSource for TtyInput {
    fn next_byte(&mut self) -> io::Result<u8> {
        self.read_byte()
    }

    fn poll_byte(&mut self) -> io::Result<Option<u8>> {
        let stdin = io::stdin();
        let mut fds = [PollFd::new(&stdin, PollFlags::POLLIN)];
        let ready = poll(&mut fds, 0).map_err(|e| io::Error::from_raw_os_error(e as i32))?;
        if ready == 0 {
            return Ok(None);
        }
        let readable = fds[0]
            .revents()
            .map(|r| r.contains(PollFlags::POLLIN))
            .unwrap_or(false);
        if !readable {
            return Ok(None);
        }
        self.read_byte().map(Some)
    }
}
