//! Window-size query via ioctl.

use nix::libc;

use crate::error::TtyError;

/// Current terminal dimensions as `(columns, rows)`
pub fn window_size() -> Result<(usize, usize), TtyError> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    if result != 0 {
        return Err(TtyError::WindowSize(nix::Error::last()));
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        // some terminals report zero before the first resize
        return Ok((80, 24));
    }
    Ok((ws.ws_col as usize, ws.ws_row as usize))
}
