//! Logical input events produced by the decoder.

/// One decoded keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Arrow up (`ESC [ A`)
    Up,
    /// Arrow down (`ESC [ B`)
    Down,
    /// Arrow left (`ESC [ D`)
    Left,
    /// Arrow right (`ESC [ C`)
    Right,
    /// Enter
    Submit,
    /// A bare escape with no sequence following it
    Escape,
    /// DEL (0x7F)
    Backspace,
    /// The `q` key. Text-entry modals reinterpret this as a literal `q`.
    Quit,
    /// Any other printable ASCII character
    Char(char),
}
