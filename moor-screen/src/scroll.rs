//! Scroll-window computation
//!
//! A list pane shows `visible` rows starting at a scroll offset. The offset
//! is sticky: it only moves once the cursor has travelled `threshold` rows
//! in, which keeps the cursor on screen while minimizing jitter.

/// Compute the first visible index of a list given the cursor position.
///
/// Policy: once `cursor` advances past `threshold`, the window starts at
/// `cursor - threshold`; at exactly `threshold` it re-anchors to 0 (the
/// moment scrolling stops being necessary); otherwise `previous` is kept.
/// A list that fits entirely (`list_len <= visible`) never scrolls.
pub fn scroll_start(
    cursor: usize,
    previous: usize,
    list_len: usize,
    visible: usize,
    threshold: usize,
) -> usize {
    if list_len <= visible {
        return 0;
    }
    if cursor > threshold {
        cursor - threshold
    } else if cursor == threshold {
        0
    } else {
        previous
    }
}
