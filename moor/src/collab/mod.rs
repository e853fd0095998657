//! External collaborators
//!
//! The UI core calls the git status provider, the file-tree walker and the
//! editor launcher through narrow traits; none of their failures may crash
//! the UI (they degrade the view instead), and the tests swap in mocks.

pub mod editor;
pub mod git;
pub mod tree;

pub use editor::{CommandEditor, EditorLauncher};
pub use git::{GitStatus, StatusProvider};
pub use tree::{FsTree, TreeProvider};
