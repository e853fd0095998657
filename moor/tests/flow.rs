//! End-to-end state machine tests
//!
//! Drive the whole UI with a scripted byte source and mock collaborators,
//! then inspect what the collaborators were asked to do and what frames
//! were painted. No terminal is involved.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use moor::app::{App, ExitAction};
use moor::collab::{EditorLauncher, StatusProvider, TreeProvider};
use moor::terminal::Terminal;
use moor_input::{ByteSource, ScriptedSource};
use moor_screen::{ScreenBuffer, Snapshot, StyleSpan};
use moor_store::{Project, ProjectStore, StoreError, Todo};
use moor_tty::TtyError;

const ARROW_UP: &[u8] = &[0x1B, b'[', b'A'];
const ARROW_DOWN: &[u8] = &[0x1B, b'[', b'B'];
const ARROW_RIGHT: &[u8] = &[0x1B, b'[', b'C'];

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    todos: Vec<Todo>,
    next_todo: i64,
}

/// In-memory store shared between the app and the test assertions
#[derive(Clone, Default)]
struct MemStore(Rc<RefCell<StoreState>>);

impl MemStore {
    fn with_projects(names: &[&str]) -> Self {
        let projects = names
            .iter()
            .enumerate()
            .map(|(i, name)| Project {
                id: i as i64 + 1,
                name: name.to_string(),
                path: PathBuf::from(format!("/p/{name}")),
            })
            .collect();
        MemStore(Rc::new(RefCell::new(StoreState {
            projects,
            todos: Vec::new(),
            next_todo: 1,
        })))
    }

    fn seed_todo(&self, project_id: i64, text: &str) {
        let mut state = self.0.borrow_mut();
        let id = state.next_todo;
        state.next_todo += 1;
        state.todos.push(Todo {
            id,
            project_id,
            text: text.to_string(),
        });
    }

    fn todos(&self) -> Vec<Todo> {
        self.0.borrow().todos.clone()
    }
}

impl ProjectStore for MemStore {
    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.0.borrow().projects.clone())
    }

    fn upsert_project(&mut self, name: &str, path: &Path) -> Result<(), StoreError> {
        let mut state = self.0.borrow_mut();
        if state.projects.iter().any(|p| p.path == path) {
            return Ok(());
        }
        let id = state.projects.len() as i64 + 1;
        state.projects.push(Project {
            id,
            name: name.to_string(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn lookup_project_id(&self, path: &Path) -> Result<i64, StoreError> {
        self.0
            .borrow()
            .projects
            .iter()
            .find(|p| p.path == path)
            .map(|p| p.id)
            .ok_or_else(|| StoreError::ProjectNotFound(path.to_path_buf()))
    }

    fn list_todos(&self, project_id: i64) -> Result<Vec<Todo>, StoreError> {
        Ok(self
            .0
            .borrow()
            .todos
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    fn add_todo(&mut self, project_id: i64, text: &str) -> Result<(), StoreError> {
        self.seed_todo(project_id, text);
        Ok(())
    }

    fn delete_todo(&mut self, todo_id: i64) -> Result<(), StoreError> {
        self.0.borrow_mut().todos.retain(|t| t.id != todo_id);
        Ok(())
    }
}

struct StaticGit {
    lines: Vec<String>,
    fetched: Rc<RefCell<Vec<PathBuf>>>,
}

impl StatusProvider for StaticGit {
    fn status_lines(&self, _path: &Path) -> Vec<String> {
        self.lines.clone()
    }

    fn fetch(&self, path: &Path) -> bool {
        self.fetched.borrow_mut().push(path.to_path_buf());
        true
    }
}

struct StaticTree {
    entries: Vec<PathBuf>,
    calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl TreeProvider for StaticTree {
    fn list_tree(&self, root: &Path) -> Vec<PathBuf> {
        self.calls.borrow_mut().push(root.to_path_buf());
        self.entries.iter().map(|e| root.join(e)).collect()
    }
}

struct RecordingEditor {
    opened: Rc<RefCell<Vec<PathBuf>>>,
}

impl EditorLauncher for RecordingEditor {
    fn edit(&mut self, path: &Path) -> io::Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Captures frames; pops a scripted size per poll, repeating the last one
struct TestTerminal {
    sizes: VecDeque<(usize, usize)>,
    frames: Rc<RefCell<Vec<Snapshot>>>,
    suspensions: Rc<RefCell<usize>>,
}

impl Terminal for TestTerminal {
    fn size(&mut self) -> Result<(usize, usize), TtyError> {
        if self.sizes.len() > 1 {
            Ok(self.sizes.pop_front().expect("non-empty"))
        } else {
            Ok(*self.sizes.front().expect("at least one size"))
        }
    }

    fn paint(&mut self, buffer: &ScreenBuffer, spans: &[StyleSpan]) -> io::Result<()> {
        self.frames.borrow_mut().push(Snapshot::capture(buffer, spans));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn place_cursor(&mut self, _x: usize, _y: usize) -> io::Result<()> {
        Ok(())
    }

    fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), TtyError> {
        *self.suspensions.borrow_mut() += 1;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), TtyError> {
        Ok(())
    }
}

struct Handles {
    store: MemStore,
    tree_calls: Rc<RefCell<Vec<PathBuf>>>,
    edits: Rc<RefCell<Vec<PathBuf>>>,
    fetched: Rc<RefCell<Vec<PathBuf>>>,
    frames: Rc<RefCell<Vec<Snapshot>>>,
    suspensions: Rc<RefCell<usize>>,
}

fn run_app(
    store: MemStore,
    tree_entries: &[&str],
    sizes: &[(usize, usize)],
    script: Vec<u8>,
) -> (ExitAction, Handles) {
    let tree_calls = Rc::new(RefCell::new(Vec::new()));
    let edits = Rc::new(RefCell::new(Vec::new()));
    let fetched = Rc::new(RefCell::new(Vec::new()));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let suspensions = Rc::new(RefCell::new(0));

    let git = StaticGit {
        lines: vec!["## main".to_string(), "M  src/lib.rs".to_string()],
        fetched: fetched.clone(),
    };
    let tree = StaticTree {
        entries: tree_entries.iter().map(PathBuf::from).collect(),
        calls: tree_calls.clone(),
    };
    let editor = RecordingEditor {
        opened: edits.clone(),
    };
    let term = TestTerminal {
        sizes: sizes.iter().copied().collect(),
        frames: frames.clone(),
        suspensions: suspensions.clone(),
    };

    let mut app = App::new(
        Box::new(store.clone()),
        Box::new(git),
        Box::new(tree),
        Box::new(editor),
        Box::new(term),
        Box::new(ScriptedSource::new(&script)) as Box<dyn ByteSource>,
        5,
    )
    .expect("app construction");
    let action = app.run().expect("app run");

    (
        action,
        Handles {
            store,
            tree_calls,
            edits,
            fetched,
            frames,
            suspensions,
        },
    )
}

fn script(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

#[test]
fn menu_down_then_submit_opens_second_project() {
    let store = MemStore::with_projects(&["alpha", "beta"]);
    let (action, handles) = run_app(
        store,
        &["src"],
        &[(80, 24)],
        script(&[ARROW_DOWN, b"\n", b"q", b"q"]),
    );
    assert_eq!(action, ExitAction::Quit);
    assert_eq!(*handles.tree_calls.borrow(), vec![PathBuf::from("/p/beta")]);
}

#[test]
fn menu_cursor_clamps_at_both_ends() {
    let store = MemStore::with_projects(&["alpha", "beta"]);
    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[ARROW_UP, ARROW_DOWN, ARROW_DOWN, ARROW_DOWN, b"\n", b"q", b"q"]),
    );
    // three downs from the top of a two-entry list still select the second
    assert_eq!(*handles.tree_calls.borrow(), vec![PathBuf::from("/p/beta")]);
}

#[test]
fn delete_needs_two_confirmations() {
    let store = MemStore::with_projects(&["alpha"]);
    store.seed_todo(1, "first");
    store.seed_todo(1, "second");

    // confirm "Delete", then back out with "No" on the second ask
    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"\n", b"\n", ARROW_RIGHT, b"\n", b"q", b"q"]),
    );
    assert_eq!(handles.store.todos().len(), 2);
}

#[test]
fn delete_cancelled_by_q_on_first_ask() {
    let store = MemStore::with_projects(&["alpha"]);
    store.seed_todo(1, "only");

    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"\n", b"q", b"q", b"q"]),
    );
    assert_eq!(handles.store.todos().len(), 1);
}

#[test]
fn delete_goes_through_after_both_confirmations() {
    let store = MemStore::with_projects(&["alpha"]);
    store.seed_todo(1, "first");
    store.seed_todo(1, "second");

    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"\n", b"\n", b"\n", b"q", b"q"]),
    );
    let remaining = handles.store.todos();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "second");
}

#[test]
fn text_input_adds_todo_on_submit() {
    let store = MemStore::with_projects(&["alpha"]);
    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"a", b"fix bug", b"\n", b"q", b"q"]),
    );
    let todos = handles.store.todos();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "fix bug");
    assert_eq!(todos[0].project_id, 1);
}

#[test]
fn text_input_accepts_q_as_a_letter() {
    let store = MemStore::with_projects(&["alpha"]);
    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"a", b"quick", b"\n", b"q", b"q"]),
    );
    assert_eq!(handles.store.todos()[0].text, "quick");
}

#[test]
fn text_input_backspace_edits() {
    let store = MemStore::with_projects(&["alpha"]);
    let (_, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"a", b"fix bugs", &[0x7F], b"\n", b"q", b"q"]),
    );
    assert_eq!(handles.store.todos()[0].text, "fix bug");
}

#[test]
fn text_input_bare_escape_cancels() {
    let store = MemStore::with_projects(&["alpha"]);
    // ESC is the last scripted byte, so the probe finds nothing behind it
    let (action, handles) = run_app(
        store,
        &[],
        &[(80, 24)],
        script(&[b"\n", ARROW_RIGHT, b"a", b"abc", &[0x1B]]),
    );
    assert_eq!(action, ExitAction::Quit);
    assert!(handles.store.todos().is_empty());
}

#[test]
fn tree_root_submit_opens_editor_on_project_path() {
    let store = MemStore::with_projects(&["alpha"]);
    let (_, handles) = run_app(
        store,
        &["src", "src/main.rs"],
        &[(80, 24)],
        script(&[b"\n", b"\n", b"q", b"q"]),
    );
    // tree cursor starts on the root sentinel
    assert_eq!(*handles.edits.borrow(), vec![PathBuf::from("/p/alpha")]);
    assert_eq!(*handles.suspensions.borrow(), 1);
}

#[test]
fn tree_entry_submit_opens_editor_on_that_entry() {
    let store = MemStore::with_projects(&["alpha"]);
    let (_, handles) = run_app(
        store,
        &["src", "src/main.rs"],
        &[(80, 24)],
        script(&[b"\n", ARROW_DOWN, b"\n", b"q", b"q"]),
    );
    assert_eq!(*handles.edits.borrow(), vec![PathBuf::from("/p/alpha/src")]);
}

#[test]
fn change_dir_exit_reports_project_path() {
    let store = MemStore::with_projects(&["alpha", "beta"]);
    let (action, _) = run_app(store, &[], &[(80, 24)], script(&[b"\n", b"c"]));
    assert_eq!(action, ExitAction::ChangeDir(PathBuf::from("/p/alpha")));
}

#[test]
fn fetch_all_visits_every_project() {
    let store = MemStore::with_projects(&["alpha", "beta"]);
    // each Ok-popup needs a Submit: one to start, one to finish
    let (_, handles) = run_app(store, &[], &[(80, 24)], script(&[b"f", b"\n", b"\n", b"q"]));
    assert_eq!(
        *handles.fetched.borrow(),
        vec![PathBuf::from("/p/alpha"), PathBuf::from("/p/beta")]
    );
}

#[test]
fn resize_reallocates_every_buffer() {
    let store = MemStore::with_projects(&["alpha"]);
    let sizes = [(80, 24), (80, 24), (120, 40)];
    let (_, handles) = run_app(store, &[], &sizes, script(&[ARROW_DOWN, b"q"]));

    let frames = handles.frames.borrow();
    let first = frames.first().expect("at least two frames");
    let last = frames.last().expect("at least two frames");
    assert_eq!((first.width, first.height), (80, 24));
    assert_eq!((last.width, last.height), (120, 40));
    // a fresh allocation: every row has the new width, border included
    assert!(last.rows.iter().all(|r| r.chars().count() == 120));
    assert!(last.rows[0].starts_with('+') && last.rows[0].ends_with('+'));
    assert!(last.text().contains("Projects:"));
}

#[test]
fn frames_show_menu_content() {
    let store = MemStore::with_projects(&["alpha", "beta"]);
    let (_, handles) = run_app(store, &[], &[(80, 24)], script(&[b"q"]));
    let frames = handles.frames.borrow();
    let menu = frames.first().unwrap();
    let text = menu.text();
    assert!(text.contains("Projects:"));
    assert!(text.contains("alpha"));
    assert!(text.contains("beta"));
}

#[test]
fn project_screen_shows_tree_todos_and_status() {
    let store = MemStore::with_projects(&["alpha"]);
    store.seed_todo(1, "ship it");
    let (_, handles) = run_app(
        store,
        &["src", "src/main.rs"],
        &[(80, 24)],
        script(&[b"\n", b"q", b"q"]),
    );
    let frames = handles.frames.borrow();
    let detail = frames
        .iter()
        .find(|f| f.text().contains("Project Tree"))
        .expect("a project frame was painted");
    let text = detail.text();
    assert!(text.contains("alpha"));
    assert!(text.contains("/src/main.rs"));
    assert!(text.contains("Todo List"));
    assert!(text.contains("ship it"));
    assert!(text.contains("Git status"));
    assert!(text.contains("## main"));
}
