//! The navigation state machine
//!
//! Single-threaded and fully synchronous: every frame the loop polls the
//! terminal size, rebuilds the panes from current state, paints, then
//! blocks for one input event. Modal popups are sub-loops that own input
//! until dismissed, stacked at most one deep over a screen.

use std::path::PathBuf;

use moor_input::{ByteSource, Event, Events, InputError};
use moor_screen::{combine, draw_border, overlay, scroll_start, Pane, ScreenBuffer};
use moor_store::{Project, ProjectStore, Todo};

use crate::collab::{EditorLauncher, StatusProvider, TreeProvider};
use crate::error::AppError;
use crate::terminal::Terminal;
use crate::ui::menu;
use crate::ui::popup::{self, Side, INPUT_CAP};
use crate::ui::project::{self, ProjectView};

/// Which pane of the project screen owns the cursor keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Todos,
}

/// How the main loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitAction {
    /// Normal quit from the main menu
    Quit,
    /// The `c` fast-exit: print the path so a shell wrapper can cd into it
    ChangeDir(PathBuf),
}

enum MenuOutcome {
    Quit,
    Open(usize),
}

enum ScreenOutcome {
    Back,
    ChangeDir(PathBuf),
}

type BoxedEvents = Events<Box<dyn ByteSource>>;

pub struct App {
    store: Box<dyn ProjectStore>,
    git: Box<dyn StatusProvider>,
    tree: Box<dyn TreeProvider>,
    editor: Box<dyn EditorLauncher>,
    term: Box<dyn Terminal>,
    events: BoxedEvents,
    scroll_threshold: usize,
    width: usize,
    height: usize,
    /// The last composed frame, used as the backdrop for popups
    root: ScreenBuffer,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Box<dyn ProjectStore>,
        git: Box<dyn StatusProvider>,
        tree: Box<dyn TreeProvider>,
        editor: Box<dyn EditorLauncher>,
        mut term: Box<dyn Terminal>,
        source: Box<dyn ByteSource>,
        scroll_threshold: usize,
    ) -> Result<Self, AppError> {
        let (width, height) = term.size()?;
        Ok(App {
            store,
            git,
            tree,
            editor,
            term,
            events: Events::new(source),
            scroll_threshold,
            width,
            height,
            root: ScreenBuffer::new(width, height),
        })
    }

    /// Run until the user quits. A `ChangeDir` result means the caller
    /// should print the path once the terminal has been restored.
    pub fn run(&mut self) -> Result<ExitAction, AppError> {
        self.term.clear()?;
        let mut cursor = 0usize;
        loop {
            // snapshot, refreshed every time a project screen is left
            let projects = self.store.list_projects()?;
            let mut has_todo = Vec::with_capacity(projects.len());
            for project in &projects {
                has_todo.push(!self.store.list_todos(project.id)?.is_empty());
            }
            cursor = cursor.min(projects.len().saturating_sub(1));

            match self.menu_loop(&projects, &has_todo, &mut cursor)? {
                MenuOutcome::Quit => return Ok(ExitAction::Quit),
                MenuOutcome::Open(index) => {
                    let project = projects[index].clone();
                    match self.project_screen(&project)? {
                        ScreenOutcome::Back => {
                            self.term.clear()?;
                        }
                        ScreenOutcome::ChangeDir(path) => {
                            return Ok(ExitAction::ChangeDir(path))
                        }
                    }
                }
            }
        }
    }

    fn menu_loop(
        &mut self,
        projects: &[Project],
        has_todo: &[bool],
        cursor: &mut usize,
    ) -> Result<MenuOutcome, AppError> {
        loop {
            self.poll_resize()?;
            let mut pane = menu::build(projects, has_todo, *cursor, self.width, self.height);
            draw_border(&mut pane.buffer);
            self.root = pane.buffer;
            self.term.paint(&self.root, &pane.spans)?;

            match self.events.next() {
                Ok(Event::Up) => *cursor = cursor.saturating_sub(1),
                Ok(Event::Down) => {
                    if *cursor + 1 < projects.len() {
                        *cursor += 1;
                    }
                }
                Ok(Event::Submit) if !projects.is_empty() => {
                    return Ok(MenuOutcome::Open(*cursor))
                }
                Ok(Event::Quit) => return Ok(MenuOutcome::Quit),
                Ok(Event::Char('f')) => self.fetch_all(projects)?,
                Ok(_) => {}
                Err(InputError::Closed) => return Ok(MenuOutcome::Quit),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Run `git fetch` in every project, narrating progress with popups
    fn fetch_all(&mut self, projects: &[Project]) -> Result<(), AppError> {
        self.message_popup("Fetching all projects", true)?;
        for (i, project) in projects.iter().enumerate() {
            let info = format!("Fetching: ({}/{})", i, projects.len());
            self.message_popup(&info, false)?;
            if !self.git.fetch(&project.path) {
                log::warn!("fetch failed for {}", project.path.display());
            }
        }
        self.message_popup("Done fetching all projects", true)
    }

    fn project_screen(&mut self, project: &Project) -> Result<ScreenOutcome, AppError> {
        let project_id = self.store.lookup_project_id(&project.path)?;
        // tree and git status are computed once per entry, not per frame:
        // a keystroke must not cost a filesystem walk or a subprocess
        let status = self.git.status_lines(&project.path);
        let entries = self.tree.list_tree(&project.path);
        let display: Vec<String> = entries
            .iter()
            .map(|path| match path.strip_prefix(&project.path) {
                Ok(rel) => format!("/{}", rel.display()),
                Err(_) => path.display().to_string(),
            })
            .collect();
        let mut todos = self.store.list_todos(project_id)?;

        let mut focus = Focus::Tree;
        let mut tree_cursor: isize = -1;
        let mut todo_cursor = 0usize;
        let mut tree_scroll = 0usize;
        let mut todo_scroll = 0usize;

        self.term.clear()?;
        loop {
            self.poll_resize()?;
            tree_scroll = scroll_start(
                tree_cursor.max(0) as usize,
                tree_scroll,
                entries.len(),
                project::tree_visible(self.width, self.height),
                self.scroll_threshold,
            );
            todo_scroll = scroll_start(
                todo_cursor,
                todo_scroll,
                todos.len(),
                project::todo_visible(self.width, self.height),
                self.scroll_threshold,
            );

            let view = ProjectView {
                name: &project.name,
                entries: &display,
                focus,
                tree_cursor,
                tree_scroll,
                todos: &todos,
                todo_cursor,
                todo_scroll,
                status: &status,
            };
            let (left, right) = project::build(&view, self.width, self.height);
            let spans = combine(&mut self.root, &left, &right)?;
            draw_border(&mut self.root);
            self.term.paint(&self.root, &spans)?;

            match self.events.next() {
                Ok(Event::Up) => match focus {
                    Focus::Tree => tree_cursor = (tree_cursor - 1).max(-1),
                    Focus::Todos => todo_cursor = todo_cursor.saturating_sub(1),
                },
                Ok(Event::Down) => match focus {
                    Focus::Tree => {
                        if tree_cursor + 1 < entries.len() as isize {
                            tree_cursor += 1;
                        }
                    }
                    Focus::Todos => {
                        if todo_cursor + 1 < todos.len() {
                            todo_cursor += 1;
                        }
                    }
                },
                Ok(Event::Left) => focus = Focus::Tree,
                Ok(Event::Right) => focus = Focus::Todos,
                Ok(Event::Submit) => match focus {
                    Focus::Tree => {
                        let path = if tree_cursor < 0 {
                            project.path.clone()
                        } else {
                            entries[tree_cursor as usize].clone()
                        };
                        self.edit_path(&path)?;
                    }
                    Focus::Todos => {
                        if todos.is_empty() {
                            continue;
                        }
                        if self.confirm_delete(&todos[todo_cursor])? {
                            todos = self.store.list_todos(project_id)?;
                            todo_cursor = todo_cursor.saturating_sub(1);
                        }
                    }
                },
                Ok(Event::Char('a')) if focus == Focus::Todos => {
                    let text = self.input_popup("Enter a task:")?;
                    if !text.is_empty() {
                        if let Err(e) = self.store.add_todo(project_id, &text) {
                            log::warn!("could not add todo: {e}");
                        }
                        todos = self.store.list_todos(project_id)?;
                    }
                }
                Ok(Event::Char('c')) => {
                    return Ok(ScreenOutcome::ChangeDir(project.path.clone()))
                }
                Ok(Event::Quit) => return Ok(ScreenOutcome::Back),
                Ok(_) => {}
                Err(InputError::Closed) => return Ok(ScreenOutcome::Back),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Hand the terminal to the editor, then take it back and repaint
    fn edit_path(&mut self, path: &std::path::Path) -> Result<(), AppError> {
        self.term.suspend()?;
        let result = self.editor.edit(path);
        self.term.resume()?;
        if let Err(e) = result {
            log::warn!("editor failed for {}: {}", path.display(), e);
        }
        Ok(())
    }

    /// The two-step delete flow. Both confirmations are required by
    /// design; a single one leaves the list untouched.
    fn confirm_delete(&mut self, todo: &Todo) -> Result<bool, AppError> {
        if self.choice_popup(&todo.text, "Delete", "Cancel")? != Side::Left {
            return Ok(false);
        }
        if self.choice_popup("Are you sure?", "Yes", "No")? != Side::Left {
            return Ok(false);
        }
        if let Err(e) = self.store.delete_todo(todo.id) {
            log::warn!("could not delete todo {}: {}", todo.id, e);
        }
        Ok(true)
    }

    /// Message popup; with `has_ok` it blocks until Submit
    fn message_popup(&mut self, message: &str, has_ok: bool) -> Result<(), AppError> {
        let pane = popup::message_pane(message, has_ok);
        self.paint_popup(&pane)?;
        if !has_ok {
            return Ok(());
        }
        loop {
            match self.events.next() {
                Ok(Event::Submit) => return Ok(()),
                Ok(_) => {}
                Err(InputError::Closed) => return Ok(()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Binary choice popup; `q` forces the cancel (right) side
    fn choice_popup(
        &mut self,
        message: &str,
        left: &str,
        right: &str,
    ) -> Result<Side, AppError> {
        let mut side = Side::Left;
        loop {
            self.poll_resize()?;
            let pane = popup::choice_pane(message, left, right, side);
            self.paint_popup(&pane)?;
            match self.events.next() {
                Ok(Event::Left) => side = Side::Left,
                Ok(Event::Right) => side = Side::Right,
                Ok(Event::Submit) => return Ok(side),
                Ok(Event::Quit) => return Ok(Side::Right),
                Ok(_) => {}
                Err(InputError::Closed) => return Ok(Side::Right),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Text-input popup. Returns the confirmed text, or an empty string
    /// when cancelled with a bare ESC.
    fn input_popup(&mut self, prompt: &str) -> Result<String, AppError> {
        let mut content = String::new();
        self.term.set_cursor_visible(true)?;
        let outcome = self.input_popup_loop(prompt, &mut content);
        self.term.set_cursor_visible(false)?;
        outcome
    }

    fn input_popup_loop(
        &mut self,
        prompt: &str,
        content: &mut String,
    ) -> Result<String, AppError> {
        loop {
            self.poll_resize()?;
            let (pane, (cx, cy)) = popup::input_pane(prompt, content);
            let (x, y) = self.popup_origin(&pane);
            self.paint_popup_at(&pane, x, y)?;
            self.term.place_cursor(x + cx, y + cy)?;
            match self.events.next() {
                Ok(Event::Char(c)) => {
                    if content.chars().count() < INPUT_CAP {
                        content.push(c);
                    }
                }
                // `q` is just a letter while typing
                Ok(Event::Quit) => {
                    if content.chars().count() < INPUT_CAP {
                        content.push('q');
                    }
                }
                Ok(Event::Backspace) => {
                    content.pop();
                }
                Ok(Event::Submit) => return Ok(content.clone()),
                Ok(Event::Escape) => return Ok(String::new()),
                Ok(_) => {}
                Err(InputError::Closed) => return Ok(String::new()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn popup_origin(&self, pane: &Pane) -> (usize, usize) {
        (
            (self.width / 2).saturating_sub(pane.width() / 2),
            (self.height / 2).saturating_sub(pane.height() / 2),
        )
    }

    fn paint_popup(&mut self, pane: &Pane) -> Result<(), AppError> {
        let (x, y) = self.popup_origin(pane);
        self.paint_popup_at(pane, x, y)
    }

    /// Paint the popup over a copy of the last frame; the frame itself is
    /// left untouched so the screen repaints cleanly on dismissal
    fn paint_popup_at(&mut self, pane: &Pane, x: usize, y: usize) -> Result<(), AppError> {
        let mut frame = self.root.clone();
        let spans = overlay(&mut frame, pane, x, y);
        self.term.paint(&frame, &spans)?;
        Ok(())
    }

    /// Detect a resize at the top of a loop iteration; everything is
    /// reallocated before the next draw
    fn poll_resize(&mut self) -> Result<bool, AppError> {
        let (width, height) = self.term.size()?;
        if width == self.width && height == self.height {
            return Ok(false);
        }
        log::debug!("resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.root.resize(width, height);
        self.term.clear()?;
        Ok(true)
    }
}
