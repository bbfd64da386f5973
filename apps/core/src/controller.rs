use std::time::{Duration, Instant};

use crate::debounce::QueryDebouncer;
use crate::logging;
use crate::model::{rows_from_paths, ResultRow};

pub const ROW_HEIGHT: u32 = 50;
pub const BASE_HEIGHT: u32 = 80;
pub const MAX_VISIBLE_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Rendered,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

/// Disabled single-row presentation shown instead of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    NoResults,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    BeginSearch(String),
    OpenPath(String),
    ClearInput,
    AdjustHeight(usize),
}

pub fn window_height(item_count: usize) -> u32 {
    (item_count.min(MAX_VISIBLE_ROWS) as u32) * ROW_HEIGHT + BASE_HEIGHT
}

#[derive(Debug)]
pub struct SearchController {
    phase: Phase,
    input: String,
    rows: Vec<ResultRow>,
    selected: i32,
    failure_message: Option<String>,
    debouncer: QueryDebouncer,
}

impl SearchController {
    pub fn new(debounce_window: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            input: String::new(),
            rows: Vec::new(),
            selected: -1,
            failure_message: None,
            debouncer: QueryDebouncer::new(debounce_window),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> i32 {
        self.selected
    }

    pub fn list_visible(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self.phase {
            Phase::Searching => Some(Placeholder::Loading),
            Phase::Empty => Some(Placeholder::NoResults),
            Phase::Failed => Some(Placeholder::Failed),
            Phase::Idle | Phase::Rendered => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.failure_message.as_deref()
    }

    pub fn item_count(&self) -> usize {
        match self.phase {
            Phase::Idle => 0,
            Phase::Rendered => self.rows.len(),
            Phase::Searching | Phase::Empty | Phase::Failed => 1,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn input_changed(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        self.debouncer.schedule(text, now);
    }

    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        match self.debouncer.poll(now) {
            Some(text) => self.fire(text),
            None => Vec::new(),
        }
    }

    fn fire(&mut self, text: String) -> Vec<Effect> {
        if text.trim().is_empty() {
            return self.reset_to_idle(false);
        }

        self.phase = Phase::Searching;
        self.rows.clear();
        self.selected = -1;
        self.failure_message = None;
        vec![
            Effect::AdjustHeight(self.item_count()),
            Effect::BeginSearch(text),
        ]
    }

    pub fn search_completed(&mut self, result: Result<Vec<String>, String>) -> Vec<Effect> {
        // A session that left Searching was cancelled; a late response
        // must not resurrect it.
        if self.phase != Phase::Searching {
            return Vec::new();
        }

        match result {
            Ok(paths) => {
                self.rows = rows_from_paths(paths);
                self.selected = -1;
                self.phase = if self.rows.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Rendered
                };
            }
            Err(message) => {
                logging::warn(&format!("search failed: {message}"));
                self.rows.clear();
                self.selected = -1;
                self.failure_message = Some(message);
                self.phase = Phase::Failed;
            }
        }

        vec![Effect::AdjustHeight(self.item_count())]
    }

    pub fn key_pressed(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Down => {
                self.move_selection(1);
                Vec::new()
            }
            Key::Up => {
                self.move_selection(-1);
                Vec::new()
            }
            Key::Enter => self.open_selected(),
            Key::Escape => self.reset_to_idle(true),
        }
    }

    pub fn row_clicked(&mut self, index: usize) -> Vec<Effect> {
        if self.phase != Phase::Rendered || index >= self.rows.len() {
            return Vec::new();
        }

        self.selected = index as i32;
        vec![Effect::OpenPath(self.rows[index].path.clone())]
    }

    pub fn open_completed(&mut self, result: Result<(), String>) {
        if let Err(message) = result {
            logging::warn(&format!("open failed: {message}"));
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.phase != Phase::Rendered || self.rows.is_empty() {
            return;
        }

        let len = self.rows.len() as i32;
        self.selected = (self.selected + delta).rem_euclid(len);
    }

    fn open_selected(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Rendered || self.selected < 0 {
            return Vec::new();
        }

        match self.rows.get(self.selected as usize) {
            Some(row) => vec![Effect::OpenPath(row.path.clone())],
            None => Vec::new(),
        }
    }

    fn reset_to_idle(&mut self, clear_input: bool) -> Vec<Effect> {
        self.phase = Phase::Idle;
        self.rows.clear();
        self.selected = -1;
        self.failure_message = None;
        self.debouncer.cancel();

        let mut effects = Vec::new();
        if clear_input {
            self.input.clear();
            effects.push(Effect::ClearInput);
        }
        effects.push(Effect::AdjustHeight(0));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::window_height;

    #[test]
    fn window_height_follows_item_count_up_to_viewport_cap() {
        assert_eq!(window_height(0), 80);
        assert_eq!(window_height(1), 130);
        assert_eq!(window_height(6), 380);
        assert_eq!(window_height(50), 380);
    }
}
