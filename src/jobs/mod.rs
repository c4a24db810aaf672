//! Experience section: a list of past jobs with a detail pane for the
//! selected one, kept in sync with the URL fragment.

pub mod actions;
pub mod fragment;
pub mod markup;
pub mod render;
pub mod sanitize;
pub mod selection;
pub mod state;
pub mod tenure;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::location::Location;

use actions::*;
use render::View;
use sanitize::{sanitize, SafeHtml};
use selection::Selection;
use state::{JobRecord, JobTable};

/// Rows moved per scroll step in the detail pane.
const SCROLL_STEP: i32 = 3;

pub struct JobSelector<L: Location> {
    table: JobTable,
    selection: Selection,
    location: L,
    /// Fragment as of the last poll; a difference means someone else navigated.
    last_seen_hash: String,
    view: View,
}

impl<L: Location> JobSelector<L> {
    pub fn new(table: JobTable, location: L) -> Self {
        let selection = Selection::new(table.len());
        Self {
            table,
            selection,
            location,
            last_seen_hash: String::new(),
            view: View::new(),
        }
    }

    /// First render: adopt whatever the fragment says.
    pub fn mount(&mut self) {
        self.selection.mount(&mut self.location);
        self.last_seen_hash = self.location.hash();
        if self.selection.selected().is_some() {
            self.view.selection_changed();
        }
    }

    /// Pick up fragment changes made outside the component. Returns true when
    /// the displayed job changed.
    pub fn poll_location(&mut self) -> bool {
        let current = self.location.hash();
        if current == self.last_seen_hash {
            return false;
        }
        let changed = self.selection.follow_location(&mut self.location);
        self.last_seen_hash = self.location.hash();
        if changed {
            self.view.selection_changed();
        }
        changed
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    pub fn selected_job(&self) -> Option<&JobRecord> {
        self.selected().and_then(|i| self.table.get(i))
    }

    /// The selected job's responsibilities, safe to render.
    pub fn responsibilities(&self) -> SafeHtml {
        sanitize(self.selected_job().map(|j| j.responsibilities_html.as_str()))
    }

    #[cfg(test)]
    pub fn location(&self) -> &L {
        &self.location
    }

    /// User picked entry `index`.
    pub fn select_job(&mut self, index: usize) -> Option<usize> {
        let before = self.selection.selected();
        let applied = self.selection.select_job(index, &mut self.location)?;
        self.last_seen_hash = self.location.hash();
        if before != Some(applied) {
            self.view.selection_changed();
        }
        Some(applied)
    }

    /// Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Click(SCROLL_DETAIL_UP) => {
                self.view.scroll_detail(-SCROLL_STEP);
                true
            }
            InputEvent::Click(SCROLL_DETAIL_DOWN) => {
                self.view.scroll_detail(SCROLL_STEP);
                true
            }
            InputEvent::Click(id) if *id >= SELECT_JOB_BASE => {
                self.select_job((*id - SELECT_JOB_BASE) as usize).is_some()
            }
            InputEvent::Click(_) => false,
            InputEvent::Key(c) => self.handle_key(*c),
        }
    }

    fn handle_key(&mut self, c: char) -> bool {
        let last = self.table.len().saturating_sub(1);
        match c {
            'j' => {
                let next = self.selected().map_or(0, |i| (i + 1).min(last));
                self.select_job(next).is_some()
            }
            'k' => {
                let prev = self.selected().map_or(0, |i| i.saturating_sub(1));
                self.select_job(prev).is_some()
            }
            '1'..='9' => {
                let index = (c as u8 - b'1') as usize;
                if index >= self.table.len() {
                    return false;
                }
                self.select_job(index).is_some()
            }
            'd' => {
                self.view.scroll_detail(SCROLL_STEP);
                true
            }
            'u' => {
                self.view.scroll_detail(-SCROLL_STEP);
                true
            }
            _ => false,
        }
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
        elapsed_ms: u32,
    ) {
        let responsibilities = self.responsibilities();
        render::render(
            &self.table,
            self.selected(),
            &responsibilities,
            &mut self.view,
            f,
            area,
            click_state,
            elapsed_ms,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::state::fixtures;
    use crate::location::MemoryLocation;

    fn selector(hash: &str) -> JobSelector<MemoryLocation> {
        let mut s = JobSelector::new(fixtures::table(), MemoryLocation::new(hash));
        s.mount();
        s
    }

    fn detail_text(s: &JobSelector<MemoryLocation>) -> Vec<String> {
        render::detail_lines(s.selected_job(), &s.responsibilities())
            .iter()
            .map(|l| l.spans.iter().map(|sp| sp.content.to_string()).collect())
            .collect()
    }

    #[test]
    fn mount_reads_fragment() {
        let s = selector("#tech-stack?tab=experience&job=2");
        assert_eq!(s.selected(), Some(2));
        assert_eq!(s.selected_job().unwrap().company, "Initech");
        assert!(s.view.transition.is_some());
    }

    #[test]
    fn mount_on_other_section_selects_nothing() {
        let s = selector("#about");
        assert_eq!(s.selected(), None);
        assert_eq!(s.location().writes, 0);
        assert!(s.responsibilities().is_empty());
    }

    #[test]
    fn clicking_an_entry_selects_and_publishes() {
        let mut s = selector("#tech-stack?tab=experience");
        assert_eq!(s.selected(), Some(0));
        assert!(s.handle_input(&InputEvent::Click(SELECT_JOB_BASE + 1)));
        assert_eq!(s.selected(), Some(1));
        assert_eq!(
            s.location().history,
            vec!["#tech-stack?tab=experience&job=1".to_string()]
        );
    }

    #[test]
    fn clicking_twice_writes_once() {
        let mut s = selector("#tech-stack?tab=experience&job=0");
        s.handle_input(&InputEvent::Click(SELECT_JOB_BASE + 2));
        let writes = s.location().writes;
        s.handle_input(&InputEvent::Click(SELECT_JOB_BASE + 2));
        assert_eq!(s.location().writes, writes);
        assert_eq!(s.location().history.len(), 1);
    }

    #[test]
    fn reload_shows_same_detail_as_fresh_click() {
        let mut fresh = selector("#tech-stack?tab=experience");
        fresh.handle_input(&InputEvent::Click(SELECT_JOB_BASE + 1));
        let url = fresh.location().hash();

        let reloaded = selector(&url);
        assert_eq!(reloaded.selected(), Some(1));
        assert_eq!(detail_text(&reloaded), detail_text(&fresh));
    }

    #[test]
    fn reload_with_job_zero_matches_first_entry() {
        let reloaded = selector("#tech-stack?tab=experience&job=0");
        let mut fresh = selector("#about");
        fresh.select_job(0);
        assert_eq!(detail_text(&reloaded), detail_text(&fresh));
    }

    #[test]
    fn responsibilities_are_sanitized() {
        let s = selector("#tech-stack?tab=experience&job=1");
        let html = s.responsibilities();
        assert!(!html.as_str().contains("<script"));
        assert!(html.as_str().contains("<strong>Globex</strong>"));
    }

    #[test]
    fn external_navigation_followed_before_first_click() {
        let mut s = selector("#tech-stack?tab=experience&job=0");
        s.location.navigate("#tech-stack?tab=experience&job=2");
        assert!(s.poll_location());
        assert_eq!(s.selected(), Some(2));
        // Nothing new to see on the next frame.
        assert!(!s.poll_location());
    }

    #[test]
    fn external_navigation_overridden_after_click() {
        let mut s = selector("#tech-stack?tab=experience&job=0");
        s.select_job(1);
        s.location.navigate("#tech-stack?tab=experience&job=2");
        assert!(!s.poll_location());
        assert_eq!(s.selected(), Some(1));
        assert_eq!(s.location().hash(), "#tech-stack?tab=experience&job=1");
    }

    #[test]
    fn navigation_to_other_section_is_ignored() {
        let mut s = selector("#tech-stack?tab=experience&job=1");
        s.location.navigate("#about");
        assert!(!s.poll_location());
        assert_eq!(s.selected(), Some(1));
        assert_eq!(s.location().hash(), "#about");
    }

    #[test]
    fn keys_step_through_entries() {
        let mut s = selector("#about");
        assert!(s.handle_input(&InputEvent::Key('j')));
        assert_eq!(s.selected(), Some(0));
        s.handle_input(&InputEvent::Key('j'));
        s.handle_input(&InputEvent::Key('j'));
        s.handle_input(&InputEvent::Key('j'));
        assert_eq!(s.selected(), Some(2));
        s.handle_input(&InputEvent::Key('k'));
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn number_keys_jump() {
        let mut s = selector("#about");
        assert!(s.handle_input(&InputEvent::Key('3')));
        assert_eq!(s.selected(), Some(2));
        assert!(!s.handle_input(&InputEvent::Key('9')));
        assert_eq!(s.selected(), Some(2));
    }

    #[test]
    fn unknown_input_not_consumed() {
        let mut s = selector("#about");
        assert!(!s.handle_input(&InputEvent::Key('x')));
        assert!(!s.handle_input(&InputEvent::Click(42)));
    }

    #[test]
    fn scroll_keys_clamp_to_content() {
        let mut s = selector("#tech-stack?tab=experience&job=0");
        s.view.detail_max_scroll = 4;
        s.handle_input(&InputEvent::Key('d'));
        s.handle_input(&InputEvent::Key('d'));
        assert_eq!(s.view.detail_scroll, 4);
        s.handle_input(&InputEvent::Click(SCROLL_DETAIL_UP));
        assert_eq!(s.view.detail_scroll, 1);
    }

    #[test]
    fn changing_job_resets_detail_scroll() {
        let mut s = selector("#tech-stack?tab=experience&job=0");
        s.view.detail_max_scroll = 10;
        s.handle_input(&InputEvent::Key('d'));
        s.select_job(0);
        assert_eq!(s.view.detail_scroll, 3);
        s.select_job(1);
        assert_eq!(s.view.detail_scroll, 0);
    }

    #[test]
    fn empty_table_never_selects() {
        let mut s = JobSelector::new(
            JobTable::default(),
            MemoryLocation::new("#tech-stack?tab=experience&job=0"),
        );
        s.mount();
        assert_eq!(s.selected(), None);
        assert!(!s.handle_input(&InputEvent::Key('j')));
        assert!(!s.handle_input(&InputEvent::Click(SELECT_JOB_BASE)));
        assert_eq!(s.location().writes, 0);
    }
}
