//! Which job is shown, mirrored into the URL fragment.
//!
//! The fragment is read on mount and whenever it changes under us; every
//! selection change is written back with replace-in-place navigation. Once
//! the user has picked an entry the selection becomes sticky: later external
//! fragment changes are overwritten with it instead of followed.

use crate::console;
use crate::location::Location;

use super::fragment;

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    job_count: usize,
    selected: Option<usize>,
    sticky: bool,
}

impl Selection {
    pub fn new(job_count: usize) -> Self {
        Self {
            job_count,
            selected: None,
            sticky: false,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// True once the user has chosen an entry in this session.
    #[cfg(test)]
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Initialize from the fragment on first render.
    pub fn mount(&mut self, location: &mut impl Location) {
        self.follow_location(location);
    }

    /// Select `index`, substituting 0 for an index with no record.
    ///
    /// Returns the index actually applied, or `None` when there is nothing to
    /// select. Repeating the same selection writes nothing.
    pub fn select_job(&mut self, index: usize, location: &mut impl Location) -> Option<usize> {
        if self.job_count == 0 {
            return None;
        }
        let index = if index < self.job_count {
            index
        } else {
            console::warn(&format!(
                "job index {index} out of range (jobs={}), using 0",
                self.job_count
            ));
            0
        };
        self.sticky = true;
        self.selected = Some(index);
        self.publish(location);
        Some(index)
    }

    /// Re-read the fragment after it may have changed outside the component.
    ///
    /// Fragments for other sections are ignored. Returns true when the
    /// selected index changed.
    pub fn follow_location(&mut self, location: &mut impl Location) -> bool {
        let current = location.hash();
        if !fragment::is_job_route(&current) {
            return false;
        }
        if self.sticky {
            self.publish(location);
            return false;
        }
        let decoded = fragment::decode(&current, self.job_count);
        let changed = decoded != self.selected;
        self.selected = decoded;
        self.publish(location);
        changed
    }

    fn publish(&self, location: &mut impl Location) {
        let Some(index) = self.selected else {
            return;
        };
        let target = fragment::encode(index);
        if location.hash() != target {
            location.replace_hash(&target);
        }
    }
}
