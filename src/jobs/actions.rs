//! Semantic action IDs for the experience section's click targets.

// ── Detail pane ──────────────────────────────────────────────
pub const SCROLL_DETAIL_UP: u16 = 10;
pub const SCROLL_DETAIL_DOWN: u16 = 11;

// ── Job list ─────────────────────────────────────────────────
pub const SELECT_JOB_BASE: u16 = 100; // +index

/// Most entries that still get a distinct action ID.
pub const MAX_JOBS: usize = (u16::MAX - SELECT_JOB_BASE) as usize + 1;

/// Action ID for list entry `index`. Saturates past [`MAX_JOBS`].
pub fn select_job_action(index: usize) -> u16 {
    u16::try_from(index)
        .ok()
        .and_then(|i| SELECT_JOB_BASE.checked_add(i))
        .unwrap_or(u16::MAX)
}
