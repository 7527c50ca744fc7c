use std::collections::HashMap;

/// Offset used when a page has no remembered position. Never exactly 0: a
/// readout at the exact top is misreported as the maximum.
pub const TOP_OFFSET: u64 = 1;

/// Clamps a raw scroll readout into the open interval (0, max).
/// The exact 0 and max boundary values are misreported as the maximum by the
/// scroll readout, so they are remapped to 1 and max - 1.
pub fn clamp_offset(raw: i64, max_scroll: u64) -> u64 {
    if raw <= 0 {
        TOP_OFFSET
    } else if raw as u64 >= max_scroll {
        max_scroll.saturating_sub(1).max(TOP_OFFSET)
    } else {
        raw as u64
    }
}

/// Per-page vertical scroll offsets for the current session.
///
/// Holds only pages already navigated away from; the offset of the page on
/// screen sits in the router's transient slot until the next navigation
/// commits it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollHistory {
    offsets: HashMap<String, u64>,
}

impl ScrollHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the clamped offset for `page`, overwriting any prior entry.
    pub fn remember(&mut self, page: &str, raw: i64, max_scroll: u64) {
        self.offsets
            .insert(page.to_string(), clamp_offset(raw, max_scroll));
    }

    /// The offset to scroll to when `page` is shown again.
    pub fn restore_offset(&self, page: &str) -> u64 {
        self.offsets.get(page).copied().unwrap_or(TOP_OFFSET)
    }

    pub fn contains(&self, page: &str) -> bool {
        self.offsets.contains_key(page)
    }
}
