//! Category color assignment
//!
//! Two policies: a session palette that hands out distinct colors in
//! first-seen order, and a static table for the six canonical post-cleaning
//! categories. Both are idempotent within a session.

use std::collections::HashMap;

use crate::models::normalize_label;

/// Gray fallback for empty or unknown categories
pub const FALLBACK_COLOR: &str = "#808080";

/// Fixed palette assigned round-robin in first-seen order
const DISTINCT_COLORS: [&str; 20] = [
    "#FF1744", "#00E676", "#FFEA00", "#2979FF", "#FF9100", "#D500F9", "#00E5FF", "#FF4081",
    "#76FF03", "#FF6D00", "#0091EA", "#C51162", "#64DD17", "#FFD600", "#AA00FF", "#FF3D00",
    "#00B8D4", "#AEEA00", "#6200EA", "#FFAB00",
];

/// Session palette keyed by normalized category.
///
/// Once assigned, a category's color is stable for the session; two
/// different categories never collide while unused palette entries remain.
#[derive(Debug, Default)]
pub struct CategoryPalette {
    assigned: HashMap<String, &'static str>,
    next_index: usize,
}

impl CategoryPalette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a category, assigning one on first sight.
    pub fn color_for(&mut self, category: &str) -> &'static str {
        let normalized = normalize_label(category);
        if normalized.is_empty() {
            return FALLBACK_COLOR;
        }

        if let Some(color) = self.assigned.get(&normalized) {
            return color;
        }

        let color = DISTINCT_COLORS[self.next_index % DISTINCT_COLORS.len()];
        self.assigned.insert(normalized, color);
        self.next_index += 1;
        color
    }
}

/// Static category → color table for the canonical cleaned categories,
/// gray fallback for anything else.
#[must_use]
pub fn fixed_category_color(category: &str) -> &'static str {
    match normalize_label(category).as_str() {
        "crisis & distress support" => "#FF1744",
        "youth & student services" => "#2979FF",
        "indigenous support" => "#FF9100",
        "hospitals & health centres" => "#00E676",
        "community counselling" => "#D500F9",
        "other mental health service" => "#00B8D4",
        _ => FALLBACK_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_color_is_stable_within_session() {
        let mut palette = CategoryPalette::new();
        let first = palette.color_for("Community Counselling");
        let again = palette.color_for("community  counselling");
        assert_eq!(first, again);
    }

    #[test]
    fn test_no_collisions_while_palette_lasts() {
        let mut palette = CategoryPalette::new();
        let mut seen = HashSet::new();
        for i in 0..DISTINCT_COLORS.len() {
            let color = palette.color_for(&format!("category {i}"));
            assert!(seen.insert(color), "color {color} assigned twice");
        }
    }

    #[test]
    fn test_empty_category_is_gray() {
        let mut palette = CategoryPalette::new();
        assert_eq!(palette.color_for("  "), FALLBACK_COLOR);
        // and does not consume a palette slot
        assert_eq!(palette.color_for("first real"), DISTINCT_COLORS[0]);
    }

    #[test]
    fn test_fixed_table_lookup() {
        assert_eq!(fixed_category_color("Crisis & Distress Support"), "#FF1744");
        assert_eq!(
            fixed_category_color("crisis  & distress support"),
            "#FF1744"
        );
        assert_eq!(fixed_category_color("Knitting Club"), FALLBACK_COLOR);
        assert_eq!(fixed_category_color(""), FALLBACK_COLOR);
    }
}
