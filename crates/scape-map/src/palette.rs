//! Category colors and the radius rule.

use scape_core::enums::SmellCategory;

/// Radius of a selected report's circle.
pub const SELECTED_RADIUS: u32 = 15;

/// Added to intensity to get an unselected circle's radius.
pub const RADIUS_OFFSET: u32 = 5;

/// Fill colors for report circles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub highlight: &'static str,
    pub fallback: &'static str,
    pub nature: &'static str,
    pub animal: &'static str,
    pub food: &'static str,
    pub urban: &'static str,
    pub human: &'static str,
    pub chemical: &'static str,
    pub other: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: "#ffd400",
            fallback: "#3388ff",
            nature: "#2e7d32",
            animal: "#8d6e63",
            food: "#ef6c00",
            urban: "#546e7a",
            human: "#d81b60",
            chemical: "#6a1b9a",
            other: "#9e9e9e",
        }
    }
}

impl Palette {
    /// Category color, or the fallback for categories outside the known set.
    #[must_use]
    pub const fn category_color(&self, category: &SmellCategory) -> &'static str {
        match category {
            SmellCategory::Nature => self.nature,
            SmellCategory::Animal => self.animal,
            SmellCategory::Food => self.food,
            SmellCategory::Urban => self.urban,
            SmellCategory::Human => self.human,
            SmellCategory::Chemical => self.chemical,
            SmellCategory::Other => self.other,
            SmellCategory::Unrecognized(_) => self.fallback,
        }
    }

    #[must_use]
    pub const fn fill(&self, category: &SmellCategory, selected: bool) -> &'static str {
        if selected {
            self.highlight
        } else {
            self.category_color(category)
        }
    }
}

/// `15` when selected, otherwise `intensity + 5`.
#[must_use]
pub fn radius(intensity: u8, selected: bool) -> u32 {
    if selected {
        SELECTED_RADIUS
    } else {
        u32::from(intensity) + RADIUS_OFFSET
    }
}
