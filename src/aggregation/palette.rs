//! Display colours and icons for category labels.

use serde::Serialize;

/// How a category is drawn in a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    /// A hex colour, e.g. "#F97316".
    pub color: &'static str,
    /// An icon name from the client's icon set.
    pub icon: &'static str,
}

const DEFAULT_STYLE: CategoryStyle = CategoryStyle {
    color: "#9CA3AF",
    icon: "tag",
};

const PALETTE: &[(&[&str], CategoryStyle)] = &[
    (
        &["food", "groceries", "dining"],
        CategoryStyle {
            color: "#F97316",
            icon: "utensils",
        },
    ),
    (
        &["transport", "transportation", "travel"],
        CategoryStyle {
            color: "#3B82F6",
            icon: "car",
        },
    ),
    (
        &["housing", "rent", "mortgage"],
        CategoryStyle {
            color: "#8B5CF6",
            icon: "home",
        },
    ),
    (
        &["utilities", "bills"],
        CategoryStyle {
            color: "#EAB308",
            icon: "bolt",
        },
    ),
    (
        &["entertainment"],
        CategoryStyle {
            color: "#EC4899",
            icon: "film",
        },
    ),
    (
        &["health", "healthcare", "medical"],
        CategoryStyle {
            color: "#10B981",
            icon: "heart",
        },
    ),
    (
        &["shopping", "clothing"],
        CategoryStyle {
            color: "#F43F5E",
            icon: "shopping-bag",
        },
    ),
    (
        &["education"],
        CategoryStyle {
            color: "#6366F1",
            icon: "book",
        },
    ),
    (
        &["salary", "wages"],
        CategoryStyle {
            color: "#22C55E",
            icon: "briefcase",
        },
    ),
    (
        &["freelance"],
        CategoryStyle {
            color: "#14B8A6",
            icon: "laptop",
        },
    ),
    (
        &["investments", "investment"],
        CategoryStyle {
            color: "#0EA5E9",
            icon: "chart-line",
        },
    ),
    (
        &["gifts", "gift"],
        CategoryStyle {
            color: "#D946EF",
            icon: "gift",
        },
    ),
    (
        &["savings"],
        CategoryStyle {
            color: "#84CC16",
            icon: "piggy-bank",
        },
    ),
];

/// Look up the colour and icon for a category label.
///
/// Matching ignores case and surrounding whitespace. Unknown labels get a
/// neutral default style.
pub fn category_style(label: &str) -> CategoryStyle {
    let label = label.trim().to_lowercase();

    PALETTE
        .iter()
        .find(|(names, _)| names.contains(&label.as_str()))
        .map(|(_, style)| *style)
        .unwrap_or(DEFAULT_STYLE)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_STYLE, category_style};

    #[test]
    fn known_label_ignores_case() {
        assert_eq!(category_style("Food"), category_style("food"));
        assert_eq!(category_style(" FOOD ").icon, "utensils");
    }

    #[test]
    fn unknown_label_gets_default() {
        assert_eq!(category_style("Llama grooming"), DEFAULT_STYLE);
        assert_eq!(category_style(""), DEFAULT_STYLE);
    }
}
