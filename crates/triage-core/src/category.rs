//! The two-valued classification outcome and its single normalization point.
//!
//! The service labels results in Portuguese (`"Produtivo"` / `"Improdutivo"`).
//! Every component that branches on a category goes through
//! [`Category::from_label`]; nothing else compares label strings.

use serde::{Deserialize, Serialize};

/// Canonical label for productive results.
pub const PRODUCTIVE_LABEL: &str = "Produtivo";

/// Canonical label for unproductive results.
pub const UNPRODUCTIVE_LABEL: &str = "Improdutivo";

/// Classification outcome returned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// The message requires action or a reply.
    #[serde(rename = "Produtivo")]
    Productive,
    /// The message requires no immediate action.
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Normalize a wire label, case-insensitively.
    ///
    /// Any label other than the productive marker is unproductive; there is
    /// no third state.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(PRODUCTIVE_LABEL) {
            Category::Productive
        } else {
            Category::Unproductive
        }
    }

    /// Canonical display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => PRODUCTIVE_LABEL,
            Category::Unproductive => UNPRODUCTIVE_LABEL,
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, Category::Productive)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
