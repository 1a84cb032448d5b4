//! The installation plan.
/// A GUI application installed as a Homebrew cask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Cask token passed to `brew install --cask`.
    pub cask: String,
}

impl Application {
    /// Create an application entry for `cask`.
    #[must_use]
    pub fn new(cask: &str) -> Self {
        Self {
            cask: cask.to_string(),
        }
    }
}

/// Casks installed on every provisioned machine, in install order.
pub const CASKS: &[&str] = &[
    "google-chrome",
    "firefox",
    "visual-studio-code",
    "iterm2",
    "rectangle",
    "slack",
    "spotify",
    "1password",
];

/// The installation plan built from [`CASKS`].
#[must_use]
pub fn plan() -> Vec<Application> {
    CASKS.iter().map(|cask| Application::new(cask)).collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn plan_preserves_declaration_order() {
        let plan = plan();
        assert_eq!(plan.len(), CASKS.len());
        for (app, cask) in plan.iter().zip(CASKS) {
            assert_eq!(app.cask, *cask);
        }
    }

    #[test]
    fn plan_has_no_duplicates() {
        let unique: HashSet<&str> = CASKS.iter().copied().collect();
        assert_eq!(unique.len(), CASKS.len());
    }

    #[test]
    fn cask_tokens_are_lowercase_without_spaces() {
        for cask in CASKS {
            assert!(!cask.is_empty());
            assert!(
                cask.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "invalid cask token: {cask}"
            );
        }
    }

    #[test]
    fn first_entry_is_browser() {
        assert_eq!(plan()[0], Application::new("google-chrome"));
    }
}
