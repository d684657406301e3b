//! Checker configuration
//!
//! One [`CheckerConfig`] is built at startup and handed to the width
//! checker and the font resolver. Nothing is read from the environment
//! behind your back: call [`CheckerConfig::from_env`] if you want
//! `SERP_FONT_PATH` and friends to count.
//!
//! ```
//! use serpwidth_core::{CheckerConfig, FontRole};
//!
//! let config = CheckerConfig::default()
//!     .with_font(FontRole::Default, "/fonts/Arial.ttf")
//!     .with_description_correction(0.98);
//! assert_eq!(config.description.correction, 0.98);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::{Budget, FontRole, TextKind};

#[derive(Debug, Clone, PartialEq)]
pub struct CheckerConfig {
    pub title: Budget,
    pub description: Budget,
    /// Explicit font files that win over the platform search
    pub font_overrides: BTreeMap<FontRole, PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            title: Budget::TITLE,
            description: Budget::DESCRIPTION,
            font_overrides: BTreeMap::new(),
        }
    }
}

impl CheckerConfig {
    /// Defaults plus any `SERP_FONT_PATH*` overrides set in the environment
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`from_env`](Self::from_env))
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for role in FontRole::ALL {
            if let Some(path) = lookup(role.env_var()).filter(|value| !value.trim().is_empty()) {
                log::info!("Font for role {} set by {}: {}", role, role.env_var(), path);
                self.font_overrides.insert(role, PathBuf::from(path));
            }
        }
        self
    }

    pub fn with_font(mut self, role: FontRole, path: impl Into<PathBuf>) -> Self {
        self.font_overrides.insert(role, path.into());
        self
    }

    pub fn with_description_correction(mut self, correction: f32) -> Self {
        self.description.correction = correction;
        self
    }

    pub fn font_override(&self, role: FontRole) -> Option<&Path> {
        self.font_overrides.get(&role).map(PathBuf::as_path)
    }

    pub fn budget(&self, kind: TextKind) -> Budget {
        match kind {
            TextKind::Title => self.title,
            TextKind::Description => self.description,
        }
    }
}
