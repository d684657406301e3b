//! The width checker: classify, resolve, shape, judge
//!
//! ```no_run
//! use serpwidth::{CheckerConfig, WidthChecker};
//!
//! let checker = WidthChecker::from_config(CheckerConfig::from_env());
//! let verdict = checker.check_title("Buy Running Shoes Online | Free Shipping")?;
//! println!("{}px of {}px", verdict.pixel_width, verdict.max_pixels);
//! # Ok::<(), serpwidth::SerpError>(())
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use serpwidth_core::{
    apply_correction,
    error::Result,
    traits::{FontResolver, Shaper},
    CheckerConfig, FontRole, Measurement, MeasurementRequest, TextKind, Verdict,
};
use serpwidth_fontdb::{Font, FontCache, SystemFontResolver};
use serpwidth_shape_hr::HarfrustShaper;
use serpwidth_unicode::ScriptClassifier;

/// Measures strings against the title and description budgets
///
/// Fonts are resolved lazily per role, so a run that only sees Latin text
/// never needs a Thai font to exist.
pub struct WidthChecker {
    config: CheckerConfig,
    resolver: Arc<dyn FontResolver>,
    shaper: Arc<dyn Shaper>,
    classifier: ScriptClassifier,
    fonts: Arc<FontCache>,
    role_paths: Mutex<HashMap<FontRole, PathBuf>>,
    missing_glyphs: AtomicUsize,
}

impl WidthChecker {
    pub fn new(
        config: CheckerConfig,
        resolver: Arc<dyn FontResolver>,
        shaper: Arc<dyn Shaper>,
    ) -> Self {
        Self {
            config,
            resolver,
            shaper,
            classifier: ScriptClassifier::new(),
            fonts: Arc::new(FontCache::new()),
            role_paths: Mutex::new(HashMap::new()),
            missing_glyphs: AtomicUsize::new(0),
        }
    }

    /// System font discovery and harfrust shaping
    pub fn from_config(config: CheckerConfig) -> Self {
        let resolver = Arc::new(SystemFontResolver::new(&config));
        Self::new(config, resolver, Arc::new(HarfrustShaper::new()))
    }

    /// Share a font cache with other checkers
    pub fn with_cache(mut self, cache: Arc<FontCache>) -> Self {
        self.fonts = cache;
        self
    }

    pub fn with_classifier(mut self, classifier: ScriptClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn font_cache(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Title at 20px against 580px (by default)
    pub fn check_title(&self, text: &str) -> Result<Verdict> {
        self.check(text, TextKind::Title)
    }

    /// Description at 14px against 990px (by default)
    pub fn check_description(&self, text: &str) -> Result<Verdict> {
        self.check(text, TextKind::Description)
    }

    pub fn check(&self, text: &str, kind: TextKind) -> Result<Verdict> {
        let budget = self.config.budget(kind);
        let role = self.classifier.classify(text);
        let measurement = self.measure(&MeasurementRequest {
            text,
            font_size: budget.font_size,
            role,
        })?;

        let pixel_width = apply_correction(measurement.pixel_width, budget.correction);
        log::debug!(
            "{} {:?}: {}px (role {}, {} glyphs)",
            kind,
            text,
            pixel_width,
            role,
            measurement.glyph_count
        );

        Ok(Verdict::new(
            text,
            kind,
            role,
            pixel_width,
            measurement.missing_glyphs,
            budget,
        ))
    }

    /// Width of `request.text` with the font for `request.role`
    pub fn measure(&self, request: &MeasurementRequest<'_>) -> Result<Measurement> {
        if request.text.is_empty() {
            return Ok(Measurement::default());
        }

        let font = self.font_for_role(request.role)?;
        let measurement = self
            .shaper
            .measure(request.text, request.font_size, &*font)?;

        if measurement.missing_glyphs > 0 {
            self.missing_glyphs
                .fetch_add(measurement.missing_glyphs, Ordering::Relaxed);
        }
        Ok(measurement)
    }

    /// The loaded font that measures `role`, loading it on first use
    pub fn font_for_role(&self, role: FontRole) -> Result<Arc<Font>> {
        let path = self.locate(role)?;
        let font = self.fonts.get_or_load(&path, || {
            let bytes = self.resolver.read(&path)?;
            Font::from_data(bytes, path.display().to_string())
        })?;
        Ok(font)
    }

    /// Glyphs measured with `.notdef` since this checker was built
    pub fn missing_glyph_count(&self) -> usize {
        self.missing_glyphs.load(Ordering::Relaxed)
    }

    /// Resolve once per role; roles without a font borrow the default's
    fn locate(&self, role: FontRole) -> Result<PathBuf> {
        let mut paths = self.role_paths.lock();
        if let Some(path) = paths.get(&role) {
            return Ok(path.clone());
        }

        let path = match self.resolver.locate(role) {
            Ok(path) => path,
            Err(err) if role != FontRole::Default => {
                log::debug!("{err}; measuring {role} text with the default font");
                match paths.get(&FontRole::Default) {
                    Some(path) => path.clone(),
                    None => {
                        let path = self.resolver.locate(FontRole::Default)?;
                        paths.insert(FontRole::Default, path.clone());
                        path
                    },
                }
            },
            Err(err) => return Err(err.into()),
        };

        paths.insert(role, path.clone());
        Ok(path)
    }
}
