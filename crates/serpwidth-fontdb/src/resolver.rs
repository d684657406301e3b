//! Where each font role might live on this machine
//!
//! Explicit overrides win. Otherwise the first existing file from the
//! platform's candidate list is used: Arial (or a metric-compatible
//! substitute) for the default role, and a common system font with the
//! right glyphs for Thai, CJK and Korean.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serpwidth_core::{
    error::{FontLoadError, FontNotFoundError},
    traits::FontResolver,
    CheckerConfig, FontRole,
};

/// Maximum font file size (50MB) to prevent resource exhaustion.
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// Operating system families with distinct font directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Candidate files for `role`, most preferred first
    pub fn candidates(&self, role: FontRole) -> Vec<PathBuf> {
        match self {
            Platform::Windows => {
                let windir = std::env::var("WINDIR").unwrap_or_else(|_| "C:\\Windows".to_string());
                let fonts = Path::new(&windir).join("Fonts");
                let names: &[&str] = match role {
                    FontRole::Default => &["arial.ttf"],
                    FontRole::Thai => &["tahoma.ttf", "LeelawUI.ttf", "leelawad.ttf"],
                    FontRole::Cjk => &["msyh.ttc", "YuGothR.ttc", "simsun.ttc"],
                    FontRole::Korean => &["malgun.ttf", "gulim.ttc"],
                };
                let mut paths: Vec<PathBuf> = names.iter().map(|name| fonts.join(name)).collect();
                if role == FontRole::Default {
                    paths.push(PathBuf::from("C:/Windows/Fonts/arial.ttf"));
                }
                paths
            },
            Platform::MacOs => {
                let paths: &[&str] = match role {
                    FontRole::Default => &[
                        "/Library/Fonts/Arial.ttf",
                        "/System/Library/Fonts/Supplemental/Arial.ttf",
                        "/System/Library/Fonts/Arial.ttf",
                        "~/Library/Fonts/Arial.ttf",
                    ],
                    FontRole::Thai => &[
                        "/System/Library/Fonts/Supplemental/Thonburi.ttc",
                        "/System/Library/Fonts/Thonburi.ttc",
                        "/Library/Fonts/Tahoma.ttf",
                    ],
                    FontRole::Cjk => &[
                        "/System/Library/Fonts/PingFang.ttc",
                        "/System/Library/Fonts/Hiragino Sans GB.ttc",
                        "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
                    ],
                    FontRole::Korean => &[
                        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
                        "/Library/Fonts/AppleGothic.ttf",
                    ],
                };
                paths.iter().map(|path| expand_home(path)).collect()
            },
            Platform::Linux => {
                let paths: &[&str] = match role {
                    FontRole::Default => &[
                        "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
                        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
                        "/usr/share/fonts/TTF/LiberationSans-Regular.ttf",
                        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                    ],
                    FontRole::Thai => &[
                        "/usr/share/fonts/truetype/noto/NotoSansThai-Regular.ttf",
                        "/usr/share/fonts/noto/NotoSansThai-Regular.ttf",
                        "/usr/share/fonts/truetype/tlwg/Garuda.ttf",
                        "/usr/share/fonts/truetype/tlwg/Loma.ttf",
                    ],
                    FontRole::Cjk => &[
                        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
                        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
                        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
                        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
                    ],
                    FontRole::Korean => &[
                        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
                        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
                        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
                    ],
                };
                paths.iter().map(PathBuf::from).collect()
            },
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Finds fonts on the local filesystem
#[derive(Debug, Clone)]
pub struct SystemFontResolver {
    overrides: BTreeMap<FontRole, PathBuf>,
    platform: Platform,
}

impl SystemFontResolver {
    /// Resolver for the running platform using the config's overrides
    pub fn new(config: &CheckerConfig) -> Self {
        Self::for_platform(config, Platform::current())
    }

    pub fn for_platform(config: &CheckerConfig, platform: Platform) -> Self {
        Self {
            overrides: config.font_overrides.clone(),
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl FontResolver for SystemFontResolver {
    fn locate(&self, role: FontRole) -> Result<PathBuf, FontNotFoundError> {
        if let Some(path) = self.overrides.get(&role) {
            log::debug!("Using override font for {}: {}", role, path.display());
            return Ok(path.clone());
        }

        let candidates = self.platform.candidates(role);
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => {
                log::debug!("Found font for {}: {}", role, path.display());
                Ok(path.clone())
            },
            None => Err(FontNotFoundError::new(role, candidates)),
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FontLoadError> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FontLoadError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => FontLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if meta.len() > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max: MAX_FONT_SIZE,
            });
        }

        fs::read(path).map_err(|e| FontLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
