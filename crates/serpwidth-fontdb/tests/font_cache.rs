// this_file: crates/serpwidth-fontdb/tests/font_cache.rs

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use serpwidth_core::{
    error::FontLoadError, traits::FontRef, traits::FontResolver, CheckerConfig, FontRole,
};
use serpwidth_fontdb::{Font, FontCache, Platform, SystemFontResolver, MAX_FONT_SIZE};

fn repo_test_font_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fonts")
        .join(name)
}

#[test]
fn test_metrics_when_loading_mono_font() {
    let font = Font::from_file(repo_test_font_path("DejaVuSansMono.ttf")).expect("load test font");

    assert_eq!(font.units_per_em(), 2048);
    assert!(font.glyph_count() > 100);
    assert!(font.source().ends_with("DejaVuSansMono.ttf"));

    let glyph = font.glyph_id('A').expect("mono font maps 'A'");
    assert_eq!(font.advance_width(glyph), 1233);
}

#[test]
fn test_unmapped_char_has_no_glyph() {
    let font = Font::from_file(repo_test_font_path("DejaVuSansMono.ttf")).expect("load test font");
    // DejaVu Sans Mono carries no CJK ideographs
    assert_eq!(font.glyph_id('漢'), None);
}

#[test]
fn test_cache_returns_same_font_for_same_path() {
    let cache = FontCache::new();
    let path = repo_test_font_path("DejaVuSansMono.ttf");

    let first = cache.get_or_load(&path, || Font::from_file(&path)).unwrap();
    let second = cache
        .get_or_load(&path, || panic!("second lookup must not load"))
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    let stats = cache.stats();
    assert_eq!(stats.loads, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
    assert!(cache.get(&path).is_some());
}

#[test]
fn test_concurrent_first_use_loads_once() {
    const THREADS: usize = 8;

    let cache = FontCache::new();
    let path = repo_test_font_path("DejaVuSans.ttf");
    let loads = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let fonts: Vec<Arc<Font>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    cache
                        .get_or_load(&path, || {
                            loads.fetch_add(1, Ordering::SeqCst);
                            Font::from_file(&path)
                        })
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(fonts.iter().all(|font| Arc::ptr_eq(font, &fonts[0])));

    // Every caller that did not load counts as a hit, waiting or not
    let stats = cache.stats();
    assert_eq!(stats.loads, 1);
    assert_eq!(stats.hits, THREADS - 1);
}

#[test]
fn test_resolver_rejects_oversized_file() {
    let dir = std::env::temp_dir().join(format!("serpwidth-huge-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let huge = dir.join("huge.ttf");
    // Sparse: no data blocks are written
    let file = std::fs::File::create(&huge).unwrap();
    file.set_len(MAX_FONT_SIZE + 1).unwrap();
    drop(file);

    let resolver = SystemFontResolver::new(&CheckerConfig::default());
    let err = resolver.read(&huge).unwrap_err();

    match &err {
        FontLoadError::TooLarge { path, size, max } => {
            assert_eq!(path, &huge);
            assert_eq!(*size, MAX_FONT_SIZE + 1);
            assert_eq!(*max, MAX_FONT_SIZE);
        },
        other => panic!("expected TooLarge, got {other:?}"),
    }
    assert!(err.to_string().contains("huge.ttf"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_resolver_reads_override() {
    let path = repo_test_font_path("DejaVuSansMono.ttf");
    let config = CheckerConfig::default().with_font(FontRole::Default, &path);
    let resolver = SystemFontResolver::for_platform(&config, Platform::Linux);

    let located = resolver.locate(FontRole::Default).unwrap();
    assert_eq!(located, path);
    let bytes = resolver.read(&located).unwrap();
    assert!(Font::from_data(bytes, "mono").is_ok());
}

#[test]
fn test_resolver_reads_garbage_then_parse_fails() {
    let dir = std::env::temp_dir().join(format!("serpwidth-fontdb-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let bogus = dir.join("bogus.ttf");
    std::fs::write(&bogus, b"definitely not a font").unwrap();

    let resolver = SystemFontResolver::new(&CheckerConfig::default());
    let bytes = resolver.read(&bogus).unwrap();
    let err = Font::from_data(bytes, bogus.display().to_string()).unwrap_err();
    assert!(err.to_string().contains("bogus.ttf"));

    let _ = std::fs::remove_dir_all(&dir);
}
