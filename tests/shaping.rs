// Shaping, measurement and rendering against an installed font
//
// These tests locate a system font with Latin coverage via fontdb and return
// early when none is installed.

use gdip_text::draw::{place_glyphs, DrawContext, FontMatrix, GlyphRecorder};
use gdip_text::lang::Language;
use gdip_text::{
    Config, Direction, FontDesc, FormatFlags, ShapingContext, Status, StringFormat, TextInput,
    Unit, Vec2,
};
use std::collections::HashMap;
use std::path::PathBuf;

const EPSILON: f32 = 1e-3;

fn system_font_path() -> Option<PathBuf> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut paths: Vec<PathBuf> = db
        .faces()
        .filter(|face| face.index == 0)
        .filter_map(|face| match &face.source {
            fontdb::Source::File(path) => Some(path.clone()),
            _ => None,
        })
        .filter(|path| covers_latin(path))
        .collect();
    paths.sort();
    paths.into_iter().next()
}

fn covers_latin(path: &PathBuf) -> bool {
    let Ok(data) = std::fs::read(path) else {
        return false;
    };
    let Ok(face) = ttf_parser::Face::parse(&data, 0) else {
        return false;
    };
    "HAVfie,".chars().all(|c| face.glyph_index(c).is_some())
}

fn vars(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
    pairs.iter().cloned().collect()
}

fn context(path: PathBuf, call_vars: &[(&'static str, &'static str)]) -> ShapingContext {
    let config = Config {
        font_path: path,
        language: Some("english".to_string()),
        system_fallback: false,
        ..Config::default()
    };
    ShapingContext::with_config(config, vars(call_vars))
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

macro_rules! font_or_skip {
    () => {
        match system_font_path() {
            Some(path) => path,
            None => {
                eprintln!("no suitable system font installed; skipping");
                return;
            }
        }
    };
}

const SAMPLES: &[&str] = &[
    "",
    "H",
    "Hello, world",
    "AVATAR Te Vo",
    "office affix",
    "e\u{301}te\u{301}",
    "   ",
];

#[test]
fn measured_width_matches_rendered_width() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let font = FontDesc::new(12.0, Unit::Point);
    let dpem = gdip_text::pixel_size(12, &font) as f32;

    for text in SAMPLES {
        let mut draw = GlyphRecorder::new();
        let m = ctx.measure(&mut draw, &utf16(text), &font, None).unwrap();

        let origin = Vec2(3.0, 20.0);
        ctx.render(&mut draw, text, Direction::LeftToRight, origin, dpem)
            .unwrap();
        let layout = ctx
            .layout(TextInput::Utf8(text), dpem, Direction::LeftToRight)
            .unwrap();
        let (expected, pen) = place_glyphs(&layout.run, &layout.policy, origin);

        assert_eq!(draw.calls().len(), 1, "{text:?}");
        assert_eq!(draw.calls()[0], expected, "{text:?}");
        assert_eq!(m.codepoints_fitted, layout.run.num_glyphs());
        assert!(
            (pen.0 - origin.0 - m.width).abs() < EPSILON,
            "{text:?}: rendered {} vs measured {}",
            pen.0 - origin.0,
            m.width
        );
    }
}

#[test]
fn width_preserved_when_spacing_fits() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let layout = ctx
        .layout(TextInput::Utf8("Hello, world"), 24.0, Direction::LeftToRight)
        .unwrap();

    let policy = layout.policy;
    assert!(policy.clusters > 1);
    assert!(policy.advance > policy.injected());
    assert!(policy.scale < 1.0);
    assert!((policy.width() - layout.run.total_advance()).abs() < EPSILON);
}

#[test]
fn rtl_format_matches_rtl_render() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let font = FontDesc::new(12.0, Unit::Point);
    let format = StringFormat {
        flags: FormatFlags::DIRECTION_RIGHT_TO_LEFT,
    };

    let mut draw = GlyphRecorder::new();
    let m = ctx
        .measure(&mut draw, &utf16("Hello"), &font, Some(&format))
        .unwrap();
    let layout = ctx
        .layout(TextInput::Utf8("Hello"), 12.0, Direction::RightToLeft)
        .unwrap();
    let (_, pen) = place_glyphs(&layout.run, &layout.policy, Vec2::ZERO);
    assert!((pen.0 - m.width).abs() < EPSILON);
}

#[test]
fn empty_string() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let mut draw = GlyphRecorder::new();

    let (status, m) = ctx.measure_status(&mut draw, &[], &FontDesc::default(), None);
    assert_eq!(status, Status::Ok);
    let m = m.unwrap();
    assert_eq!(m.x, 0.0);
    assert_eq!(m.y, 0.0);
    assert_eq!(m.width, 0.0);
    assert_eq!(m.codepoints_fitted, 0);
    assert_eq!(m.lines_filled, 1);
    assert!(m.height > 0.0);
}

#[test]
fn font_matrix_is_restored() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let mut draw = GlyphRecorder::new();
    let matrix = FontMatrix {
        xx: 7.0,
        yx: 0.0,
        xy: 0.5,
        yy: 7.0,
    };
    draw.set_font_matrix(matrix);

    ctx.measure(&mut draw, &utf16("Hello"), &FontDesc::default(), None)
        .unwrap();
    assert_eq!(draw.font_matrix(), matrix);

    ctx.render(&mut draw, "Hello", Direction::LeftToRight, Vec2::ZERO, 30.0)
        .unwrap();
    assert_eq!(draw.font_matrix(), matrix);

    let face = draw.face().unwrap();
    assert!(face.same_face(ctx.raster_face().unwrap()));
    assert_eq!(Some(face), ctx.draw_face());
}

#[test]
fn height_scales_with_size() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let mut draw = GlyphRecorder::new();

    let small = ctx
        .measure(&mut draw, &utf16("Hx"), &FontDesc::new(12.0, Unit::Point), None)
        .unwrap();
    let large = ctx
        .measure(&mut draw, &utf16("Hx"), &FontDesc::new(24.0, Unit::Point), None)
        .unwrap();
    assert!((large.height - 2.0 * small.height).abs() < EPSILON);
    assert!(large.width > small.width);
}

#[test]
fn base_pixel_size_from_environment() {
    let path = font_or_skip!();
    let mut plain = context(path.clone(), &[]);
    let mut doubled = context(path, &[("GDIPLUS_FONT_SIZE", "24")]);
    let mut draw = GlyphRecorder::new();
    let text = utf16("Hx");

    let a = plain
        .measure(&mut draw, &text, &FontDesc::default(), None)
        .unwrap();
    let b = doubled
        .measure(&mut draw, &text, &FontDesc::default(), None)
        .unwrap();
    assert!((b.height - 2.0 * a.height).abs() < EPSILON);
}

#[test]
fn scale_overrides_from_environment() {
    let path = font_or_skip!();
    let mut ctx = context(
        path,
        &[("GDIPLUS_HSCALE", "0.5"), ("GDIPLUS_HSCALE_MULTIPLIER", "2.0")],
    );
    let layout = ctx
        .layout(TextInput::Utf8("Hello"), 12.0, Direction::LeftToRight)
        .unwrap();
    assert_eq!(layout.policy.scale, 1.0);

    let mut draw = GlyphRecorder::new();
    let m = ctx
        .measure(&mut draw, &utf16("Hello"), &FontDesc::default(), None)
        .unwrap();
    let expected = layout.run.total_advance() + layout.policy.injected();
    assert!((m.width - expected).abs() < EPSILON);
}

#[test]
fn zero_spacing_factor() {
    let path = font_or_skip!();
    let config = Config {
        font_path: path,
        spacing_factor: 0.0,
        system_fallback: false,
        ..Config::default()
    };
    let mut ctx = ShapingContext::with_config(config, vars(&[]));
    let layout = ctx
        .layout(TextInput::Utf8("Hello"), 16.0, Direction::LeftToRight)
        .unwrap();
    assert_eq!(layout.policy.scale, 1.0);
    assert_eq!(layout.policy.injected(), 0.0);
    assert_eq!(layout.policy.width(), layout.run.total_advance());
}

#[test]
fn combining_mark_shares_cluster() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let layout = ctx
        .layout(TextInput::Utf8("e\u{301}"), 16.0, Direction::LeftToRight)
        .unwrap();
    assert!(layout.run.len() >= 1);
    assert_eq!(layout.run.num_clusters(), 1);
    assert_eq!(layout.policy.scale, 1.0);
}

#[test]
fn teardown_and_reinitialize() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    ctx.ensure_initialized().unwrap();
    ctx.ensure_initialized().unwrap();
    assert!(ctx.is_initialized());
    let first = ctx.draw_face().unwrap().id();

    ctx.teardown();
    assert!(!ctx.is_initialized());
    assert!(ctx.raster_face().is_none());

    let mut draw = GlyphRecorder::new();
    ctx.measure(&mut draw, &utf16("Hello"), &FontDesc::default(), None)
        .unwrap();
    assert!(ctx.is_initialized());
    assert_ne!(ctx.draw_face().unwrap().id(), first);
}

#[test]
fn unknown_language_uses_fallback_profile() {
    let path = font_or_skip!();
    let config = Config {
        font_path: path,
        language: Some("Klingon".to_string()),
        system_fallback: false,
        ..Config::default()
    };
    let mut ctx = ShapingContext::with_config(config, vars(&[]));
    ctx.ensure_initialized().unwrap();
    let profile = ctx.profile().unwrap();
    assert_eq!(profile.language, Language::Unknown);
    assert_eq!(profile.tag, "ta");

    let mut draw = GlyphRecorder::new();
    let m = ctx
        .measure(&mut draw, &utf16("Hello"), &FontDesc::default(), None)
        .unwrap();
    assert!(m.width > 0.0);
}

#[test]
fn config_read_from_vars_at_init() {
    let path = font_or_skip!();
    let path_str: &'static str = Box::leak(path.to_string_lossy().into_owned().into_boxed_str());
    let mut ctx = ShapingContext::with_vars(vars(&[
        ("GDIPLUS_FONT_PATH", path_str),
        ("GDIPLUS_EXTRA_CHAR_SPACING_FACTOR", "0.3"),
        ("GDIPLUS_HARFBUZZ_LANGUAGE", "ru"),
    ]));
    ctx.ensure_initialized().unwrap();
    let config = ctx.config().unwrap();
    assert_eq!(config.font_path, path);
    assert_eq!(config.spacing_factor, 0.3);
    assert_eq!(ctx.profile().unwrap().language, Language::Russian);

    let layout = ctx
        .layout(TextInput::Utf8("Hello"), 10.0, Direction::LeftToRight)
        .unwrap();
    assert!((layout.policy.spacing - 3.0).abs() < EPSILON);
}

#[cfg(feature = "raster")]
#[test]
fn render_to_canvas() {
    use gdip_text::raster::Canvas;

    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let mut canvas = Canvas::new(120, 40);
    ctx.render(&mut canvas, "H", Direction::LeftToRight, Vec2(4.0, 30.0), 24.0)
        .unwrap();
    assert!(canvas.data().iter().any(|&c| c > 0));
    assert_eq!(canvas.font_size(), FontMatrix::default().xx);
}

#[cfg(feature = "raster")]
#[test]
fn render_far_off_canvas() {
    use gdip_text::raster::Canvas;

    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    let mut canvas = Canvas::new(10, 10);
    for origin in [Vec2(3.0e9, 5.0), Vec2(-3.0e9, 5.0), Vec2(2.0, 1.0e10)] {
        ctx.render(&mut canvas, "H", Direction::LeftToRight, origin, 12.0)
            .unwrap();
    }
    assert!(canvas.data().iter().all(|&c| c == 0));
}

#[test]
fn failed_layout_keeps_pixel_size() {
    let path = font_or_skip!();
    let mut ctx = context(path, &[]);
    ctx.layout(TextInput::Utf8("Hello"), 16.0, Direction::LeftToRight)
        .unwrap();

    let text = [0x61, 0xD800];
    assert!(ctx
        .layout(TextInput::Utf16(&text), 99.0, Direction::LeftToRight)
        .is_err());
    assert_eq!(ctx.raster_face().unwrap().dpem(), 16.0);
}
