use std::path::Path;

use super::*;
use crate::{foundation::core::Rgba8, render::RgbaFrame, text::wrap::TextMeasure};

const BLUE_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="286" height="115">
<rect x="0" y="0" width="286" height="115" fill="#0000ff"/>
</svg>"##;

fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    let hero = dir.join("hero.png");
    image::RgbaImage::from_pixel(64, 64, image::Rgba([255, 0, 0, 255]))
        .save(&hero)
        .unwrap();
    let logo = dir.join("logo.svg");
    std::fs::write(&logo, BLUE_LOGO).unwrap();
    (hero, logo)
}

fn spec(image_path: PathBuf) -> RenderSpec {
    RenderSpec {
        title: "Hello World".to_string(),
        excerpt: "A short excerpt".to_string(),
        image_path,
    }
}

fn close(a: [u8; 4], b: Rgba8, tol: u8) -> bool {
    a[0].abs_diff(b.r) <= tol && a[1].abs_diff(b.g) <= tol && a[2].abs_diff(b.b) <= tol
}

#[test]
fn composes_all_layers() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (hero, logo) = write_fixtures(dir.path());

    let mut composer = Composer::new(&fonts, logo).unwrap();
    let frame = composer.compose(&spec(hero)).unwrap().finish();
    assert_eq!((frame.width, frame.height), (1200, 1800));

    // Margin outside the image band keeps the background.
    assert_eq!(frame.pixel(2, 2).unwrap(), [16, 24, 40, 255]);
    // Image band shows the stretched source.
    assert!(close(frame.pixel(600, 300).unwrap(), Rgba8::rgb(255, 0, 0), 2));
    // Rounded corner of the band is clipped away.
    assert!(close(frame.pixel(10, 10).unwrap(), style::BACKGROUND, 40));
    // Logo is drawn last at its fixed box.
    assert!(close(frame.pixel(1000, 1690).unwrap(), Rgba8::rgb(0, 0, 255), 2));
    // Right of the panel and above the logo stays background.
    assert_eq!(frame.pixel(1000, 1500).unwrap(), [16, 24, 40, 255]);
}

#[test]
fn missing_source_image_is_a_missing_asset() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (_, logo) = write_fixtures(dir.path());

    let mut composer = Composer::new(&fonts, logo).unwrap();
    let err = composer.compose(&spec(dir.path().join("nope.png"))).unwrap_err();
    assert_eq!(err.kind(), "missing_asset");
}

#[test]
fn missing_logo_is_a_missing_asset() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (hero, _) = write_fixtures(dir.path());

    let mut composer = Composer::new(&fonts, dir.path().join("no-logo.svg")).unwrap();
    let err = composer.compose(&spec(hero)).unwrap_err();
    assert_eq!(err.kind(), "missing_asset");
}

#[test]
fn excerpt_moves_down_with_long_titles() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let mut composer = Composer::new(&fonts, "logo.svg").unwrap();

    let short = composer.wrap_title("Short");
    assert_eq!(short.line_count(), 1);
    assert_eq!(short.lines[0].origin, Point::new(50.0, 1054.0));

    let long = composer.wrap_title(
        "A considerably longer title that cannot possibly fit into a single line of the panel",
    );
    assert!(long.line_count() >= 2);
    assert_eq!(long.lines[1].origin.y, 1054.0 + 72.0);

    let excerpt = composer.wrap_excerpt("Excerpt", long.line_count());
    assert_eq!(excerpt.lines[0].origin.y, style::excerpt_y(long.line_count()));
}

#[test]
fn composer_is_reusable_across_documents() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (hero, logo) = write_fixtures(dir.path());

    let mut composer = Composer::new(&fonts, logo).unwrap();
    let a = composer.compose(&spec(hero.clone())).unwrap().finish();
    let b = composer.compose(&spec(hero)).unwrap().finish();
    assert_eq!(a.data, b.data);
}

fn is_title_ink(px: [u8; 4]) -> bool {
    px[0] >= 240 && px[1] >= 240 && px[2] >= 240
}

// Horizontal extent of title-colored pixels in rows `y0..y1`, within the panel.
fn title_ink_x_range(frame: &RgbaFrame, y0: u32, y1: u32) -> Option<(u32, u32)> {
    let panel = style::panel_rect();
    let mut range: Option<(u32, u32)> = None;
    for y in y0..y1 {
        for x in panel.x0 as u32..panel.x1 as u32 {
            if is_title_ink(frame.pixel(x, y).unwrap()) {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(x), hi.max(x)),
                    None => (x, x),
                });
            }
        }
    }
    range
}

#[test]
fn title_glyphs_span_the_measured_line_below_its_origin() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (hero, logo) = write_fixtures(dir.path());

    let mut composer = Composer::new(&fonts, logo).unwrap();
    let spec = RenderSpec {
        title: "Hello World Title".to_string(),
        ..spec(hero)
    };
    let width = composer.title.measure("Hello World Title");
    let frame = composer.compose(&spec).unwrap().finish();

    let title_top = style::TITLE_Y as u32;
    let (lo, hi) = title_ink_x_range(&frame, title_top, title_top + 72)
        .expect("title pixels inside the first line box");
    assert!(lo >= 50 && lo < 60, "title starts at x={lo}");
    let ink = f64::from(hi - 50);
    assert!(
        ink > width * 0.85 && ink <= width + 4.0,
        "ink spans {ink}px, measured {width}px"
    );

    // Nothing title-colored between the panel top and the title origin.
    assert_eq!(
        title_ink_x_range(&frame, style::PANEL_Y as u32, title_top),
        None
    );
}

#[test]
fn svg_source_image_fills_the_band() {
    let Ok(fonts) = FontBook::load(None) else {
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let (_, logo) = write_fixtures(dir.path());
    let hero = dir.path().join("hero.svg");
    std::fs::write(
        &hero,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
<rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
</svg>"##,
    )
    .unwrap();

    let mut composer = Composer::new(&fonts, logo).unwrap();
    let frame = composer.compose(&spec(hero)).unwrap().finish();
    assert!(close(frame.pixel(600, 300).unwrap(), Rgba8::rgb(255, 0, 0), 2));
    assert!(close(frame.pixel(1150, 1150).unwrap(), Rgba8::rgb(255, 0, 0), 2));
}
