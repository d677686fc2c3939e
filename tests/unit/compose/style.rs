use super::*;

#[test]
fn excerpt_follows_title_lines() {
    assert_eq!(excerpt_y(1), 1146.0);
    assert_eq!(excerpt_y(2), 1218.0);
    assert_eq!(excerpt_y(3), 1290.0);
}

#[test]
fn panel_and_gradient_geometry() {
    let panel = panel_rect();
    assert_eq!(panel.x0, 32.0);
    assert_eq!(panel.y0, 1024.0);
    assert!((panel.width() - 757.333).abs() < 1e-3);
    assert_eq!(panel.height(), 760.0);

    let g = gradient_rect();
    assert_eq!(g.y0, 1450.0);
    assert_eq!(g.y1, 1800.0);
    assert!((g.width() - (PANEL_WIDTH + 16.0)).abs() < 1e-9);
}

#[test]
fn bands_fit_the_canvas() {
    let canvas = CANVAS.rect();
    assert_eq!(IMAGE_BAND.width(), 1180.0);
    assert_eq!(IMAGE_BAND.height(), 1180.0);
    assert_eq!(canvas.union(IMAGE_BAND), canvas);
    assert_eq!(canvas.union(LOGO), canvas);
    assert_eq!((LOGO.width(), LOGO.height()), (286.0, 115.0));
}

#[test]
fn gradient_top_is_twenty_percent_background() {
    assert_eq!(GRADIENT_TOP, BACKGROUND.with_alpha_f32(0.20));
}
