use super::*;

fn frame(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> RgbaFrame {
    RgbaFrame {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

#[test]
fn png_round_trips_through_decoder() {
    let f = frame(3, 2, [16, 24, 40, 255], true);
    let png = encode_png(&f).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 1).0, [16, 24, 40, 255]);
}

#[test]
fn premultiplied_frames_are_written_straight() {
    let f = frame(1, 1, [64, 32, 0, 128], true);
    let png = encode_png(&f).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [128, 64, 0, 128]);
}

#[test]
fn encoding_is_deterministic() {
    let f = frame(8, 8, [1, 2, 3, 255], true);
    assert_eq!(encode_png(&f).unwrap(), encode_png(&f).unwrap());
}

#[test]
fn mismatched_buffer_is_an_encoding_error() {
    let mut f = frame(2, 2, [0, 0, 0, 255], false);
    f.data.pop();
    let err = encode_png(&f).unwrap_err();
    assert_eq!(err.kind(), "encoding");
}
