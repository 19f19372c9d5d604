use super::*;

#[test]
fn straight_conversion_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = frame.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 64, 0, 128]);
    assert_eq!(&straight[4..], &[10, 20, 30, 255]);
    assert_eq!(frame.pixel(1, 0), Some([10, 20, 30, 255]));
}

#[test]
fn straight_frames_pass_through() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![200, 100, 50, 10],
        premultiplied: false,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![200, 100, 50, 10]);
}

#[test]
fn pixel_outside_frame_is_none() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 2), None);
    assert_eq!(frame.pixel(u32::MAX, u32::MAX), None);

    let short = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 8],
        premultiplied: true,
    };
    assert_eq!(short.pixel(1, 1), None);
}
