//! Tests for the minifb frontend

use super::ui::*;
use chipvm::*;
use minifb::Key;
use std::collections::HashSet;

mod keys {
    use super::*;
    #[test]
    fn every_hex_key_is_mapped_once() {
        let keys = [
            Key::Key1, Key::Key2, Key::Key3, Key::Key4,
            Key::Q, Key::W, Key::E, Key::R,
            Key::A, Key::S, Key::D, Key::F,
            Key::Z, Key::X, Key::C, Key::V,
        ];
        let mapped: HashSet<usize> = keys.into_iter().filter_map(identify_key).collect();
        assert_eq!((0..16).collect::<HashSet<_>>(), mapped);
    }
    #[test]
    fn unmapped_keys() {
        assert_eq!(None, identify_key(Key::Space));
        assert_eq!(None, identify_key(Key::Key5));
    }
}

mod framebuffer {
    use super::*;
    #[test]
    fn blank_screen_is_background() {
        let mut fb = FrameBuffer::default();
        fb.draw(&Screen::default());
        let bg = FrameBufferFormat::default().bg;
        assert!(fb.buffer().iter().all(|&px| px == bg));
    }
    #[test]
    fn lit_pixel_is_foreground() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0x80], false);
        let mut fb = FrameBuffer::new(WIDTH * 2, HEIGHT * 2);
        fb.draw(&screen);
        let FrameBufferFormat { fg, bg } = FrameBufferFormat::default();
        // one chip-8 pixel covers a 2x2 block
        assert_eq!(&[fg, fg, bg], &fb.buffer()[..3]);
        assert_eq!(&[fg, fg, bg], &fb.buffer()[WIDTH * 2..WIDTH * 2 + 3]);
        assert_eq!(4, fb.buffer().iter().filter(|&&px| px == fg).count());
    }
    #[test]
    fn format_default() {
        let format = FrameBufferFormat::default();
        assert_ne!(format.fg, format.bg);
    }
}
