/*
 * Process-wide palette for the enforced dark theme. The two colors below are
 * the whole configuration surface of the library; everything that paints
 * pulls from here so dialogs, pages, and subclassed controls agree on the
 * exact same background.
 *
 * The shared GDI brush built from `DARK_BACKGROUND` is owned by the process
 * context (see `context`), created at attach and deleted at detach.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Background used for dialog surfaces and theme-stripped controls.
pub const DARK_BACKGROUND: Color = Color { r: 32, g: 32, b: 32 };

/// Text color painted over `DARK_BACKGROUND`.
pub const LIGHT_TEXT: Color = Color { r: 255, g: 255, b: 255 };

/// Win32 `COLORREF` values carry the channels in BGR order.
pub const fn color_to_bgr(color: Color) -> u32 {
    (color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16)
}

#[cfg(target_os = "windows")]
pub(crate) fn color_to_colorref(color: Color) -> windows::Win32::Foundation::COLORREF {
    windows::Win32::Foundation::COLORREF(color_to_bgr(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_conversion_swaps_red_and_blue() {
        let c = Color { r: 0x11, g: 0x22, b: 0x33 };
        assert_eq!(color_to_bgr(c), 0x0033_2211);
    }

    #[test]
    fn palette_constants_match_the_enforced_theme() {
        assert_eq!(color_to_bgr(DARK_BACKGROUND), 0x0020_2020);
        assert_eq!(color_to_bgr(LIGHT_TEXT), 0x00FF_FFFF);
    }
}
