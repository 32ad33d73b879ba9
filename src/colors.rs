//! Packed color helpers.
//!
//! Pixels are 32-bit RGBA with byte order R, G, B, A in memory, which on
//! a little-endian u32 means `A<<24 | B<<16 | G<<8 | R`. This matches the
//! `RGBA32` streaming texture the window hands to SDL.

pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

pub const fn unpack_rgba(color: u32) -> (u8, u8, u8, u8) {
    (
        (color & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        ((color >> 16) & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    )
}

/// Scale the R, G, B channels by `factor` in [0, 1], preserving alpha.
pub fn scale_rgb(color: u32, factor: f32) -> u32 {
    let (r, g, b, a) = unpack_rgba(color);
    pack_rgba(
        (r as f32 * factor) as u8,
        (g as f32 * factor) as u8,
        (b as f32 * factor) as u8,
        a,
    )
}

pub const BLACK: u32 = pack_rgba(0x00, 0x00, 0x00, 0xFF);
pub const WHITE: u32 = pack_rgba(0xFF, 0xFF, 0xFF, 0xFF);
pub const RED: u32 = pack_rgba(0xFF, 0x00, 0x00, 0xFF);

pub const BACKGROUND: u32 = BLACK;
pub const CHECKER_TILE: u32 = pack_rgba(0x15, 0x15, 0x15, 0xFF);
pub const WIREFRAME: u32 = WHITE;
pub const VERTEX_MARKER: u32 = RED;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips() {
        let color = pack_rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(unpack_rgba(color), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn red_byte_comes_first_in_memory() {
        let bytes = RED.to_le_bytes();
        assert_eq!(bytes, [0xFF, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn scale_rgb_leaves_alpha_alone() {
        let half = scale_rgb(pack_rgba(200, 100, 50, 0xCC), 0.5);
        assert_eq!(unpack_rgba(half), (100, 50, 25, 0xCC));
    }
}
