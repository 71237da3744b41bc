use ratatui::style::Color;

/// Parse a `#rrggbb` hex string into a terminal colour
#[must_use]
pub fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Interpolate between two colours.
///
/// RGB colours are mixed per channel. Named or indexed colours cannot be
/// mixed, so the result switches from `from` to `to` halfway through.
#[must_use]
pub fn mix(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            Color::Rgb(lerp_u8(r1, r2, t), lerp_u8(g1, g2, t), lerp_u8(b1, b2, t))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let value = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    value.round().clamp(0.0, 255.0) as u8
}
