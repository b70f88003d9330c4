//mincal/src/color_utils.rs

// Colour decoding for provider values and widget background transparency.
// No GUI types here; colours travel as strings or (r, g, b) tuples.

/// Decodes a provider colour. The provider stores colours as a packed ARGB
/// `int`, which reaches us either as signed decimal text ("-16776961") or,
/// for hand-written rows, as "#RRGGBB" / "#AARRGGBB".
pub fn parse_provider_color(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if value.starts_with('#') {
        return parse_hex_to_u8(value);
    }

    let n = value.parse::<i64>().ok()?;
    if n < i64::from(i32::MIN) || n > i64::from(u32::MAX) {
        return None;
    }
    // Two's complement truncation keeps negative ARGB ints intact.
    let argb = n as u32;
    Some((
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
    ))
}

/// Parse a hex color string like "#RRGGBB", "RRGGBB" or "#AARRGGBB" into u8 tuple.
pub fn parse_hex_to_u8(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = match hex.len() {
        6 => hex,
        8 => &hex[2..],
        _ => return None,
    };
    let r = u8::from_str_radix(rgb.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(rgb.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(rgb.get(4..6)?, 16).ok()?;
    Some((r, g, b))
}

/// Determines if text on top of this color should be white.
pub fn is_dark(r: u8, g: u8, b: u8) -> bool {
    // Perceptual luminance approximation
    let brightness = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    brightness < 127.5
}

/// Alpha bounds a transparency percentage is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyRange {
    pub min: u8,
    pub max: u8,
}

impl TransparencyRange {
    pub const COMPLETE: TransparencyRange = TransparencyRange { min: 0, max: 255 };
}

/// 0 is fully opaque, 100 fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transparency {
    percentage: u8,
}

impl Transparency {
    pub fn new(percentage: u8) -> Self {
        Self {
            percentage: percentage.min(100),
        }
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn alpha(&self, range: TransparencyRange) -> u8 {
        let span = u32::from(range.max.saturating_sub(range.min));
        let dropped = span * u32::from(self.percentage) / 100;
        range.max - dropped as u8
    }

    pub fn alpha_hex(&self, range: TransparencyRange) -> String {
        format!("{:02X}", self.alpha(range))
    }
}

/// Returns "#AARRGGBB" built from the last six hex digits of `colour`.
pub fn with_transparency(
    colour: &str,
    transparency: Transparency,
    range: TransparencyRange,
) -> Option<String> {
    let hex = colour.trim().trim_start_matches('#');
    if hex.len() < 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = &hex[hex.len() - 6..];
    Some(format!("#{}{}", transparency.alpha_hex(range), rgb))
}
