use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from warm orange for the first (temperature) series.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 25.0 + (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Line colours for the trend chart.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub temperature: Color32,
    pub humidity: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let palette = generate_palette(2);
        Self {
            temperature: palette[0],
            humidity: palette[1],
        }
    }
}

// ---------------------------------------------------------------------------
// Temperature tint: °C → Color32
// ---------------------------------------------------------------------------

const COLD_C: f64 = -10.0;
const HOT_C: f64 = 35.0;

/// Blue for cold, red for hot, interpolated in HSL in between.
pub fn temperature_tint(celsius: f64) -> Color32 {
    let t = ((celsius - COLD_C) / (HOT_C - COLD_C)).clamp(0.0, 1.0) as f32;
    let cold = Hsl::new(220.0, 0.70, 0.55);
    let hot = Hsl::new(0.0, 0.75, 0.55);
    hsl_to_color32(cold.mix(hot, t))
}
