use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fixed colours for the two filing parties.
pub const LANDLORD: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
pub const TENANT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const OTHER_PARTY: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series label → Color32
// ---------------------------------------------------------------------------

/// Assigns each series label a palette colour, in the order labels are
/// first given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        let mut ordered: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            if !ordered.iter().any(|l| l == label) {
                ordered.push(label.to_string());
            }
        }
        let palette = generate_palette(ordered.len());
        ColorMap {
            mapping: ordered.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}
