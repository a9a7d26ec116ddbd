use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// One colour per loaded file, stable for a given file count.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    palette: Vec<Color32>,
}

impl SeriesColors {
    pub fn new(n: usize) -> Self {
        Self {
            palette: generate_palette(n),
        }
    }

    pub fn color_for(&self, index: usize) -> Color32 {
        if self.palette.is_empty() {
            return Color32::LIGHT_BLUE;
        }
        self.palette[index % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn empty_palette_falls_back() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(SeriesColors::new(0).color_for(3), Color32::LIGHT_BLUE);
        let c = SeriesColors::new(2);
        assert_eq!(c.color_for(0), c.color_for(2));
    }
}
