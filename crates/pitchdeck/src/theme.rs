use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    /// Cards, tiles and overlays.
    pub panel: Color32,
    pub panel_border: Color32,
    pub positive: Color32,
    pub negative: Color32,
    pub title_size: f32,
    pub kicker_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0B, 0x10, 0x1A),
            foreground: Color32::from_rgb(0xC9, 0xD1, 0xDE),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0xFF, 0x8A, 0x2A),
            panel: Color32::from_rgb(0x15, 0x1D, 0x2B),
            panel_border: Color32::from_rgb(0x27, 0x33, 0x47),
            positive: Color32::from_rgb(0x3D, 0xD6, 0x8C),
            negative: Color32::from_rgb(0xFF, 0x5C, 0x5C),
            title_size: 84.0,
            kicker_size: 22.0,
            subtitle_size: 36.0,
            body_size: 30.0,
            small_size: 20.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF7, 0xF5, 0xF0),
            foreground: Color32::from_rgb(0x22, 0x28, 0x33),
            heading_color: Color32::from_rgb(0x0E, 0x15, 0x22),
            accent: Color32::from_rgb(0xD9, 0x5F, 0x00),
            panel: Color32::WHITE,
            panel_border: Color32::from_rgb(0xDD, 0xD8, 0xCE),
            positive: Color32::from_rgb(0x12, 0x8A, 0x4F),
            negative: Color32::from_rgb(0xC2, 0x2B, 0x2B),
            title_size: 84.0,
            kicker_size: 22.0,
            subtitle_size: 36.0,
            body_size: 30.0,
            small_size: 20.0,
        }
    }

    /// `auto` follows the system preference and falls back to dark when the
    /// platform does not report one.
    pub fn from_name(name: &str, system_dark: Option<bool>) -> Self {
        match name {
            "light" => Self::light(),
            "auto" if system_dark == Some(false) => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let opacity = opacity.clamp(0.0, 1.0);
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Grade badge colours, best to worst.
    pub fn grade_color(&self, rank: usize) -> Color32 {
        match rank {
            0 => self.positive,
            1 => self.accent,
            2 => Color32::from_rgb(0xE0, 0xB0, 0x2E),
            _ => self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("light", Some(true)).name, "light");
        assert_eq!(Theme::from_name("dark", Some(false)).name, "dark");
        assert_eq!(Theme::from_name("auto", Some(false)).name, "light");
        assert_eq!(Theme::from_name("auto", Some(true)).name, "dark");
        assert_eq!(Theme::from_name("auto", None).name, "dark");
        assert_eq!(Theme::from_name("sepia", None).name, "dark");
    }

    #[test]
    fn test_with_opacity_clamps() {
        let c = Theme::with_opacity(Color32::WHITE, 1.5);
        assert_eq!(c.a(), 255);
        let c = Theme::with_opacity(Color32::WHITE, -1.0);
        assert_eq!(c.a(), 0);
    }
}
