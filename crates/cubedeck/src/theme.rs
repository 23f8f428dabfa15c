use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub highlight: Color32,
    pub panel_background: Color32,
    pub title_size: f32,
    pub heading_size: f32,
    pub subtitle_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn slate() -> Self {
        Self {
            name: "slate".to_string(),
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            foreground: Color32::from_rgb(0xCB, 0xD5, 0xE1),
            heading_color: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            accent: Color32::from_rgb(0x38, 0xBD, 0xF8),
            highlight: Color32::from_rgb(0xFB, 0xBF, 0x24),
            panel_background: Color32::from_rgb(0x1E, 0x29, 0x3B),
            title_size: 120.0,
            heading_size: 84.0,
            subtitle_size: 52.0,
            body_size: 44.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            foreground: Color32::from_rgb(0x33, 0x41, 0x55),
            heading_color: Color32::from_rgb(0x0F, 0x17, 0x2A),
            accent: Color32::from_rgb(0x02, 0x84, 0xC7),
            highlight: Color32::from_rgb(0xD9, 0x77, 0x06),
            panel_background: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            title_size: 120.0,
            heading_size: 84.0,
            subtitle_size: 52.0,
            body_size: 44.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::slate(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}
