/// RGB Color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const DARK_GRAY: Color = Color::new(64, 64, 64);

    pub const SKY_BLUE: Color = Color::new(135, 206, 235);
    pub const SELECTION_BG: Color = Color::new(40, 60, 110);
    pub const LINE_COLOR: Color = Color::new(31, 119, 180);
    pub const SLIDER_FILL: Color = Color::new(70, 130, 220);
    pub const BUTTON_COLOR: Color = Color::new(220, 180, 60);
    pub const PAUSED_COLOR: Color = Color::new(220, 120, 30);
}

/// Text style with foreground, background, and attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            underline: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[allow(dead_code)]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(c: Color) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

impl From<Style> for ratatui::style::Style {
    fn from(style: Style) -> Self {
        use ratatui::style::Modifier;

        let mut rs = ratatui::style::Style::default();
        if let Some(fg) = style.fg {
            rs = rs.fg(fg.into());
        }
        if let Some(bg) = style.bg {
            rs = rs.bg(bg.into());
        }
        if style.bold {
            rs = rs.add_modifier(Modifier::BOLD);
        }
        if style.underline {
            rs = rs.add_modifier(Modifier::UNDERLINED);
        }
        rs
    }
}
