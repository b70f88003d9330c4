// File: ./src/format.rs
// Text sizing of the widget, derived from the width the launcher gives it.

/// Label lengths and relative text sizes for one widget size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Format {
    pub month_header_label_length: usize,
    pub day_header_label_length: usize,
    pub header_text_relative_size: f32,
    pub day_cell_text_relative_size: f32,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            month_header_label_length: usize::MAX,
            day_header_label_length: 3,
            header_text_relative_size: 1.0,
            day_cell_text_relative_size: 1.0,
        }
    }
}

impl Format {
    /// Picks the format for a widget's minimum width (dp).
    ///
    /// `None` means the host could not read the width; the default format is used.
    pub fn for_width(width: Option<i32>) -> Self {
        let Some(width) = width else {
            log::warn!("Widget width unavailable, using default format");
            return Self::default();
        };

        let default = Self::default();
        match width {
            w if w >= 260 => Self {
                day_cell_text_relative_size: 1.2,
                ..default
            },
            w if w >= 240 => Self {
                day_cell_text_relative_size: 1.1,
                ..default
            },
            w if w >= 220 => default,
            w if w >= 200 => Self {
                header_text_relative_size: 0.9,
                day_cell_text_relative_size: 0.9,
                ..default
            },
            w if w >= 180 => Self {
                header_text_relative_size: 0.8,
                day_cell_text_relative_size: 0.8,
                ..default
            },
            _ => Self {
                month_header_label_length: 3,
                day_header_label_length: 1,
                header_text_relative_size: 0.8,
                day_cell_text_relative_size: 0.8,
            },
        }
    }

    pub fn month_header_label(&self, month: &str) -> String {
        month.chars().take(self.month_header_label_length).collect()
    }

    pub fn day_header_label(&self, day: &str) -> String {
        day.chars().take(self.day_header_label_length).collect()
    }
}
