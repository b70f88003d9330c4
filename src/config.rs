// File: ./src/config.rs
// Widget settings: loading, saving, clearing and defaults.
use crate::color_utils::Transparency;
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use strum::EnumIter;

/// First SDK level with per-app language preferences.
const PER_APP_LANGUAGE_SDK: u32 = 33;
/// First SDK level exposing the first-day-of-week locale preference.
const FIRST_DAY_OF_WEEK_PREFERENCE_SDK: u32 = 34;

fn default_transparency() -> u8 {
    20
}
fn default_text_size() -> u8 {
    40
}
fn default_first_day_of_week() -> Weekday {
    Weekday::Mon
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn main_background(&self) -> &'static str {
        match self {
            Theme::Dark => "#1D1D1D",
            Theme::Light => "#F5F5F5",
        }
    }

    pub fn main_text_colour(&self) -> &'static str {
        match self {
            Theme::Dark => "#FFFFFF",
            Theme::Light => "#222222",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// Calendar era the header year is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum WidgetCalendar {
    #[default]
    Gregorian,
    Holocene,
}

impl WidgetCalendar {
    pub fn year(&self, gregorian_year: i32) -> i32 {
        match self {
            WidgetCalendar::Gregorian => gregorian_year,
            WidgetCalendar::Holocene => gregorian_year + 10_000,
        }
    }
}

/// Colour of the per-day instance markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum InstancesColour {
    /// The colour the provider reports for each instance's calendar.
    #[default]
    Calendar,
    Cyan,
    Mint,
    Blue,
    Green,
    Yellow,
    White,
    Black,
}

impl InstancesColour {
    /// Fixed hex colour, or `None` for `Calendar`.
    pub fn hex(&self) -> Option<&'static str> {
        match self {
            InstancesColour::Calendar => None,
            InstancesColour::Cyan => Some("#00BCD4"),
            InstancesColour::Mint => Some("#5ED9A5"),
            InstancesColour::Blue => Some("#2196F3"),
            InstancesColour::Green => Some("#4CAF50"),
            InstancesColour::Yellow => Some("#FFEB3B"),
            InstancesColour::White => Some("#FFFFFF"),
            InstancesColour::Black => Some("#000000"),
        }
    }
}

/// Symbols marking how many instances fall on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum SymbolSet {
    #[default]
    Minimal,
    Vertical,
    Circles,
    Numbers,
    Roman,
}

impl SymbolSet {
    fn symbols(&self) -> &'static str {
        match self {
            SymbolSet::Minimal => "·∶∴∷◇◈",
            SymbolSet::Vertical => "·∶⁝⁞|",
            SymbolSet::Circles => "◔◑◕●❂",
            SymbolSet::Numbers => "123456789+",
            SymbolSet::Roman => "ⅠⅡⅢⅣⅤⅥⅦⅧⅨⅩ",
        }
    }

    /// Symbol for `count` instances; counts past the end of the set share its last symbol.
    pub fn symbol_for(&self, count: usize) -> Option<char> {
        if count == 0 {
            return None;
        }
        let symbols = self.symbols();
        let last = symbols.chars().count() - 1;
        symbols.chars().nth((count - 1).min(last))
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_transparency")]
    pub transparency: u8,
    #[serde(default = "default_text_size")]
    pub text_size: u8,
    #[serde(default)]
    pub show_declined_events: bool,
    #[serde(default)]
    pub focus_on_current_week: bool,
    #[serde(default)]
    pub open_calendar_on_clicked_day: bool,
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: Weekday,
    #[serde(default)]
    pub instances_symbol_set: SymbolSet,
    #[serde(default)]
    pub instances_colour: InstancesColour,
    #[serde(default)]
    pub calendar: WidgetCalendar,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            transparency: default_transparency(),
            text_size: default_text_size(),
            show_declined_events: false,
            focus_on_current_week: false,
            open_calendar_on_clicked_day: false,
            first_day_of_week: default_first_day_of_week(),
            instances_symbol_set: SymbolSet::default(),
            instances_colour: InstancesColour::default(),
            calendar: WidgetCalendar::default(),
        }
    }
}

impl WidgetConfig {
    /// Loads settings; a missing file yields the defaults.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = LocalStorage::with_lock(&path, || {
            fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file '{}'", path.display()))
        })?;

        let config: WidgetConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        Ok(config.clamped())
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Removes every stored setting.
    pub fn clear(ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove '{}'", path.display()))?;
            }
            Ok(())
        })
    }

    fn clamped(mut self) -> Self {
        self.transparency = self.transparency.min(100);
        self.text_size = self.text_size.min(100);
        self
    }

    pub fn widget_transparency(&self) -> Transparency {
        Transparency::new(self.transparency)
    }
}

pub fn is_per_app_language_preference_enabled(sdk: u32) -> bool {
    sdk >= PER_APP_LANGUAGE_SDK
}

pub fn is_first_day_of_week_locale_preference_enabled(sdk: u32) -> bool {
    sdk >= FIRST_DAY_OF_WEEK_PREFERENCE_SDK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use strum::IntoEnumIterator;

    #[test]
    fn test_missing_file_gives_defaults() {
        let ctx = TestContext::new();
        assert_eq!(WidgetConfig::load(&ctx).unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults_and_clamps() {
        let ctx = TestContext::new();
        let path = ctx.get_config_file_path().unwrap();
        fs::write(&path, "theme = \"Light\"\ntransparency = 250\n").unwrap();

        let config = WidgetConfig::load(&ctx).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.transparency, 100);
        assert_eq!(config.text_size, 40);
        assert_eq!(config.first_day_of_week, Weekday::Mon);
    }

    fn assert_round_trips(ctx: &TestContext, config: WidgetConfig) {
        config.save(ctx).unwrap();
        assert_eq!(WidgetConfig::load(ctx).unwrap(), config);
    }

    #[test]
    fn test_every_enum_value_round_trips() {
        let ctx = TestContext::new();
        for theme in Theme::iter() {
            assert_round_trips(&ctx, WidgetConfig { theme, ..WidgetConfig::default() });
        }
        for instances_colour in InstancesColour::iter() {
            assert_round_trips(
                &ctx,
                WidgetConfig { instances_colour, ..WidgetConfig::default() },
            );
        }
        for instances_symbol_set in SymbolSet::iter() {
            assert_round_trips(
                &ctx,
                WidgetConfig { instances_symbol_set, ..WidgetConfig::default() },
            );
        }
        for calendar in WidgetCalendar::iter() {
            assert_round_trips(&ctx, WidgetConfig { calendar, ..WidgetConfig::default() });
        }
        let mut first_day_of_week = Weekday::Mon;
        for _ in 0..7 {
            assert_round_trips(
                &ctx,
                WidgetConfig { first_day_of_week, ..WidgetConfig::default() },
            );
            first_day_of_week = first_day_of_week.succ();
        }
    }

    #[test]
    fn test_symbol_for_count() {
        assert_eq!(SymbolSet::Minimal.symbol_for(0), None);
        assert_eq!(SymbolSet::Minimal.symbol_for(1), Some('·'));
        assert_eq!(SymbolSet::Minimal.symbol_for(6), Some('◈'));
        assert_eq!(SymbolSet::Minimal.symbol_for(40), Some('◈'));
        assert_eq!(SymbolSet::Numbers.symbol_for(3), Some('3'));
        assert_eq!(SymbolSet::Numbers.symbol_for(12), Some('+'));
        for set in SymbolSet::iter() {
            assert!(set.symbol_for(1).is_some(), "{:?}", set);
        }
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "theme = [").unwrap();
        let err = WidgetConfig::load(&ctx).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_clear_removes_settings() {
        let ctx = TestContext::new();
        WidgetConfig {
            show_declined_events: true,
            ..WidgetConfig::default()
        }
        .save(&ctx)
        .unwrap();
        WidgetConfig::clear(&ctx).unwrap();
        assert!(!WidgetConfig::load(&ctx).unwrap().show_declined_events);
        // Clearing twice is fine.
        WidgetConfig::clear(&ctx).unwrap();
    }

    #[test]
    fn test_sdk_gates() {
        for (sdk, expected) in [(1, false), (29, false), (32, false), (33, true), (99, true)] {
            assert_eq!(is_per_app_language_preference_enabled(sdk), expected);
        }
        for (sdk, expected) in [(1, false), (33, false), (34, true), (35, true)] {
            assert_eq!(is_first_day_of_week_locale_preference_enabled(sdk), expected);
        }
    }

    #[test]
    fn test_holocene_year() {
        assert_eq!(WidgetCalendar::Gregorian.year(2018), 2018);
        assert_eq!(WidgetCalendar::Holocene.year(2018), 12018);
    }
}
