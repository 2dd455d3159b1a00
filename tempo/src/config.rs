use anyhow::{Context, Result};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub icons: Icons,
    pub timer: TimerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "hex_to_color")]
    pub background: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub foreground: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub selection: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub black: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub red: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub green: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub yellow: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub blue: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub magenta: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub cyan: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub gray: Color,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Icons {
    pub timer: String,
    pub play: String,
    pub pause: String,
    pub stop: String,
    pub mode_up: String,
    pub mode_down: String,
    pub voice_on: String,
    pub voice_off: String,
    pub input_cursor: String,
    pub header_left: String,
    pub header_right: String,
}

/// Behavior toggles. The engine's initial state is fixed by design and is
/// not configurable here.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimerConfig {
    /// Call out the last ten countdown seconds in the status line.
    pub voice: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(9, 14, 19),
            foreground: Color::Rgb(197, 201, 199),
            selection: Color::Rgb(230, 195, 132),
            black: Color::Rgb(13, 12, 12),
            red: Color::Rgb(228, 104, 118),
            green: Color::Rgb(138, 154, 123),
            yellow: Color::Rgb(196, 178, 138),
            blue: Color::Rgb(127, 180, 202),
            magenta: Color::Rgb(162, 146, 163),
            cyan: Color::Rgb(122, 168, 159),
            gray: Color::Rgb(164, 167, 164),
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            timer: "Δ".to_string(),
            play: "▶".to_string(),
            pause: "⏸".to_string(),
            stop: "■".to_string(),
            mode_up: "↑".to_string(),
            mode_down: "↓".to_string(),
            voice_on: "🔊".to_string(),
            voice_off: "🔇".to_string(),
            input_cursor: "▊".to_string(),
            header_left: "⟪ ".to_string(),
            header_right: " ⟫".to_string(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self { voice: false }
    }
}

fn hex_to_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;
    if !s.starts_with('#') || s.len() != 7 {
        return Err(serde::de::Error::custom("invalid hex color format"));
    }
    let r = u8::from_str_radix(&s[1..3], 16).map_err(serde::de::Error::custom)?;
    let g = u8::from_str_radix(&s[3..5], 16).map_err(serde::de::Error::custom)?;
    let b = u8::from_str_radix(&s[5..7], 16).map_err(serde::de::Error::custom)?;
    Ok(Color::Rgb(r, g, b))
}

pub fn load_config() -> Result<Config> {
    match ProjectDirs::from("com", "tempo", "Tempo") {
        Some(proj_dirs) => {
            let path = proj_dirs.config_dir().join("tempo.toml");
            if path.exists() {
                let config_str = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file at {:?}", path))?;
                toml::from_str(&config_str)
                    .with_context(|| format!("Failed to parse config file at {:?}", path))
            } else {
                Ok(Config::default())
            }
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config_over_defaults() {
        let config: Config = toml::from_str(
            r##"
            [timer]
            voice = true

            [theme]
            background = "#000000"
            red = "#ff0000"
            "##,
        )
        .expect("valid config");
        assert!(config.timer.voice);
        assert_eq!(config.theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(config.theme.red, Color::Rgb(255, 0, 0));
        // untouched sections keep their defaults
        assert_eq!(config.icons.play, "▶");
    }

    #[test]
    fn rejects_malformed_hex_colors() {
        assert!(toml::from_str::<Config>("[theme]\nred = \"ff0000\"").is_err());
        assert!(toml::from_str::<Config>("[theme]\nred = \"#ff00\"").is_err());
    }
}
