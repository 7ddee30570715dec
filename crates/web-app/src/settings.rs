use log::error;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Volume of the rest timer beeps in percent.
    pub beep_volume: u8,
    pub theme: Theme,
}

impl Settings {
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => {
                let Some(window) = web_sys::window() else {
                    error!("failed to access window to determine preferred color scheme");
                    return Theme::Light;
                };
                match window.match_media("(prefers-color-scheme: dark)") {
                    Ok(Some(media_query_list)) if media_query_list.matches() => Theme::Dark,
                    Ok(Some(_)) => Theme::Light,
                    Ok(None) | Err(_) => {
                        error!("failed to determine preferred color scheme");
                        Theme::Light
                    }
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            beep_volume: 80,
            theme: Theme::Light,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_settings_missing_fields() {
        assert_eq!(
            serde_json::from_value::<Settings>(json!({ "theme": "Dark" })).unwrap(),
            Settings {
                beep_volume: 80,
                theme: Theme::Dark
            }
        );
    }

    #[test]
    fn test_current_theme_explicit() {
        let settings = Settings {
            beep_volume: 50,
            theme: Theme::Dark,
        };
        assert_eq!(settings.current_theme(), Theme::Dark);
    }
}
