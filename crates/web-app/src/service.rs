use std::collections::VecDeque;

use crate::{Settings, SettingsRepository, SettingsService, log};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, String> {
        self.repository.read_settings().await
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), String> {
        if settings.beep_volume > 100 {
            return Err(format!(
                "beep volume must be between 0 and 100 ({})",
                settings.beep_volume
            ));
        }
        self.repository.write_settings(settings).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use crate::Theme;

    use super::*;

    #[derive(Default)]
    struct Repository(RefCell<Option<Settings>>);

    impl SettingsRepository for Repository {
        async fn read_settings(&self) -> Result<Settings, String> {
            Ok(self.0.borrow().unwrap_or_default())
        }

        async fn write_settings(&self, settings: Settings) -> Result<(), String> {
            *self.0.borrow_mut() = Some(settings);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_settings() {
        let service = Service::new(Repository::default());
        assert_eq!(service.get_settings().await, Ok(Settings::default()));

        let settings = Settings {
            beep_volume: 30,
            theme: Theme::System,
        };
        service.set_settings(settings).await.unwrap();
        assert_eq!(service.get_settings().await, Ok(settings));
    }

    #[tokio::test]
    async fn test_settings_invalid_beep_volume() {
        let service = Service::new(Repository::default());
        assert!(
            service
                .set_settings(Settings {
                    beep_volume: 101,
                    theme: Theme::Light,
                })
                .await
                .is_err()
        );
        assert_eq!(service.get_settings().await, Ok(Settings::default()));
    }
}
