//! Tests for the settings module
//!
//! Property-based tests check that any valid settings survive a persist/reload
//! cycle; example tests cover validation and backward compatibility.

#[cfg(test)]
mod property_tests {
    use crate::museums::MuseumSource;
    use crate::settings::{MuseumSettings, Settings, SettingsManager};
    use proptest::prelude::*;

    fn source_strategy() -> impl Strategy<Value = MuseumSource> {
        prop_oneof![
            Just(MuseumSource::Cleveland),
            Just(MuseumSource::ScienceMuseum),
            Just(MuseumSource::Rijksmuseum),
            Just(MuseumSource::VictoriaAlbert),
        ]
    }

    /// Any valid settings written through `update` are what a fresh manager reads back.
    #[test]
    fn property_settings_survive_reload() {
        proptest!(|(
            host in "[a-z]{3,12}",
            api_key in proptest::option::of("[A-Za-z0-9]{8}"),
            user_agent in "[A-Za-z]{3,10}/[0-9]\\.[0-9]",
            default_sources in proptest::collection::vec(source_strategy(), 1..4),
            port in 1024u16..65535
        )| {
            let temp_dir = tempfile::tempdir().unwrap();
            let settings_path = temp_dir.path().join("settings.json");
            let manager = SettingsManager::new_with_path(settings_path.clone()).unwrap();

            let mut test_settings = Settings {
                museums: MuseumSettings {
                    cleveland_base_url: format!("https://{}.example.org/api/artworks", host),
                    rijksmuseum_api_key: api_key,
                    user_agent,
                    default_sources,
                    ..Default::default()
                },
                ..Default::default()
            };
            test_settings.proxy.bind_address = format!("127.0.0.1:{}", port);

            let result = manager.update(test_settings.clone());
            prop_assert!(result.is_ok(), "update should succeed for valid settings: {:?}", result.err());
            prop_assert_eq!(manager.get(), test_settings.clone());

            let reloaded = SettingsManager::new_with_path(settings_path).unwrap();
            prop_assert_eq!(reloaded.get(), test_settings);
        });
    }
}

#[cfg(test)]
mod manager_tests {
    use crate::museums::MuseumSource;
    use crate::settings::{Settings, SettingsError, SettingsManager};

    #[test]
    fn test_first_run_writes_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("nested").join("settings.json");

        let manager = SettingsManager::new_with_path(settings_path.clone()).unwrap();

        assert!(settings_path.exists(), "Settings file should be created on first run");
        assert_eq!(manager.get(), Settings::default());
        assert_eq!(
            manager.get().museums.default_sources,
            vec![MuseumSource::Cleveland, MuseumSource::ScienceMuseum]
        );
    }

    #[test]
    fn test_invalid_update_leaves_state_untouched() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        let manager = SettingsManager::new_with_path(settings_path.clone()).unwrap();
        let before = std::fs::read_to_string(&settings_path).unwrap();

        let mut bad = Settings::default();
        bad.museums.default_sources.clear();
        assert!(matches!(manager.update(bad), Err(SettingsError::Invalid(_))));

        let mut bad_url = Settings::default();
        bad_url.museums.va_base_url = "api.vam.ac.uk".to_string();
        assert!(matches!(manager.update(bad_url), Err(SettingsError::Invalid(_))));

        let mut bad_bind = Settings::default();
        bad_bind.proxy.bind_address = "localhost".to_string();
        assert!(matches!(manager.update(bad_bind), Err(SettingsError::Invalid(_))));

        assert_eq!(manager.get(), Settings::default());
        assert_eq!(std::fs::read_to_string(&settings_path).unwrap(), before);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("settings.json");
        std::fs::write(&settings_path, "{ not json").unwrap();

        let manager = SettingsManager::new_with_path(settings_path).unwrap();
        assert_eq!(manager.get(), Settings::default());
    }

    /// Settings files written before the proxy section existed still load.
    #[test]
    fn test_backward_compatibility_missing_proxy_section() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings_path = temp_dir.path().join("settings.json");

        let old_format_json = r#"{
            "museums": {
                "rijksmuseum_api_key": "abc12345",
                "default_sources": ["va", "rijksmuseum"]
            }
        }"#;
        std::fs::write(&settings_path, old_format_json).unwrap();

        let loaded = SettingsManager::new_with_path(settings_path).unwrap().get();
        assert_eq!(loaded.museums.rijksmuseum_api_key.as_deref(), Some("abc12345"));
        assert_eq!(
            loaded.museums.default_sources,
            vec![MuseumSource::VictoriaAlbert, MuseumSource::Rijksmuseum]
        );
        assert_eq!(
            loaded.museums.cleveland_base_url,
            "https://openaccess-api.clevelandart.org/api/artworks",
            "missing URLs should default"
        );
        assert_eq!(loaded.proxy.bind_address, "127.0.0.1:5001");
    }
}
