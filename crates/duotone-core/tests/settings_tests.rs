use duotone_core::color::Color;
use duotone_core::error::CoreError;
use duotone_core::settings::{CURRENT_SETTINGS_VERSION, Preset, Settings, SettingsFile};

#[test]
fn test_settings_file_save_load() {
    let settings = Settings::new(65, true, Color::new(10, 20, 30), Color::from_hex("#abcdef").unwrap());
    let file = SettingsFile::new(settings);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("look.json");
    file.save(&path).unwrap();

    let loaded = SettingsFile::load(&path).unwrap();
    assert_eq!(loaded.version, CURRENT_SETTINGS_VERSION);
    assert_eq!(loaded.settings, settings);
}

#[test]
fn test_settings_file_stores_hex_colors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("defaults.json");
    SettingsFile::new(Settings::default()).save(&path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"#f784c5\""), "{json}");
    assert!(json.contains("\"#1b602f\""), "{json}");
    assert!(json.contains("\"intensity\": 100"), "{json}");
}

#[test]
fn test_settings_file_loads_hand_written_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hand.json");
    std::fs::write(
        &path,
        r##"{
            "version": "1.2.0",
            "settings": {
                "intensity": 140,
                "invert": false,
                "high_color": "#FFFFFF",
                "low_color": "000000"
            }
        }"##,
    )
    .unwrap();

    let loaded = SettingsFile::load(&path).unwrap();
    // Out-of-range intensity is kept as written and clamped at use.
    assert_eq!(loaded.settings.intensity, 140);
    assert_eq!(loaded.settings.clamped_intensity(), 100);
    assert_eq!(loaded.settings.high_color, Color::new(255, 255, 255));
    assert_eq!(loaded.settings.low_color, Color::new(0, 0, 0));
}

#[test]
fn test_settings_file_rejects_future_major_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.json");
    let mut file = SettingsFile::new(Settings::default());
    file.version = "2.0.0".into();
    file.save(&path).unwrap();

    let err = SettingsFile::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedVersion { found, .. } if found == "2.0.0"));
}

#[test]
fn test_settings_file_rejects_bad_color() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r##"{"version":"1.0.0","settings":{"intensity":50,"invert":false,"high_color":"#12","low_color":"#000000"}}"##,
    )
    .unwrap();
    assert!(matches!(
        SettingsFile::load(&path),
        Err(CoreError::Serialization(_))
    ));
}

#[test]
fn test_settings_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = SettingsFile::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn test_all_presets_resolve_by_name() {
    for preset in Preset::all() {
        assert_eq!(Preset::from_name(preset.name()).unwrap(), preset);
    }
}

#[test]
fn test_original_preset_restores_defaults() {
    let mut s = Settings::new(100, false, Color::new(0, 0, 255), Color::new(255, 0, 0));
    s.apply_preset(Preset::Original);
    assert_eq!(s, Settings::default());
}
