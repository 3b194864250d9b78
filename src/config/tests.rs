#[cfg(test)]
mod tests {
    use crate::config::{Config, FALLBACK_VISUAL_URL, MediaConfig, StoreConfig};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(
            config.llm.api_base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.llm.model_audit, "gemini-3-pro-preview");
        assert_eq!(config.llm.model_image, "gemini-2.5-flash-image");
        assert_eq!(config.llm.model_video, "veo-3.1-generate-preview");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.thinking_budget, 8000);
        assert_eq!(config.llm.timeout_seconds, 300);
        assert!(!config.verbose);
    }

    #[test]
    fn test_media_config_default() {
        let media = MediaConfig::default();

        assert!(media.enable_visual);
        assert_eq!(media.aspect_ratio, "16:9");
        assert_eq!(media.resolution, "720p");
        assert_eq!(media.poll_interval_secs, 10);
        assert_eq!(media.max_polls, 40);
        assert_eq!(media.fallback_visual_url, FALLBACK_VISUAL_URL);
        assert_eq!(media.assets_dir, PathBuf::from("./competeai.assets"));
    }

    #[test]
    fn test_store_config_default() {
        let store = StoreConfig::default();

        assert_eq!(store.store_path, PathBuf::from("./competeai_audits.json"));
        assert_eq!(store.reports_dir, PathBuf::from("./competeai.reports"));
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("competeai.toml");

        let content = r#"
verbose = true

[llm]
api_key = "test-key"
api_base_url = "https://example.invalid/v1beta"
model_audit = "custom-audit-model"
model_image = "custom-image-model"
model_speech = "custom-speech-model"
model_video = "custom-video-model"
temperature = 0.5
thinking_budget = 4000
timeout_seconds = 60

[media]
enable_visual = false
aspect_ratio = "1:1"
voice = "Puck"
resolution = "1080p"
poll_interval_secs = 5
max_polls = 12
fallback_visual_url = "https://example.invalid/fallback.png"
assets_dir = "./assets"

[store]
store_path = "./audits.json"
reports_dir = "./reports"
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.model_audit, "custom-audit-model");
        assert_eq!(config.llm.temperature, 0.5);
        assert!(!config.media.enable_visual);
        assert_eq!(config.media.voice, "Puck");
        assert_eq!(config.media.max_polls, 12);
        assert_eq!(config.store.store_path, PathBuf::from("./audits.json"));
    }

    #[test]
    fn test_config_from_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/competeai.toml");
        assert!(Config::from_file(&path).is_err());
    }
}
