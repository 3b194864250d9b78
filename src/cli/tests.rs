#[cfg(test)]
mod tests {
    use crate::cli::{Args, ProbeCommand};
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(&["competeai"]).unwrap();

        assert_eq!(args.domain, None);
        assert!(!args.list);
        assert_eq!(args.remove, None);
        assert_eq!(args.export, None);
        assert!(!args.no_visual);
        assert!(!args.verbose);
        // 什么都没给时没有可执行的操作
        assert_eq!(args.command(), None);
    }

    #[test]
    fn test_bare_domain_is_audit() {
        let args = Args::try_parse_from(&["competeai", "acme.com"]).unwrap();

        assert_eq!(
            args.command(),
            Some(ProbeCommand::Audit {
                domain: "acme.com".to_string()
            })
        );
    }

    #[test]
    fn test_archive_operations() {
        let args = Args::try_parse_from(&["competeai", "--list"]).unwrap();
        assert_eq!(args.command(), Some(ProbeCommand::List));

        let args = Args::try_parse_from(&["competeai", "--remove", "r1"]).unwrap();
        assert_eq!(
            args.command(),
            Some(ProbeCommand::Remove {
                id: "r1".to_string()
            })
        );

        let args = Args::try_parse_from(&["competeai", "--export", "r2"]).unwrap();
        assert_eq!(
            args.command(),
            Some(ProbeCommand::Export {
                id: "r2".to_string()
            })
        );
    }

    #[test]
    fn test_media_enrichment_operations() {
        let args = Args::try_parse_from(&["competeai", "--video", "r1"]).unwrap();
        assert_eq!(
            args.command(),
            Some(ProbeCommand::EnrichVideo {
                id: "r1".to_string()
            })
        );

        let args = Args::try_parse_from(&["competeai", "--audio", "r1"]).unwrap();
        assert_eq!(
            args.command(),
            Some(ProbeCommand::EnrichAudio {
                id: "r1".to_string()
            })
        );
    }

    #[test]
    fn test_list_wins_over_domain() {
        // 同时给出domain与--list时按固定优先级取--list
        let args = Args::try_parse_from(&["competeai", "acme.com", "--list"]).unwrap();
        assert_eq!(args.command(), Some(ProbeCommand::List));
    }

    #[test]
    fn test_into_config_overrides() {
        let args = Args::try_parse_from(&[
            "competeai",
            "acme.com",
            "--api-key",
            "test-key",
            "--model",
            "gemini-test",
            "--no-visual",
            "--verbose",
        ])
        .unwrap();

        let config = args.into_config();
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.model_audit, "gemini-test");
        assert!(!config.media.enable_visual);
        assert!(config.verbose);
    }

    #[test]
    fn test_into_config_without_overrides_keeps_defaults() {
        let args = Args::try_parse_from(&["competeai", "acme.com"]).unwrap();
        let config = args.into_config();

        assert_eq!(config.llm.model_audit, "gemini-3-pro-preview");
        assert!(config.media.enable_visual);
        assert!(!config.verbose);
    }
}
