#[cfg(test)]
mod tests {
    use crate::config::{
        ConfigBuilder, ConfigLoader, LogFormat, LogLevel, MedragConfig, ScoringConfig, validation,
    };
    use crate::knowledge::{EscalationCluster, KnowledgeBase};
    use crate::models::Urgency;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = MedragConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.recognition.negation_window, 4);
        assert_eq!(config.memory.max_history, 10);
        assert_eq!(config.memory.session_ttl, Duration::from_secs(1800));
        assert_eq!(config.context.char_budget, 4000);
        assert_eq!(config.context.reply_excerpt_chars, 150);
        assert!(!config.knowledge.lexicon.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_log_level(LogLevel::Debug)
            .with_max_history(5)
            .with_session_ttl(Duration::from_secs(120))
            .with_char_budget(1000)
            .build()
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.memory.max_history, 5);
        assert_eq!(config.memory.session_ttl, Duration::from_secs(120));
        assert_eq!(config.context.char_budget, 1000);
    }

    #[test]
    fn test_validation() {
        let valid = ConfigBuilder::new().build();
        assert!(valid.is_ok());

        let config = MedragConfig::default();
        assert!(validation::validate_config(&config).is_ok());

        assert!(ConfigBuilder::new().with_max_history(0).build().is_err());
        assert!(ConfigBuilder::new().with_max_sessions(0).build().is_err());
        assert!(ConfigBuilder::new().with_char_budget(10).build().is_err());
        assert!(
            ConfigBuilder::new()
                .with_session_ttl(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(
            ConfigBuilder::new()
                .with_scoring(ScoringConfig {
                    default_weight: 1.5,
                    ..ScoringConfig::default()
                })
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_knowledge_validation() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.clusters.push(EscalationCluster::new(
            "unknown_member",
            "",
            &["chest pain"],
            &["not a symptom"],
            1,
            Urgency::Critical,
        ));
        assert!(validation::validate_knowledge(&knowledge).is_err());

        let mut knowledge = KnowledgeBase::default();
        knowledge.clusters.push(EscalationCluster::new(
            "too_demanding",
            "",
            &["fever"],
            &["cough"],
            2,
            Urgency::High,
        ));
        assert!(validation::validate_knowledge(&knowledge).is_err());

        let mut knowledge = KnowledgeBase::default();
        knowledge.lexicon[0].aliases.push("chest, pain".to_string());
        assert!(validation::validate_knowledge(&knowledge).is_err());

        assert!(validation::validate_knowledge(&KnowledgeBase::empty()).is_ok());
    }

    #[test]
    fn test_predefined_configs() {
        let dev = ConfigBuilder::development().build().unwrap();
        let test = ConfigBuilder::testing().build().unwrap();
        let prod = ConfigBuilder::production().build().unwrap();

        assert_eq!(dev.logging.level, LogLevel::Debug);
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert_eq!(test.logging.level, LogLevel::Warn);
        assert_eq!(test.memory.max_sessions, 128);
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_config_serialization() {
        let config = ConfigBuilder::new()
            .with_session_ttl(Duration::from_secs(90))
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"session_ttl\":\"1m 30s\""));

        let deserialized: MedragConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.memory.session_ttl, Duration::from_secs(90));
        assert_eq!(deserialized.knowledge, config.knowledge);
    }

    #[test]
    fn test_loader_reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[memory]\nmax_history = 3\nsession_ttl = \"5m\"\n\n[context]\nchar_budget = 2048\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = ConfigLoader::new()
            .load_file(file.path())
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config.memory.max_history, 3);
        assert_eq!(config.memory.session_ttl, Duration::from_secs(300));
        assert_eq!(config.memory.max_sessions, 10_000);
        assert_eq!(config.context.char_budget, 2048);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_loader_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"memory\": {{\"max_history\": 0}}}}").unwrap();

        let result = ConfigLoader::new().load_file(file.path()).unwrap().extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_rejects_missing_and_unknown_files() {
        let mut loader = ConfigLoader::new();
        assert!(loader.load_file("/definitely/not/here.toml").is_err());

        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(loader.load_file(file.path()).is_err());
        assert!(loader.extract().is_ok());
    }
}
