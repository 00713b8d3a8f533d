use figment::Jail;
use scape_config::{ConfigError, ScapeConfig};

#[test]
fn env_fills_backend_section() {
    Jail::expect_with(|jail| {
        jail.set_env("SMELLSCAPE_BACKEND__URL", "https://env.supabase.co");
        jail.set_env("SMELLSCAPE_BACKEND__ANON_KEY", "env-key");

        let config = ScapeConfig::load().expect("config loads");
        assert!(config.backend.is_configured());
        assert_eq!(config.backend.rest_url(), "https://env.supabase.co/rest/v1");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("SMELLSCAPE_MAP__CENTER_LAT", "123.0");

        let err = ScapeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("SMELLSCAPE_MAP__ZOOM", "close");

        let err = ScapeConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
