//! Config loading precedence: environment over config file over defaults.

use versiongate::{
    CandidateSet, DefaultFactory, ResolveConfig, ENV_CONFIG_PATH, ENV_OVERRIDE_VERSION,
};
use versiongate_test_utils::{
    env_guard, set_env_var, version, ConfigFixture, StubFactory, StubProbe,
};

#[test]
fn loads_override_from_config_file() {
    let _g = env_guard();
    let fixture = ConfigFixture::with_config("[resolve]\noverride_version = \"8.0.0-rc01\"\n")
        .expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, None);

    let config = ResolveConfig::load().unwrap();
    assert_eq!(config.override_version, Some(version("8.0.0-rc1")));
}

#[test]
fn environment_wins_over_file() {
    let _g = env_guard();
    let fixture = ConfigFixture::with_config("[resolve]\noverride_version = \"7.4.0\"\n")
        .expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, Some(" 8.1.0 "));

    let config = ResolveConfig::load().unwrap();
    assert_eq!(config.override_version, Some(version("8.1.0")));
}

#[test]
fn blank_environment_value_is_ignored() {
    let _g = env_guard();
    let fixture = ConfigFixture::with_config("[resolve]\noverride_version = \"7.4.0\"\n")
        .expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, Some(""));

    let config = ResolveConfig::load().unwrap();
    assert_eq!(config.override_version, Some(version("7.4.0")));
}

#[test]
fn missing_config_file_yields_defaults() {
    let _g = env_guard();
    let fixture = ConfigFixture::new().expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, None);

    assert_eq!(ResolveConfig::load().unwrap(), ResolveConfig::default());
}

#[test]
fn invalid_environment_value_is_an_error() {
    let _g = env_guard();
    let fixture = ConfigFixture::new().expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, Some("8.0.0-beta"));

    let err = ResolveConfig::load().unwrap_err();
    assert!(err.to_string().contains(ENV_OVERRIDE_VERSION), "{err}");
}

#[test]
fn loaded_config_drives_resolution() {
    let _g = env_guard();
    let fixture = ConfigFixture::new().expect("fixture creation");
    let _config = fixture.config_guard();
    let _env = set_env_var(ENV_OVERRIDE_VERSION, Some("7.4.0"));
    assert!(std::env::var(ENV_CONFIG_PATH).is_ok());

    let candidates = CandidateSet::new(DefaultFactory::new(|| -> Box<str> { Box::from("default") }))
        .with(StubFactory::new(
            "v7",
            "7.4.0",
            StubProbe::Reports(version("8.2.0")),
            || -> Box<str> { Box::from("v7") },
        ))
        .with(StubFactory::new(
            "v8",
            "8.0.0",
            StubProbe::Reports(version("8.2.0")),
            || -> Box<str> { Box::from("v8") },
        ));

    let config = ResolveConfig::load().unwrap();
    assert_eq!(&*candidates.resolve_with_config(&config).unwrap(), "v7");
    assert_eq!(&*candidates.resolve(None).unwrap(), "v8");
}
