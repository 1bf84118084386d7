//! Shared test utilities for versiongate crates.
//!
//! Environment guards for tests that touch process-global state, a temporary
//! config directory, and stub factories whose probes succeed, fail or panic on
//! demand.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};
use versiongate::{AdapterFactory, ProbeError, VersionToken, ENV_CONFIG_PATH};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// Installs an env-filtered fmt subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// RAII guard for an environment variable; restores the original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set (or with `None`, remove) an environment variable until the guard drops.
///
/// # Example
/// ```
/// let _guard = versiongate_test_utils::set_env_var("VERSIONGATE_OVERRIDE_VERSION", Some("8.1.0"));
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// A temporary directory holding a `config.toml`.
///
/// The directory is removed when the fixture drops.
pub struct ConfigFixture {
    pub tempdir: tempfile::TempDir,
    pub config_path: PathBuf,
}

impl ConfigFixture {
    /// Creates the directory without writing a config file.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let config_path = tempdir.path().join("config.toml");
        Ok(Self {
            tempdir,
            config_path,
        })
    }

    /// Creates the directory and writes `content` as the config file.
    pub fn with_config(content: &str) -> std::io::Result<Self> {
        let fixture = Self::new()?;
        std::fs::write(&fixture.config_path, content)?;
        Ok(fixture)
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Points `VERSIONGATE_CONFIG` at this fixture's config file.
    pub fn config_guard(&self) -> EnvVarGuard {
        set_env_var(ENV_CONFIG_PATH, Some(&self.config_path.to_string_lossy()))
    }
}

/// What a [`StubFactory`] probe does.
#[derive(Debug, Clone)]
pub enum StubProbe {
    Reports(VersionToken),
    Fails(String),
    Panics(String),
}

/// Factory with a scripted probe that counts probe and build calls.
pub struct StubFactory<A: ?Sized> {
    name: String,
    min_version: VersionToken,
    probe: StubProbe,
    build: Box<dyn Fn() -> Box<A> + Send + Sync>,
    probes: Arc<AtomicUsize>,
    builds: Arc<AtomicUsize>,
}

impl<A: ?Sized> StubFactory<A> {
    pub fn new<B>(name: &str, min_version: &str, probe: StubProbe, build: B) -> Self
    where
        B: Fn() -> Box<A> + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            min_version: version(min_version),
            probe,
            build: Box::new(build),
            probes: Arc::new(AtomicUsize::new(0)),
            builds: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of probe calls, readable after the factory is registered.
    pub fn probe_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.probes)
    }

    /// Shared counter of build calls.
    pub fn build_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.builds)
    }
}

impl<A: ?Sized> AdapterFactory<A> for StubFactory<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_version(&self) -> VersionToken {
        self.min_version
    }

    fn probe_current_version(&self) -> Result<VersionToken, ProbeError> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        match &self.probe {
            StubProbe::Reports(version) => Ok(*version),
            StubProbe::Fails(reason) => Err(ProbeError::unavailable(reason.clone())),
            StubProbe::Panics(message) => panic!("{message}"),
        }
    }

    fn build_adapter(&self) -> Box<A> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        (self.build)()
    }
}

/// Parses a version literal, panicking on malformed input.
pub fn version(s: &str) -> VersionToken {
    VersionToken::parse(s).unwrap_or_else(|e| panic!("bad test version '{s}': {e}"))
}
