use std::env;
use std::path::PathBuf;

/// Runner settings read from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub seed: u64,
    /// Directory holding `config.toml` and `roster.ron`.
    pub data_dir: PathBuf,
    /// Explicit config file, overriding the one in `data_dir`.
    pub config_path: Option<PathBuf>,
    /// Quality the autopilot reports for bonus mode.
    pub dokkan_quality: f64,
    /// Print the final snapshot as JSON.
    pub snapshot_json: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            data_dir: PathBuf::from("data"),
            config_path: None,
            dokkan_quality: 0.75,
            snapshot_json: false,
        }
    }
}

impl SimConfig {
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Reads the `BATTLE_*` variables. Unset or unparsable values keep
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = seed;
        }

        if let Some(dir) = read_env::<PathBuf>("BATTLE_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(path) = read_env::<PathBuf>("BATTLE_CONFIG") {
            config.config_path = Some(path);
        }

        if let Some(quality) = read_env::<f64>("BATTLE_DOKKAN_QUALITY") {
            config.dokkan_quality = quality.clamp(0.0, 1.0);
        }

        if let Some(enable) = read_env::<bool>("BATTLE_SNAPSHOT_JSON") {
            config.snapshot_json = enable;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
