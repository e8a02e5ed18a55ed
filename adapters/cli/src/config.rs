use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use critter_match_core::TileKind;
use critter_match_session::SessionConfig;
use serde::Deserialize;

/// Settings read from a TOML configuration file. Every field is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) grid_size: Option<u32>,
    pub(crate) kinds: Option<Vec<TileKind>>,
    pub(crate) swap_revert_delay_ms: Option<u64>,
    pub(crate) seed: Option<u64>,
}

/// Values supplied on the command line, which win over the file.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) grid_size: Option<u32>,
    pub(crate) kinds: Option<String>,
    pub(crate) swap_revert_delay_ms: Option<u64>,
    pub(crate) seed: Option<u64>,
}

pub(crate) fn load_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_file(&contents)
        .with_context(|| format!("invalid config file at {}", path.display()))
}

pub(crate) fn parse_file(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

/// Parses a comma separated list such as `sheep,bear,dino`.
pub(crate) fn parse_kinds(value: &str) -> Result<Vec<TileKind>> {
    value
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            TileKind::from_name(name)
                .with_context(|| format!("unknown tile kind `{}`", name.trim()))
        })
        .collect()
}

/// Builds the session configuration from defaults, then the file, then flags.
///
/// `random_seed` is only called when neither layer provides a seed.
pub(crate) fn layer(
    file: FileConfig,
    overrides: Overrides,
    random_seed: impl FnOnce() -> u64,
) -> Result<SessionConfig> {
    let defaults = SessionConfig::default();

    let kinds = match overrides.kinds.as_deref() {
        Some(list) => parse_kinds(list)?,
        None => file.kinds.unwrap_or(defaults.kinds),
    };
    if kinds.is_empty() {
        bail!("at least one tile kind must be configured");
    }

    let config = SessionConfig {
        grid_size: overrides
            .grid_size
            .or(file.grid_size)
            .unwrap_or(defaults.grid_size),
        kinds,
        swap_revert_delay: overrides
            .swap_revert_delay_ms
            .or(file.swap_revert_delay_ms)
            .map_or(defaults.swap_revert_delay, Duration::from_millis),
        seed: overrides
            .seed
            .or(file.seed)
            .unwrap_or_else(random_seed),
    };
    config.validate().context("invalid board configuration")?;
    Ok(config)
}
