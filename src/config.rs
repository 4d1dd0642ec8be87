use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

use crate::elements::{default_elements, is_valid_identifier};

pub const DEFAULT_LIBRARY_ROOT: &str =
    "https://www.quantum-espresso.org/pseudopotentials/ps-library/";
pub const DEFAULT_UPF_ROOT: &str = "https://www.quantum-espresso.org";
pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The env vars recognised by the harvester. All of them are optional.
#[derive(Debug, Deserialize)]
pub struct HarvestEnv {
    library_root: Option<String>,
    upf_root: Option<String>,
    output_dir: Option<PathBuf>,
    elements: Option<Vec<String>>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Listing base URL, always ending in `/`.
    pub library_root: Url,
    /// Origin that anchor hrefs are resolved against. Never carries a path.
    pub upf_root: Url,
    pub output_dir: PathBuf,
    pub elements: Vec<String>,
    pub request_timeout: Duration,
}

impl HarvestConfig {
    pub fn new() -> anyhow::Result<Self> {
        let env = HarvestEnv::load_from_env()?;
        Self::from_env_struct(env)
    }

    /// Builds a config from explicit `(NAME, value)` pairs instead of the process env.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::from_iter::<_, HarvestEnv>(vars)
            .context("failed to load variables into config struct")?;
        Self::from_env_struct(env)
    }

    fn from_env_struct(env: HarvestEnv) -> anyhow::Result<Self> {
        let library_root = parse_root(
            env.library_root.as_deref().unwrap_or(DEFAULT_LIBRARY_ROOT),
            "LIBRARY_ROOT",
        )?;
        let upf_root = parse_root(
            env.upf_root.as_deref().unwrap_or(DEFAULT_UPF_ROOT),
            "UPF_ROOT",
        )?;
        // Rooted hrefs replace the whole path on join, so a path here would be dropped.
        if upf_root.path() != "/" {
            bail!(
                "UPF_ROOT must be an origin without a path, got: {}",
                upf_root.as_str()
            );
        }

        let request_timeout_secs = env
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }

        let elements = match env.elements {
            Some(list) => {
                let list: Vec<String> = list
                    .into_iter()
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect();
                if list.is_empty() {
                    bail!("ELEMENTS was set but contains no element identifiers");
                }
                if let Some(bad) = list.iter().find(|e| !is_valid_identifier(e)) {
                    bail!("invalid element identifier in ELEMENTS: '{bad}'");
                }
                list
            }
            None => default_elements(),
        };

        Ok(Self {
            library_root: with_trailing_slash(library_root),
            upf_root,
            output_dir: env
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            elements,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// `<library_root>/<element>`.
    pub fn listing_url(&self, element: &str) -> Result<Url, url::ParseError> {
        self.library_root.join(element)
    }
}

fn parse_root(raw: &str, name: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("{name} is not a valid URL: {raw}"))?;
    if url.cannot_be_a_base() {
        bail!("{name} cannot be used as a base URL: {raw}");
    }
    Ok(url)
}

// Without the slash, joining would replace the last path segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config =
            envy::from_env::<Self>().context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
