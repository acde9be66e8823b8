use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Conf {
    /// Base URL of the asset metadata API.
    pub api_url: String,
    /// Forward token ids and contract address as query parameters.
    /// Turned off only when replaying a static document in dev/test runs.
    pub forward_params: bool,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Conf {
    pub fn new(config_files: Vec<String>) -> Result<Self, anyhow::Error> {
        let mut s = Config::builder().add_source(File::from_str(
            include_str!("conf_defaults.toml"),
            config::FileFormat::Toml,
        ));
        // Priority order: config file, then environment variables
        for config_file in config_files {
            s = s.add_source(File::with_name(&config_file).required(false));
        }
        let conf: Self = s
            .add_source(
                Environment::with_prefix("wyvern")
                    .separator("__")
                    .prefix_separator("_"),
            )
            .build()?
            .try_deserialize()?;
        Ok(conf)
    }
}
