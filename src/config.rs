use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::Error;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";

fn defaultServerURL() -> String
{
    DEFAULT_SERVER_URL.to_owned()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config
{
    /// Base URL of the movie service. Endpoint paths are resolved
    /// under it.
    #[serde(default = "defaultServerURL")]
    pub server_url: String,
    /// Overall timeout of each request. No timeout if absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config
{
    pub fn fromFile(filename: &Path) -> Result<Self, Error>
    {
        let content = std::fs::read_to_string(filename)
            .map_err(|_| error!(ConfigError, "Failed to read config file"))?;
        toml::from_str(&content)
            .map_err(|e| error!(ConfigError, "Invalid config file: {}", e))
    }

    /// The server URL as a base that relative paths can be joined to.
    pub fn baseURL(&self) -> Result<Url, Error>
    {
        let mut url = Url::parse(&self.server_url).map_err(
            |e| error!(ConfigError, "Invalid server URL {}: {}",
                       self.server_url, e))?;
        if url.cannot_be_a_base()
        {
            return Err(error!(ConfigError, "Server URL {} cannot be a base",
                              self.server_url));
        }
        if !url.path().ends_with('/')
        {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration>
    {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            server_url: defaultServerURL(),
            timeout_secs: None,
        }
    }
}
