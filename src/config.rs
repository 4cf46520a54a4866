use std::env;
use std::path::PathBuf;

static LANDING_URL: &str = "https://wyszukiwarkaregon.stat.gov.pl/appBIR/index.aspx";
static SERVICE_URL: &str =
    "https://wyszukiwarkaregon.stat.gov.pl/wsBIR/UslugaBIRzewnPubl.svc/ajaxEndpoint";
static OUTPUT_ROOT: &str = "data/adresses/province";

#[derive(Debug, Clone)]
pub struct Config {
    /// Page carrying the obfuscated user key.
    pub landing_url: String,
    /// Root of the ajax endpoint, method names are appended to it.
    pub service_url: String,
    pub output_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            landing_url: LANDING_URL.to_owned(),
            service_url: SERVICE_URL.to_owned(),
            output_root: PathBuf::from(OUTPUT_ROOT),
        }
    }
}

impl Config {
    /// Defaults, overridden by `BIR_LANDING_URL`, `BIR_SERVICE_URL` and `BIR_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let default = Config::default();

        Config {
            landing_url: var("BIR_LANDING_URL").unwrap_or(default.landing_url),
            service_url: var("BIR_SERVICE_URL").unwrap_or(default.service_url),
            output_root: var("BIR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.output_root),
        }
    }

    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.service_url.trim_end_matches('/'), method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.landing_url, LANDING_URL);
        assert_eq!(config.output_root, PathBuf::from("data/adresses/province"));
        assert_eq!(
            config.endpoint("GetUlice"),
            "https://wyszukiwarkaregon.stat.gov.pl/wsBIR/UslugaBIRzewnPubl.svc/ajaxEndpoint/GetUlice"
        );
    }

    #[test]
    fn test_overrides() {
        let mut vars = HashMap::new();
        vars.insert("BIR_SERVICE_URL", "http://localhost:8080/ajax/");
        vars.insert("BIR_OUTPUT_DIR", "/tmp/streets");
        vars.insert("BIR_LANDING_URL", "  ");

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.landing_url, LANDING_URL);
        assert_eq!(config.endpoint("Zaloguj"), "http://localhost:8080/ajax/Zaloguj");
        assert_eq!(config.output_root, PathBuf::from("/tmp/streets"));
    }
}
