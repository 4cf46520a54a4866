use serde::Deserialize;

mod code_format {
    use serde::{self, Deserialize, Deserializer};
    use serde_json::Value;

    /// Codes come back as strings ("02"), but numbers are taken verbatim too.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected a string or number code, found {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Province {
    #[serde(rename = "Kod", with = "code_format")]
    pub code: String,
    #[serde(rename = "Nazwa")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct County {
    #[serde(rename = "KodPowiatu", with = "code_format")]
    pub code: String,
    #[serde(rename = "Powiat")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Municipality {
    #[serde(rename = "KodGminy3", with = "code_format")]
    pub code: String,
    #[serde(rename = "Gmina")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    #[serde(rename = "KodStatystyczny", with = "code_format")]
    pub code: String,
    #[serde(rename = "Miejscowosc")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Street {
    #[serde(rename = "Symbol", with = "code_format")]
    pub code: String,
    #[serde(rename = "Nazwa1")]
    pub name: String,
}
