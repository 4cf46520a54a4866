use log::{debug, info};
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::Config;
use crate::region::{City, County, Municipality, Province, Street};
use crate::util::{
    char_codes_to_string, decode_envelope, decode_required_envelope, decode_scalar,
};
use crate::{Error, Result};

static KEY_PREFIX: &str = "_kluczuzytkownika=";

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::Selector(sel_str.into()))
}

/// Text of the last `<script>` element in the page. A script with only a `src` counts too.
pub fn last_script_block(html: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let selector = create_selector("script")?;

    doc.select(&selector)
        .last()
        .map(|script| script.text().collect())
        .ok_or(Error::NoScriptBlock)
}

/// Recovers the user key hidden in the landing page.
///
/// The first statement of the last script spells `_kluczuzytkownika='<key>'`
/// as a list of character codes.
pub fn extract_private_key(html: &str) -> Result<String> {
    let script = last_script_block(html)?;
    let statement = script.split(';').next().unwrap_or_default();

    let decoded = char_codes_to_string(statement)?;
    let quoted = decoded.strip_prefix(KEY_PREFIX).unwrap_or(&decoded);

    // drop the surrounding quotes
    let mut chars = quoted.chars();
    chars.next();
    chars.next_back();

    let key = chars.as_str();
    if key.is_empty() {
        return Err(Error::EmptyPrivateKey);
    }
    Ok(key.to_owned())
}

/// Fails with the status code unless the response is a success, otherwise reads the body.
async fn checked_text(response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: response.url().to_string(),
            status,
        });
    }
    Ok(response.text().await?)
}

/// A logged-in connection to the registry. Every call carries the same `sid`.
pub struct Session {
    client: Client,
    config: Config,
    sid: String,
}

impl Session {
    pub async fn open(config: &Config) -> Result<Self> {
        // the landing page hands out cookies the login call expects back
        let client = reqwest::Client::builder().cookie_store(true).build()?;

        let response = client.get(config.landing_url.as_str()).send().await?;
        info!("Status code: {}", response.status());
        let html = checked_text(response).await?;

        let private_key = extract_private_key(&html)?;
        debug!("Private key: {}", private_key);

        let response = client
            .post(config.endpoint("Zaloguj").as_str())
            .json(&json!({ "pKluczUzytkownika": private_key }))
            .send()
            .await?;
        let sid = decode_scalar(&checked_text(response).await?)?;
        info!("Session ID: {}", sid);

        Ok(Session {
            client,
            config: config.clone(),
            sid,
        })
    }

    async fn post(&self, method: &str, body: Option<Value>) -> Result<String> {
        let mut request = self
            .client
            .post(self.config.endpoint(method).as_str())
            .header("sid", self.sid.as_str());
        if let Some(body) = body {
            request = request.json(&body);
        }

        checked_text(request.send().await?).await
    }

    /// Lower levels may legitimately be empty, `null` reads as no records.
    async fn call<T: DeserializeOwned>(&self, method: &str, body: Option<Value>) -> Result<Vec<T>> {
        decode_envelope(&self.post(method, body).await?)
    }

    /// A `null` province list means the session was not accepted, so it is an error.
    pub async fn provinces(&self) -> Result<Vec<Province>> {
        decode_required_envelope(&self.post("GetWojewodztwa", None).await?)
    }

    pub async fn counties(&self, province: &Province) -> Result<Vec<County>> {
        self.call(
            "GetPowiaty",
            Some(json!({ "pKodWojewodztwa": province.code })),
        )
        .await
    }

    pub async fn municipalities(
        &self,
        province: &Province,
        county: &County,
    ) -> Result<Vec<Municipality>> {
        self.call(
            "GetGminy",
            Some(json!({
                "pKodPowiatu": county.code,
                "pKodWojewodztwa": province.code,
            })),
        )
        .await
    }

    pub async fn cities(
        &self,
        province: &Province,
        county: &County,
        municipality: &Municipality,
    ) -> Result<Vec<City>> {
        self.call(
            "GetMiejscowosci",
            Some(json!({
                "pKodGminy": municipality.code,
                "pKodPowiatu": county.code,
                "pKodWojewodztwa": province.code,
            })),
        )
        .await
    }

    pub async fn streets(&self, city: &City) -> Result<Vec<Street>> {
        self.call("GetUlice", Some(json!({ "pKodMiejscowosci": city.code })))
            .await
    }
}
