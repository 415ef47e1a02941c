// Gallery API client: a small blocking HTTP client for the publisher
// endpoints of the package gallery. Every call authenticates with the
// publisher's personal access token.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

const API_VERSION_ACCEPT: &str = "application/json;api-version=3.0-preview.1";

/// Publisher record as returned by the gallery. Only the fields we use
/// are mapped; the rest of the payload is ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RemotePublisher {
    pub publisher_name: String,
    pub display_name: String,
    #[serde(default)]
    pub publisher_id: Option<String>,
}

/// Payload for creating a publisher. Fields the gallery fills in itself
/// are sent as null or empty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPublisher {
    pub publisher_name: String,
    pub display_name: String,
    pub extensions: Vec<serde_json::Value>,
    pub flags: Option<String>,
    pub last_updated: Option<String>,
    pub long_description: String,
    pub publisher_id: Option<String>,
    pub short_description: String,
}

impl NewPublisher {
    pub fn new(publisher_name: &str, display_name: &str) -> Self {
        NewPublisher {
            publisher_name: publisher_name.to_string(),
            display_name: display_name.to_string(),
            extensions: Vec::new(),
            flags: None,
            last_updated: None,
            long_description: String::new(),
            publisher_id: None,
            short_description: String::new(),
        }
    }
}

/// The remote operations the publisher commands rely on.
pub trait Gallery {
    /// Look up a publisher. Fails when the token is rejected or the
    /// publisher does not exist.
    fn get_publisher(&self, token: &str, name: &str) -> Result<RemotePublisher>;
    fn create_publisher(&self, token: &str, publisher: &NewPublisher) -> Result<()>;
    fn delete_publisher(&self, token: &str, name: &str) -> Result<()>;
}

/// Blocking reqwest client bound to a gallery base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn publishers_url(&self) -> String {
        format!("{}/_apis/gallery/publishers", self.base_url)
    }

    /// Attach the PAT as basic auth along with the versioned Accept header.
    fn authed(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.basic_auth("OAuth", Some(token))
            .header(ACCEPT, API_VERSION_ACCEPT)
    }
}

/// Turn a non-success response into an error carrying status and body.
fn check(res: Response, what: &str) -> Result<Response> {
    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().unwrap_or_else(|_| "".into());
        anyhow::bail!("{} failed: {} - {}", what, status, txt);
    }
    Ok(res)
}

impl Gallery for ApiClient {
    fn get_publisher(&self, token: &str, name: &str) -> Result<RemotePublisher> {
        let url = format!("{}/{}", self.publishers_url(), name);
        let res = self
            .authed(self.client.get(&url), token)
            .send()
            .context("Failed to send get publisher request")?;
        let res = check(res, &format!("Get publisher '{}'", name))?;
        let publisher: RemotePublisher = res.json().context("Parsing publisher response json")?;
        Ok(publisher)
    }

    fn create_publisher(&self, token: &str, publisher: &NewPublisher) -> Result<()> {
        let res = self
            .authed(self.client.post(self.publishers_url()), token)
            .json(publisher)
            .send()
            .context("Failed to send create publisher request")?;
        check(res, &format!("Create publisher '{}'", publisher.publisher_name))?;
        Ok(())
    }

    fn delete_publisher(&self, token: &str, name: &str) -> Result<()> {
        let url = format!("{}/{}", self.publishers_url(), name);
        let res = self
            .authed(self.client.delete(&url), token)
            .send()
            .context("Failed to send delete publisher request")?;
        check(res, &format!("Delete publisher '{}'", name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_publisher_payload_shape() {
        let payload = serde_json::to_value(NewPublisher::new("acme", "Acme Corp")).unwrap();
        assert_eq!(
            payload,
            json!({
                "publisherName": "acme",
                "displayName": "Acme Corp",
                "extensions": [],
                "flags": null,
                "lastUpdated": null,
                "longDescription": "",
                "publisherId": null,
                "shortDescription": "",
            })
        );
    }

    #[test]
    fn remote_publisher_ignores_extra_fields() {
        let publisher: RemotePublisher = serde_json::from_value(json!({
            "publisherName": "acme",
            "displayName": "Acme Corp",
            "extensions": [],
            "flags": "verified",
        }))
        .unwrap();
        assert_eq!(publisher.display_name, "Acme Corp");
        assert!(publisher.publisher_id.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("https://gallery.example/").unwrap();
        assert_eq!(
            api.publishers_url(),
            "https://gallery.example/_apis/gallery/publishers"
        );
    }
}
