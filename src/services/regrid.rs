use crate::models::{AddressComponents, ParcelRecord, Valuation};
use crate::services::collaborators::{RegistryClient, RegistryError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Regrid parcel API client
///
/// Only the first feature of an address query is used.
pub struct RegridClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RegridClient {
    /// Create a new Regrid client
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl RegistryClient for RegridClient {
    async fn lookup_parcel(&self, address: &str, jurisdiction: &str) -> Result<ParcelRecord, RegistryError> {
        let url = format!(
            "{}/api/v2/parcels/address?query={}&path={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(address),
            urlencoding::encode(jurisdiction)
        );

        tracing::debug!("Looking up parcel for {:?} in {}", address, jurisdiction);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Regrid lookup for {:?} failed: {}", address, status);
            return Err(RegistryError::Status(status.as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidResponse(format!("Failed to parse parcel response: {}", e)))?;

        parse_parcel(&json, address)
    }
}

/// Read the first parcel feature out of a Regrid address response
///
/// A missing `parcels.features` array is treated the same as an empty one.
pub fn parse_parcel(json: &Value, address: &str) -> Result<ParcelRecord, RegistryError> {
    if !json.is_object() {
        return Err(RegistryError::InvalidResponse("Expected a JSON object".into()));
    }

    let feature = json
        .get("parcels")
        .and_then(|p| p.get("features"))
        .and_then(Value::as_array)
        .and_then(|features| features.first())
        .ok_or_else(|| RegistryError::NotFound(address.to_string()))?;

    let empty = Value::Null;
    let properties = feature.get("properties").unwrap_or(&empty);
    let fields = properties.get("fields").unwrap_or(&empty);

    let owner = properties
        .get("enhanced_ownership")
        .and_then(Value::as_array)
        .and_then(|owners| owners.first())
        .and_then(|first| first.get("eo_owner"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| text_field(fields, "owner"));

    let address_components = AddressComponents {
        house_number: text_field(fields, "saddno"),
        street_name: text_field(fields, "saddstr"),
        street_type: text_field(fields, "saddsttyp"),
        city: text_field(fields, "scity"),
        zip: text_field(fields, "szip5"),
    };

    let display_address = format!(
        "{}, {}, {}",
        text_field(fields, "address"),
        text_field(fields, "scity"),
        text_field(fields, "szip")
    );

    let valuation = Valuation {
        total: number_field(fields, "parval"),
        land: number_field(fields, "landval"),
        improvement: number_field(fields, "improvval"),
    };

    Ok(ParcelRecord {
        owner,
        address_components,
        display_address,
        valuation,
    })
}

/// Registry fields are loosely typed: house numbers and zips may be numbers
fn text_field(fields: &Value, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn number_field(fields: &Value, key: &str) -> f64 {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> Value {
        json!({
            "parcels": {
                "features": [{
                    "properties": {
                        "fields": {
                            "owner": "JONES ROBERT",
                            "address": "123 MAIN ST",
                            "saddno": 123,
                            "saddstr": "MAIN",
                            "saddsttyp": "ST",
                            "scity": "DALLAS",
                            "szip": "75201-1234",
                            "szip5": "75201",
                            "parval": 250000,
                            "landval": "50000.5"
                        },
                        "enhanced_ownership": [{"eo_owner": "ROBERT JONES"}]
                    }
                }, {
                    "properties": {"fields": {"owner": "SOMEONE ELSE"}}
                }]
            }
        })
    }

    #[test]
    fn test_parse_first_feature() {
        let parcel = parse_parcel(&sample_response(), "123 MAIN ST").unwrap();

        assert_eq!(parcel.owner, "ROBERT JONES");
        assert_eq!(parcel.address_components.house_number, "123");
        assert_eq!(parcel.address_components.zip, "75201");
        assert_eq!(parcel.display_address, "123 MAIN ST, DALLAS, 75201-1234");
        assert_eq!(parcel.valuation.total, 250000.0);
        assert_eq!(parcel.valuation.land, 50000.5);
        assert_eq!(parcel.valuation.improvement, 0.0);
    }

    #[test]
    fn test_owner_falls_back_to_fields() {
        let json = json!({
            "parcels": {"features": [{
                "properties": {
                    "fields": {"owner": "JONES ROBERT"},
                    "enhanced_ownership": [{"eo_mailing": "PO BOX 1"}]
                }
            }]}
        });

        let parcel = parse_parcel(&json, "123 MAIN ST").unwrap();
        assert_eq!(parcel.owner, "JONES ROBERT");
        assert_eq!(parcel.display_address, ", , ");
    }

    #[test]
    fn test_no_features_is_not_found() {
        let empty = json!({"parcels": {"features": []}});
        assert!(matches!(parse_parcel(&empty, "1 A ST"), Err(RegistryError::NotFound(_))));

        let missing = json!({});
        assert!(matches!(parse_parcel(&missing, "1 A ST"), Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_non_object_is_invalid() {
        assert!(matches!(
            parse_parcel(&json!([1, 2]), "1 A ST"),
            Err(RegistryError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_sends_query_and_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v2/parcels/address")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("query".into(), "123 MAIN ST".into()),
                mockito::Matcher::UrlEncoded("path".into(), "/us/tx/dallas".into()),
            ]))
            .match_header("authorization", "Bearer test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sample_response().to_string())
            .create_async()
            .await;

        let client = RegridClient::new(server.url(), "test_key".to_string(), Duration::from_secs(5)).unwrap();
        let parcel = client.lookup_parcel("123 MAIN ST", "/us/tx/dallas").await.unwrap();

        mock.assert_async().await;
        assert_eq!(parcel.owner, "ROBERT JONES");
    }

    #[tokio::test]
    async fn test_lookup_without_features_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"parcels":{"features":[]}}"#)
            .create_async()
            .await;

        let client = RegridClient::new(server.url(), "test_key".to_string(), Duration::from_secs(5)).unwrap();
        let result = client.lookup_parcel("999 NOWHERE LN", "/us/tx/dallas").await;

        match result {
            Err(RegistryError::NotFound(address)) => assert_eq!(address, "999 NOWHERE LN"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = RegridClient::new(server.url(), "bad_key".to_string(), Duration::from_secs(5)).unwrap();
        let result = client.lookup_parcel("123 MAIN ST", "/us/tx/dallas").await;

        assert!(matches!(result, Err(RegistryError::Status(401))));
    }
}
