//! The Cloud Firestore database driver.
//!
//! It uses the Firestore REST API (`v1`):
//!
//! - Create: `POST {endpoint}/v1/projects/{project}/databases/{database}/documents/{collection}?documentId={id}`.
//!   A `409 Conflict` answer means the document already exists.
//! - Read: `GET {endpoint}/v1/projects/{project}/databases/{database}/documents/{collection}/{id}`.
//!   A `404 Not Found` answer means the document does not exist.
//!
//! Firestore documents are made of typed values. JSON values are mapped like
//! this:
//!
//!  JSON                  | Firestore
//! ---|---
//!  `null`                | `nullValue`
//!  `true`/`false`        | `booleanValue`
//!  integer               | `integerValue` (a decimal string)
//!  float                 | `doubleValue`
//!  RFC 3339 string       | `timestampValue`
//!  other string          | `stringValue`
//!  array                 | `arrayValue`
//!  object                | `mapValue`
use async_trait::async_trait;
use escrow_health_configuration::{DatabaseDriver as Driver, Firestore as FirestoreConfig, DEFAULT_TIMEOUT};
use reqwest::StatusCode;
use serde_json::{json, Map, Number, Value};
use tracing::debug;
use url::Url;

use super::{Database, Document, DocumentKey, Error};

const DRIVER: Driver = Driver::Firestore;

pub struct Firestore {
    client: reqwest::Client,
    documents_url: Url,
    access_token: Option<String>,
}

impl Firestore {
    /// It instantiates a new Firestore driver.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint can not be used as a base URL or the
    /// HTTP client can not be built.
    pub fn new(config: &FirestoreConfig) -> Result<Self, Error> {
        let mut documents_url = config.endpoint.clone();

        documents_url
            .path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint {
                url: config.endpoint.to_string(),
                driver: DRIVER,
            })?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                config.project_id.as_str(),
                "databases",
                config.database_id.as_str(),
                "documents",
            ]);

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| (e, DRIVER))?;

        Ok(Self {
            client,
            documents_url,
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_url.clone();

        // The base URL was already checked in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }

        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl Database for Firestore {
    fn driver(&self) -> Driver {
        DRIVER
    }

    /// Refer to [`databases::Database::create_document_if_absent`](crate::core::databases::Database::create_document_if_absent).
    async fn create_document_if_absent(&self, key: &DocumentKey, document: &Document) -> Result<bool, Error> {
        let mut url = self.url(&[key.collection.as_str()]);
        url.query_pairs_mut().append_pair("documentId", &key.id);

        let body = json!({ "fields": encode_fields(document) });

        let response = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| (e, DRIVER))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::CONFLICT => {
                debug!("Firestore document {key} already exists");
                Ok(false)
            }
            status => Err(unexpected_response(key, status, response).await),
        }
    }

    /// Refer to [`databases::Database::get_document`](crate::core::databases::Database::get_document).
    async fn get_document(&self, key: &DocumentKey) -> Result<Option<Document>, Error> {
        let url = self.url(&[key.collection.as_str(), key.id.as_str()]);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| (e, DRIVER))?;

        match response.status() {
            status if status.is_success() => {
                let body = response.json::<Value>().await.map_err(|err| Error::InvalidDocument {
                    key: key.to_string(),
                    message: err.to_string(),
                    driver: DRIVER,
                })?;

                let fields = body.get("fields").and_then(Value::as_object).cloned().unwrap_or_default();

                Ok(Some(decode_fields(&fields)))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(unexpected_response(key, status, response).await),
        }
    }
}

async fn unexpected_response(key: &DocumentKey, status: StatusCode, response: reqwest::Response) -> Error {
    Error::UnexpectedResponse {
        key: key.to_string(),
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
        driver: DRIVER,
    }
}

fn encode_fields(document: &Document) -> Map<String, Value> {
    document.iter().map(|(name, value)| (name.clone(), encode_value(value))).collect()
}

fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(value) => json!({ "booleanValue": value }),
        Value::Number(number) if number.is_i64() || number.is_u64() => json!({ "integerValue": number.to_string() }),
        Value::Number(number) => json!({ "doubleValue": number.as_f64() }),
        Value::String(text) if chrono::DateTime::parse_from_rfc3339(text).is_ok() => json!({ "timestampValue": text }),
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(values) => json!({ "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() } }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> Document {
    fields.iter().map(|(name, value)| (name.clone(), decode_value(value))).collect()
}

fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|typed| typed.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or_default()),
        "integerValue" => inner
            .as_str()
            .and_then(|text| text.parse::<i64>().ok())
            .or_else(|| inner.as_i64())
            .map_or(Value::Null, |number| Value::Number(number.into())),
        "doubleValue" => inner.as_f64().and_then(Number::from_f64).map_or(Value::Null, Value::Number),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        "geoPointValue" => inner.clone(),
        _ => Value::Null,
    }
}
