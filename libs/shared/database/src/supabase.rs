use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::store::RecordStore;

/// Record store backed by a PostgREST (Supabase) endpoint. Each collection is
/// a table; unique indexes are Postgres unique constraints, reported back as
/// `409 Conflict`.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    fn get_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.anon_key)
            .map_err(|_| StoreError::Configuration("API key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|_| StoreError::Configuration("API key is not a valid header value".to_string()))?;

        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    fn table_path(collection: &str, filter: &Filter, extra: &[(&str, &str)]) -> String {
        let mut query: Vec<String> = filter
            .to_query_pairs()
            .into_iter()
            .map(|(field, condition)| {
                format!("{}={}", urlencoding::encode(&field), urlencoding::encode(&condition))
            })
            .collect();
        query.extend(extra.iter().map(|(k, v)| format!("{}={}", k, v)));

        if query.is_empty() {
            format!("/rest/v1/{}", collection)
        } else {
            format!("/rest/v1/{}?{}", collection, query.join("&"))
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
        collection: &str,
    ) -> Result<Response, StoreError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;

            if status == StatusCode::CONFLICT {
                debug!("Unique constraint rejected write to {}: {}", collection, error_text);
                return Err(StoreError::Duplicate {
                    collection: collection.to_string(),
                });
            }

            error!("API error ({}): {}", status, error_text);
            return Err(StoreError::Http {
                status: status.as_u16(),
                message: error_text,
            });
        }

        Ok(response)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
        collection: &str,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body, extra_headers, collection).await?;
        Ok(response.json::<T>().await?)
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }
}

/// Total from a PostgREST `Content-Range` header such as `0-9/42` or `*/0`.
pub fn parse_content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn insert(&self, collection: &str, document: Value) -> Result<String, StoreError> {
        if !document.is_object() {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_string(),
                reason: "expected a JSON object".to_string(),
            });
        }

        let path = Self::table_path(collection, &Filter::new(), &[]);
        let rows: Vec<Value> = self
            .request(
                Method::POST,
                &path,
                Some(document),
                Some(Self::representation_headers()),
                collection,
            )
            .await?;

        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(id_to_string)
            .ok_or_else(|| StoreError::InvalidDocument {
                collection: collection.to_string(),
                reason: "insert returned no id".to_string(),
            })
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>, StoreError> {
        let path = Self::table_path(collection, filter, &[("limit", "1")]);
        let rows: Vec<Value> = self.request(Method::GET, &path, None, None, collection).await?;
        Ok(rows.into_iter().next())
    }

    async fn find_many(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let path = Self::table_path(collection, filter, &[("order", "id.asc")]);
        self.request(Method::GET, &path, None, None, collection).await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<Option<Value>, StoreError> {
        // PATCH applies to every match; pin the update to one row by id.
        let Some(current) = self.find_one(collection, filter).await? else {
            return Ok(None);
        };
        let Some(id) = current.get("id").and_then(id_to_string) else {
            return Err(StoreError::InvalidDocument {
                collection: collection.to_string(),
                reason: "stored row has no id".to_string(),
            });
        };

        let path = Self::table_path(collection, &Filter::by_id(&id), &[]);
        let rows: Vec<Value> = self
            .request(
                Method::PATCH,
                &path,
                Some(patch),
                Some(Self::representation_headers()),
                collection,
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StoreError> {
        let path = Self::table_path(collection, filter, &[("select", "id"), ("limit", "1")]);
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("count=exact"));

        let response = self.send(Method::GET, &path, None, Some(headers), collection).await?;

        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::Http {
                status: response.status().as_u16(),
                message: "missing Content-Range total".to_string(),
            })
    }
}
