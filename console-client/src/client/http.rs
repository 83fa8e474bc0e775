use super::types::{extract_server_message, query_pairs, ApiOutcome, ClientError, RequestSpec};
use console_core::{ClientSettings, Envelope, ErrorCatalog};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// 后端API客户端
///
/// 启动时构建一次，之后以引用或克隆的方式传给所有调用方（内部的 `reqwest::Client`
/// 共享连接池和cookie存储）。base_url 和凭据策略在构建后固定。
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    catalog: ErrorCatalog,
}

impl HttpClient {
    /// 使用默认设置创建客户端：携带凭据，沿用底层超时
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_settings(&ClientSettings::new(base_url))
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in &settings.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::InvalidRequest(format!("Invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ClientError::InvalidRequest(format!("Invalid header value for '{name}': {e}"))
            })?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .cookie_store(settings.with_credentials)
            .default_headers(default_headers);

        if let Some(timeout) = settings.connect_timeout() {
            // 只设置连接超时，不限制总请求时间
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            ClientError::InvalidRequest(format!("Failed to build HTTP client: {e}"))
        })?;

        tracing::debug!(
            "Created HTTP client for {} (credentials: {})",
            settings.base_url,
            settings.with_credentials
        );

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            catalog: ErrorCatalog::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    /// 拼接完整URL，绝对地址原样使用
    pub fn resolve_url(&self, url: &str) -> String {
        resolve_url(&self.base_url, url)
    }

    /// 发送请求并返回原始信封
    ///
    /// errno != 0 不视为错误，由调用方判断。非2xx和网络错误返回 `Err`。
    /// 业务失败时后端通常返回 `data: null`，此时 `data` 解析不了就取 `T::default()`。
    pub async fn request<T: DeserializeOwned + Default>(
        &self,
        spec: RequestSpec,
    ) -> Result<Envelope<T>, ClientError> {
        let method = spec.method.clone();
        let url = self.resolve_url(&spec.url);

        let mut request = self.client.request(spec.method, &url).headers(spec.headers);
        if let Some(params) = &spec.params {
            request = request.query(&query_pairs(params)?);
        }
        if let Some(data) = &spec.data {
            request = request.json(data);
        }

        tracing::debug!("Sending {} {}", method, url);

        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                tracing::warn!("{} {} could not be built: {}", method, url, e);
                ClientError::InvalidRequest(e.to_string())
            } else {
                tracing::warn!("{} {} failed: {}", method, url, e);
                ClientError::Network(e)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            let message = extract_server_message(&body);
            tracing::warn!(
                "{} {} returned HTTP {} (server message: {:?})",
                method,
                url,
                status.as_u16(),
                message
            );
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
                body,
            });
        }

        let raw: Envelope<Value> = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("{} {} returned an invalid envelope: {}", method, url, e);
            ClientError::Decode(e)
        })?;

        if raw.is_success() {
            let Envelope { data, msg, errno } = raw;
            let data = serde_json::from_value(data).map_err(|e| {
                tracing::warn!("{} {} returned unexpected data: {}", method, url, e);
                ClientError::Decode(e)
            })?;
            return Ok(Envelope { data, msg, errno });
        }

        tracing::debug!(
            "{} {} returned errno {}: {}",
            method,
            url,
            raw.errno,
            raw.msg
        );
        Ok(raw.map(|data| serde_json::from_value(data).unwrap_or_default()))
    }

    /// 发送请求并折叠为统一的 `ApiOutcome`
    pub async fn call<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiOutcome<T> {
        let result = self.request::<Value>(spec).await;
        ApiOutcome::from_result(result, &self.catalog)
    }
}

pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    if url.is_empty() {
        return base_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}
