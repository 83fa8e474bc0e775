use console_core::catalog::NETWORK_ERROR_LABEL;
use console_core::{Envelope, ErrorCatalog};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// 定义客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("请求构建失败: {0}")]
    InvalidRequest(String),
    #[error("HTTP请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("上游API返回错误: 状态码 {status}")]
    Status {
        status: u16,
        /// 服务端错误体里的 `message[0]`
        message: Option<String>,
        body: String,
    },
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP状态码（仅在拿到响应时存在）
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// 请求是否在发出前就被拒绝
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::InvalidRequest(_))
    }

    /// 是否属于传输层失败（非2xx或网络错误）
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Status { .. } | ClientError::Network(_))
    }

    /// 面向用户的通知文本
    ///
    /// 优先使用服务端消息，其次查状态码表；网络错误使用固定文本。
    /// 不在表中且没有服务端消息的状态码不产生通知。
    pub fn notification_text(&self, catalog: &ErrorCatalog) -> Option<String> {
        match self {
            ClientError::Status {
                status, message, ..
            } => catalog.describe(*status, message.as_deref()),
            ClientError::Network(e) => match e.status() {
                Some(status) => catalog.describe(status.as_u16(), None),
                None => Some(NETWORK_ERROR_LABEL.to_string()),
            },
            _ => None,
        }
    }
}

/// 服务端错误体 `{ message: string[] }`，也兼容单个字符串
#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    message: Option<ServerMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerMessage {
    List(Vec<String>),
    Text(String),
}

/// 从错误响应体中提取第一条服务端消息
pub fn extract_server_message(body: &str) -> Option<String> {
    let parsed: ServerErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.message? {
        ServerMessage::List(list) => list.into_iter().next()?,
        ServerMessage::Text(text) => text,
    };

    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

/// 把查询参数展开为键值对
///
/// 只接受扁平对象：字符串、数字和布尔值按文本发送，`null` 视为未设置而跳过。
/// 嵌套对象或数组无法放进查询串，直接拒绝。
pub fn query_pairs(params: &Value) -> Result<Vec<(String, String)>, ClientError> {
    let object = params.as_object().ok_or_else(|| {
        ClientError::InvalidRequest(format!("Query params must be an object, got {params}"))
    })?;

    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ClientError::InvalidRequest(format!(
                    "Query param '{key}' must be a scalar value"
                )));
            }
        };
        pairs.push((key.clone(), text));
    }
    Ok(pairs)
}

/// 一次请求的完整描述
///
/// 没有重试、幂等键或单独的超时设置。
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub url: String,
    pub method: Method,
    /// JSON请求体
    pub data: Option<Value>,
    /// 查询参数
    pub params: Option<Value>,
    pub headers: HeaderMap,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::POST,
            data: None,
            params: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestSpec {
    /// 默认使用POST
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::GET)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// 序列化任意类型作为请求体
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ClientError> {
        Ok(self.data(serde_json::to_value(body)?))
    }

    /// 序列化任意类型作为查询参数
    pub fn query<Q: Serialize + ?Sized>(self, query: &Q) -> Result<Self, ClientError> {
        Ok(self.params(serde_json::to_value(query)?))
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid header value for '{name}': {e}"))
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// 统一的调用结果
///
/// 传输层失败和业务失败（errno != 0）都以数据形式返回，调用方只需处理一种约定。
/// 本地校验不通过、请求根本没有发出时为 `Rejected`。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    /// `notified` 表示网关是否已经为这次失败发出提示
    TransportFailure {
        status: Option<u16>,
        message: String,
        notified: bool,
    },
    ApplicationFailure { errno: i64, msg: String },
    Rejected { reason: String },
}

impl<T: DeserializeOwned> ApiOutcome<T> {
    /// 把原始信封折叠为结果；errno == 0 时再解析 data
    pub fn from_envelope(envelope: Envelope<Value>) -> Self {
        if !envelope.is_success() {
            return ApiOutcome::ApplicationFailure {
                errno: envelope.errno,
                msg: envelope.msg,
            };
        }

        match serde_json::from_value(envelope.data) {
            Ok(data) => ApiOutcome::Success(data),
            Err(e) => ApiOutcome::TransportFailure {
                status: None,
                message: format!("Invalid response data: {e}"),
                notified: false,
            },
        }
    }

    pub fn from_result(result: Result<Envelope<Value>, ClientError>, catalog: &ErrorCatalog) -> Self {
        match result {
            Ok(envelope) => Self::from_envelope(envelope),
            Err(error) => Self::from_error(&error, catalog),
        }
    }
}

impl<T> ApiOutcome<T> {
    pub fn from_error(error: &ClientError, catalog: &ErrorCatalog) -> Self {
        if let ClientError::InvalidRequest(reason) = error {
            return ApiOutcome::Rejected {
                reason: reason.clone(),
            };
        }

        let status = error.status();
        let message = error
            .notification_text(catalog)
            .unwrap_or_else(|| match status {
                Some(status) => format!("HTTP {status}"),
                None => error.to_string(),
            });

        ApiOutcome::TransportFailure {
            status,
            message,
            notified: false,
        }
    }

    /// 本地拒绝，请求未发出
    pub fn rejected(reason: impl Into<String>) -> Self {
        ApiOutcome::Rejected {
            reason: reason.into(),
        }
    }

    /// 标记传输层失败已经提示过，其他结果原样返回
    pub fn with_notified(self, notified: bool) -> Self {
        match self {
            ApiOutcome::TransportFailure {
                status, message, ..
            } => ApiOutcome::TransportFailure {
                status,
                message,
                notified,
            },
            other => other,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success(data) => Some(data),
            _ => None,
        }
    }

    /// 失败时的提示文本；业务失败且 msg 为空时使用 `fallback`
    pub fn failure_text<'a>(&'a self, fallback: &'a str) -> Option<&'a str> {
        match self {
            ApiOutcome::Success(_) => None,
            ApiOutcome::TransportFailure { message, .. } => Some(message),
            ApiOutcome::ApplicationFailure { msg, .. } if msg.is_empty() => Some(fallback),
            ApiOutcome::ApplicationFailure { msg, .. } => Some(msg),
            ApiOutcome::Rejected { reason } => Some(reason),
        }
    }

    pub fn map<U, F>(self, f: F) -> ApiOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ApiOutcome::Success(data) => ApiOutcome::Success(f(data)),
            ApiOutcome::TransportFailure {
                status,
                message,
                notified,
            } => ApiOutcome::TransportFailure {
                status,
                message,
                notified,
            },
            ApiOutcome::ApplicationFailure { errno, msg } => {
                ApiOutcome::ApplicationFailure { errno, msg }
            }
            ApiOutcome::Rejected { reason } => ApiOutcome::Rejected { reason },
        }
    }
}
