use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub client: ClientSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// HTTP客户端配置
///
/// 整个进程只构建一个客户端，base_url 和凭据策略在构建后不可按请求修改。
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// 是否携带凭据（启用cookie存储）
    #[serde(default = "default_true")]
    pub with_credentials: bool,
    /// 只设置连接超时，不限制总请求时间；不配置则沿用底层默认值
    #[serde(default)]
    pub connect_timeout_seconds: Option<u64>,
    /// 每个请求都会附带的默认请求头
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            with_credentials: true,
            connect_timeout_seconds: None,
            headers: HashMap::new(),
        }
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_seconds.map(Duration::from_secs)
    }
}

/// 通知相关配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotificationSettings {
    /// errno != 0 时是否也由网关统一提示，默认关闭，由调用方自行处理
    #[serde(default)]
    pub notify_application_failures: bool,
    /// 业务失败且 msg 为空时使用的提示文本
    #[serde(default = "default_application_failure_fallback")]
    pub application_failure_fallback: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            notify_application_failures: false,
            application_failure_fallback: default_application_failure_fallback(),
        }
    }
}

fn default_true() -> bool {
    true
}

pub fn default_application_failure_fallback() -> String {
    "Request failed, please retry".to_string()
}

const MAX_CONNECT_TIMEOUT_SECONDS: u64 = 300;

impl Config {
    pub fn new(client: ClientSettings) -> Self {
        Self {
            client,
            notifications: NotificationSettings::default(),
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        self.validate_client_config(&self.client)?;

        if self
            .notifications
            .application_failure_fallback
            .trim()
            .is_empty()
        {
            anyhow::bail!("notifications.application_failure_fallback cannot be empty");
        }

        Ok(())
    }

    fn validate_client_config(&self, client: &ClientSettings) -> Result<()> {
        if client.base_url.is_empty() {
            anyhow::bail!("client has empty base_url");
        }

        // URL格式验证
        if !client.base_url.starts_with("http://") && !client.base_url.starts_with("https://") {
            anyhow::bail!(
                "client has invalid base_url format: '{}'. Must start with http:// or https://",
                client.base_url
            );
        }

        if let Some(timeout) = client.connect_timeout_seconds {
            if timeout == 0 {
                anyhow::bail!("client has invalid connect_timeout_seconds: cannot be 0");
            }
            if timeout > MAX_CONNECT_TIMEOUT_SECONDS {
                anyhow::bail!(
                    "client has connect_timeout_seconds too large: {} (maximum {} seconds)",
                    timeout,
                    MAX_CONNECT_TIMEOUT_SECONDS
                );
            }
        }

        for (name, value) in &client.headers {
            if name.trim().is_empty() {
                anyhow::bail!("client has a default header with an empty name");
            }
            if value.contains('\n') || value.contains('\r') {
                anyhow::bail!("client header '{}' contains a line break", name);
            }
        }

        Ok(())
    }
}
