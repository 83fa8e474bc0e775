/// HTTP状态码到用户提示文本的静态映射
///
/// 只用于生成面向用户的通知文本，进程内只读，不可修改。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorCatalog;

const ENTRIES: [(u16, &str); 11] = [
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
];

/// 网络层失败（没有拿到HTTP响应）时使用的文本
pub const NETWORK_ERROR_LABEL: &str = "Network Error";

impl ErrorCatalog {
    pub const fn new() -> Self {
        ErrorCatalog
    }

    /// 查询状态码对应的文本
    pub fn label(&self, status: u16) -> Option<&'static str> {
        ENTRIES
            .iter()
            .find(|(code, _)| *code == status)
            .map(|(_, label)| *label)
    }

    pub fn contains(&self, status: u16) -> bool {
        self.label(status).is_some()
    }

    /// 所有条目，按状态码升序
    pub fn entries(&self) -> impl Iterator<Item = (u16, &'static str)> {
        ENTRIES.iter().copied()
    }

    /// 生成用户提示文本：优先使用服务端给出的消息，其次查表
    pub fn describe(&self, status: u16, server_message: Option<&str>) -> Option<String> {
        match server_message {
            Some(message) if !message.trim().is_empty() => Some(message.to_string()),
            _ => self.label(status).map(str::to_string),
        }
    }
}
