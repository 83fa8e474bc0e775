use serde::{Deserialize, Serialize};

/// 后端统一响应信封
///
/// 每个接口都返回 `{ data, msg, errno }`，`errno == 0` 表示业务成功，
/// 与HTTP状态码无关。信封按原样交给调用方，由调用方判断 `errno`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub msg: String,
    pub errno: i64,
}

impl<T> Envelope<T> {
    pub fn new(data: T, msg: impl Into<String>, errno: i64) -> Self {
        Self {
            data,
            msg: msg.into(),
            errno,
        }
    }

    /// 业务是否成功
    pub fn is_success(&self) -> bool {
        self.errno == 0
    }

    /// 业务失败时返回后端给出的消息（可能为空字符串）
    pub fn failure_message(&self) -> Option<&str> {
        if self.is_success() {
            None
        } else {
            Some(self.msg.as_str())
        }
    }

    /// 业务失败时的提示文本，`msg` 为空时使用 `fallback`
    pub fn failure_text<'a>(&'a self, fallback: &'a str) -> Option<&'a str> {
        self.failure_message()
            .map(|msg| if msg.is_empty() { fallback } else { msg })
    }

    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            data: f(self.data),
            msg: self.msg,
            errno: self.errno,
        }
    }

    /// 成功时取出数据，失败时返回 `(errno, msg)`
    pub fn into_result(self) -> Result<T, (i64, String)> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err((self.errno, self.msg))
        }
    }
}

/// 列表接口的分页数据 `{ list, count }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub count: u64,
    /// 部分接口会回传当前页码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            count: 0,
            page: None,
        }
    }
}
