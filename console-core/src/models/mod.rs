pub mod activity;
pub mod timefmt;
pub mod user;

use serde::{Deserialize, Serialize};

pub use activity::{ActivityDraft, ActivityInfo, ActivityQuery, ActivityStatus, DeleteFlag, StatusChange};
pub use user::{LoginRequest, UserDraft, UserInfo, UserQuery};

/// 表格排序方向，与前端表格组件的取值一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascend,
    Descend,
}

/// 按id操作单条记录时的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdParam {
    pub id: i64,
}
