use super::timefmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 活动状态：0 草稿，1 线上，2 线下
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ActivityStatus {
    #[default]
    Draft,
    Online,
    Offline,
}

impl ActivityStatus {
    pub fn code(self) -> u8 {
        match self {
            ActivityStatus::Draft => 0,
            ActivityStatus::Online => 1,
            ActivityStatus::Offline => 2,
        }
    }
}

impl TryFrom<u8> for ActivityStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ActivityStatus::Draft),
            1 => Ok(ActivityStatus::Online),
            2 => Ok(ActivityStatus::Offline),
            other => Err(format!("unknown activity status: {other}")),
        }
    }
}

impl From<ActivityStatus> for u8 {
    fn from(status: ActivityStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityStatus::Draft => write!(f, "draft"),
            ActivityStatus::Online => write!(f, "online"),
            ActivityStatus::Offline => write!(f, "offline"),
        }
    }
}

/// 软删除标记：0 未删除，1 已删除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DeleteFlag {
    #[default]
    Active,
    Deleted,
}

impl TryFrom<u8> for DeleteFlag {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DeleteFlag::Active),
            1 => Ok(DeleteFlag::Deleted),
            other => Err(format!("unknown delete flag: {other}")),
        }
    }
}

impl From<DeleteFlag> for u8 {
    fn from(flag: DeleteFlag) -> Self {
        match flag {
            DeleteFlag::Active => 0,
            DeleteFlag::Deleted => 1,
        }
    }
}

/// 后端返回的活动记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInfo {
    pub id: i64,
    pub name: String,
    #[serde(with = "timefmt::datetime")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timefmt::datetime")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
    #[serde(default)]
    pub money: f64,
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub note: String,
    /// 富文本编辑器导出的JSON文档（字符串形式）
    #[serde(default)]
    pub content: String,
    #[serde(with = "timefmt::datetime")]
    pub create_time: NaiveDateTime,
    #[serde(with = "timefmt::datetime")]
    pub update_time: NaiveDateTime,
    #[serde(default)]
    pub is_delete: DeleteFlag,
}

impl ActivityInfo {
    pub fn is_deleted(&self) -> bool {
        self.is_delete == DeleteFlag::Deleted
    }
}

/// 活动列表查询条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cur_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    pub page_size: u32,
}

impl ActivityQuery {
    pub fn page(cur_page: u32, page_size: u32) -> Self {
        Self {
            id: None,
            name: None,
            cur_page,
            status: None,
            page_size,
        }
    }
}

/// 切换活动状态的请求体
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: i64,
    pub status: ActivityStatus,
}

/// 新建或更新活动时提交的部分字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub create_time: Option<NaiveDateTime>,
    #[serde(
        default,
        with = "timefmt::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_time: Option<NaiveDateTime>,
}

impl ActivityDraft {
    pub fn stamp_created(&mut self, now: NaiveDateTime) {
        self.create_time = Some(now);
        self.update_time = Some(now);
    }

    pub fn stamp_updated(&mut self, now: NaiveDateTime) {
        self.update_time = Some(now);
    }

    /// 报名人数上下限是否合法
    pub fn validate_capacity(&self) -> Result<(), String> {
        match (self.min, self.max) {
            (Some(min), _) if min < 0 => Err(format!("min cannot be negative: {min}")),
            (Some(min), Some(max)) if min > max => {
                Err(format!("min ({min}) is greater than max ({max})"))
            }
            _ => Ok(()),
        }
    }
}
