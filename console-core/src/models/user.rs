use super::timefmt;
use super::SortOrder;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 登录请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub pass_word: String,
}

impl LoginRequest {
    pub fn new(user_name: impl Into<String>, pass_word: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            pass_word: pass_word.into(),
        }
    }
}

/// 后端返回的用户记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub user_name: String,
    #[serde(default)]
    pub pass_word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        default,
        with = "timefmt::date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: i32,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub company: String,
    #[serde(with = "timefmt::datetime")]
    pub create_time: NaiveDateTime,
    #[serde(with = "timefmt::datetime")]
    pub update_time: NaiveDateTime,
}

/// 用户列表查询条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub cur_page: u32,
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<HashMap<String, SortOrder>>,
}

impl UserQuery {
    pub fn page(cur_page: u32, page_size: u32) -> Self {
        Self {
            id: None,
            user_name: None,
            cur_page,
            page_size,
            sort: None,
        }
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort
            .get_or_insert_with(HashMap::new)
            .insert(field.into(), order);
        self
    }
}

/// 新建或更新用户时提交的部分字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(
        default,
        with = "timefmt::date_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
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

impl UserDraft {
    /// 新建（或复制）时同时写入创建时间和更新时间
    pub fn stamp_created(&mut self, now: NaiveDateTime) {
        self.create_time = Some(now);
        self.update_time = Some(now);
    }

    /// 更新时只刷新更新时间
    pub fn stamp_updated(&mut self, now: NaiveDateTime) {
        self.update_time = Some(now);
    }
}

impl From<&UserInfo> for UserDraft {
    fn from(user: &UserInfo) -> Self {
        Self {
            id: Some(user.id),
            user_name: Some(user.user_name.clone()),
            pass_word: Some(user.pass_word.clone()),
            avatar: user.avatar.clone(),
            birth_date: user.birth_date,
            gender: Some(user.gender),
            height: Some(user.height),
            weight: Some(user.weight),
            school: Some(user.school.clone()),
            degree: Some(user.degree.clone()),
            occupation: Some(user.occupation.clone()),
            company: Some(user.company.clone()),
            create_time: Some(user.create_time),
            update_time: Some(user.update_time),
        }
    }
}
