//! `tencentcloud_monitor_alarm_notice`: a notification template that alarm
//! policies point at through `notice_ids`.

use super::model::*;
use super::service::MonitorService;
use crate::connectivity::TencentCloudClient;
use crate::error::Result;
use crate::helper::{non_empty, null_default};
use crate::resource::Resource;
use crate::schema::{Attribute, AttributeFlags, AttributeType, Block, NestedBlock, Schema};
use crate::state::ResourceData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct UserNoticeState {
    #[serde(deserialize_with = "null_default")]
    receiver_type: String,
    #[serde(deserialize_with = "null_default")]
    start_time: i64,
    #[serde(deserialize_with = "null_default")]
    end_time: i64,
    #[serde(deserialize_with = "null_default")]
    notice_way: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    user_ids: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    group_ids: Vec<i64>,
    #[serde(deserialize_with = "null_default")]
    phone_order: Vec<i64>,
    phone_circle_times: Option<i64>,
    phone_inner_interval: Option<i64>,
    phone_circle_interval: Option<i64>,
    need_phone_arrive_notice: Option<i64>,
    phone_call_type: Option<String>,
    #[serde(deserialize_with = "null_default")]
    weekday: Vec<i64>,
}

impl From<UserNoticeState> for UserNotice {
    fn from(s: UserNoticeState) -> Self {
        Self {
            receiver_type: s.receiver_type,
            start_time: s.start_time,
            end_time: s.end_time,
            notice_way: s.notice_way,
            user_ids: s.user_ids,
            group_ids: s.group_ids,
            phone_order: s.phone_order,
            phone_circle_times: s.phone_circle_times,
            phone_inner_interval: s.phone_inner_interval,
            phone_circle_interval: s.phone_circle_interval,
            need_phone_arrive_notice: s.need_phone_arrive_notice,
            phone_call_type: non_empty(s.phone_call_type),
            weekday: s.weekday,
        }
    }
}

impl From<UserNotice> for UserNoticeState {
    fn from(n: UserNotice) -> Self {
        Self {
            receiver_type: n.receiver_type,
            start_time: n.start_time,
            end_time: n.end_time,
            notice_way: n.notice_way,
            user_ids: n.user_ids,
            group_ids: n.group_ids,
            phone_order: n.phone_order,
            phone_circle_times: n.phone_circle_times,
            phone_inner_interval: n.phone_inner_interval,
            phone_circle_interval: n.phone_circle_interval,
            need_phone_arrive_notice: n.need_phone_arrive_notice,
            phone_call_type: n.phone_call_type,
            weekday: n.weekday,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct UrlNoticeState {
    #[serde(deserialize_with = "null_default")]
    url: String,
    is_valid: Option<i64>,
    validation_code: Option<String>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    #[serde(deserialize_with = "null_default")]
    weekday: Vec<i64>,
}

impl From<UrlNoticeState> for UrlNotice {
    fn from(s: UrlNoticeState) -> Self {
        Self {
            url: s.url,
            is_valid: s.is_valid,
            validation_code: non_empty(s.validation_code),
            start_time: s.start_time,
            end_time: s.end_time,
            weekday: s.weekday,
        }
    }
}

impl From<UrlNotice> for UrlNoticeState {
    fn from(n: UrlNotice) -> Self {
        Self {
            url: n.url,
            is_valid: n.is_valid,
            validation_code: n.validation_code,
            start_time: n.start_time,
            end_time: n.end_time,
            weekday: n.weekday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ClsNoticeState {
    #[serde(deserialize_with = "null_default")]
    region: String,
    #[serde(deserialize_with = "null_default")]
    log_set_id: String,
    #[serde(deserialize_with = "null_default")]
    topic_id: String,
    enable: Option<i64>,
}

impl Default for ClsNoticeState {
    fn default() -> Self {
        Self {
            region: String::new(),
            log_set_id: String::new(),
            topic_id: String::new(),
            enable: Some(1),
        }
    }
}

impl From<ClsNoticeState> for ClsNotice {
    fn from(s: ClsNoticeState) -> Self {
        Self {
            region: s.region,
            log_set_id: s.log_set_id,
            topic_id: s.topic_id,
            enable: s.enable.unwrap_or(1),
        }
    }
}

impl From<ClsNotice> for ClsNoticeState {
    fn from(n: ClsNotice) -> Self {
        Self {
            region: n.region,
            log_set_id: n.log_set_id,
            topic_id: n.topic_id,
            enable: Some(n.enable),
        }
    }
}

fn notice_request(d: &ResourceData, notice_id: Option<String>) -> Result<AlarmNoticeRequest> {
    let users: Vec<UserNoticeState> = d.decode_key("user_notices")?;
    let urls: Vec<UrlNoticeState> = d.decode_key("url_notices")?;
    let cls: Vec<ClsNoticeState> = d.decode_key("cls_notices")?;
    Ok(AlarmNoticeRequest {
        module: MODULE.to_string(),
        notice_id,
        name: d.require_str("name")?.to_string(),
        notice_type: d.require_str("notice_type")?.to_string(),
        notice_language: d.require_str("notice_language")?.to_string(),
        user_notices: users.into_iter().map(Into::into).collect(),
        url_notices: urls.into_iter().map(Into::into).collect(),
        cls_notices: cls.into_iter().map(Into::into).collect(),
    })
}

fn int_set() -> Attribute {
    Attribute::set(AttributeType::Int64, AttributeFlags::optional())
}

/// `tencentcloud_monitor_alarm_notice`: a notice template.
pub struct MonitorAlarmNotice;

#[async_trait]
impl Resource for MonitorAlarmNotice {
    fn name(&self) -> &'static str {
        "tencentcloud_monitor_alarm_notice"
    }

    fn schema(&self) -> Schema {
        let user_notices = Block::new()
            .with_attribute(
                "receiver_type",
                Attribute::required_string().with_description("Receiver type, `USER` or `GROUP`."),
            )
            .with_attribute("start_time", Attribute::required_int64().with_description("Seconds from 00:00:00."))
            .with_attribute("end_time", Attribute::required_int64().with_description("Seconds from 00:00:00."))
            .with_attribute(
                "notice_way",
                Attribute::set(AttributeType::String, AttributeFlags::required())
                    .with_description("`EMAIL`, `SMS`, `CALL`, `WECHAT`, `RTX`."),
            )
            .with_attribute("user_ids", int_set())
            .with_attribute("group_ids", int_set())
            .with_attribute("phone_order", int_set())
            .with_attribute("phone_circle_times", Attribute::optional_int64())
            .with_attribute("phone_inner_interval", Attribute::optional_int64())
            .with_attribute("phone_circle_interval", Attribute::optional_int64())
            .with_attribute("need_phone_arrive_notice", Attribute::optional_int64())
            .with_attribute("phone_call_type", Attribute::optional_string())
            .with_attribute("weekday", int_set());

        let url_notices = Block::new()
            .with_attribute("url", Attribute::required_string().with_description("Callback url, max 256 chars."))
            .with_attribute(
                "is_valid",
                Attribute::optional_computed_int64().with_description("`1` once the callback has been verified."),
            )
            .with_attribute("validation_code", Attribute::optional_string())
            .with_attribute("start_time", Attribute::optional_int64())
            .with_attribute("end_time", Attribute::optional_int64())
            .with_attribute("weekday", int_set());

        let cls_notices = Block::new()
            .with_attribute("region", Attribute::required_string())
            .with_attribute("log_set_id", Attribute::required_string())
            .with_attribute("topic_id", Attribute::required_string())
            .with_attribute("enable", Attribute::optional_int64().with_default(json!(1)));

        Schema::v0()
            .with_attribute("name", Attribute::required_string().with_description("Template name, max 60 chars."))
            .with_attribute(
                "notice_type",
                Attribute::required_string()
                    .with_allowed_strings(&["ALARM", "OK", "ALL"])
                    .with_description("Which alarm states are notified."),
            )
            .with_attribute(
                "notice_language",
                Attribute::required_string()
                    .with_allowed_strings(&["zh-CN", "en-US"])
                    .with_description("Language of the notification."),
            )
            .with_block("user_notices", NestedBlock::list(user_notices))
            .with_block("url_notices", NestedBlock::list(url_notices))
            .with_block("cls_notices", NestedBlock::list(cls_notices).with_max_items(1))
            .with_attribute("updated_by", Attribute::computed_string())
            .with_attribute("updated_at", Attribute::computed_string())
            .with_attribute("is_preset", Attribute::computed_int64())
            .with_attribute("amp_consumer_id", Attribute::computed_string())
            .with_attribute(
                "policy_ids",
                Attribute::set(AttributeType::String, AttributeFlags::computed())
                    .with_description("Alarm policies bound to this template."),
            )
    }

    async fn create(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let req = notice_request(d, None)?;
        let notice_id = MonitorService::new(client).create_alarm_notice(&req).await?;
        info!(notice_id = %notice_id, "alarm notice created");
        d.set_id(notice_id);
        self.read(client, d).await
    }

    async fn read(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        let notice = MonitorService::new(client)
            .describe_alarm_notice(d.id())
            .await?;
        let Some(notice) = notice else {
            d.set_id("");
            return Ok(());
        };

        d.set("name", notice.name);
        d.set("notice_type", notice.notice_type);
        d.set("notice_language", notice.notice_language);
        d.set("updated_by", notice.updated_by);
        d.set("updated_at", notice.updated_at);
        d.set("is_preset", notice.is_preset);
        d.set("policy_ids", notice.policy_ids);
        d.set("amp_consumer_id", notice.amp_consumer_id);

        let users: Vec<UserNoticeState> = notice.user_notices.into_iter().map(Into::into).collect();
        let urls: Vec<UrlNoticeState> = notice.url_notices.into_iter().map(Into::into).collect();
        let cls: Vec<ClsNoticeState> = notice.cls_notices.into_iter().map(Into::into).collect();
        d.set("user_notices", serde_json::to_value(users)?);
        d.set("url_notices", serde_json::to_value(urls)?);
        d.set("cls_notices", serde_json::to_value(cls)?);
        Ok(())
    }

    async fn update(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        // ModifyAlarmNotice replaces the whole template.
        let req = notice_request(d, Some(d.id().to_string()))?;
        MonitorService::new(client).modify_alarm_notice(&req).await?;
        self.read(client, d).await
    }

    async fn delete(&self, client: &TencentCloudClient, d: &mut ResourceData) -> Result<()> {
        MonitorService::new(client)
            .delete_alarm_notice(d.id())
            .await
    }
}
