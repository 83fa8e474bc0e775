use super::Notifier;
use crate::client::{ApiOutcome, ClientError, HttpClient, RequestSpec};
use console_core::{Envelope, NotificationSettings};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// 带提示的调用入口
///
/// 传输层失败时发出恰好一条错误提示，然后把原错误继续返回给调用方。
/// errno != 0 默认不提示，除非开启 `notify_application_failures`。
#[derive(Clone)]
pub struct NotifyingGateway {
    client: HttpClient,
    notifier: Arc<dyn Notifier>,
    settings: NotificationSettings,
}

impl NotifyingGateway {
    pub fn new(client: HttpClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_settings(client, notifier, NotificationSettings::default())
    }

    pub fn with_settings(
        client: HttpClient,
        notifier: Arc<dyn Notifier>,
        settings: NotificationSettings,
    ) -> Self {
        Self {
            client,
            notifier,
            settings,
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub async fn request<T: DeserializeOwned + Default>(
        &self,
        spec: RequestSpec,
    ) -> Result<Envelope<T>, ClientError> {
        match self.client.request::<T>(spec).await {
            Ok(envelope) => {
                self.notify_envelope(&envelope);
                Ok(envelope)
            }
            Err(error) => {
                self.notify_error(&error);
                Err(error)
            }
        }
    }

    /// 同 `request`，结果折叠为 `ApiOutcome`；传输层失败带上是否已提示
    pub async fn call<T: DeserializeOwned>(&self, spec: RequestSpec) -> ApiOutcome<T> {
        match self.client.request::<Value>(spec).await {
            Ok(envelope) => {
                self.notify_envelope(&envelope);
                ApiOutcome::from_envelope(envelope)
            }
            Err(error) => {
                let notified = self.notify_error(&error);
                ApiOutcome::from_error(&error, self.client.catalog()).with_notified(notified)
            }
        }
    }

    fn notify_envelope<T>(&self, envelope: &Envelope<T>) {
        if !self.settings.notify_application_failures {
            return;
        }
        if let Some(text) = envelope.failure_text(&self.settings.application_failure_fallback) {
            self.notifier.error(text);
        }
    }

    /// 返回是否发出了提示
    fn notify_error(&self, error: &ClientError) -> bool {
        match error.notification_text(self.client.catalog()) {
            Some(text) => {
                self.notifier.error(&text);
                true
            }
            None => false,
        }
    }
}
