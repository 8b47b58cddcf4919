//! # Notification Transport
//!
//! Decodes the push-notification batch that carries placement events
//! (`{"Records":[{"Sns":{"Message":"<envelope json>"}}]}`) and hands the message
//! bodies to the reconciliation pipeline.
//!
//! The handler always answers with status 200 once every record has been
//! attempted, so the transport never redelivers records that already succeeded.

use serde::{Deserialize, Serialize};

use crate::events::NormalizationError;
use crate::reconciliation::{BatchResult, ReconciliationPipeline, RecordError};

pub const HANDLER_SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationBatch {
    #[serde(default)]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sns: Option<TopicMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// The placement notification envelope, serialized as JSON text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NotificationRecord {
    /// Wrap an envelope body the way the topic delivers it
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            event_source: Some("aws:sns".to_string()),
            sns: Some(TopicMessage {
                message: Some(message.into()),
                ..Default::default()
            }),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.sns.as_ref().and_then(|sns| sns.message.as_deref())
    }
}

impl NotificationBatch {
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: messages
                .into_iter()
                .map(NotificationRecord::from_message)
                .collect(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, NormalizationError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Reply to the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    #[serde(skip)]
    pub batch: BatchResult,
}

/// Reconcile every record of a transport batch.
///
/// Records without a message body fail individually as malformed; their
/// positions in `batch.errors` refer to the transport batch.
pub async fn handle_notification_batch(
    pipeline: &ReconciliationPipeline,
    batch: &NotificationBatch,
) -> HandlerResponse {
    let mut messages = Vec::with_capacity(batch.records.len());
    let mut positions = Vec::with_capacity(batch.records.len());
    let mut rejected = Vec::new();

    for (index, record) in batch.records.iter().enumerate() {
        match record.message() {
            Some(message) => {
                positions.push(index);
                messages.push(message);
            }
            None => {
                let content = serde_json::to_string(record).unwrap_or_default();
                crate::log_pipeline!(
                    error,
                    "Notification record has no message body",
                    index: index,
                    record: content
                );
                rejected.push(RecordError {
                    index,
                    placement_id: None,
                    error: NormalizationError::malformed("notification record has no message body")
                        .into(),
                    record: content,
                });
            }
        }
    }

    let mut result = pipeline.process_batch(messages.as_slice()).await;
    for error in &mut result.errors {
        error.index = positions[error.index];
    }
    result.attempted += rejected.len();
    result.errors.extend(rejected);
    result.errors.sort_by_key(|error| error.index);

    HandlerResponse {
        status_code: HANDLER_SUCCESS_STATUS,
        batch: result,
    }
}
