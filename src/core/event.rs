use std::{fmt, future::Future};

use anyhow::Context;
use r2d2::Pool as r2d2Pool;
use redis::{streams::StreamRangeReply, Client, Commands};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Operation names sent to the event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Request,
    Modify,
    Get,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Request => "request",
            Operation::Modify => "modify",
            Operation::Get => "get",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationMessage {
    pub id: Uuid,
    pub name_operation: String,
}

impl OperationMessage {
    pub fn new(operation: Operation) -> Self {
        Self {
            id: Uuid::now_v7(),
            name_operation: operation.to_string(),
        }
    }
}

pub trait EventPublisher: Send + Sync {
    fn publish_operation(
        &self,
        operation: Operation,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Appends operation messages to a Redis stream. Each entry carries the
/// message id under `key` and the JSON message under `value`.
#[derive(Clone)]
pub struct RedisEventPublisher {
    redis_conn: r2d2Pool<Client>,
    topic: String,
}

impl RedisEventPublisher {
    pub fn new(redis_conn: r2d2Pool<Client>, topic: &str) -> Self {
        Self {
            redis_conn,
            topic: topic.to_string(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Read every message currently on the topic, oldest first.
    pub fn read_operations(&self) -> anyhow::Result<Vec<OperationMessage>> {
        let mut conn = self.redis_conn.get()?;
        let reply: StreamRangeReply = conn.xrange_all(&self.topic)?;
        let mut messages = vec![];
        for entry in reply.ids {
            let value: Option<String> = entry.get("value");
            let value =
                value.with_context(|| format!("stream entry {} has no value", entry.id))?;
            messages.push(serde_json::from_str::<OperationMessage>(&value)?);
        }
        Ok(messages)
    }
}

impl EventPublisher for RedisEventPublisher {
    async fn publish_operation(&self, operation: Operation) -> anyhow::Result<()> {
        let message = OperationMessage::new(operation);
        let key = message.id.to_string();
        let value = serde_json::to_string(&message)?;
        let mut conn = self
            .redis_conn
            .get()
            .context("get redis pool connection")?;
        let entry_id: String = conn
            .xadd(
                &self.topic,
                "*",
                &[("key", key.as_str()), ("value", value.as_str())],
            )
            .with_context(|| format!("publish {} to {}", operation, self.topic))?;
        debug!(topic = %self.topic, %entry_id, %operation, "operation published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::Request.as_str(), "request");
        assert_eq!(Operation::Modify.as_str(), "modify");
        assert_eq!(Operation::Get.to_string(), "get");
    }

    #[test]
    fn test_operation_message_json() {
        let message = OperationMessage::new(Operation::Modify);
        let json: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(json["name_operation"], "modify");
        assert_eq!(json["id"], message.id.to_string());
    }
}
