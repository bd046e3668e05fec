//! Notion pages API sink adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use traction_core::config::SinkConfig;

use crate::error::SinkError;
use crate::sink::TaskSink;
use crate::types::TaskSubmission;

/// Notion API version header value
const NOTION_VERSION: &str = "2022-06-28";

// Request types for the Notion pages API

#[derive(Debug, Serialize)]
struct CreatePageRequest {
    parent: Parent,
    properties: Properties,
}

#[derive(Debug, Serialize)]
struct Parent {
    database_id: String,
}

#[derive(Debug, Serialize)]
struct Properties {
    #[serde(rename = "Name")]
    name: TitleProperty,
    #[serde(rename = "Status")]
    status: SelectProperty,
    #[serde(rename = "Assignee", skip_serializing_if = "Option::is_none")]
    assignee: Option<RichTextProperty>,
    #[serde(rename = "Due Date", skip_serializing_if = "Option::is_none")]
    due_date: Option<DateProperty>,
    #[serde(rename = "Source")]
    source: RichTextProperty,
}

#[derive(Debug, Serialize)]
struct TitleProperty {
    title: Vec<TextContent>,
}

#[derive(Debug, Serialize)]
struct SelectProperty {
    select: SelectValue,
}

#[derive(Debug, Serialize)]
struct SelectValue {
    name: String,
}

#[derive(Debug, Serialize)]
struct RichTextProperty {
    rich_text: Vec<TextContent>,
}

#[derive(Debug, Serialize)]
struct TextContent {
    text: TextValue,
}

#[derive(Debug, Serialize)]
struct TextValue {
    content: String,
}

#[derive(Debug, Serialize)]
struct DateProperty {
    date: DateValue,
}

#[derive(Debug, Serialize)]
struct DateValue {
    start: NaiveDate,
}

impl TextContent {
    fn plain(content: impl Into<String>) -> Self {
        Self {
            text: TextValue {
                content: content.into(),
            },
        }
    }
}

/// Sink that creates one Notion database page per submitted task.
pub struct HttpTaskSink {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    database_id: String,
}

impl HttpTaskSink {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            database_id: database_id.into(),
        }
    }

    /// Build a sink from configuration, rejecting empty credentials up
    /// front rather than on the first request.
    pub fn from_config(cfg: &SinkConfig) -> Result<Self, SinkError> {
        if !cfg.has_credentials() {
            return Err(SinkError::MissingCredentials);
        }
        Ok(Self::new(&cfg.endpoint, &cfg.api_key, &cfg.database_id))
    }

    fn api_url(&self) -> String {
        format!("{}/v1/pages", self.endpoint.trim_end_matches('/'))
    }

    fn build_request(&self, task: &TaskSubmission) -> CreatePageRequest {
        CreatePageRequest {
            parent: Parent {
                database_id: self.database_id.clone(),
            },
            properties: Properties {
                name: TitleProperty {
                    title: vec![TextContent::plain(&task.title)],
                },
                status: SelectProperty {
                    select: SelectValue {
                        name: "To Do".to_string(),
                    },
                },
                assignee: if task.assignee.is_empty() {
                    None
                } else {
                    Some(RichTextProperty {
                        rich_text: vec![TextContent::plain(&task.assignee)],
                    })
                },
                due_date: task.due_date.map(|start| DateProperty {
                    date: DateValue { start },
                }),
                source: RichTextProperty {
                    rich_text: vec![TextContent::plain(format!(
                        "Meeting: {}",
                        task.source_label
                    ))],
                },
            },
        }
    }
}

#[async_trait]
impl TaskSink for HttpTaskSink {
    async fn submit(&self, task: &TaskSubmission) -> Result<(), SinkError> {
        let body = self.build_request(task);
        debug!(title = %task.title, "Submitting task");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(())
    }
}
