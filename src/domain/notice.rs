use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A university announcement ingested from the source website and shown on
/// the portal notice board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub priority: NoticePriority,
    pub is_active: bool,
    pub published_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A notice extracted from source markup, before deduplication, retention
/// filtering and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeCandidate {
    pub title: String,
    pub content: String,
    pub category: NoticeCategory,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Examinations,
    Vacancy,
    Admissions,
    General,
}

impl NoticeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeCategory::Examinations => "examinations",
            NoticeCategory::Vacancy => "vacancy",
            NoticeCategory::Admissions => "admissions",
            NoticeCategory::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticePriority {
    Low,
    Normal,
    High,
    Urgent,
}

impl NoticePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticePriority::Low => "low",
            NoticePriority::Normal => "normal",
            NoticePriority::High => "high",
            NoticePriority::Urgent => "urgent",
        }
    }
}
