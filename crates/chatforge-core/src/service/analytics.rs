//! Usage analytics computed from stored conversations.
//!
//! Everything here is derived on demand by scanning the caller's
//! chatbots and their conversation logs -- there is no separate metrics
//! pipeline, which keeps the numbers exactly consistent with the store.

use chatforge_types::chatbot::{ChatbotStatus, Flow};
use chatforge_types::error::RepositoryError;
use chatforge_types::template::Template;
use chatforge_types::user::UserId;
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use std::str::FromStr;

use crate::repository::{ChatbotRepository, ConversationRepository, TemplateRepository};

/// Reporting window for the analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Days7,
    Days30,
    Days90,
    Days365,
}

impl TimeRange {
    pub fn days(self) -> i64 {
        match self {
            TimeRange::Days7 => 7,
            TimeRange::Days30 => 30,
            TimeRange::Days90 => 90,
            TimeRange::Days365 => 365,
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Days30
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "7d" => Ok(TimeRange::Days7),
            "30d" => Ok(TimeRange::Days30),
            "90d" => Ok(TimeRange::Days90),
            "365d" => Ok(TimeRange::Days365),
            other => Err(format!("invalid time range: '{other}'")),
        }
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub active_chatbots: usize,
    pub total_conversations: usize,
    /// Percentage of conversations marked resolved, 0 when none exist.
    pub resolution_rate: u32,
}

/// Compact chatbot row for the dashboard listing.
#[derive(Debug, Clone, Serialize)]
pub struct ChatbotCard {
    pub id: chatforge_types::chatbot::ChatbotId,
    pub name: String,
    pub flows: usize,
    pub status: ChatbotStatus,
    pub color: String,
}

/// Compact template row for the dashboard listing.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCard {
    pub id: chatforge_types::template::TemplateId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// The dashboard payload: a few chatbots, a few templates, the stats.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub chatbots: Vec<ChatbotCard>,
    pub templates: Vec<TemplateCard>,
    pub stats: DashboardStats,
}

/// Conversations started on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub conversations: usize,
}

/// Aggregates for the analytics page.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    pub total_conversations: usize,
    pub total_messages: usize,
    pub resolved_conversations: usize,
    pub resolution_rate: u32,
}

/// The analytics payload over the requested window.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub overview: AnalyticsOverview,
    /// One entry per day in the window, oldest first, zero-filled.
    pub conversations_by_day: Vec<DailyCount>,
}

/// Number of chatbot and template rows shown on the dashboard.
const DASHBOARD_ROWS: usize = 3;

/// Computes dashboard and analytics aggregates for one user.
pub struct AnalyticsService<C, V, T>
where
    C: ChatbotRepository,
    V: ConversationRepository,
    T: TemplateRepository,
{
    chatbots: C,
    conversations: V,
    templates: T,
}

impl<C, V, T> AnalyticsService<C, V, T>
where
    C: ChatbotRepository,
    V: ConversationRepository,
    T: TemplateRepository,
{
    pub fn new(chatbots: C, conversations: V, templates: T) -> Self {
        Self {
            chatbots,
            conversations,
            templates,
        }
    }

    /// Assemble the dashboard summary for a user.
    pub async fn dashboard(&self, user_id: UserId) -> Result<DashboardSummary, RepositoryError> {
        let chatbots = self.chatbots.list_by_user(user_id).await?;

        let mut total_conversations = 0;
        let mut resolved = 0;
        for chatbot in &chatbots {
            let conversations = self.conversations.list_by_chatbot(chatbot.id).await?;
            total_conversations += conversations.len();
            resolved += conversations
                .iter()
                .filter(|c| c.resolved == Some(true))
                .count();
        }

        let stats = DashboardStats {
            active_chatbots: chatbots
                .iter()
                .filter(|c| c.status == ChatbotStatus::Active)
                .count(),
            total_conversations,
            resolution_rate: percentage(resolved, total_conversations),
        };

        let templates = self
            .templates
            .list()
            .await?
            .into_iter()
            .take(DASHBOARD_ROWS)
            .map(|t: Template| TemplateCard {
                id: t.id,
                name: t.name,
                description: t.description,
                icon: t.icon,
                color: t.color,
            })
            .collect();

        let chatbot_cards = chatbots
            .iter()
            .take(DASHBOARD_ROWS)
            .map(|c| ChatbotCard {
                id: c.id,
                name: c.name.clone(),
                flows: count_flows(&c.flows),
                status: c.status,
                color: c.color.clone(),
            })
            .collect();

        Ok(DashboardSummary {
            chatbots: chatbot_cards,
            templates,
            stats,
        })
    }

    /// Aggregate conversation activity over the window.
    pub async fn report(
        &self,
        user_id: UserId,
        range: TimeRange,
    ) -> Result<AnalyticsReport, RepositoryError> {
        let chatbots = self.chatbots.list_by_user(user_id).await?;

        let mut all = Vec::new();
        for chatbot in &chatbots {
            all.extend(self.conversations.list_by_chatbot(chatbot.id).await?);
        }

        let total_messages = all.iter().map(|c| c.messages.len()).sum();
        let resolved = all.iter().filter(|c| c.resolved == Some(true)).count();
        let overview = AnalyticsOverview {
            total_conversations: all.len(),
            total_messages,
            resolved_conversations: resolved,
            resolution_rate: percentage(resolved, all.len()),
        };

        let today = Utc::now().date_naive();
        let days = range.days();
        let conversations_by_day = (0..days)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                let conversations = all
                    .iter()
                    .filter(|c| c.started_at.date_naive() == date)
                    .count();
                DailyCount {
                    date,
                    conversations,
                }
            })
            .collect();

        Ok(AnalyticsReport {
            overview,
            conversations_by_day,
        })
    }
}

fn count_flows(flows: &[Flow]) -> usize {
    flows.len()
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part * 100) / whole) as u32
    }
}
