//! In-memory session context: active category, recent questions, chat log.
//!
//! Nothing here is persisted; a session lives as long as its owner.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use policyqa_core::CategoryFilter;
use policyqa_core::format::truncate_chars;
use policyqa_search::QueryOutcome;
use serde::Serialize;

pub const MAX_RECENT_QUESTIONS: usize = 5;
pub const MAX_LOG_ENTRIES: usize = 50;
pub const ANSWER_PREVIEW_CHARS: usize = 100;

/// One answered question, timestamped when recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLogEntry {
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub answer_preview: String,
    pub confidence: u8,
    pub result_count: usize,
    pub category: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    category: CategoryFilter,
    recent: VecDeque<String>,
    log: VecDeque<ChatLogEntry>,
}

impl Session {
    pub fn new(category: CategoryFilter) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Most recent first, no duplicates.
    pub fn recent_questions(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Oldest first.
    pub fn log(&self) -> impl Iterator<Item = &ChatLogEntry> {
        self.log.iter()
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Remember an answered question.
    pub fn record(&mut self, question: &str, outcome: &QueryOutcome) {
        let question = question.trim();
        self.remember_question(question);

        let answer = &outcome.answer;
        self.log.push_back(ChatLogEntry {
            timestamp: Utc::now(),
            question: question.to_string(),
            answer_preview: truncate_chars(&answer.conclusion, ANSWER_PREVIEW_CHARS),
            confidence: answer.confidence,
            result_count: outcome.result_count,
            category: self.category.to_string(),
            source: answer.source.as_ref().map(|s| s.title.clone()),
        });
        while self.log.len() > MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    fn remember_question(&mut self, question: &str) {
        self.recent.retain(|q| q != question);
        self.recent.push_front(question.to_string());
        self.recent.truncate(MAX_RECENT_QUESTIONS);
    }
}
