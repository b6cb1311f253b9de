use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::error::Result;
use crate::models::context::Context;
use crate::models::question::{Language, Question};
use crate::services::exam_structure::SlotKind;
use crate::utils::time::Clock;

pub const CONTEXT_GROUP_SIZE: usize = 5;

/// A context with exactly 5 of its linked questions, ready to fill the
/// context section.
#[derive(Debug, Clone)]
pub struct ContextGroup {
    pub context: Context,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PoolKey {
    kind: SlotKind,
    topic: Option<String>,
    level: Option<i16>,
    language: Language,
}

struct CacheEntry {
    questions: Vec<Question>,
    expires_at: DateTime<Utc>,
}

/// Read-through cache for pool queries. Keyed on (type, topic, level,
/// language); entries expire after a TTL so edits to the bank surface
/// within a bounded window. The clock is injected so expiry is testable.
pub struct PoolCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<PoolKey, CacheEntry>>,
}

impl PoolCache {
    pub fn new(ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds as i64),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get(&self, key: &PoolKey) -> Option<Vec<Question>> {
        let entries = self.entries.lock().expect("pool cache poisoned");
        let entry = entries.get(key)?;
        if entry.expires_at <= self.clock.now() {
            return None;
        }
        Some(entry.questions.clone())
    }

    fn insert(&self, key: PoolKey, questions: Vec<Question>) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("pool cache poisoned");
        // TTL sweep piggybacks on writes; the map stays small (one entry
        // per structure combination).
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                questions,
                expires_at: now + self.ttl,
            },
        );
    }
}

/// Queries the question bank by structural criteria and returns matching
/// pools. Context questions are excluded from every non-context pool.
#[derive(Clone)]
pub struct PoolService {
    bank: Arc<dyn QuestionBank>,
    cache: Arc<PoolCache>,
}

impl PoolService {
    pub fn new(bank: Arc<dyn QuestionBank>, cache: Arc<PoolCache>) -> Self {
        Self { bank, cache }
    }

    pub async fn find_simple(
        &self,
        topic: Option<&str>,
        level: Option<i16>,
        language: Language,
    ) -> Result<Vec<Question>> {
        self.find_pool(SlotKind::Simple, topic, level, language, Question::is_simple_shape)
            .await
    }

    pub async fn find_matching(
        &self,
        topic: Option<&str>,
        language: Language,
    ) -> Result<Vec<Question>> {
        self.find_pool(SlotKind::Matching, topic, None, language, Question::is_matching_shape)
            .await
    }

    pub async fn find_multiple_choice(
        &self,
        topic: Option<&str>,
        language: Language,
    ) -> Result<Vec<Question>> {
        self.find_pool(SlotKind::Multiple, topic, None, language, Question::is_multiple_shape)
            .await
    }

    async fn find_pool(
        &self,
        kind: SlotKind,
        topic: Option<&str>,
        level: Option<i16>,
        language: Language,
        shape: fn(&Question) -> bool,
    ) -> Result<Vec<Question>> {
        let key = PoolKey {
            kind,
            topic: topic.map(str::to_string),
            level,
            language,
        };
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let pool: Vec<Question> = self
            .bank
            .list_questions(language)
            .await?
            .into_iter()
            .filter(|q| q.context_id.is_none())
            .filter(|q| shape(q))
            .filter(|q| topic.map_or(true, |t| q.topic == t))
            .filter(|q| level.map_or(true, |l| q.level == Some(l)))
            .collect();

        tracing::debug!(
            kind = kind.as_str(),
            topic = topic.unwrap_or("*"),
            pool_size = pool.len(),
            "pool query"
        );
        self.cache.insert(key, pool.clone());
        Ok(pool)
    }

    /// Whole language-filtered bank, uncached. Used by the unstructured
    /// fallback selection.
    pub async fn list_all(&self, language: Language) -> Result<Vec<Question>> {
        self.bank.list_questions(language).await
    }

    pub async fn find_by_context(
        &self,
        context_id: Uuid,
        language: Language,
    ) -> Result<Vec<Question>> {
        Ok(self
            .bank
            .list_questions(language)
            .await?
            .into_iter()
            .filter(|q| q.context_id == Some(context_id))
            .collect())
    }

    /// First context (in bank iteration order) with at least 5 linked
    /// questions, truncated to exactly 5. `None` is a hard failure for the
    /// context section, not a soft degradation.
    pub async fn find_context_group(&self, language: Language) -> Result<Option<ContextGroup>> {
        let questions = self.bank.list_questions(language).await?;

        let mut grouped: Vec<(Uuid, Vec<Question>)> = Vec::new();
        for question in questions {
            let Some(context_id) = question.context_id else {
                continue;
            };
            match grouped.iter_mut().find(|(id, _)| *id == context_id) {
                Some((_, group)) => group.push(question),
                None => grouped.push((context_id, vec![question])),
            }
        }

        let contexts = self.bank.list_contexts().await?;
        for (context_id, mut group) in grouped {
            if group.len() < CONTEXT_GROUP_SIZE {
                continue;
            }
            // A context_id whose passage record is gone is unusable; try
            // the next candidate.
            let Some(context) = contexts.iter().find(|c| c.id == context_id) else {
                tracing::warn!(%context_id, "context questions without a context record");
                continue;
            };
            group.truncate(CONTEXT_GROUP_SIZE);
            return Ok(Some(ContextGroup {
                context: context.clone(),
                questions: group,
            }));
        }
        Ok(None)
    }
}
