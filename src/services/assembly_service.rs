use crate::error::Result;
use crate::models::context::Context;
use crate::models::question::{Language, Question};
use crate::services::exam_structure::{
    SlotKind, CONTEXT_SECTION_START, EXAM_STRUCTURE, MIN_STRUCTURED_QUESTIONS,
};
use crate::services::pool_service::{ContextGroup, PoolService};
use crate::utils::random::RandomSource;

#[derive(Debug, Clone)]
pub struct AssembledExam {
    pub questions: Vec<Question>,
    pub issues: Vec<String>,
    pub context_used: Option<Context>,
}

impl AssembledExam {
    /// Fallback policy: with fewer than 30 of 40 positions filled the
    /// structured attempt is discarded in favor of unconstrained random
    /// selection. Trades structural fidelity for availability on a
    /// sparse bank.
    pub fn needs_fallback(&self) -> bool {
        self.questions.len() < MIN_STRUCTURED_QUESTIONS
    }
}

/// Walks the 40-position structure and draws one question per position
/// from the matching pool. Failures are independent per position: an
/// empty pool records an issue and leaves the position unfilled, with no
/// backtracking. There is deliberately no global without-replacement
/// constraint across positions.
#[derive(Clone)]
pub struct AssemblyService {
    pools: PoolService,
}

impl AssemblyService {
    pub fn new(pools: PoolService) -> Self {
        Self { pools }
    }

    pub async fn assemble_structured_exam(
        &self,
        language: Language,
        rng: &mut dyn RandomSource,
    ) -> AssembledExam {
        let mut questions = Vec::with_capacity(EXAM_STRUCTURE.len());
        let mut issues = Vec::new();
        // Resolved once, shared by all five context positions.
        let mut context_group: Option<Option<ContextGroup>> = None;

        for slot in EXAM_STRUCTURE.iter() {
            match slot.kind {
                SlotKind::Simple | SlotKind::Complex => {
                    let pool = self.pools.find_simple(slot.topic, slot.level, language).await;
                    Self::draw(slot.position, slot.kind, slot.topic, slot.level, pool, rng, &mut questions, &mut issues);
                }
                SlotKind::Matching => {
                    let pool = self.pools.find_matching(slot.topic, language).await;
                    Self::draw(slot.position, slot.kind, slot.topic, None, pool, rng, &mut questions, &mut issues);
                }
                SlotKind::Multiple => {
                    let pool = self.pools.find_multiple_choice(slot.topic, language).await;
                    Self::draw(slot.position, slot.kind, slot.topic, None, pool, rng, &mut questions, &mut issues);
                }
                SlotKind::Context => {
                    if context_group.is_none() {
                        context_group = Some(match self.pools.find_context_group(language).await {
                            Ok(group) => group,
                            Err(e) => {
                                tracing::warn!(error = %e, "context group query failed");
                                None
                            }
                        });
                    }
                    let offset = slot.position as usize - CONTEXT_SECTION_START;
                    match context_group.as_ref().and_then(|g| g.as_ref()) {
                        Some(group) => match group.questions.get(offset) {
                            Some(question) => questions.push(question.clone()),
                            None => issues.push(format!(
                                "Position {}: context group has no question at offset {}",
                                slot.position, offset
                            )),
                        },
                        None => issues.push(format!(
                            "Position {}: no context with 5 linked questions available",
                            slot.position
                        )),
                    }
                }
            }
        }

        let context_used = context_group
            .flatten()
            .map(|group| group.context);

        if !issues.is_empty() {
            tracing::warn!(
                filled = questions.len(),
                issues = issues.len(),
                "structured exam assembled with unfilled positions"
            );
        }

        AssembledExam {
            questions,
            issues,
            context_used,
        }
    }

    /// Unconstrained fallback: shuffle the whole language-filtered bank
    /// and take the first `count` questions. No structural guarantees.
    pub async fn random_exam(
        &self,
        count: usize,
        language: Language,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Question>> {
        let all = self.pools.list_all(language).await?;
        let mut order: Vec<usize> = (0..all.len()).collect();
        rng.shuffle_indices(&mut order);
        Ok(order
            .into_iter()
            .take(count)
            .map(|i| all[i].clone())
            .collect())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw(
        position: u8,
        kind: SlotKind,
        topic: Option<&str>,
        level: Option<i16>,
        pool: Result<Vec<Question>>,
        rng: &mut dyn RandomSource,
        questions: &mut Vec<Question>,
        issues: &mut Vec<String>,
    ) {
        let describe = || {
            let topic = topic.unwrap_or("any");
            match level {
                Some(level) => format!("topic {}, level {}, type {}", topic, level, kind.as_str()),
                None => format!("topic {}, type {}", topic, kind.as_str()),
            }
        };
        match pool {
            Ok(pool) if !pool.is_empty() => {
                let idx = rng.pick_index(pool.len());
                questions.push(pool[idx].clone());
            }
            Ok(_) => issues.push(format!(
                "Position {}: no question available for {}",
                position,
                describe()
            )),
            Err(e) => issues.push(format!(
                "Position {}: pool query failed for {}: {}",
                position,
                describe(),
                e
            )),
        }
    }
}
