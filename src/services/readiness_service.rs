use serde::{Deserialize, Serialize};

use crate::models::question::Language;
use crate::services::exam_structure::{SlotKind, EXAM_STRUCTURE};
use crate::services::pool_service::PoolService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub question_type: String,
    pub topic: Option<String>,
    pub level: Option<i16>,
    pub needed: usize,
    pub available: usize,
    pub sufficient: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub is_ready: bool,
    pub readiness_score: i32,
    pub context_available: bool,
    pub coverage: Vec<CoverageEntry>,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Pre-flight audit of whether the bank can fill every structure position
/// at least once. Runs the same pool queries as the assembler but
/// aggregates instead of selecting. Read-only and re-runnable on demand.
#[derive(Clone)]
pub struct ReadinessService {
    pools: PoolService,
}

impl ReadinessService {
    pub fn new(pools: PoolService) -> Self {
        Self { pools }
    }

    pub async fn check_readiness(&self, language: Language) -> ReadinessReport {
        let mut coverage = Vec::new();
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        // Needed counts per (type, topic, level) combination, in structure
        // order. Context positions are audited separately as one group.
        let mut combos: Vec<(SlotKind, Option<&str>, Option<i16>, usize)> = Vec::new();
        for slot in EXAM_STRUCTURE.iter() {
            if slot.kind == SlotKind::Context {
                continue;
            }
            match combos
                .iter_mut()
                .find(|(k, t, l, _)| *k == slot.kind && *t == slot.topic && *l == slot.level)
            {
                Some((_, _, _, needed)) => *needed += 1,
                None => combos.push((slot.kind, slot.topic, slot.level, 1)),
            }
        }

        for (kind, topic, level, needed) in combos {
            let pool = match kind {
                SlotKind::Simple | SlotKind::Complex => {
                    self.pools.find_simple(topic, level, language).await
                }
                SlotKind::Matching => self.pools.find_matching(topic, language).await,
                SlotKind::Multiple => self.pools.find_multiple_choice(topic, language).await,
                SlotKind::Context => unreachable!("context slots audited separately"),
            };

            let (available, query_failed) = match pool {
                Ok(pool) => (pool.len(), false),
                Err(e) => {
                    issues.push(format!("Validation error: {}", e));
                    (0, true)
                }
            };

            let sufficient = available >= needed;
            let label = describe_combo(kind, topic, level);
            if query_failed {
                // The validation error already covers this combo; a second
                // insufficiency message would double the score deduction.
            } else if !sufficient {
                issues.push(format!(
                    "Insufficient questions for {}: need {}, have {}",
                    label, needed, available
                ));
            } else if available == needed {
                warnings.push(format!(
                    "Exact fit for {}: {} needed and {} available, no backup",
                    label, needed, available
                ));
            }
            coverage.push(CoverageEntry {
                question_type: kind.as_str().to_string(),
                topic: topic.map(str::to_string),
                level,
                needed,
                available,
                sufficient,
            });
        }

        let context_available = match self.pools.find_context_group(language).await {
            Ok(Some(_)) => true,
            Ok(None) => {
                issues.push("Context section: no context with 5 linked questions available".to_string());
                false
            }
            Err(e) => {
                issues.push(format!("Validation error: {}", e));
                false
            }
        };

        let is_ready = issues.is_empty() && context_available;
        let readiness_score = if is_ready {
            100
        } else {
            // Coarse deduction heuristic, not a calibrated metric.
            (100 - 10 * issues.len() as i32).max(0)
        };

        tracing::info!(
            is_ready,
            readiness_score,
            issues = issues.len(),
            warnings = warnings.len(),
            "readiness check"
        );

        ReadinessReport {
            is_ready,
            readiness_score,
            context_available,
            coverage,
            issues,
            warnings,
        }
    }
}

fn describe_combo(kind: SlotKind, topic: Option<&str>, level: Option<i16>) -> String {
    let topic = topic.unwrap_or("any");
    match level {
        Some(level) => format!("topic {}, level {}, type {}", topic, level, kind.as_str()),
        None => format!("topic {}, type {}", topic, kind.as_str()),
    }
}
