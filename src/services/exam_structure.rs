//! The fixed 40-position exam layout. Immutable configuration: positions
//! 1-25 are single-answer questions (21-25 the harder "complex" band),
//! 26-30 share one reading context, 31-35 are matching, 36-40 multi-select.

use serde::{Deserialize, Serialize};

pub const STRUCTURED_EXAM_SIZE: usize = 40;
pub const CONTEXT_SECTION_START: usize = 26;
pub const CONTEXT_SECTION_END: usize = 30;
pub const MATCHING_SECTION_END: usize = 35;

/// Below this many filled positions the structured attempt is discarded
/// and the exam falls back to unconstrained random selection.
pub const MIN_STRUCTURED_QUESTIONS: usize = 30;

/// Structural requirement class of a position. Simple and complex slots
/// share the 4-option shape; context slots draw from the shared passage
/// group; matching and multiple have their own shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Simple,
    Complex,
    Context,
    Matching,
    Multiple,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Simple => "simple",
            SlotKind::Complex => "complex",
            SlotKind::Context => "context",
            SlotKind::Matching => "matching",
            SlotKind::Multiple => "multiple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureSlot {
    pub position: u8,
    pub topic: Option<&'static str>,
    pub level: Option<i16>,
    pub kind: SlotKind,
}

const fn slot(
    position: u8,
    topic: Option<&'static str>,
    level: Option<i16>,
    kind: SlotKind,
) -> StructureSlot {
    StructureSlot {
        position,
        topic,
        level,
        kind,
    }
}

/// Topic codes: NUM numbers & expressions, ALG algebraic expressions,
/// EQU equations & inequalities, FUN functions, GEO planimetry,
/// STE stereometry, TRI trigonometry, COM combinatorics & probability.
pub const EXAM_STRUCTURE: [StructureSlot; STRUCTURED_EXAM_SIZE] = [
    slot(1, Some("NUM"), Some(1), SlotKind::Simple),
    slot(2, Some("NUM"), Some(1), SlotKind::Simple),
    slot(3, Some("ALG"), Some(1), SlotKind::Simple),
    slot(4, Some("ALG"), Some(1), SlotKind::Simple),
    slot(5, Some("EQU"), Some(1), SlotKind::Simple),
    slot(6, Some("EQU"), Some(1), SlotKind::Simple),
    slot(7, Some("FUN"), Some(1), SlotKind::Simple),
    slot(8, Some("GEO"), Some(1), SlotKind::Simple),
    slot(9, Some("GEO"), Some(1), SlotKind::Simple),
    slot(10, Some("TRI"), Some(1), SlotKind::Simple),
    slot(11, Some("NUM"), Some(2), SlotKind::Simple),
    slot(12, Some("ALG"), Some(2), SlotKind::Simple),
    slot(13, Some("EQU"), Some(2), SlotKind::Simple),
    slot(14, Some("FUN"), Some(2), SlotKind::Simple),
    slot(15, Some("GEO"), Some(2), SlotKind::Simple),
    slot(16, Some("TRI"), Some(2), SlotKind::Simple),
    slot(17, Some("COM"), Some(1), SlotKind::Simple),
    slot(18, Some("COM"), Some(2), SlotKind::Simple),
    slot(19, Some("STE"), Some(1), SlotKind::Simple),
    slot(20, Some("STE"), Some(2), SlotKind::Simple),
    slot(21, Some("ALG"), Some(2), SlotKind::Complex),
    slot(22, Some("EQU"), Some(2), SlotKind::Complex),
    slot(23, Some("FUN"), Some(2), SlotKind::Complex),
    slot(24, Some("GEO"), Some(2), SlotKind::Complex),
    slot(25, Some("COM"), Some(2), SlotKind::Complex),
    slot(26, None, None, SlotKind::Context),
    slot(27, None, None, SlotKind::Context),
    slot(28, None, None, SlotKind::Context),
    slot(29, None, None, SlotKind::Context),
    slot(30, None, None, SlotKind::Context),
    slot(31, Some("ALG"), None, SlotKind::Matching),
    slot(32, Some("EQU"), None, SlotKind::Matching),
    slot(33, Some("FUN"), None, SlotKind::Matching),
    slot(34, Some("GEO"), None, SlotKind::Matching),
    slot(35, Some("TRI"), None, SlotKind::Matching),
    slot(36, Some("NUM"), None, SlotKind::Multiple),
    slot(37, Some("ALG"), None, SlotKind::Multiple),
    slot(38, Some("EQU"), None, SlotKind::Multiple),
    slot(39, Some("GEO"), None, SlotKind::Multiple),
    slot(40, Some("COM"), None, SlotKind::Multiple),
];
