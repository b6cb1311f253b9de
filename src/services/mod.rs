pub mod answer_format;
pub mod assembly_service;
pub mod exam_service;
pub mod exam_structure;
pub mod pool_service;
pub mod readiness_service;
pub mod scoring_service;
