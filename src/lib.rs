pub mod bank;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::bank::sqlx_bank::SqlxQuestionBank;
use crate::services::assembly_service::AssemblyService;
use crate::services::exam_service::ExamService;
use crate::services::pool_service::{PoolCache, PoolService};
use crate::services::readiness_service::ReadinessService;
use crate::utils::time::SystemClock;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub exam_service: ExamService,
    pub readiness_service: ReadinessService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let bank = Arc::new(SqlxQuestionBank::new(pool.clone()));
        let cache = Arc::new(PoolCache::new(
            config.pool_cache_ttl_seconds,
            Arc::new(SystemClock),
        ));
        let pool_service = PoolService::new(bank, cache);
        let assembly_service = AssemblyService::new(pool_service.clone());
        let exam_service = ExamService::new(pool.clone(), assembly_service);
        let readiness_service = ReadinessService::new(pool_service);

        Self {
            pool,
            exam_service,
            readiness_service,
        }
    }
}
