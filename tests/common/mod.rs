#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use clicklink::application::services::UrlRegistry;
use clicklink::domain::clock::SystemClock;
use clicklink::domain::entities::{NewUrlRecord, UrlRecord};
use clicklink::domain::repositories::{InsertOutcome, UrlRepository};
use clicklink::error::AppError;
use clicklink::infrastructure::persistence::MemoryUrlRepository;
use axum::ServiceExt;
use axum::extract::Request;
use clicklink::routes::{app_router, router};
use clicklink::state::AppState;
use clicklink::utils::code_generator::RandomCodeGenerator;

pub const BASE_URL: &str = "http://sho.rt";

pub fn create_registry(repository: Arc<dyn UrlRepository>) -> Arc<UrlRegistry> {
    Arc::new(UrlRegistry::new(
        repository,
        Arc::new(RandomCodeGenerator),
        Arc::new(SystemClock),
        BASE_URL,
        Duration::from_secs(5),
    ))
}

/// State over a fresh in-memory store. The store is returned for direct checks.
pub fn create_test_state() -> (AppState, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    let registry = create_registry(repository.clone());

    (AppState::new(registry), repository)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// Server over the same service `server::run` serves, path normalization included.
pub fn create_app_server(state: AppState) -> TestServer {
    TestServer::new(ServiceExt::<Request>::into_make_service(app_router(state))).unwrap()
}

/// Repository whose every call fails like an unreachable database.
pub struct FailingRepository;

#[async_trait]
impl UrlRepository for FailingRepository {
    async fn find_by_original_url(&self, _: &str) -> Result<Option<UrlRecord>, AppError> {
        Err(AppError::storage("connection refused (os error 111)"))
    }

    async fn find_by_code(&self, _: &str) -> Result<Option<UrlRecord>, AppError> {
        Err(AppError::storage("connection refused (os error 111)"))
    }

    async fn insert_if_absent(&self, _: NewUrlRecord) -> Result<InsertOutcome, AppError> {
        Err(AppError::storage("connection refused (os error 111)"))
    }

    async fn increment_clicks(&self, _: &str) -> Result<Option<String>, AppError> {
        Err(AppError::storage("connection refused (os error 111)"))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::storage("connection refused (os error 111)"))
    }
}

pub fn create_failing_state() -> AppState {
    AppState::new(create_registry(Arc::new(FailingRepository)))
}
