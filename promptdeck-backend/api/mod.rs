pub mod middleware;
pub mod prompts;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;

use crate::prompts::repository::PromptRepository;

#[derive(Clone)]
pub struct AppState {
    pub prompt_repo: Arc<dyn PromptRepository>,
    /// Path to the `static/` directory (the sidebar shell lives there).
    pub static_dir: PathBuf,
}

pub fn create_app(state: AppState) -> Router {
    routes::build_router(state)
}
