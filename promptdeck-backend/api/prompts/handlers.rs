/// REST endpoints for prompt browsing and editing.
///
/// GET  /api/prompts             — list prompts, optionally filtered by `?q=`
/// POST /api/prompts             — create a prompt
/// POST /api/prompts/search      — form-submitted search (single field `q`)
/// GET  /api/prompts/{id}        — full prompt, timestamps included
/// PUT  /api/prompts/{id}        — patch title/content
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use chrono::Utc;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::api::AppState;
use crate::prompts::search::SearchPrompts;
use crate::prompts::{Prompt, PromptSummary};

/// Fixed message the search box shows when anything below it fails; the
/// underlying error only goes to the log.
const SEARCH_FAILED_MESSAGE: &str = "Faile to get prompts.";

/// Search input: one form/query field. An absent `q` is an empty term.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub q: String,
}

/// Envelope the sidebar renders from. `prompts` is present on success,
/// `message` on failure, never both.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<PromptSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/prompts — the live search box path. `?q=` mirrors the box value.
pub(crate) async fn list_prompts(
    State(state): State<AppState>,
    Query(query): Query<SearchRequest>,
) -> Json<SearchResult> {
    Json(run_search(&state, &query.q).await)
}

/// POST /api/prompts/search — the form-submission path.
pub(crate) async fn search_prompts(
    State(state): State<AppState>,
    Form(body): Form<SearchRequest>,
) -> Json<SearchResult> {
    Json(run_search(&state, &body.q).await)
}

async fn run_search(state: &AppState, raw_term: &str) -> SearchResult {
    let term = raw_term.trim();
    let use_case = SearchPrompts::new(state.prompt_repo.clone());

    match use_case.execute(Some(term)).await {
        Ok(results) => SearchResult {
            success: true,
            prompts: Some(results.iter().map(Prompt::summary).collect()),
            message: None,
        },
        Err(e) => {
            tracing::error!(error = %e, term = %term, "prompt search failed");
            SearchResult {
                success: false,
                prompts: None,
                message: Some(SEARCH_FAILED_MESSAGE.to_string()),
            }
        }
    }
}

pub(crate) async fn get_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let prompt = state.prompt_repo.get(&id).await.map_err(|e| {
        tracing::error!(error = %e, id = %id, "failed to load prompt");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("failed to load prompt: {e}") })),
        )
    })?;

    let prompt = prompt.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "prompt not found" })),
        )
    })?;

    Ok(Json(serde_json::to_value(&prompt).unwrap()))
}

#[derive(Deserialize)]
pub(crate) struct CreatePromptRequest {
    title: String,
    content: String,
}

pub(crate) async fn create_prompt(
    State(state): State<AppState>,
    Json(body): Json<CreatePromptRequest>,
) -> (StatusCode, Json<Value>) {
    let now = Utc::now();
    let prompt = Prompt {
        id: Uuid::new_v4().to_string(),
        title: body.title,
        content: body.content,
        created_at: now,
        updated_at: now,
    };

    let id = prompt.id.clone();
    if let Err(e) = state.prompt_repo.save(prompt).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("failed to save prompt: {e}") })),
        );
    }

    (StatusCode::CREATED, Json(json!({ "id": id })))
}

#[derive(Deserialize)]
pub(crate) struct UpdatePromptRequest {
    title: Option<String>,
    content: Option<String>,
}

pub(crate) async fn update_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdatePromptRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut prompt = state
        .prompt_repo
        .get(&id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("failed to load prompt: {e}") })),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "prompt not found" })),
            )
        })?;

    if let Some(title) = body.title {
        prompt.title = title;
    }
    if let Some(content) = body.content {
        prompt.content = content;
    }
    prompt.updated_at = Utc::now();

    state.prompt_repo.save(prompt.clone()).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("failed to update prompt: {e}") })),
        )
    })?;

    Ok(Json(serde_json::to_value(&prompt).unwrap()))
}
