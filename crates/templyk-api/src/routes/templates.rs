//! The templates collection.
//!
//! - `GET /templates`: list catalog records
//! - `POST /templates`: create (echo stub; persistence is out of scope)
//! - `POST /templates/generate`: templatify raw markdown
//! - `GET /templates/{path}`: fetch one record
//! - `PATCH /templates/{path}`: update (echo stub)
//! - `DELETE /templates/{path}`: delete (stub)
//!
//! Template references containing `/` must be percent-encoded into the
//! single path segment (`%2F`); axum decodes them before the handler
//! sees the value.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use templyk_content::{templatify, TemplatifyOptions, TokenStyle, Verbosity};
use templyk_core::Error as CoreError;
use templyk_service::{self as service, Template};

use crate::error::Result;
use crate::server::AppState;

/// Routes for the templates collection.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/generate", post(generate_template))
        .route(
            "/templates/{path}",
            get(get_template)
                .patch(update_template)
                .delete(delete_template),
        )
}

async fn list_templates(State(state): State<AppState>) -> Result<Json<Vec<Template>>> {
    let paths = service::list_templates(&state.config)?;
    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        templates.push(service::get_template(&path)?);
    }
    Ok(Json(templates))
}

/// Body of `POST /templates`.
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    /// Template name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Markdown body of the template.
    pub content: String,
}

async fn create_template(
    Json(request): Json<CreateTemplateRequest>,
) -> (StatusCode, Json<Template>) {
    // Echo stub: catalog writes are out of scope, the record is
    // returned as it would be stored.
    let template = Template {
        name: request.name,
        description: request.description,
        tags: request.tags,
        path: String::new(),
    };
    (StatusCode::CREATED, Json(template))
}

async fn get_template(Path(path): Path<String>) -> Result<Json<Template>> {
    Ok(Json(service::get_template(&path)?))
}

/// Body of `PATCH /templates/{path}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement tags.
    pub tags: Option<Vec<String>>,
}

async fn update_template(
    Path(path): Path<String>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>> {
    // Echo stub over the stored record: the merge is returned but not
    // persisted. A missing template still 404s.
    let mut template = service::get_template(&path)?;
    if let Some(name) = request.name {
        template.name = name;
    }
    if let Some(description) = request.description {
        template.description = description;
    }
    if let Some(tags) = request.tags {
        template.tags = tags;
    }
    Ok(Json(template))
}

async fn delete_template(Path(path): Path<String>) -> Result<StatusCode> {
    // Stub: verifies the target exists, removes nothing.
    service::get_template(&path)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body of `POST /templates/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// The markdown document to templatify.
    pub raw_markdown: String,
    /// Placeholder wrapping style.
    #[serde(default)]
    pub token_style: TokenStyle,
    /// Pruning policy.
    #[serde(default)]
    pub verbosity: Verbosity,
    /// Optional frontmatter variables to validate and report.
    #[serde(default)]
    pub frontmatter: Option<serde_yaml::Mapping>,
}

/// Body of the `POST /templates/generate` response.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// The templatified markdown.
    pub template: String,
}

async fn generate_template(
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if request.raw_markdown.trim().is_empty() {
        return Err(CoreError::parse("raw_markdown must not be empty").into());
    }
    let options = TemplatifyOptions {
        token_style: request.token_style,
        verbosity: request.verbosity,
        frontmatter: request.frontmatter,
    };
    let template = templatify(&request.raw_markdown, &options)?;
    Ok(Json(GenerateResponse { template }))
}
