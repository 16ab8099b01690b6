use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{ContentType, RatingSet, ScoredTitle};
use crate::services::title_search::{resolve_title, search_titles};
use crate::services::{RatingScale, Recommender, StrategyKind};

use super::AppState;

const SEARCH_LIMIT: usize = 20;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub title: String,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct RatingsRequest {
    pub ratings: HashMap<String, f64>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct HybridRequest {
    pub title: String,
    #[serde(default)]
    pub ratings: HashMap<String, f64>,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SwitchCatalogRequest {
    pub content_type: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub description: String,
    pub similarity: f64,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Debug, Serialize)]
pub struct HybridResponse {
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub content_type: ContentType,
    pub strategy: StrategyKind,
    pub item_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub titles: Vec<String>,
}

impl RecommendationsResponse {
    fn from_scored(recommender: &Recommender, scored: Vec<ScoredTitle>) -> Self {
        let recommendations = scored
            .into_iter()
            .map(|s| RecommendationResponse {
                description: recommender
                    .catalog()
                    .find(&s.title)
                    .map(|item| item.description.clone())
                    .unwrap_or_default(),
                title: s.title,
                similarity: s.score,
            })
            .collect();
        Self { recommendations }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Describe the active catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let (content_type, recommender) = state.session().await;
    Json(CatalogResponse {
        content_type,
        strategy: recommender.strategy_kind(),
        item_count: recommender.catalog().len(),
    })
}

/// Replace the active catalog with another content type
pub async fn switch_catalog(
    State(state): State<AppState>,
    Json(request): Json<SwitchCatalogRequest>,
) -> AppResult<Json<CatalogResponse>> {
    let content_type: ContentType = request.content_type.parse()?;
    let recommender = state.reload(content_type).await?;
    Ok(Json(CatalogResponse {
        content_type,
        strategy: recommender.strategy_kind(),
        item_count: recommender.catalog().len(),
    }))
}

/// Substring search over catalog titles
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let (_, recommender) = state.session().await;
    let titles = search_titles(recommender.catalog(), &params.q, SEARCH_LIMIT)
        .into_iter()
        .map(|item| item.title.clone())
        .collect();
    Json(SearchResponse { titles })
}

/// Titles similar to a reference title
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let count = state.limits().resolve(request.count)?;
    let (_, recommender) = state.session().await;
    let title = resolve_reference(&recommender, &request.title)?;

    let similar = recommender.find_similar(&title, count)?;
    tracing::info!(title = %title, count = similar.len(), "Served content recommendations");
    Ok(Json(RecommendationsResponse::from_scored(&recommender, similar)))
}

/// Titles suited to a set of ratings
pub async fn recommend_from_ratings(
    State(state): State<AppState>,
    Json(request): Json<RatingsRequest>,
) -> AppResult<Json<RecommendationsResponse>> {
    let count = state.limits().resolve(request.count)?;
    let (_, recommender) = state.session().await;
    let ratings = resolve_ratings(&recommender, request.ratings)?;

    let rated = recommender.recommend_from_ratings(&ratings, count)?;
    tracing::info!(rated = ratings.len(), count = rated.len(), "Served rating recommendations");
    Ok(Json(RecommendationsResponse::from_scored(&recommender, rated)))
}

/// Content and rating recommendations blended into one list
pub async fn recommend_hybrid(
    State(state): State<AppState>,
    Json(request): Json<HybridRequest>,
) -> AppResult<Json<HybridResponse>> {
    let count = state.limits().resolve(request.count)?;
    let (_, recommender) = state.session().await;
    let title = resolve_reference(&recommender, &request.title)?;
    let ratings = resolve_ratings(&recommender, request.ratings)?;

    let recommendations = recommender.blend(&title, &ratings, count)?;
    tracing::info!(
        title = %title,
        rated = ratings.len(),
        count = recommendations.len(),
        "Served hybrid recommendations"
    );
    Ok(Json(HybridResponse { recommendations }))
}

fn resolve_reference(recommender: &Recommender, query: &str) -> AppResult<String> {
    resolve_title(recommender.catalog(), query)
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::debug!(title = %query, "Reference title not in catalog");
            AppError::NotFound(format!("Title \"{}\" not found in our database", query))
        })
}

/// Validates ratings against the session's scale and maps titles onto
/// catalog titles where they resolve; unresolved titles pass through as-is.
fn resolve_ratings(
    recommender: &Recommender,
    ratings: HashMap<String, f64>,
) -> AppResult<RatingSet> {
    let scale: RatingScale = recommender.rating_scale();
    let mut resolved = RatingSet::with_capacity(ratings.len());
    for (title, rating) in ratings {
        if !scale.contains(rating) {
            return Err(AppError::InvalidInput(format!(
                "rating {} for \"{}\" is outside the {} scale",
                rating, title, scale
            )));
        }
        let title = resolve_title(recommender.catalog(), &title)
            .map(str::to_string)
            .unwrap_or(title);
        resolved.insert(title, rating);
    }
    Ok(resolved)
}
