use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::header::{CONTENT_TYPE, LOCATION};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    application::todo_service::ToDoService,
    domain::{
        page::{PageRequest, Sort},
        todo::ToDoId,
    },
    http::{
        body,
        hal::{CollectionModel, LinkBuilder, ToDoModel},
        types::{ApiError, HAL_JSON},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingDefaults { pub default_size: u32, pub max_size: u32 }

#[derive(Clone)]
pub struct AppState<S: ToDoService> {
    pub service: S,
    pub links: LinkBuilder,
    pub paging: PagingDefaults,
}

/// Verb table for the collection, item and search resources.
pub fn router<S: ToDoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/toDo", get(list::<S>).post(create::<S>))
        .route("/toDo/search", get(search::<S>))
        .route("/toDo/search/findById", get(find_by_id::<S>))
        .route("/toDo/:id", get(fetch::<S>).patch(update::<S>).delete(delete::<S>))
        .with_state(state)
}

fn hal<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(CONTENT_TYPE, HAL_JSON)], Json(body)).into_response()
}

/// Path ids that are not integers cannot name a stored item.
fn parse_id(raw: &str) -> Result<ToDoId, ApiError> { raw.parse().map_err(|_| ApiError::NotFound) }

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    size: Option<String>,
    sort: Option<String>,
}

impl ListParams {
    /// Unusable values fall back to the defaults instead of failing the request.
    pub fn page_request(&self, paging: PagingDefaults) -> PageRequest {
        let number = self.page.as_deref().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
        let size = self.size.as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&s| s > 0)
            .map_or(paging.default_size, |s| s.min(paging.max_size));
        let sort = self.sort.as_deref().and_then(Sort::parse).unwrap_or_default();
        PageRequest { number, size, sort }
    }
}

async fn list<S: ToDoService>(State(state): State<AppState<S>>, Query(params): Query<ListParams>) -> Result<Response, ApiError> {
    let request = params.page_request(state.paging);
    let page = state.service.page(request).await?;
    tracing::debug!(number = request.number, size = request.size, total = page.total_elements, "listed to-do items");
    Ok(hal(StatusCode::OK, CollectionModel::from_page(page, &state.links)))
}

async fn create<S: ToDoService>(State(state): State<AppState<S>>, payload: Bytes) -> Result<Response, ApiError> {
    let fields = body::new_to_do(&payload)?;
    let item = state.service.create(fields).await?;
    let location = state.links.item(item.id);
    let model = ToDoModel::new(item, &state.links);
    Ok((
        StatusCode::CREATED,
        [(CONTENT_TYPE, HAL_JSON.to_string()), (LOCATION, location)],
        Json(model),
    ).into_response())
}

async fn fetch<S: ToDoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let item = state.service.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(hal(StatusCode::OK, ToDoModel::new(item, &state.links)))
}

/// The target is looked up before the body is decoded, so an unknown id is a
/// 404 whatever the body holds.
async fn update<S: ToDoService>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Bytes) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.service.get(id).await?.ok_or(ApiError::NotFound)?;
    let patch = body::patch(&payload)?;
    match state.service.update(id, patch).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

async fn delete<S: ToDoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.service.delete(id).await? { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError::NotFound) }
}

async fn search<S: ToDoService>(State(state): State<AppState<S>>) -> Response {
    hal(StatusCode::OK, json!({
        "_links": {
            "findById": { "href": state.links.find_by_id(), "templated": true },
            "self": { "href": state.links.search() },
        }
    }))
}

#[derive(Debug, Deserialize)]
struct FindByIdParams { id: Option<String> }

async fn find_by_id<S: ToDoService>(State(state): State<AppState<S>>, Query(params): Query<FindByIdParams>) -> Result<Response, ApiError> {
    let id = params.id.unwrap_or_default();
    let items = state.service.find_by_id(&id).await?;
    // only a parsed id is echoed back, raw query text could break the href
    let self_href = match id.parse::<ToDoId>() {
        Ok(id) => format!("{}/findById?id={id}", state.links.search()),
        Err(_) => format!("{}/findById", state.links.search()),
    };
    Ok(hal(StatusCode::OK, CollectionModel::search_result(items, self_href, &state.links)))
}
