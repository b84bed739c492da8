use axum::{routing::get, Router};

use crate::{
    application::todo_service::ToDoService,
    config::Config,
    http::{
        hal::LinkBuilder,
        routes::to_do::{self, AppState, PagingDefaults},
        types::ApiError,
    },
};

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(router)
        .fallback(|| async { ApiError::NotFound })
}

/// The full application router for `service`, with links and paging taken from `config`.
pub fn build<S: ToDoService + Clone>(service: S, config: &Config) -> Router {
    let state = AppState {
        service,
        links: LinkBuilder::new(config.public_base_url.clone()),
        paging: PagingDefaults { default_size: config.default_page_size, max_size: config.max_page_size },
    };
    app(to_do::router(state))
}
