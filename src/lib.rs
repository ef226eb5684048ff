use std::sync::Arc;

use poem::{
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
    EndpointExt, Route,
};
use poem_openapi::OpenApiService;
use r2d2::Pool as r2d2Pool;
use redis::Client;
use route::{permission::ApiPermission, permission_type::ApiPermissionType};
use settings::Config;
use sqlx::{Pool, Postgres};

use crate::core::{event::RedisEventPublisher, search::RedisSearchIndexer};

pub mod cli;
pub mod core;
pub mod factory;
pub mod model;
pub mod repository;
pub mod route;
pub mod schema;
pub mod service;
pub mod settings;

pub struct AppState {
    pub db: Pool<Postgres>,
    pub redis_conn: r2d2Pool<Client>,
    pub search_index: String,
    pub event_topic: String,
}

impl AppState {
    pub fn new(db: Pool<Postgres>, redis_conn: r2d2Pool<Client>, config: &Config) -> Self {
        Self {
            db,
            redis_conn,
            search_index: config.search_index.clone(),
            event_topic: config.event_topic.clone(),
        }
    }

    pub fn indexer(&self) -> RedisSearchIndexer {
        RedisSearchIndexer::new(self.redis_conn.clone(), &self.search_index)
    }

    pub fn publisher(&self) -> RedisEventPublisher {
        RedisEventPublisher::new(self.redis_conn.clone(), &self.event_topic)
    }
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
    config: &Config,
) -> CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>> {
    let prefix = config.prefix.clone().unwrap_or("/".to_string());
    let openapi_route =
        OpenApiService::new((ApiPermission, ApiPermissionType), "Permissions", "1.0")
            .server(prefix.clone());
    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
}
