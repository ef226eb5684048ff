use std::sync::Arc;

use fake::{Fake, Faker};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    settings::{get_config, Config},
    AppState,
};

pub fn generate_random<T: fake::Dummy<fake::Faker>>() -> T {
    Faker.fake()
}

/// App state for route tests. Routes are served under `/api` and the search
/// index and event topic get unique names so parallel tests sharing one Redis
/// do not see each other's documents or messages.
pub fn generate_test_state(pool: PgPool) -> anyhow::Result<(Arc<AppState>, Config)> {
    let mut config = get_config()?;
    config.prefix = Some("/api".to_string());
    let suffix = Uuid::now_v7();
    config.search_index = format!("test-permissions-{}", suffix);
    config.event_topic = format!("test-permissions-operations-{}", suffix);
    let client = redis::Client::open(config.redis_url.clone())?;
    let redis_pool = r2d2::Pool::builder().build(client)?;
    let app_state = Arc::new(AppState::new(pool, redis_pool, &config));
    Ok((app_state, config))
}
