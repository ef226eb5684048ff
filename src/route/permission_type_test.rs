use poem::test::TestClient;
use serde_json::json;
use sqlx::PgPool;

use crate::{core::test_utils::generate_test_state, init_openapi_route};

#[sqlx::test]
async fn test_get_all_permission_type_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/permission-types").send().await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!([
        {"id": 1, "descripcion": "Vacaciones"},
        {"id": 2, "descripcion": "Licencia médica"},
        {"id": 3, "descripcion": "Permiso personal"},
        {"id": 4, "descripcion": "Día libre"},
        {"id": 5, "descripcion": "Trabajo remoto"}
    ]))
    .await;
    assert!(app_state.publisher().read_operations()?.is_empty());
    Ok(())
}
