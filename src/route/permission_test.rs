use poem::{http::StatusCode, test::TestClient};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    core::{
        event::OperationMessage,
        test_utils::generate_test_state,
        utils::datetime_to_string,
    },
    factory::permission::PermissionFactory,
    init_openapi_route,
    model::permission::{Permission, TABLE_NAME},
    schema::permission::PermissionResponse,
};

fn operation_names(messages: Vec<OperationMessage>) -> Vec<String> {
    messages.into_iter().map(|x| x.name_operation).collect()
}

#[sqlx::test]
async fn test_get_permissions_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let mut factory = PermissionFactory::new();
    factory.modified_many(|data, idx, _| Permission {
        id: data.id,
        employee_first_name: data.employee_first_name.clone(),
        employee_last_name: data.employee_last_name.clone(),
        permission_type_id: (idx as i32 % 5) + 1,
        permission_date: data.permission_date,
    });
    let permissions = factory.generate_many(&app_state.db, 5, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/permissions").send().await;

    // Expect
    resp.assert_status_is_ok();
    let descriptions = [
        "Vacaciones",
        "Licencia médica",
        "Permiso personal",
        "Día libre",
        "Trabajo remoto",
    ];
    let results: Vec<PermissionResponse> = permissions
        .into_iter()
        .map(|x| PermissionResponse {
            id: x.id,
            employee_first_name: x.employee_first_name,
            employee_last_name: x.employee_last_name,
            permission_type_id: x.permission_type_id,
            permission_type_description: descriptions[(x.permission_type_id - 1) as usize]
                .to_string(),
            permission_date: datetime_to_string(x.permission_date),
        })
        .collect();
    resp.assert_json(&results).await;
    assert_eq!(
        operation_names(app_state.publisher().read_operations()?),
        vec!["get"]
    );
    Ok(())
}

#[sqlx::test]
async fn test_get_permissions_api_empty(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli.get("/api/permissions").send().await;

    // Expect
    resp.assert_status_is_ok();
    resp.assert_json(json!([])).await;
    assert_eq!(
        operation_names(app_state.publisher().read_operations()?),
        vec!["get"]
    );
    Ok(())
}

#[sqlx::test]
async fn test_request_permission_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/permissions")
        .body_json(&json!({
            "nombreEmpleado": "María",
            "apellidoEmpleado": "González",
            "tipoPermiso": 2,
            "fechaPermiso": "2024-03-20"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let id = json.value().object().get("id").i64() as i32;
    assert!(id > 0);
    let new_permission: Option<(String, String, i32)> = sqlx::query_as(
        format!(
            r#"
    SELECT employee_first_name, employee_last_name, permission_type_id
    FROM {}
    WHERE id = $1"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(id)
    .fetch_optional(&app_state.db)
    .await?;
    assert_eq!(
        new_permission,
        Some(("María".to_string(), "González".to_string(), 2))
    );

    let document = app_state.indexer().get_document(id)?;
    assert!(document.is_some());
    let document = document.unwrap();
    assert_eq!(document.employee_first_name, "María");
    assert_eq!(document.permission_date, "2024-03-20T00:00:00Z");
    assert_eq!(
        operation_names(app_state.publisher().read_operations()?),
        vec!["request"]
    );

    let resp = cli.get("/api/permissions").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!([{
        "id": id,
        "nombreEmpleado": "María",
        "apellidoEmpleado": "González",
        "tipoPermiso": 2,
        "tipoPermisoDescripcion": "Licencia médica",
        "fechaPermiso": "2024-03-20T00:00:00Z"
    }]))
    .await;
    Ok(())
}

#[sqlx::test]
async fn test_request_permission_api_invalid_date(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/permissions")
        .body_json(&json!({
            "nombreEmpleado": "Juan",
            "apellidoEmpleado": "Pérez",
            "tipoPermiso": 1,
            "fechaPermiso": "not a date"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    let count: (i64,) = sqlx::query_as(format!("SELECT COUNT(*) FROM {}", TABLE_NAME).as_str())
        .fetch_one(&app_state.db)
        .await?;
    assert_eq!(count.0, 0);
    assert!(app_state.publisher().read_operations()?.is_empty());
    Ok(())
}

#[sqlx::test]
async fn test_request_permission_api_unknown_type(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .post("/api/permissions")
        .body_json(&json!({
            "nombreEmpleado": "Juan",
            "apellidoEmpleado": "Pérez",
            "tipoPermiso": 99,
            "fechaPermiso": "2024-02-15T00:00:00Z"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app_state.publisher().read_operations()?.is_empty());
    Ok(())
}

#[sqlx::test]
async fn test_modify_permission_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let mut factory = PermissionFactory::new();
    let permission = factory.generate_one(&app_state.db, ()).await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put(format!("/api/permissions/{}", permission.id))
        .body_json(&json!({
            "nombreEmpleado": "Ana María",
            "apellidoEmpleado": "Martínez Ruiz",
            "tipoPermiso": 5,
            "fechaPermiso": "2024-08-10T00:00:00Z"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let resp = cli.get("/api/permissions").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!([{
        "id": permission.id,
        "nombreEmpleado": "Ana María",
        "apellidoEmpleado": "Martínez Ruiz",
        "tipoPermiso": 5,
        "tipoPermisoDescripcion": "Trabajo remoto",
        "fechaPermiso": "2024-08-10T00:00:00Z"
    }]))
    .await;
    let document = app_state.indexer().get_document(permission.id)?;
    assert_eq!(
        document.map(|x| x.employee_last_name),
        Some("Martínez Ruiz".to_string())
    );
    assert_eq!(
        operation_names(app_state.publisher().read_operations()?),
        vec!["modify", "get"]
    );
    Ok(())
}

#[sqlx::test]
async fn test_modify_permission_api_not_found(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put("/api/permissions/9999")
        .body_json(&json!({
            "nombreEmpleado": "Test",
            "apellidoEmpleado": "User",
            "tipoPermiso": 1,
            "fechaPermiso": "2024-06-20"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    assert!(app_state.indexer().get_document(9999)?.is_none());
    assert!(app_state.publisher().read_operations()?.is_empty());
    Ok(())
}

#[sqlx::test]
async fn test_full_workflow_api(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let (app_state, config) = generate_test_state(pool)?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When 1
    let resp = cli
        .post("/api/permissions")
        .body_json(&json!({
            "nombreEmpleado": "Workflow",
            "apellidoEmpleado": "Test",
            "tipoPermiso": 1,
            "fechaPermiso": "2024-10-01T00:00:00.000Z"
        }))
        .send()
        .await;

    // Expect 1
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let id = json.value().object().get("id").i64();

    // When 2
    let resp = cli
        .put(format!("/api/permissions/{}", id))
        .body_json(&json!({
            "nombreEmpleado": "Modified",
            "apellidoEmpleado": "Workflow",
            "tipoPermiso": 3,
            "fechaPermiso": "2024-11-01T00:00:00.000Z"
        }))
        .send()
        .await;

    // Expect 2
    resp.assert_status_is_ok();
    let resp = cli.get("/api/permissions").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!([{
        "id": id,
        "nombreEmpleado": "Modified",
        "apellidoEmpleado": "Workflow",
        "tipoPermiso": 3,
        "tipoPermisoDescripcion": "Permiso personal",
        "fechaPermiso": "2024-11-01T00:00:00Z"
    }]))
    .await;
    assert_eq!(
        operation_names(app_state.publisher().read_operations()?),
        vec!["request", "modify", "get"]
    );
    Ok(())
}
