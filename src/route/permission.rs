use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::{
    core::utils::{datetime_to_string, parse_datetime},
    repository::permission::PgPermissionStore,
    schema::{
        common::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
        permission::{
            PermissionAllResponses, PermissionCreateResponse, PermissionCreateResponses,
            PermissionRequest, PermissionResponse, PermissionUpdateResponses,
        },
    },
    service::permission::{PermissionInput, PermissionService},
    AppState,
};

#[derive(Tags)]
enum ApiPermissionTags {
    Permission,
}

pub struct ApiPermission;

fn permission_input(json: PermissionRequest) -> Result<PermissionInput, BadRequestResponse> {
    let permission_date =
        parse_datetime(&json.permission_date).map_err(|err| BadRequestResponse {
            message: format!("fechaPermiso: {}", err),
        })?;
    Ok(PermissionInput {
        employee_first_name: json.employee_first_name,
        employee_last_name: json.employee_last_name,
        permission_type_id: json.permission_type_id,
        permission_date,
    })
}

#[OpenApi]
impl ApiPermission {
    #[oai(path = "/permissions", method = "get", tag = "ApiPermissionTags::Permission")]
    async fn get_permissions_api(&self, state: Data<&Arc<AppState>>) -> PermissionAllResponses {
        let mut service = PermissionService::new(
            PgPermissionStore::new(state.db.clone()),
            state.indexer(),
            state.publisher(),
        );
        let data = match service.get_permissions().await {
            Ok(val) => val,
            Err(err) => {
                return PermissionAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.permission",
                        "get_permissions_api",
                        "get_permissions",
                        &format!("{:#}", err),
                    ),
                ))
            }
        };

        PermissionAllResponses::Ok(Json(
            data.into_iter()
                .map(|x| PermissionResponse {
                    id: x.id,
                    employee_first_name: x.employee_first_name,
                    employee_last_name: x.employee_last_name,
                    permission_type_id: x.permission_type_id,
                    permission_type_description: x.permission_type_description,
                    permission_date: datetime_to_string(x.permission_date),
                })
                .collect(),
        ))
    }

    #[oai(path = "/permissions", method = "post", tag = "ApiPermissionTags::Permission")]
    async fn request_permission_api(
        &self,
        Json(json): Json<PermissionRequest>,
        state: Data<&Arc<AppState>>,
    ) -> PermissionCreateResponses {
        let input = match permission_input(json) {
            Ok(val) => val,
            Err(err) => return PermissionCreateResponses::BadRequest(Json(err)),
        };

        let mut service = PermissionService::new(
            PgPermissionStore::new(state.db.clone()),
            state.indexer(),
            state.publisher(),
        );
        let id = match service.request_permission(input).await {
            Ok(val) => val,
            Err(err) => {
                return PermissionCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.permission",
                        "request_permission_api",
                        "request_permission",
                        &format!("{:#}", err),
                    ),
                ))
            }
        };
        PermissionCreateResponses::Ok(Json(PermissionCreateResponse { id }))
    }

    #[oai(path = "/permissions/:id", method = "put", tag = "ApiPermissionTags::Permission")]
    async fn modify_permission_api(
        &self,
        Path(id): Path<i32>,
        Json(json): Json<PermissionRequest>,
        state: Data<&Arc<AppState>>,
    ) -> PermissionUpdateResponses {
        let input = match permission_input(json) {
            Ok(val) => val,
            Err(err) => return PermissionUpdateResponses::BadRequest(Json(err)),
        };

        let mut service = PermissionService::new(
            PgPermissionStore::new(state.db.clone()),
            state.indexer(),
            state.publisher(),
        );
        let modified = match service.modify_permission(id, input).await {
            Ok(val) => val,
            Err(err) => {
                return PermissionUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.permission",
                        "modify_permission_api",
                        "modify_permission",
                        &format!("{:#}", err),
                    ),
                ))
            }
        };
        if !modified {
            return PermissionUpdateResponses::NotFound(Json(NotFoundResponse {
                message: format!("permission with id = {} not found", id),
            }));
        }
        PermissionUpdateResponses::Ok
    }
}
