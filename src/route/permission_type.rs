use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::{
    repository::permission_type::get_all_permission_type,
    schema::{
        common::InternalServerErrorResponse,
        permission_type::{PermissionTypeAllResponses, PermissionTypeResponse},
    },
    AppState,
};

#[derive(Tags)]
enum ApiPermissionTypeTags {
    PermissionType,
}

pub struct ApiPermissionType;

#[OpenApi]
impl ApiPermissionType {
    #[oai(
        path = "/permission-types",
        method = "get",
        tag = "ApiPermissionTypeTags::PermissionType"
    )]
    async fn get_all_permission_type_api(
        &self,
        state: Data<&Arc<AppState>>,
    ) -> PermissionTypeAllResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PermissionTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.permission_type",
                        "get_all_permission_type_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let data = match get_all_permission_type(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return PermissionTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.permission_type",
                        "get_all_permission_type_api",
                        "get_all_permission_type",
                        &err.to_string(),
                    ),
                ))
            }
        };

        PermissionTypeAllResponses::Ok(Json(
            data.into_iter()
                .map(|x| PermissionTypeResponse {
                    id: x.id,
                    description: x.description,
                })
                .collect(),
        ))
    }
}
