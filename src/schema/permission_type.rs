use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::InternalServerErrorResponse;

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct PermissionTypeResponse {
    pub id: i32,
    #[oai(rename = "descripcion")]
    #[serde(rename = "descripcion")]
    pub description: String,
}

#[derive(ApiResponse)]
pub enum PermissionTypeAllResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<PermissionTypeResponse>>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
