use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse};

/// Body of both create and update.
#[derive(Object, Deserialize, Serialize)]
pub struct PermissionRequest {
    #[oai(rename = "nombreEmpleado")]
    #[serde(rename = "nombreEmpleado")]
    pub employee_first_name: String,
    #[oai(rename = "apellidoEmpleado")]
    #[serde(rename = "apellidoEmpleado")]
    pub employee_last_name: String,
    #[oai(rename = "tipoPermiso")]
    #[serde(rename = "tipoPermiso")]
    pub permission_type_id: i32,
    /// RFC 3339 date-time, naive date-time (UTC) or `YYYY-MM-DD`.
    #[oai(rename = "fechaPermiso")]
    #[serde(rename = "fechaPermiso")]
    pub permission_date: String,
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct PermissionResponse {
    pub id: i32,
    #[oai(rename = "nombreEmpleado")]
    #[serde(rename = "nombreEmpleado")]
    pub employee_first_name: String,
    #[oai(rename = "apellidoEmpleado")]
    #[serde(rename = "apellidoEmpleado")]
    pub employee_last_name: String,
    #[oai(rename = "tipoPermiso")]
    #[serde(rename = "tipoPermiso")]
    pub permission_type_id: i32,
    #[oai(rename = "tipoPermisoDescripcion")]
    #[serde(rename = "tipoPermisoDescripcion")]
    pub permission_type_description: String,
    #[oai(rename = "fechaPermiso")]
    #[serde(rename = "fechaPermiso")]
    pub permission_date: String,
}

#[derive(ApiResponse)]
pub enum PermissionAllResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<PermissionResponse>>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize, Serialize)]
pub struct PermissionCreateResponse {
    pub id: i32,
}

#[derive(ApiResponse)]
pub enum PermissionCreateResponses {
    #[oai(status = 200)]
    Ok(Json<PermissionCreateResponse>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum PermissionUpdateResponses {
    #[oai(status = 200)]
    Ok,

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
