use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Object, Deserialize, Serialize)]
pub struct InternalServerErrorResponse {
    pub module: String,
    pub function: String,
    pub step: String,
    pub message: String,
}

impl InternalServerErrorResponse {
    pub fn new(module: &str, function: &str, step: &str, message: &str) -> Self {
        error!(module, function, step, message, "internal server error");
        Self {
            module: module.to_string(),
            function: function.to_string(),
            step: step.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

#[derive(Object, Deserialize, Serialize)]
pub struct BadRequestResponse {
    pub message: String,
}
