//! API response envelope and error mapping

use actix_web::{HttpResponse, http::StatusCode};
use serde::{Deserialize, Serialize};

use aviline_common::{
    AvilineError, PARAMETER_VALIDATE_ERROR, RESOURCE_NOT_FOUND, SERVER_ERROR,
};

/// API result wrapper
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }

    pub fn http_response(status: u16, code: i32, message: String, data: T) -> HttpResponse {
        HttpResponse::build(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
        .json(Self {
            code,
            message,
            data,
        })
    }
}

impl ApiResult<String> {
    /// Map a service error to its HTTP response
    pub fn http_error(err: AvilineError) -> HttpResponse {
        match err {
            AvilineError::NotFound(message) => Self::http_response(
                404,
                RESOURCE_NOT_FOUND.code,
                message,
                String::new(),
            ),
            AvilineError::IllegalArgument(message) => Self::http_response(
                400,
                PARAMETER_VALIDATE_ERROR.code,
                message,
                String::new(),
            ),
            AvilineError::Configuration(message) | AvilineError::Database(message) => {
                Self::http_response(500, SERVER_ERROR.code, message, String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let result = ApiResult::success(vec![1, 2, 3]);
        assert_eq!(result.code, 0);
        assert_eq!(result.message, "success");
        assert_eq!(result.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_error_status_mapping() {
        let response = ApiResult::http_error(AvilineError::not_found("news", 9));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiResult::http_error(AvilineError::IllegalArgument("bad geometry".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiResult::http_error(AvilineError::Configuration("rolled back".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
