//! REST API Wrappers
//!
//! Frontend bindings to the todo backend, organized by domain.

mod todo;

use gloo_net::http::Response;
use serde::de::DeserializeOwned;
use todo_recurrence::{ApiError, ApiResponse};

pub use todo::*;

const UNKNOWN_SERVER_ERROR: &str = "요청을 처리하지 못했습니다.";

fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Read a response body and unwrap the `ApiResponse` envelope
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Option<T>, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    decode_envelope(status, &body)
}

fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    let ok = (200..300).contains(&status);
    if ok && body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) if ok => envelope.into_result(status),
        Ok(envelope) => match envelope.into_result(status) {
            // success flag on an error status still counts as a failure
            Ok(_) => Err(ApiError::Server { status, message: UNKNOWN_SERVER_ERROR.to_string() }),
            Err(err) => Err(err),
        },
        Err(err) if ok => Err(ApiError::Decode(err.to_string())),
        Err(_) => {
            let message = match body.trim() {
                "" => UNKNOWN_SERVER_ERROR.to_string(),
                text => text.to_string(),
            };
            Err(ApiError::Server { status, message })
        }
    }
}

fn require_data<T>(data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::Decode("response carried no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_recurrence::TodoResponse;

    #[test]
    fn test_decode_success_envelope() {
        let body = r#"{"success":true,"data":[{"todoId":1,"title":"장보기","priority":1,"isCompleted":"N"}]}"#;
        let todos: Option<Vec<TodoResponse>> = decode_envelope(200, body).unwrap();
        let todos = todos.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "장보기");
    }

    #[test]
    fn test_decode_empty_body() {
        let data: Option<()> = decode_envelope(204, "").unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_failure_envelope() {
        let body = r#"{"success":false,"message":"할 일을 찾을 수 없습니다."}"#;
        let err = decode_envelope::<TodoResponse>(404, body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server { status: 404, message: "할 일을 찾을 수 없습니다.".into() }
        );
    }

    #[test]
    fn test_decode_plain_error_body() {
        let err = decode_envelope::<TodoResponse>(502, "Bad Gateway").unwrap_err();
        assert_eq!(err, ApiError::Server { status: 502, message: "Bad Gateway".into() });
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_envelope::<TodoResponse>(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_require_data() {
        assert_eq!(require_data(Some(3)), Ok(3));
        assert!(matches!(require_data::<u8>(None), Err(ApiError::Decode(_))));
    }
}
