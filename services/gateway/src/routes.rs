//! HTTP surface: the case-opening operation and health.

use crate::AppState;
use axum::extract::{Path, State as AxumState};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use casedrop_engine::{OpenError, MAX_OPEN_QUANTITY};
use casedrop_types::{CaseId, ErrorBody, OpenCaseRequest, OpenCaseResponse, UserId};
use tracing::error;

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

/// `POST /games/openCase/:caseId`
///
/// Session validation happens upstream; this trusts the `x-user-id`
/// header the proxy injects for authenticated requests.
pub(crate) async fn open_case(
    AxumState(state): AxumState<AppState>,
    Path(case_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<OpenCaseRequest>,
) -> Response {
    let Some(user_id) = caller_identity(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Missing user identity");
    };

    // Fractional quantities never reach the engine.
    let Some(quantity) = body.quantity.as_i64() else {
        return error_response(StatusCode::BAD_REQUEST, "Quantity to open must be an integer");
    };

    match state.opening.open(&user_id, &CaseId(case_id), quantity) {
        Ok(result) => Json(OpenCaseResponse {
            items: result.won_items,
        })
        .into_response(),
        Err(err) => {
            let (status, message) = open_error_parts(&err);
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error!(%err, "case opening failed");
            }
            error_response(status, message)
        }
    }
}

fn caller_identity(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(UserId::from)
}

fn open_error_parts(err: &OpenError) -> (StatusCode, &'static str) {
    match err {
        OpenError::CaseNotFound(_) => (StatusCode::NOT_FOUND, "Case not found"),
        OpenError::UserNotFound(_) => (StatusCode::NOT_FOUND, "User not found"),
        OpenError::InvalidQuantity(quantity) if *quantity > MAX_OPEN_QUANTITY => (
            StatusCode::BAD_REQUEST,
            "You can only open up to 5 cases at a time",
        ),
        OpenError::InvalidQuantity(_) => {
            (StatusCode::BAD_REQUEST, "You need to open at least 1 case")
        }
        OpenError::InsufficientFunds { .. } => (StatusCode::BAD_REQUEST, "Insufficient balance"),
        OpenError::EmptyCase(_) | OpenError::Store(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use casedrop_engine::StoreError;
    use casedrop_types::CaseId;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                open_error_parts(&OpenError::CaseNotFound(CaseId::from("x"))),
                (StatusCode::NOT_FOUND, "Case not found"),
            ),
            (
                open_error_parts(&OpenError::UserNotFound(UserId::from("x"))),
                (StatusCode::NOT_FOUND, "User not found"),
            ),
            (
                open_error_parts(&OpenError::InvalidQuantity(6)),
                (
                    StatusCode::BAD_REQUEST,
                    "You can only open up to 5 cases at a time",
                ),
            ),
            (
                open_error_parts(&OpenError::InvalidQuantity(0)),
                (StatusCode::BAD_REQUEST, "You need to open at least 1 case"),
            ),
            (
                open_error_parts(&OpenError::InsufficientFunds {
                    required: 30,
                    available: 5,
                }),
                (StatusCode::BAD_REQUEST, "Insufficient balance"),
            ),
            (
                open_error_parts(&OpenError::Store(StoreError::Unavailable("db".to_string()))),
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_caller_identity_requires_nonempty_header() {
        let mut headers = HeaderMap::new();
        assert!(caller_identity(&headers).is_none());

        headers.insert("x-user-id", "".parse().unwrap());
        assert!(caller_identity(&headers).is_none());

        headers.insert("x-user-id", "player-1".parse().unwrap());
        assert_eq!(caller_identity(&headers), Some(UserId::from("player-1")));
    }
}
