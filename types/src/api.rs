//! Request/response bodies for the gateway's HTTP surface.

use crate::catalog::RewardItem;
use serde::{Deserialize, Serialize};

/// Body of `POST /games/openCase/{caseId}`.
///
/// `quantity` is kept as a raw JSON number so a fractional value can be
/// rejected as invalid input at the boundary instead of failing
/// deserialization with an opaque decode error.
#[derive(Clone, Debug, Deserialize)]
pub struct OpenCaseRequest {
    pub quantity: serde_json::Number,
}

/// Success body: the items won, in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenCaseResponse {
    pub items: Vec<RewardItem>,
}

/// Error body shared by every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
