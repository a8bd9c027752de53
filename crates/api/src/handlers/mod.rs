//! Handler functions, grouped by resource.

pub mod adopter;
pub mod animal;
pub mod city;
pub mod document;
pub mod report;
pub mod species;
pub mod vet;

use axum::http::HeaderMap;

use crate::router::OPERATOR_HEADER;

/// The acting user from the optional `x-operator` header, recorded in
/// animal event logs.
pub(crate) fn operator(headers: &HeaderMap) -> Option<String> {
    headers
        .get(OPERATOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
