use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::AppError;
use crate::validate::FieldError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// `page` (default 1) and `per_page` (default 25, at most 100) from the query string.
pub fn pagination(query: &HashMap<String, String>) -> (i64, i64) {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .get("per_page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(25)
        .clamp(1, 100);
    (page, per_page)
}

pub fn paginate<T: Serialize>(all: Vec<T>, page: i64, per_page: i64) -> PaginatedResponse<T> {
    let total = all.len() as i64;
    let offset = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
    let take = usize::try_from(per_page).unwrap_or(0);
    let items = all.into_iter().skip(offset).take(take).collect();
    PaginatedResponse {
        items,
        page,
        per_page,
        total,
    }
}

/// Parse an optional filter value from the query string. Empty means no filter;
/// an unknown value is a 400 rather than being silently ignored.
pub fn query_filter<T>(query: &HashMap<String, String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
{
    match query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            AppError::Validation(vec![FieldError::new(key, format!("Unknown value '{raw}'"))])
        }),
    }
}

/// Parse a snake_case enum value through its serde representation.
pub fn query_enum<T>(query: &HashMap<String, String>, key: &str) -> Result<Option<T>, AppError>
where
    T: serde::de::DeserializeOwned,
{
    match query.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.to_string()))
            .map(Some)
            .map_err(|_| AppError::Validation(vec![FieldError::new(key, format!("Unknown value '{raw}'"))])),
    }
}
