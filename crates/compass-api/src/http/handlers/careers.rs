//! GET /careers?search=&category= - Static career browser.

use axum::Json;
use serde::Deserialize;

use compass_core::careers::catalog::{search, CareerSearch};

use crate::http::extract::ApiQuery;

#[derive(Debug, Default, Deserialize)]
pub struct CareerQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

pub async fn list_careers(ApiQuery(query): ApiQuery<CareerQuery>) -> Json<CareerSearch> {
    Json(search(query.search.as_deref(), query.category.as_deref()))
}
