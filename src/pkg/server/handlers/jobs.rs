use axum::{Json, extract::State};
use axum_extra::extract::Query;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    conf::SearchDefaults,
    pkg::{internal::adaptors::jobs::spec::SearchQuery, server::state::AppState},
    prelude::Result,
};

/// Query string of `GET /jobs/search`. List filters are passed as repeated
/// keys, e.g. `job_country_code_or=CA&job_country_code_or=US`.
#[derive(Deserialize, Default, Debug)]
pub struct SearchParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub posted_at_max_age_days: Option<u32>,
    pub order_desc: Option<bool>,
    pub order_field: Option<String>,
    pub blur_company_data: Option<bool>,
    pub include_total_results: Option<bool>,
    pub job_title_search: Option<String>,
    pub job_description_search: Option<String>,
    pub job_company_name_search: Option<String>,
    pub job_location_search: Option<String>,
    #[serde(default)]
    pub job_country_code_or: Vec<String>,
    #[serde(default)]
    pub job_category_ids_or: Vec<String>,
    #[serde(default)]
    pub job_type_ids_or: Vec<String>,
    #[serde(default)]
    pub job_tag_ids_or: Vec<String>,
    #[serde(default)]
    pub job_must_not_have_tag_ids: Vec<String>,
    #[serde(default)]
    pub job_must_have_tag_ids: Vec<String>,
    pub job_location_radius_miles: Option<i64>,
}

impl SearchParams {
    pub fn into_query(self, defaults: &SearchDefaults) -> SearchQuery {
        let mut query = SearchQuery::new(defaults);
        if let Some(page) = self.page {
            query.page = page;
        }
        if let Some(limit) = self.limit {
            query.limit = limit;
        }
        if let Some(days) = self.posted_at_max_age_days {
            query.posted_at_max_age_days = days;
        }
        if let Some(desc) = self.order_desc {
            query.order_desc = desc;
        }
        if let Some(field) = self.order_field {
            query.order_field = field;
        }
        if let Some(blur) = self.blur_company_data {
            query.blur_company_data = blur;
        }
        if let Some(total) = self.include_total_results {
            query.include_total_results = total;
        }
        if !self.job_country_code_or.is_empty() {
            query.job_country_code_or = self.job_country_code_or;
        }
        query.job_title_search = self.job_title_search;
        query.job_description_search = self.job_description_search;
        query.job_company_name_search = self.job_company_name_search;
        query.job_location_search = self.job_location_search;
        query.job_category_ids_or = self.job_category_ids_or;
        query.job_type_ids_or = self.job_type_ids_or;
        query.job_tag_ids_or = self.job_tag_ids_or;
        query.job_must_not_have_tag_ids = self.job_must_not_have_tag_ids;
        query.job_must_have_tag_ids = self.job_must_have_tag_ids;
        query.job_location_radius_miles = self.job_location_radius_miles;
        query
    }
}

/// Query string of the older `GET /jobs` endpoint.
#[derive(Deserialize, Default, Debug)]
pub struct LegacySearchParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub max_age_days: Option<u32>,
    pub country_code: Option<String>,
    pub keyword: Option<String>,
}

impl LegacySearchParams {
    pub fn into_query(self, defaults: &SearchDefaults) -> SearchQuery {
        SearchParams {
            page: self.page,
            limit: self.limit,
            posted_at_max_age_days: self.max_age_days,
            job_country_code_or: self.country_code.into_iter().collect(),
            job_title_search: self.keyword,
            ..Default::default()
        }
        .into_query(defaults)
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>> {
    let query = params.into_query(&state.search_defaults);
    let results = state.jobs.search(&query).await?;
    Ok(Json(results))
}

pub async fn legacy_search(
    State(state): State<AppState>,
    Query(params): Query<LegacySearchParams>,
) -> Result<Json<Value>> {
    let query = params.into_query(&state.search_defaults);
    let results = state.jobs.search(&query).await?;
    Ok(Json(results))
}
