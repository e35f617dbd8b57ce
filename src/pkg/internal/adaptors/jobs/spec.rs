use serde::Serialize;

use crate::conf::SearchDefaults;

/// One job-search request, already merged with configured defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub page: u32,
    pub limit: u32,
    pub posted_at_max_age_days: u32,
    pub order_field: String,
    pub order_desc: bool,
    pub blur_company_data: bool,
    pub include_total_results: bool,
    pub job_country_code_or: Vec<String>,

    pub job_title_search: Option<String>,
    pub job_description_search: Option<String>,
    pub job_company_name_search: Option<String>,
    pub job_location_search: Option<String>,
    pub job_category_ids_or: Vec<String>,
    pub job_type_ids_or: Vec<String>,
    pub job_tag_ids_or: Vec<String>,
    pub job_must_not_have_tag_ids: Vec<String>,
    pub job_must_have_tag_ids: Vec<String>,
    pub job_location_radius_miles: Option<i64>,
}

impl SearchQuery {
    pub fn new(defaults: &SearchDefaults) -> Self {
        SearchQuery {
            page: 0,
            limit: defaults.default_limit,
            posted_at_max_age_days: defaults.default_max_age_days,
            order_field: defaults.default_order_field.clone(),
            order_desc: true,
            blur_company_data: false,
            include_total_results: false,
            job_country_code_or: defaults.default_country_codes.clone(),
            job_title_search: None,
            job_description_search: None,
            job_company_name_search: None,
            job_location_search: None,
            job_category_ids_or: Vec::new(),
            job_type_ids_or: Vec::new(),
            job_tag_ids_or: Vec::new(),
            job_must_not_have_tag_ids: Vec::new(),
            job_must_have_tag_ids: Vec::new(),
            job_location_radius_miles: None,
        }
    }

    pub fn payload(&self) -> SearchPayload<'_> {
        SearchPayload {
            page: self.page,
            limit: self.limit,
            posted_at_max_age_days: self.posted_at_max_age_days,
            order_by: [OrderBy {
                desc: self.order_desc,
                field: &self.order_field,
            }],
            blur_company_data: self.blur_company_data,
            include_total_results: self.include_total_results,
            job_country_code_or: &self.job_country_code_or,
            job_title_search: non_empty(&self.job_title_search),
            job_description_search: non_empty(&self.job_description_search),
            job_company_name_search: non_empty(&self.job_company_name_search),
            job_location_search: non_empty(&self.job_location_search),
            job_category_ids_or: &self.job_category_ids_or,
            job_type_ids_or: &self.job_type_ids_or,
            job_tag_ids_or: &self.job_tag_ids_or,
            job_must_not_have_tag_ids: &self.job_must_not_have_tag_ids,
            job_must_have_tag_ids: &self.job_must_have_tag_ids,
            job_location_radius_miles: self.job_location_radius_miles,
        }
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn is_empty(v: &&[String]) -> bool {
    v.is_empty()
}

#[derive(Debug, Serialize)]
pub struct OrderBy<'a> {
    pub desc: bool,
    pub field: &'a str,
}

/// Body sent to the jobs-search API. Unset filters are left out of the JSON
/// entirely; the API treats a missing key differently from `null`.
#[derive(Debug, Serialize)]
pub struct SearchPayload<'a> {
    page: u32,
    limit: u32,
    posted_at_max_age_days: u32,
    order_by: [OrderBy<'a>; 1],
    blur_company_data: bool,
    include_total_results: bool,
    job_country_code_or: &'a [String],

    #[serde(skip_serializing_if = "Option::is_none")]
    job_title_search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_description_search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_company_name_search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_location_search: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    job_category_ids_or: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    job_type_ids_or: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    job_tag_ids_or: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    job_must_not_have_tag_ids: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    job_must_have_tag_ids: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    job_location_radius_miles: Option<i64>,
}
