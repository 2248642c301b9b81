use crate::domain::model::{SearchOptions, Year};
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::validate_non_empty_string;

pub const MAX_LIMIT: usize = 50;

/// Raw query parameters as received; empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
    pub year: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchParams {
    /// Parses an `application/x-www-form-urlencoded` query string. Repeated keys
    /// keep the last value.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "q" => &mut params.q,
                "year" => &mut params.year,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            *slot = if value.is_empty() {
                None
            } else {
                Some(value.into_owned())
            };
        }
        params
    }
}

/// A request that passed validation; ready for the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub options: SearchOptions,
}

fn parse_count(field: &str, raw: Option<&str>, default: usize) -> Result<usize> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
            SearchError::validation(field, format!("{} must be a non-negative integer", field))
        }),
    }
}

fn parse_year(raw: Option<&str>) -> Result<Option<Year>> {
    match raw {
        None => Ok(None),
        // year 0000 means "no filter", not a partition named 0000
        Some(raw) => Year::from_dir_name(raw.trim())
            .map(|year| Some(year).filter(|y| y.0 != 0))
            .ok_or_else(|| SearchError::validation("year", "year must be a 4-digit year")),
    }
}

impl TryFrom<SearchParams> for SearchRequest {
    type Error = SearchError;

    fn try_from(params: SearchParams) -> Result<Self> {
        let year = parse_year(params.year.as_deref())?;
        let limit = parse_count("limit", params.limit.as_deref(), SearchOptions::DEFAULT_LIMIT)?;
        let offset = parse_count("offset", params.offset.as_deref(), 0)?;

        let keyword = params.q.unwrap_or_default();
        validate_non_empty_string("q", &keyword)
            .map_err(|_| SearchError::validation("q", "Search keyword (q) is required"))?;

        if limit > MAX_LIMIT {
            return Err(SearchError::validation(
                "limit",
                format!("Limit cannot be greater than {}", MAX_LIMIT),
            ));
        }

        Ok(Self {
            keyword,
            options: SearchOptions {
                year,
                limit,
                offset,
            },
        })
    }
}
