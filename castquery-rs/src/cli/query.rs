//! Offline query commands: parse, validate, help-operators, url, sql.

use crate::cli::args::{ParseArgs, SearchArgs, SqlArgs, ValidateArgs};
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::query::{
    search_help, text_match_condition, validate_query_with, BuiltQuery, Filters, QueryBuilder,
    ValidationOptions, ValidationReport,
};
use crate::service::{build_search_url, prepare_search};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    /// Query text after operator extraction, without dates.
    pub query: String,
    pub filters: Filters,
    pub built: BuiltQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// What would be sent as `q` once `from:` is stripped.
    pub upstream_q: String,
}

pub fn parse(args: &ParseArgs) -> ParseResponse {
    let builder = QueryBuilder::new(&args.query);
    let built = builder.build_query();
    let upstream_q = QueryBuilder::remove_from_operator(&built.q);

    ParseResponse {
        query: builder.query().to_string(),
        filters: builder.filters().clone(),
        from: QueryBuilder::extract_from_username(&args.query),
        built,
        upstream_q,
    }
}

pub fn run_parse(args: &ParseArgs, output: &Output) -> Result<()> {
    output.print(&parse(args))
}

pub fn run_validate(args: &ValidateArgs, config: &Config, output: &Output) -> Result<ExitCode> {
    let options = ValidationOptions {
        calendar_dates: args.calendar_dates || config.calendar_dates,
    };
    let result = validate_query_with(&args.query, &options);
    output.print(&ValidationReport::from(&result))?;

    Ok(match result {
        Ok(()) => ExitCode::Success,
        Err(_) => ExitCode::InvalidQuery,
    })
}

pub fn run_help(output: &Output) {
    output.print_raw(search_help());
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub url: String,
    /// `from:` username that a live search would resolve first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved_from: Option<String>,
}

pub fn run_url(args: &SearchArgs, config: &Config, output: &Output) -> Result<()> {
    let params = args.to_params(config.default_limit);
    let prepared = prepare_search(&params, &config.validation_options())?;

    output.print(&UrlResponse {
        url: build_search_url(&config.base_url, &prepared.params),
        unresolved_from: prepared.pending_username,
    })
}

#[derive(Debug, Serialize)]
pub struct SqlResponse {
    pub term: String,
    pub condition: String,
}

pub fn run_sql(args: &SqlArgs, output: &Output) -> Result<()> {
    output.print(&SqlResponse {
        term: args.term.clone(),
        condition: text_match_condition(&args.term),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let response = parse(&ParseArgs {
            query: "gm from:alice channel:dev after:2025-01-01".to_string(),
        });
        assert_eq!(response.query, "gm from:alice");
        assert_eq!(response.built.q, "gm from:alice after:2025-01-01");
        assert_eq!(response.upstream_q, "gm after:2025-01-01");
        assert_eq!(response.from.as_deref(), Some("alice"));
        assert_eq!(response.filters.channel_id.as_deref(), Some("dev"));
    }
}
