//! Search command implementation.

use crate::cli::args::SearchArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::Result;
use crate::service::{HttpBackend, SearchService};
use crate::types::SearchResponse;

pub async fn run(args: &SearchArgs, config: &Config, output: &Output) -> Result<()> {
    let backend = HttpBackend::new(config)?;
    let service = SearchService::new(backend).with_validation(config.validation_options());
    let params = args.to_params(config.default_limit);

    if args.casts {
        let casts = service.search_with_casts(&params).await?;
        output.info(&format!("{} casts", casts.len()));
        output.print(&SearchResponse::ok(casts))
    } else {
        let results = service.search(&params).await?;
        output.info(&format!("{} results", results.len()));
        output.print(&SearchResponse::ok(results))
    }
}
