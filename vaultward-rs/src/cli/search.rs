//! Search commands: line-level with context, and one excerpt per note.

use crate::cli::args::{FindArgs, SearchArgs};
use crate::cli::output::Output;
use crate::error::Result;
use crate::types::{SearchAdvancedParams, SearchParams};
use crate::vault::Vault;

pub fn search(vault: &Vault, args: &SearchArgs, output: &Output) -> Result<()> {
    let params = SearchAdvancedParams {
        query: args.query.clone(),
        use_regex: args.regex,
        case_sensitive: args.case_sensitive,
        context_lines: args.context,
        limit: args.limit,
        offset: args.offset,
    };

    let results = vault.search_advanced(&params)?;
    if results.has_more {
        output.info(&format!(
            "{} files matched; use --offset {} for the next page",
            results.total_files,
            args.offset + results.results.len()
        ));
    }
    output.print(&results)
}

pub fn find(vault: &Vault, args: &FindArgs, output: &Output) -> Result<()> {
    let params = SearchParams {
        query: args.query.clone(),
        search_content: args.content,
        search_frontmatter: args.frontmatter,
        case_sensitive: args.case_sensitive,
        limit: args.limit,
    };

    let hits = vault.search(&params)?;
    output.print(&hits)
}
