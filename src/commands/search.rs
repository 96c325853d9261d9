use super::show_loading;
use crate::{
    client_data::ClientData,
    query::{
        QueryState,
        SearchOptions,
    },
    render::{
        render_card_list,
        render_query_state,
    },
};
use anyhow::Context;
use scryfall::{
    SortDirection,
    SortOrder,
    UniqueMode,
};
use std::num::NonZeroU32;
use tracing::info;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "search", description = "search for cards")]
pub struct Options {
    #[argh(positional, description = "the search query, in scryfall syntax")]
    query: String,

    #[argh(option, description = "how to collapse duplicates: cards, art, or prints")]
    unique: Option<UniqueMode>,

    #[argh(option, description = "the field to sort by")]
    order: Option<SortOrder>,

    #[argh(option, description = "the sort direction: auto, asc, or desc")]
    dir: Option<SortDirection>,

    #[argh(option, description = "the page to get, starting at 1")]
    page: Option<NonZeroU32>,

    #[argh(switch, description = "get every page")]
    all: bool,

    #[argh(switch, description = "print the results as csv")]
    csv: bool,

    #[argh(switch, description = "include tokens, art series, and other extras")]
    include_extras: bool,

    #[argh(switch, description = "include printings in every language")]
    include_multilingual: bool,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let search_options = SearchOptions {
        query: options.query,
        unique: options.unique,
        order: options.order,
        dir: options.dir,
        include_extras: options.include_extras,
        include_multilingual: options.include_multilingual,
        page: options.page,
        all_pages: options.all,
    };
    info!(query = %search_options.query, "searching");

    show_loading();
    if options.csv {
        let csv = client_data
            .query_client
            .search_csv(&search_options)
            .await
            .context("failed to search")?;
        print!("{csv}");
        return Ok(());
    }

    let state = QueryState::from_result(client_data.query_client.search(search_options).await)
        .empty_if(|entry| entry.data().is_empty());
    println!(
        "{}",
        render_query_state(&state, |entry| render_card_list(entry.data()))
    );

    Ok(())
}
