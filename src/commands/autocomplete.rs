use super::show_loading;
use crate::{
    client_data::ClientData,
    query::QueryState,
    render::{
        render_catalog,
        render_query_state,
    },
};

#[derive(Debug, argh::FromArgs)]
#[argh(
    subcommand,
    name = "autocomplete",
    description = "list card names starting with a string"
)]
pub struct Options {
    #[argh(positional, description = "the start of a card name")]
    query: String,

    #[argh(switch, description = "include tokens, art series, and other extras")]
    include_extras: bool,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    show_loading();
    let result = client_data
        .query_client
        .autocomplete(options.query, options.include_extras)
        .await;
    let state = QueryState::from_result(result).empty_if(|entry| entry.data().data.is_empty());
    print!(
        "{}",
        render_query_state(&state, |entry| render_catalog(entry.data()))
    );

    Ok(())
}
