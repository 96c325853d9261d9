use super::show_loading;
use crate::{
    client_data::ClientData,
    query::QueryState,
    render::{
        render_query_state,
        render_rulings,
    },
};

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "rulings", description = "get the rulings for a card")]
pub struct Options {
    #[argh(positional, description = "the scryfall id of the card")]
    id: String,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    show_loading();
    let result = client_data.query_client.rulings(options.id).await;
    let state = QueryState::from_result(result).empty_if(|entry| entry.data().is_empty());
    print!(
        "{}",
        render_query_state(&state, |entry| render_rulings(entry.data()))
    );

    Ok(())
}
