use super::{
    show_card,
    ImageOptions,
    OutputFormat,
};
use crate::{
    client_data::ClientData,
    query::CardQuery,
};
use scryfall::CardIdKind;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "id", description = "look up a card by id")]
pub struct Options {
    #[argh(positional, description = "the id")]
    id: String,

    #[argh(
        option,
        default = "CardIdKind::Uuid",
        description = "the kind of id: uuid, mtgo, multiverse, arena, tcgplayer, or cardmarket"
    )]
    kind: CardIdKind,

    #[argh(
        option,
        default = "OutputFormat::Page",
        description = "the output format: page, thumbnail, text, or image"
    )]
    format: OutputFormat,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let query = CardQuery::ById {
        kind: options.kind,
        id: options.id,
    };

    show_card(client_data, query, options.format, ImageOptions::default()).await
}
