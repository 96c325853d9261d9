use super::{
    show_card,
    ImageOptions,
    OutputFormat,
};
use crate::{
    client_data::ClientData,
    query::CardQuery,
};
use scryfall::LanguageCode;

#[derive(Debug, argh::FromArgs)]
#[argh(
    subcommand,
    name = "card",
    description = "look up a card by set code and collector number"
)]
pub struct Options {
    #[argh(positional, description = "the set code")]
    set: String,

    #[argh(positional, description = "the collector number")]
    collector_number: String,

    #[argh(
        positional,
        description = "the language of the printing, defaults to the configured language"
    )]
    lang: Option<LanguageCode>,

    #[argh(
        option,
        default = "OutputFormat::Page",
        description = "the output format: page, thumbnail, text, or image"
    )]
    format: OutputFormat,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let lang = options.lang.unwrap_or(client_data.config.default_lang);
    let query = CardQuery::SetNumber {
        set: options.set,
        collector_number: options.collector_number,
        lang: Some(lang),
    };

    show_card(client_data, query, options.format, ImageOptions::default()).await
}
