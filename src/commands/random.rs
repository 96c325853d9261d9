use super::{
    show_card,
    ImageOptions,
    OutputFormat,
};
use crate::{
    client_data::ClientData,
    query::CardQuery,
};

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "random", description = "get a random card")]
pub struct Options {
    #[argh(positional, description = "only pick cards matching this search query")]
    query: Option<String>,

    #[argh(
        option,
        default = "OutputFormat::Thumbnail",
        description = "the output format: page, thumbnail, text, or image"
    )]
    format: OutputFormat,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let query = CardQuery::Random {
        query: options.query,
    };

    show_card(client_data, query, options.format, ImageOptions::default()).await
}
