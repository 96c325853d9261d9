use super::{
    show_card,
    ImageOptions,
    OutputFormat,
};
use crate::{
    client_data::ClientData,
    query::CardQuery,
};
use scryfall::{
    ImageSize,
    NameMethod,
};
use tracing::info;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "named", description = "look up a card by name")]
pub struct Options {
    #[argh(positional, description = "the card name")]
    name: String,

    #[argh(switch, description = "match the name loosely instead of exactly")]
    fuzzy: bool,

    #[argh(option, description = "only look in the set with this code")]
    set: Option<String>,

    #[argh(
        option,
        default = "OutputFormat::Page",
        description = "the output format: page, thumbnail, text, or image"
    )]
    format: OutputFormat,

    #[argh(option, description = "the image size, for image output")]
    version: Option<ImageSize>,

    #[argh(switch, description = "use the back face, for image output")]
    back: bool,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let method = if options.fuzzy {
        NameMethod::Fuzzy
    } else {
        NameMethod::Exact
    };
    info!(name = %options.name, ?method, "looking up card by name");

    let query = CardQuery::Named {
        name: options.name,
        method,
        set: options.set,
    };
    let image_options = ImageOptions {
        back_face: options.back,
        version: options.version,
    };

    show_card(client_data, query, options.format, image_options).await
}
