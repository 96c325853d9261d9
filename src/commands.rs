pub mod autocomplete;
pub mod cache_stats;
pub mod card;
pub mod collection;
pub mod id;
pub mod mana;
pub mod named;
pub mod open;
pub mod random;
pub mod rulings;
pub mod search;
pub mod set;
pub mod shell;

use crate::{
    cli_options::SubCommand,
    client_data::ClientData,
    query::{
        CardQuery,
        QueryState,
    },
    render::{
        render_card,
        render_query_state,
        CardVariant,
    },
};
use anyhow::{
    bail,
    Context,
};
use scryfall::ImageSize;
use std::str::FromStr;

#[derive(Debug)]
pub struct OutputFormatParseError(String);

impl std::fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not valid. Try 'page', 'thumbnail', 'text', or 'image'.",
            self.0
        )
    }
}

/// How a single card is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The full card page
    Page,

    /// Name, image and link
    Thumbnail,

    /// Scryfall's plain text rendering
    Text,

    /// The resolved image url
    Image,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p" | "page" => Ok(Self::Page),
            "t" | "thumbnail" => Ok(Self::Thumbnail),
            "text" => Ok(Self::Text),
            "i" | "image" => Ok(Self::Image),
            s => Err(OutputFormatParseError(s.into())),
        }
    }
}

/// Image options for single card output
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageOptions {
    pub back_face: bool,
    pub version: Option<ImageSize>,
}

/// Tell the user a query is running.
///
/// This goes to the stderr so piped output only has results.
pub(crate) fn show_loading() {
    eprintln!(
        "{}",
        render_query_state::<(), _>(&QueryState::Loading, |_| String::new())
    );
}

/// Fetch a single card and print it in the given format
pub(crate) async fn show_card(
    client_data: &ClientData,
    query: CardQuery,
    format: OutputFormat,
    image_options: ImageOptions,
) -> anyhow::Result<()> {
    let query_client = &client_data.query_client;

    show_loading();
    match format {
        OutputFormat::Page | OutputFormat::Thumbnail => {
            let variant = if format == OutputFormat::Page {
                CardVariant::Page
            } else {
                CardVariant::Thumbnail
            };
            let state = QueryState::from_result(query_client.card(query).await);
            println!(
                "{}",
                render_query_state(&state, |entry| render_card(entry.data(), variant))
            );
        }
        OutputFormat::Text => {
            let text = query_client
                .card_text(&query)
                .await
                .context("failed to get card text")?;
            println!("{text}");
        }
        OutputFormat::Image => {
            let url = query_client
                .card_image(&query, image_options.back_face, image_options.version)
                .await
                .context("failed to get card image")?;
            println!("{url}");
        }
    }

    Ok(())
}

/// Run a command.
///
/// Shells cannot be started from here.
pub async fn run(client_data: &ClientData, subcommand: SubCommand) -> anyhow::Result<()> {
    match subcommand {
        SubCommand::Named(options) => named::exec(client_data, options).await,
        SubCommand::Search(options) => search::exec(client_data, options).await,
        SubCommand::Autocomplete(options) => autocomplete::exec(client_data, options).await,
        SubCommand::Random(options) => random::exec(client_data, options).await,
        SubCommand::Card(options) => card::exec(client_data, options).await,
        SubCommand::Id(options) => id::exec(client_data, options).await,
        SubCommand::Collection(options) => collection::exec(client_data, options).await,
        SubCommand::Rulings(options) => rulings::exec(client_data, options).await,
        SubCommand::Set(options) => set::exec(client_data, options).await,
        SubCommand::Mana(options) => mana::exec(client_data, options).await,
        SubCommand::Open(options) => open::exec(client_data, options).await,
        SubCommand::CacheStats(options) => cache_stats::exec(client_data, options),
        SubCommand::Shell(_) => bail!("already in a shell"),
    }
}
