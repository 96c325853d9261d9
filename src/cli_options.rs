use crate::commands;
use camino::Utf8PathBuf;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Look up, search, and render Magic: The Gathering cards from Scryfall")]
pub struct CliOptions {
    #[argh(
        option,
        description = "the path to the config",
        default = "Utf8PathBuf::from(\"./scryview.toml\")"
    )]
    pub config: Utf8PathBuf,

    #[argh(switch, short = 'v', description = "show all log messages on the stderr")]
    pub verbose: bool,

    #[argh(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand)]
pub enum SubCommand {
    Named(commands::named::Options),
    Search(commands::search::Options),
    Autocomplete(commands::autocomplete::Options),
    Random(commands::random::Options),
    Card(commands::card::Options),
    Id(commands::id::Options),
    Collection(commands::collection::Options),
    Rulings(commands::rulings::Options),
    Set(commands::set::Options),
    Mana(commands::mana::Options),
    Open(commands::open::Options),
    CacheStats(commands::cache_stats::Options),
    Shell(commands::shell::Options),
}
