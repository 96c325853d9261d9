use super::show_loading;
use crate::{
    client_data::ClientData,
    query::QueryState,
    render::{
        render_card_list,
        render_query_state,
    },
};
use anyhow::{
    ensure,
    Context,
};
use camino::Utf8PathBuf;
use scryfall::CardIdentifier;
use tracing::info;

#[derive(Debug, argh::FromArgs)]
#[argh(
    subcommand,
    name = "collection",
    description = "look up every card listed in a file"
)]
pub struct Options {
    #[argh(
        positional,
        description = "a file with one card per line: `name`, `name|set`, `set#number`, or `id:<uuid>`"
    )]
    path: Utf8PathBuf,
}

/// Parse one line of a card list
pub fn parse_identifier(line: &str) -> anyhow::Result<CardIdentifier> {
    let line = line.trim();

    if let Some(id) = line.strip_prefix("id:") {
        let id = id.trim();
        ensure!(!id.is_empty(), "missing id");
        return Ok(CardIdentifier::id(id));
    }

    if let Some((name, set)) = line.split_once('|') {
        let (name, set) = (name.trim(), set.trim());
        ensure!(!name.is_empty(), "missing card name");
        ensure!(!set.is_empty(), "missing set code");
        return Ok(CardIdentifier::name_set(name, set));
    }

    if let Some((set, collector_number)) = line.split_once('#') {
        let (set, collector_number) = (set.trim(), collector_number.trim());
        ensure!(!set.is_empty(), "missing set code");
        ensure!(!collector_number.is_empty(), "missing collector number");
        return Ok(CardIdentifier::set_collector_number(set, collector_number));
    }

    Ok(CardIdentifier::name(line))
}

/// Parse a card list.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_identifiers(text: &str) -> anyhow::Result<Vec<CardIdentifier>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            parse_identifier(line).with_context(|| format!("invalid card on line {}", i + 1))
        })
        .collect()
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(&options.path)
        .await
        .with_context(|| format!("failed to read `{}`", options.path))?;
    let identifiers = parse_identifiers(&text)?;
    info!("looking up {} card(s)", identifiers.len());

    let state = if identifiers.is_empty() {
        QueryState::Empty
    } else {
        show_loading();
        QueryState::from_result(client_data.query_client.collection(identifiers).await)
    };
    print!(
        "{}",
        render_query_state(&state, |entry| render_card_list(entry.data()))
    );

    Ok(())
}
