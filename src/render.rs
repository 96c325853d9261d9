use crate::{
    query::QueryState,
    util::{
        ArcAnyhowError,
        AsciiTable,
    },
};
use scryfall::{
    Card,
    CardFace,
    Catalog,
    ImageSize,
    List,
    ManaCost,
    Ruling,
    Set,
};
use std::fmt;

/// How much of a card to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    /// A small preview linking to the card page
    Thumbnail,

    /// The full card page
    Page,
}

/// Get the message to show for a failed query.
///
/// Api errors show the server's explanation.
pub fn error_details(error: &ArcAnyhowError) -> String {
    match error.api_error() {
        Some(api_error) => api_error.details.clone(),
        None => error.to_string(),
    }
}

/// Render the state of a card query
pub fn render_query_state<T, F>(state: &QueryState<T>, render: F) -> String
where
    F: FnOnce(&T) -> String,
{
    match state {
        QueryState::Loading => "Loading...".to_string(),
        QueryState::Error(error) => {
            format!("Error while fetching card: {}", error_details(error))
        }
        QueryState::Success(data) => render(data),
        QueryState::Empty => "No card data available".to_string(),
    }
}

/// Render a card
pub fn render_card(card: &Card, variant: CardVariant) -> String {
    match variant {
        CardVariant::Thumbnail => Thumbnail(card).to_string(),
        CardVariant::Page => Page(card).to_string(),
    }
}

struct Thumbnail<'a>(&'a Card);

impl fmt::Display for Thumbnail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.0;
        writeln!(f, "{}", card.display_name())?;
        match card.image_uri(ImageSize::Normal) {
            Some(url) => writeln!(f, "  image: {url}")?,
            None => writeln!(f, "  image: none")?,
        }
        writeln!(f, "  link:  {}", card.page_path())
    }
}

struct Page<'a>(&'a Card);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let card = self.0;

        match card.mana_cost.as_deref().filter(|cost| !cost.is_empty()) {
            Some(mana_cost) => writeln!(f, "{}    {mana_cost}", card.display_name())?,
            None => writeln!(f, "{}", card.display_name())?,
        }

        if let Some(type_line) = card.display_type_line() {
            writeln!(f, "{type_line}")?;
        }

        match card.display_text() {
            Some(text) => writeln!(f, "{text}")?,
            None => {
                for face in card.card_faces.iter() {
                    write!(f, "{}", Face(face))?;
                }
            }
        }

        if let (Some(power), Some(toughness)) = (card.power.as_deref(), card.toughness.as_deref())
        {
            writeln!(f, "{power}/{toughness}")?;
        }
        if let Some(loyalty) = card.loyalty.as_deref() {
            writeln!(f, "Loyalty: {loyalty}")?;
        }
        if let Some(defense) = card.defense.as_deref() {
            writeln!(f, "Defense: {defense}")?;
        }

        writeln!(f)?;
        if let Some(url) = card.image_uri(ImageSize::Png) {
            writeln!(f, "Image: {url}")?;
        }
        writeln!(
            f,
            "Set: {} ({}) #{}, {}",
            card.set_name,
            card.set.to_uppercase(),
            card.collector_number,
            card.rarity
        )?;
        if let Some(artist) = card.artist.as_deref() {
            writeln!(f, "Artist: {artist}")?;
        }

        let prices: Vec<String> = [
            ("usd", card.prices.usd.as_deref()),
            ("usd foil", card.prices.usd_foil.as_deref()),
            ("eur", card.prices.eur.as_deref()),
            ("tix", card.prices.tix.as_deref()),
        ]
        .into_iter()
        .filter_map(|(currency, price)| Some(format!("{currency} {}", price?)))
        .collect();
        if !prices.is_empty() {
            writeln!(f, "Prices: {}", prices.join(", "))?;
        }

        if !card.legalities.is_empty() {
            let mut table = AsciiTable::new(2, 1);
            table.set_cell(0, 0, "Format");
            table.set_cell(1, 0, "Legality");
            for (format, legality) in card.legalities.iter() {
                table.push_row(&[format.as_str(), legality.as_str()]);
            }
            write!(f, "\nLegalities:\n{table}")?;
        }

        Ok(())
    }
}

struct Face<'a>(&'a CardFace);

impl fmt::Display for Face<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = self.0;
        writeln!(f)?;
        let name = face.printed_name.as_deref().unwrap_or(&face.name);
        if face.mana_cost.is_empty() {
            writeln!(f, "{name}")?;
        } else {
            writeln!(f, "{name}    {}", face.mana_cost)?;
        }
        if let Some(type_line) = face.printed_type_line.as_deref().or(face.type_line.as_deref()) {
            writeln!(f, "{type_line}")?;
        }
        if let Some(text) = face.printed_text.as_deref().or(face.oracle_text.as_deref()) {
            writeln!(f, "{text}")?;
        }
        Ok(())
    }
}

/// Render a card list as numbered thumbnails.
///
/// Warnings and unmatched collection identifiers follow the cards.
pub fn render_card_list(list: &List<Card>) -> String {
    CardList(list).to_string()
}

struct CardList<'a>(&'a List<Card>);

impl fmt::Display for CardList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0;

        for (i, card) in list.data.iter().enumerate() {
            write!(f, "{}) {}", i + 1, Thumbnail(card))?;
        }

        match list.total_cards {
            Some(total_cards) => {
                writeln!(f, "Showing {} of {total_cards} card(s)", list.data.len())?
            }
            None => writeln!(f, "Showing {} card(s)", list.data.len())?,
        }
        if list.has_more {
            writeln!(f, "There are more pages")?;
        }

        for warning in list.warnings.iter() {
            writeln!(f, "Warning: {warning}")?;
        }

        if !list.not_found.is_empty() {
            writeln!(f, "Not found:")?;
            for identifier in list.not_found.iter() {
                writeln!(f, "  {identifier}")?;
            }
        }

        Ok(())
    }
}

/// Render autocomplete results
pub fn render_catalog(catalog: &Catalog) -> String {
    catalog
        .data
        .iter()
        .map(|value| format!("{value}\n"))
        .collect()
}

/// Render card rulings, oldest first
pub fn render_rulings(rulings: &List<Ruling>) -> String {
    rulings
        .data
        .iter()
        .map(|ruling| {
            format!(
                "{} ({}): {}\n",
                ruling.published_at, ruling.source, ruling.comment
            )
        })
        .collect()
}

/// Render a set summary
pub fn render_set(set: &Set) -> String {
    let released = set
        .released_at
        .as_deref()
        .map(|released_at| format!("Released: {released_at}\n"))
        .unwrap_or_default();
    format!(
        "{} ({})\nType: {}\n{released}Cards: {}\nLink: {}\n",
        set.name,
        set.code.to_uppercase(),
        set.set_type,
        set.card_count,
        set.scryfall_uri
    )
}

/// Render a parsed mana cost
pub fn render_mana_cost(cost: &ManaCost) -> String {
    let colors: Vec<&str> = cost.colors.iter().map(|color| color.as_str()).collect();
    let colors = if colors.is_empty() {
        "colorless".to_string()
    } else {
        colors.join("")
    };
    format!("{} (mana value {}, {colors})\n", cost.cost, cost.cmc)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::query::test::CARD;

    fn card() -> Card {
        serde_json::from_str(CARD).expect("failed to parse card")
    }

    #[test]
    fn thumbnail() {
        let rendered = render_card(&card(), CardVariant::Thumbnail);
        assert!(rendered.starts_with("Lightning Bolt\n"));
        assert!(rendered.contains("/normal/front/"));
        assert!(rendered.contains("link:  /cards/m10/146/en"));
        assert!(!rendered.contains("Legalities"));
    }

    #[test]
    fn page() {
        let rendered = render_card(&card(), CardVariant::Page);
        assert!(rendered.starts_with("Lightning Bolt    {R}\nInstant\n"));
        assert!(rendered.contains("Lightning Bolt deals 3 damage to any target."));
        assert!(rendered.contains("/png/front/"));
        assert!(rendered.contains("Set: Magic 2010 (M10) #146, common"));
        assert!(rendered.contains("Prices: usd 1.80, usd foil 24.99, eur 1.45, tix 0.02"));
        assert!(rendered.contains("| modern "));
    }

    #[test]
    fn printed_fields_win() {
        let mut card = card();
        card.printed_name = Some("Blitzschlag".into());
        card.printed_type_line = Some("Spontanzauber".into());
        card.printed_text = Some("Blitzschlag fügt einem Ziel deiner Wahl 3 Schadenspunkte zu.".into());

        let rendered = render_card(&card, CardVariant::Page);
        assert!(rendered.starts_with("Blitzschlag    {R}\nSpontanzauber\nBlitzschlag fügt"));
    }

    #[test]
    fn query_states() {
        let loading: QueryState<Card> = QueryState::Loading;
        assert_eq!(render_query_state(&loading, |_| unreachable!()), "Loading...");

        let empty: QueryState<Card> = QueryState::Empty;
        assert_eq!(
            render_query_state(&empty, |_| unreachable!()),
            "No card data available"
        );

        let api_error: scryfall::ApiError = serde_json::from_str(include_str!(
            "../lib/scryfall-rs/test_data/error.json"
        ))
        .unwrap();
        let error = ArcAnyhowError::new(scryfall::Error::from(api_error).into());
        let failed: QueryState<Card> = QueryState::Error(error);
        assert_eq!(
            render_query_state(&failed, |_| unreachable!()),
            "Error while fetching card: No cards found matching “Not A Real Card”"
        );

        let other = ArcAnyhowError::new(anyhow::anyhow!("connection reset"));
        let failed: QueryState<Card> = QueryState::Error(other);
        assert_eq!(
            render_query_state(&failed, |_| unreachable!()),
            "Error while fetching card: connection reset"
        );

        let success = QueryState::Success(card());
        let rendered = render_query_state(&success, |card| {
            render_card(card, CardVariant::Thumbnail)
        });
        assert!(rendered.starts_with("Lightning Bolt"));
    }

    #[test]
    fn card_list() {
        let mut list = List::new();
        list.data.push(card());
        list.total_cards = Some(3);
        list.has_more = true;
        list.warnings.push("Invalid expression was ignored.".into());
        list.not_found.push(scryfall::CardIdentifier::name("Not A Card"));

        let rendered = render_card_list(&list);
        assert!(rendered.starts_with("1) Lightning Bolt\n"));
        assert!(rendered.contains("Showing 1 of 3 card(s)"));
        assert!(rendered.contains("There are more pages"));
        assert!(rendered.contains("Warning: Invalid expression was ignored."));
        assert!(rendered.contains("Not found:\n  \"Not A Card\""));
    }

    #[test]
    fn set_and_catalog() {
        let set: Set = serde_json::from_value(serde_json::json!({
            "object": "set",
            "id": "485d2468-18b4-4b5b-b9c0-4d7b8b1a2b1f",
            "code": "m10",
            "name": "Magic 2010",
            "set_type": "core",
            "released_at": "2009-07-17",
            "card_count": 249,
            "scryfall_uri": "https://scryfall.com/sets/m10",
            "uri": "https://api.scryfall.com/sets/m10",
            "icon_svg_uri": "https://svgs.scryfall.io/sets/m10.svg",
            "search_uri": "https://api.scryfall.com/cards/search?q=e%3Am10",
        }))
        .expect("failed to parse set");
        assert_eq!(
            render_set(&set),
            "Magic 2010 (M10)\nType: core\nReleased: 2009-07-17\nCards: 249\nLink: https://scryfall.com/sets/m10\n"
        );

        let catalog: Catalog = serde_json::from_value(serde_json::json!({
            "object": "catalog",
            "total_values": 2,
            "data": ["Lightning Bolt", "Lightning Helix"],
        }))
        .expect("failed to parse catalog");
        assert_eq!(render_catalog(&catalog), "Lightning Bolt\nLightning Helix\n");
    }
}
