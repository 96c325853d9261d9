use super::show_loading;
use crate::{
    client_data::ClientData,
    render::render_mana_cost,
};
use anyhow::Context;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "mana", description = "parse a mana cost")]
pub struct Options {
    #[argh(positional, description = "the mana cost, like {{2}}{{W}}{{U}}")]
    cost: String,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    show_loading();
    let cost = client_data
        .query_client
        .api()
        .parse_mana(&options.cost)
        .await
        .context("failed to parse mana cost")?;
    print!("{}", render_mana_cost(&cost));

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use argh::FromArgs;

    #[test]
    fn cost_argument() {
        let early_exit = Options::from_args(&["mana"], &["--help"]).unwrap_err();
        assert!(early_exit.output.contains("like {2}{W}{U}"));

        let options = Options::from_args(&["mana"], &["{2}{W}{U}"]).unwrap();
        assert_eq!(options.cost, "{2}{W}{U}");
    }
}
