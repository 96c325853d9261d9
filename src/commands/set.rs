use super::show_loading;
use crate::{
    client_data::ClientData,
    render::render_set,
};
use anyhow::Context;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "set", description = "get a set by code")]
pub struct Options {
    #[argh(positional, description = "the set code")]
    code: String,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    show_loading();
    let set = client_data
        .query_client
        .api()
        .set(&options.code)
        .await
        .with_context(|| format!("failed to get set \"{}\"", options.code))?;
    print!("{}", render_set(&set));

    Ok(())
}
