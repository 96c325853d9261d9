use super::show_loading;
use crate::{
    client_data::ClientData,
    route::Route,
};
use anyhow::Context;
use tracing::info;

#[derive(Debug, argh::FromArgs)]
#[argh(subcommand, name = "open", description = "show a page by path")]
pub struct Options {
    #[argh(
        positional,
        description = "the page path, like /cards/m10/146/en, defaults to the home page"
    )]
    path: Option<String>,
}

pub async fn exec(client_data: &ClientData, options: Options) -> anyhow::Result<()> {
    let path = options.path.as_deref().unwrap_or("/");
    let route: Route = path
        .parse()
        .with_context(|| format!("failed to open \"{path}\""))?;
    info!(path = %route.path(), "opening page");

    show_loading();
    println!("{}", route.resolve(&client_data.query_client).await);

    Ok(())
}
