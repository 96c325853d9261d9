use crate::client_data::ClientData;
use std::fmt::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, argh::FromArgs)]
#[argh(subcommand, name = "cache-stats", description = "get cache usage stats")]
pub struct Options {}

pub fn exec(client_data: &ClientData, _options: Options) -> anyhow::Result<()> {
    info!("reporting all cache stats");

    let stats = client_data.generate_cache_stats();
    let mut output = String::new();
    for (stat_family_name, stat_family) in stats.into_iter() {
        writeln!(&mut output, "{stat_family_name}:")?;
        for (stat_name, stat) in stat_family.iter() {
            writeln!(&mut output, "  {stat_name}: {stat} item(s)")?;
        }
    }
    print!("{output}");

    Ok(())
}
