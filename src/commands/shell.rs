use crate::{
    cli_options::SubCommand,
    client_data::ClientData,
};
use anyhow::{
    ensure,
    Context,
};
use argh::FromArgs;
use tokio::io::{
    AsyncBufReadExt,
    AsyncWriteExt,
    BufReader,
};
use tracing::{
    error,
    info,
};

#[derive(Debug, Clone, Copy, argh::FromArgs)]
#[argh(
    subcommand,
    name = "shell",
    description = "run commands from the stdin, keeping the query cache between them"
)]
pub struct Options {}

/// A line of shell input
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Commands run in the shell. Use `exit` or `quit` to leave.")]
struct ShellLine {
    #[argh(subcommand)]
    subcommand: SubCommand,
}

/// Split a line into arguments.
///
/// Arguments are split on whitespace.
/// An argument that starts with a single or double quote runs until the matching quote.
fn split_line(line: &str) -> anyhow::Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => {
                quote = None;
            }
            Some(_) => current.push(c),
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None if !in_arg && (c == '"' || c == '\'') => {
                quote = Some(c);
                in_arg = true;
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    ensure!(quote.is_none(), "unterminated quote");
    if in_arg {
        args.push(current);
    }

    Ok(args)
}

async fn run_line(client_data: &ClientData, args: &[String]) -> anyhow::Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let line = match ShellLine::from_args(&["scryview"], &args) {
        Ok(line) => line,
        Err(early_exit) => {
            match early_exit.status {
                Ok(()) => println!("{}", early_exit.output),
                Err(()) => eprintln!("{}", early_exit.output),
            }
            return Ok(());
        }
    };

    crate::commands::run(client_data, line.subcommand).await
}

pub async fn exec(client_data: &ClientData, _options: Options) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    eprintln!("Type a command, `help`, or `exit`.");
    loop {
        stdout
            .write_all(b"> ")
            .await
            .context("failed to write prompt")?;
        stdout.flush().await.context("failed to flush stdout")?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read line")?,
            result = tokio::signal::ctrl_c() => {
                result.context("failed to set ctrl-c handler")?;
                None
            }
        };
        let line = match line {
            Some(line) => line,
            None => break,
        };

        let args = match split_line(&line) {
            Ok(args) => args,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };
        match args.first().map(String::as_str) {
            None => continue,
            Some("exit" | "quit") => break,
            Some(_) => {}
        }

        if let Err(error) = run_line(client_data, &args).await {
            error!("{error:?}");
        }

        client_data.query_client.trim();
    }

    info!("leaving shell");

    Ok(())
}
