use anyhow::{Context, Result};
use clap::Args;
use contest_bot_libs::{BotConfig, Dispatcher, MessageHandler};

/// Replies to a message from the command line, the same way the webhook does.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Message text, e.g. `next` or `list`
    #[arg(default_value = "")]
    message: String,
}

pub async fn run(args: QueryArgs) -> Result<()> {
    let config = BotConfig::from_env().context("invalid bot configuration")?;
    let dispatcher = Dispatcher::from_config(config)
        .context("couldn't create HTTP client for Codeforces API")?;

    let reply = dispatcher.handle(&args.message).await;
    println!("{}", reply);

    Ok(())
}
