mod answers;
mod config;
mod db;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use teloxide::prelude::*;
use tracing::info;

use answers::{AnswerQueries, AnswerStore, Endpoints, Handlers, InboundMessage, TelegramSender};
use config::Config;

/// Telegram bot answering text questions from a stored question/answer table.
#[derive(Debug, Parser)]
#[command(name = "faqbot")]
struct Cli {
    /// Apply pending schema migrations and exit.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    let _log_guard = logging::init(&config.logger).context("initializing logging")?;

    let pool = db::connect(&config.database)
        .await
        .context("connecting to the database")?;

    if cli.migrate {
        let applied = db::run_migrations(&pool)
            .await
            .context("applying migrations")?;
        println!("{applied} migrations applied");
        return Ok(());
    }

    info!(
        host = %config.database.host,
        dialect = %config.database.dialect,
        "starting faqbot"
    );

    let store = AnswerStore::new(pool);
    let queries = Arc::new(AnswerQueries::new(store));
    let endpoints = Endpoints::new(queries);

    let bot = Bot::new(&config.telegram.token);
    let sender = Arc::new(TelegramSender::new(bot.clone()));
    let handlers = Arc::new(Handlers::new(endpoints, sender));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(on_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handlers])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// One branch for plain-text messages; everything else is ignored.
async fn on_text(msg: Message, handlers: Arc<Handlers>) -> ResponseResult<()> {
    if msg.text().is_none() {
        return Ok(());
    }
    let inbound = inbound_from_telegram(&msg);
    handlers.text_question(&inbound).await;
    Ok(())
}

fn inbound_from_telegram(msg: &Message) -> InboundMessage {
    let user = msg.from.as_ref();
    InboundMessage {
        message_id: msg.id.0 as i64,
        chat_id: msg.chat.id.0,
        // Channel posts have no sender; fall back to the chat itself.
        sender_id: user.map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0),
        username: user
            .and_then(|u| u.username.as_deref())
            .unwrap_or_else(|| user.map(|u| u.first_name.as_str()).unwrap_or("unknown"))
            .to_string(),
        text: msg.text().unwrap_or("").to_string(),
    }
}
