use std::sync::Arc;

use anyhow::Context;
use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use regbot_core::{
    commands::Command, config::Config, messaging::port::MessagingPort, registry::UserRegistry,
    service::BotService,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BotService>,
}

/// Run the long-polling receive loop until a termination signal arrives.
///
/// A rejected token fails here, before the loop starts.
pub async fn run_polling(cfg: Arc<Config>, registry: UserRegistry) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    let me = bot
        .get_me()
        .await
        .context("telegram rejected the bot token")?;
    tracing::info!("regbot started: @{}", me.username());

    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        tracing::warn!("failed to publish command list: {e}");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        service: Arc::new(BotService::new(registry, messenger)),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            tracing::debug!(update = ?upd.id, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "an error has occurred in an update handler",
        ))
        .build();

    let shutdown = dispatcher.shutdown_token();
    tokio::spawn(async move {
        wait_for_termination().await;
        tracing::info!("stopping bot...");
        match shutdown.shutdown() {
            Ok(done) => done.await,
            Err(e) => tracing::warn!("dispatcher was not running: {e}"),
        }
    });

    tracing::info!("bot polling started, waiting for messages");
    dispatcher.dispatch().await;
    tracing::info!("bot stopped cleanly");

    Ok(())
}

fn bot_commands() -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|(_, name, desc)| BotCommand::new(*name, *desc))
        .collect()
}

async fn wait_for_termination() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
                return;
            }
            Err(e) => tracing::warn!("failed to install SIGTERM handler: {e}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal source we never request shutdown.
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
