use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use signloop::config::{source::PlaylistSource, PlayerConfig};
use signloop::logging;
use signloop::platform::create_platform_path_resolver;
use signloop::render::{HeadlessMediaSurface, HeadlessVectorSurface, RenderDispatcher};
use signloop::scheduler::{
    command_channel, spawn_ticker, CommandSender, PlayerCommand, Scheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PlayerConfig::from_args()?;
    logging::init_logging_with_debug(config.debug)?;
    logging::log_startup_info(&config);

    let dispatcher = RenderDispatcher::new(
        Box::new(HeadlessMediaSurface::default()),
        Box::new(HeadlessVectorSurface::default()),
        create_platform_path_resolver(),
        config.base_dir.clone(),
    );

    let mut scheduler = Scheduler::new(
        PlaylistSource::new(config.playlist_path.clone()),
        dispatcher,
    );
    scheduler.start().await;

    let (commands, command_rx) = command_channel();
    spawn_ticker(commands.clone(), config.tick_interval);
    spawn_input_task(commands.clone());
    spawn_shutdown_task(commands);

    scheduler.run(command_rx).await;
    info!("player stopped");
    Ok(())
}

/// Map host input onto scheduler commands: `n`/`next` skips to the next
/// item, `q`/`quit` closes the player.
fn spawn_input_task(commands: CommandSender) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let command = match line.trim() {
                "n" | "next" => PlayerCommand::Skip,
                "q" | "quit" => PlayerCommand::Shutdown,
                "" => continue,
                other => {
                    warn!(input = other, "unrecognized command (use 'next' or 'quit')");
                    continue;
                }
            };
            if commands.send(command).is_err() {
                break;
            }
        }
    });
}

fn spawn_shutdown_task(commands: CommandSender) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = commands.send(PlayerCommand::Shutdown);
        }
    });
}
