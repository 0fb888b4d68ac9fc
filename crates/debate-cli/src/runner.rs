//! Terminal event loop.

use debate_core::RollSource;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::protocol::{Command, HELP};
use crate::session::Session;

/// Read commands from stdin and tick the session every `tick` until the
/// user quits or stdin closes.
pub async fn run<R: RollSource>(mut session: Session<R>, tick: Duration) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    write_lines(&mut stdout, HELP.lines().map(str::to_string)).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let output = match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        debug!(?command, "command");
                        session.handle(&command)
                    }
                    Err(e) => vec![format!("! {e}")],
                };
                write_lines(&mut stdout, output).await?;
            }
            _ = ticker.tick() => {
                let output = session.tick();
                write_lines(&mut stdout, output).await?;
            }
        }
    }

    info!(finished = session.game().is_finished(), "session closed");
    Ok(())
}

async fn write_lines<I>(stdout: &mut Stdout, lines: I) -> std::io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for line in lines {
        text.push_str(&line);
        text.push('\n');
    }
    if text.is_empty() {
        return Ok(());
    }
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await
}
