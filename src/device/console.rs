use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Duration;

use super::controller::DeviceController;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// A long enough hold to trigger feeding or waking.
const HOLD_MS: u64 = 1_700;

pub const HELP: &str =
    "commands: press | release | tap | double | hold | online | offline | status | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Press,
    Release,
    Tap,
    DoubleTap,
    Hold,
    Online,
    Offline,
    Status,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let word = line.trim().to_ascii_lowercase();
        let command = match word.as_str() {
            "" => return Ok(None),
            "press" | "down" => ConsoleCommand::Press,
            "release" | "up" => ConsoleCommand::Release,
            "tap" | "t" => ConsoleCommand::Tap,
            "double" | "dt" => ConsoleCommand::DoubleTap,
            "hold" | "feed" => ConsoleCommand::Hold,
            "online" => ConsoleCommand::Online,
            "offline" => ConsoleCommand::Offline,
            "status" | "s" => ConsoleCommand::Status,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            other => bail!("unknown command '{}'", other),
        };
        Ok(Some(command))
    }
}

/// Applies one command. Returns false when the console should exit.
pub async fn execute(controller: &DeviceController, command: ConsoleCommand) -> Result<bool> {
    match command {
        ConsoleCommand::Press => controller.set_touch(true),
        ConsoleCommand::Release => controller.set_touch(false),
        ConsoleCommand::Tap => controller.tap().await,
        ConsoleCommand::DoubleTap => controller.double_tap().await,
        ConsoleCommand::Hold => controller.pulse(Duration::from_millis(HOLD_MS)).await,
        ConsoleCommand::Online => controller.set_online(true),
        ConsoleCommand::Offline => controller.set_online(false),
        ConsoleCommand::Status => match controller.snapshot() {
            Some(snapshot) => {
                let json = serde_json::to_string(&snapshot).context("failed to encode status")?;
                println!("{json}");
            }
            None => log_warn!("device loop not running"),
        },
        ConsoleCommand::Help => println!("{HELP}"),
        ConsoleCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_console(controller: &DeviceController) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    log_info!("{}", HELP);

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => {
                if !execute(controller, command).await? {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => log_warn!("{err}"),
        }
    }
    Ok(())
}
