//! Unix domain socket server exposing the engine to tempoctl.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tempo_core::{Command, Response, StatusSnapshot, TimerEngine, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, info};

/// Runs the accept loop on a dedicated thread with its own small runtime,
/// so the synchronous terminal loop stays untouched.
pub fn spawn(engine: Arc<Mutex<TimerEngine>>) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to build IPC runtime: {}", e);
                return;
            }
        };
        if let Err(e) = runtime.block_on(serve(engine)) {
            error!("IPC server stopped: {}", e);
        }
    });
}

async fn serve(engine: Arc<Mutex<TimerEngine>>) -> Result<()> {
    // Remove old socket if it exists
    let _ = std::fs::remove_file(SOCKET_PATH);

    let listener = UnixListener::bind(SOCKET_PATH)?;
    info!("IPC server listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let engine = engine.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, engine).await {
                        error!("Error handling client: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {}", e);
            }
        }
    }
}

async fn handle_client(stream: UnixStream, engine: Arc<Mutex<TimerEngine>>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;
    let command: Command = serde_json::from_str(&line)?;
    debug!("ipc command: {:?}", command);

    // Lock scope is this block only - never held across an await.
    let response = {
        let mut engine = engine.lock().unwrap_or_else(|e| e.into_inner());
        apply(&mut engine, command)
    };

    let response_json = serde_json::to_vec(&response)?;
    writer.write_all(&response_json).await?;
    writer.write_all(b"\n").await?;

    Ok(())
}

fn apply(engine: &mut TimerEngine, command: Command) -> Response {
    match command {
        Command::Start => {
            engine.start();
            Response::Ok
        }
        Command::Pause => {
            engine.pause();
            Response::Ok
        }
        Command::Reset => {
            engine.reset();
            Response::Ok
        }
        Command::SwitchMode { mode } => {
            engine.switch_mode(mode);
            Response::Ok
        }
        Command::SetCountdown { value } => match engine.set_custom_countdown(&value) {
            Ok(_) => {
                engine.commit_countdown();
                Response::Ok
            }
            Err(e) => Response::Error(e.to_string()),
        },
        Command::SetTarget { value } => match engine.set_count_up_target(&value) {
            Ok(_) => {
                engine.commit_count_up_target();
                Response::Ok
            }
            Err(e) => Response::Error(e.to_string()),
        },
        Command::Preset { seconds } => {
            engine.apply_preset(seconds);
            Response::Ok
        }
        Command::Acknowledge => {
            engine.acknowledge_completion();
            Response::Ok
        }
        Command::Status => Response::Status(StatusSnapshot::capture(engine)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_travel_back_as_errors() {
        let mut engine = TimerEngine::new();
        engine.switch_mode(tempo_core::Mode::CountDown);
        let response = apply(
            &mut engine,
            Command::SetCountdown {
                value: "10000".to_string(),
            },
        );
        match response {
            Response::Error(msg) => {
                assert_eq!(msg, "Please enter a number less than 10,000")
            }
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(engine.countdown_time(), 30);
    }

    #[test]
    fn status_reports_a_snapshot() {
        let mut engine = TimerEngine::new();
        engine.start();
        engine.tick();
        match apply(&mut engine, Command::Status) {
            Response::Status(snap) => {
                assert_eq!(snap.display, 1);
                assert!(snap.running);
            }
            other => panic!("expected status, got {:?}", other),
        }
    }
}
