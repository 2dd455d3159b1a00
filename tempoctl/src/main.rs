use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tempo_core::{Command, IpcError, Mode, Response, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

#[derive(Parser)]
#[command(name = "tempoctl")]
#[command(about = "Control the tempo timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Up,
    Down,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the timer
    Start,
    /// Pause the timer
    Pause,
    /// Reset the active counter
    Reset,
    /// Switch counting direction
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Set the countdown duration (seconds or MM:SS)
    Set { value: String },
    /// Set the count-up target (seconds or MM:SS)
    Target { value: String },
    /// Apply a preset duration/target, in seconds
    Preset { seconds: u32 },
    /// Dismiss a pending completion
    Ack,
    /// Print timer status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Commands::Start => Command::Start,
        Commands::Pause => Command::Pause,
        Commands::Reset => Command::Reset,
        Commands::Mode { mode } => Command::SwitchMode {
            mode: match mode {
                ModeArg::Up => Mode::CountUp,
                ModeArg::Down => Mode::CountDown,
            },
        },
        Commands::Set { value } => Command::SetCountdown { value },
        Commands::Target { value } => Command::SetTarget { value },
        Commands::Preset { seconds } => Command::Preset { seconds },
        Commands::Ack => Command::Acknowledge,
        Commands::Status => Command::Status,
    };

    let response = send_command(command).await?;

    match response {
        Response::Ok => println!("OK"),
        Response::Status(status) => {
            println!("Mode: {:?}", status.mode);
            println!("Status: {}", status.status);
            println!("Display: {} ({})", status.formatted, status.display);
            println!("Progress: {:.0}%", status.progress);
            println!("Countdown duration: {}s", status.custom_countdown);
            println!("Count-up target: {}", status.target_display);
            if status.completion_pending {
                println!("Completion pending (tempoctl ack to dismiss)");
            }
            if let Some(error) = status.input_error {
                eprintln!("Last input error: {}", error);
            }
        }
        Response::Error(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn send_command(cmd: Command) -> Result<Response, IpcError> {
    let mut stream = UnixStream::connect(SOCKET_PATH).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::ConnectionRefused
            || e.kind() == std::io::ErrorKind::NotFound
        {
            IpcError::ConnectionRefused
        } else {
            IpcError::Io(e)
        }
    })?;

    let msg = serde_json::to_vec(&cmd)?;
    stream.write_all(&msg).await?;
    stream.write_all(b"\n").await?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    let response: Response = serde_json::from_str(&line)?;

    Ok(response)
}
