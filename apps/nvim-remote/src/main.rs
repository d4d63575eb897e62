use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use nvim_remote_lib::{logging, settings, DeliveryMode, NeovimAccessor, Settings, SpawnMode};

/// nvim-remote - send editor actions to a running Neovim
#[derive(Parser, Debug)]
#[command(name = "nvim-remote")]
#[command(about = "Send editor actions to a running Neovim", long_about = None)]
struct Args {
    /// Server address of the running Neovim (overrides settings and $NVIM)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Path to the nvim executable used as the remote client
    #[arg(long, global = true)]
    executable: Option<PathBuf>,

    /// Workspace directory; its .nvim-remote/settings.jsonc is loaded
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Prepend --headless to the client invocation
    #[arg(long, global = true)]
    headless: bool,

    /// direct-argument or keystroke-injection
    #[arg(long, global = true)]
    delivery: Option<DeliveryMode>,

    /// detached or blocking
    #[arg(long, global = true)]
    spawn: Option<SpawnMode>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Open a file, optionally at a line and column
    Open {
        path: String,
        #[arg(long, default_value_t = 0)]
        line: i32,
        #[arg(long, default_value_t = 0)]
        column: i32,
    },
    /// Open several files with one command
    OpenFiles {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Show a directory listing
    OpenDir { path: String },
    /// Show a directory listing of the workspace
    OpenSolution,
    /// Write all modified buffers
    SaveAll,
    /// Print the resolved settings and platform profile
    Config,
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    let workspace = match args.workspace.clone() {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!("Cannot determine working directory: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut resolved = match settings::load_settings(Some(&workspace)) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    apply_flags(&mut resolved, &args);

    let accessor = NeovimAccessor::from_settings(&resolved, workspace);
    let ok = match &args.command {
        Action::Open { path, line, column } => accessor.open_file_at_line(path, *line, *column),
        Action::OpenFiles { paths } => accessor.open_files(paths.as_slice()),
        Action::OpenDir { path } => accessor.open_directory_listing(path),
        Action::OpenSolution => accessor.open_solution(),
        Action::SaveAll => accessor.save_all(),
        Action::Config => return print_config(&resolved),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn apply_flags(settings: &mut Settings, args: &Args) {
    if let Some(server) = &args.server {
        settings.server = Some(server.clone());
    }
    if let Some(executable) = &args.executable {
        settings.executable = Some(executable.to_string_lossy().to_string());
    }
    if args.headless {
        settings.headless = true;
    }
    if args.delivery.is_some() {
        settings.delivery_mode = args.delivery;
    }
    if args.spawn.is_some() {
        settings.spawn_mode = args.spawn;
    }
}

fn print_config(settings: &Settings) -> ExitCode {
    let report = serde_json::json!({
        "settings": settings,
        "profile": settings.profile(),
        "target": settings.remote_target(),
    });

    match serde_json::to_string_pretty(&report) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render settings: {}", e);
            ExitCode::FAILURE
        }
    }
}
