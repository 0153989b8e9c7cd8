use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pyhelp::config::{self, UserConfig};
use pyhelp::docs::resolve_doc_url;
use pyhelp::jedi::{JediBridge, JediEnvironment, SymbolQuery};

#[derive(Parser)]
#[command(name = "pyhelp")]
#[command(version, about = "Resolve the Python symbol under the cursor to its documentation URL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set up the resolver environment and print its interpreter path
    Provision {
        /// Directory holding the venv and resolver script (defaults to the
        /// data directory)
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },
    /// Resolve the symbol at a cursor position and print its documentation URL
    Query {
        /// Python source file
        #[arg(long)]
        file: PathBuf,
        /// 1-based line of the cursor
        #[arg(long)]
        line: u32,
        /// 1-based column of the cursor
        #[arg(long)]
        column: u32,
        /// Project interpreter whose installed packages the resolver should
        /// see (defaults to the resolver's own)
        #[arg(long)]
        python: Option<PathBuf>,
        /// Read the buffer contents from stdin instead of the on-disk file
        #[arg(long)]
        text_stdin: bool,
        /// User configuration file with library URL templates
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },
    /// Print the documentation URL for an already fully-qualified symbol name
    Resolve {
        /// Fully-qualified name, e.g. `builtins.print` or `os.path.join`
        symbol: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command))
}

/// Log to a file in the data directory so stdout stays clean for URL
/// output. Returns the appender guard that flushes buffered logs on drop.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = config::log_path();
    let dir = log_path.parent()?;
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }

    let file_appender = tracing_appender::rolling::never(dir, log_path.file_name()?);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Provision { work_dir } => {
            let work_dir = work_dir.unwrap_or_else(config::data_dir);
            let env = JediEnvironment::ensure(&work_dir).await?;
            println!("{}", env.interpreter_path().display());
            Ok(())
        }
        Command::Query {
            file,
            line,
            column,
            python,
            text_stdin,
            config: config_path,
            work_dir,
        } => {
            let user = load_user_config(config_path)?;
            let work_dir = work_dir.unwrap_or_else(config::data_dir);
            let env = JediEnvironment::ensure(&work_dir).await?;

            let file_text = if text_stdin {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Some(buf)
            } else {
                None
            };
            // The resolver needs an absolute path to pick the right project.
            let file = file.canonicalize().unwrap_or(file);

            let bridge = JediBridge::open(&env.interpreter_path(), &env.script_path());
            let symbol = bridge
                .query(&SymbolQuery {
                    file: &file,
                    line,
                    column,
                    python_executable: python.as_deref(),
                    file_text: file_text.as_deref(),
                })
                .await;
            bridge.close().await;

            match symbol? {
                Some(name) => print_resolution(&name, &user),
                None => println!("no symbol at {}:{line}:{column}", file.display()),
            }
            Ok(())
        }
        Command::Resolve {
            symbol,
            config: config_path,
        } => {
            let user = load_user_config(config_path)?;
            print_resolution(&symbol, &user);
            Ok(())
        }
    }
}

fn load_user_config(path: Option<PathBuf>) -> anyhow::Result<UserConfig> {
    match path {
        Some(path) => UserConfig::load(&path),
        None => UserConfig::load(&config::data_dir().join("config.json")),
    }
}

fn print_resolution(symbol: &str, user: &UserConfig) {
    match resolve_doc_url(symbol, &user.libraries) {
        Some(url) => println!("{url}"),
        None => println!("no documentation mapping for \"{symbol}\""),
    }
}
