use clap::{Parser, Subcommand, ValueEnum};
use fs_shim::{EntryType, Error, Shim};

#[derive(Parser)]
#[command(name = "fs-shim")]
#[command(version)]
#[command(
    about = "Create directories, list directories and rename files",
    long_about = None
)]
struct Cli {
    /// Umask used for symbolic modes instead of the process umask (octal)
    #[arg(long, global = true, value_parser = parse_octal)]
    umask: Option<u32>,

    /// Keep directory entries in the order the OS returns them
    #[arg(long, global = true)]
    unsorted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create directories; existing ones are left alone
    Mkdir {
        /// Octal or symbolic permission mode
        #[arg(short, long, default_value = "777")]
        mode: String,
        /// Directories to create
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List directory entries, one path per line
    Scandir {
        /// Only list entries of this type
        #[arg(short = 't', long = "type", value_enum)]
        entry_type: Option<TypeArg>,
        /// Descend into subdirectories
        #[arg(short, long)]
        recurse: bool,
        /// Directories to list
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Rename a file or directory
    Rename {
        /// Existing path
        from: String,
        /// New path
        to: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Unknown,
    File,
    Directory,
    Symlink,
    Other,
}

impl From<TypeArg> for EntryType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Unknown => EntryType::Unknown,
            TypeArg::File => EntryType::File,
            TypeArg::Directory => EntryType::Directory,
            TypeArg::Symlink => EntryType::Symlink,
            TypeArg::Other => EntryType::Other,
        }
    }
}

fn parse_octal(value: &str) -> Result<u32, String> {
    u32::from_str_radix(value, 8).map_err(|err| format!("invalid octal umask '{}': {}", value, err))
}

fn main() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fs_shim=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut builder = Shim::builder().sort_entries(!cli.unsorted);
    if let Some(umask) = cli.umask {
        builder = builder.umask(umask);
    }
    let shim = builder.build();

    let result: Result<(), Error> = match cli.command {
        Commands::Mkdir { mode, paths } => shim.make_directory(&paths, &mode),
        Commands::Scandir {
            entry_type,
            recurse,
            paths,
        } => shim
            .scan_directory(&paths, entry_type.map(EntryType::from), recurse)
            .map(|files| {
                for file in files {
                    println!("{}", file);
                }
            }),
        Commands::Rename { from, to } => shim.rename_file(&from, &to),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
