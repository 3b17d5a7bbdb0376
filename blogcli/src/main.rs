use anyhow::Result;
use blogboard_core::conf::DEFAULT_TIMEOUT_SECS;
use blogboard_core::{Config, FormInput, MemoryStore, PostStore, RestStore};
use blogcli::BlogCliApp;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "blogcli", version, about = "Browse and edit blog posts on a REST backend")]
struct Cli {
    /// Posts endpoint, overrides the config file and BLOGBOARD_SERVER_URL
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Use an empty in-memory store instead of the server
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List all posts, newest first
    List {
        /// Also write the rendered HTML fragment to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// List posts whose title, author or content contains QUERY
    Search {
        query: String,
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Print a single post
    Show { id: String },
    /// Create a new post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        content: String,
        /// Profile picture file name, stored as assets/<name>
        #[arg(long)]
        profile_pic: Option<String>,
        /// Blog image file name, repeatable
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Update an existing post; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        profile_pic: Option<String>,
    },
    /// Delete a post
    Delete { id: String },
    /// Interactive menu (default)
    Menu,
}

fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (store, source): (Box<dyn PostStore>, String) = if cli.offline {
        (Box::new(MemoryStore::new()), "offline".to_string())
    } else {
        let (server_url, timeout) = match cli.server_url {
            // Config is only consulted for the timeout here.
            Some(url) => match Config::new() {
                Ok(config) => (url, config.timeout()),
                Err(e) => {
                    warn!("Using default timeout, config unavailable: {:#}", e);
                    (url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                }
            },
            None => {
                let config = Config::new()?;
                let timeout = config.timeout();
                (config.server_url, timeout)
            }
        };
        info!("Using posts endpoint {}", server_url);
        (Box::new(RestStore::new(&server_url, timeout)), server_url)
    };

    let mut app = BlogCliApp::new(store, &source);

    match cli.command.unwrap_or(Command::Menu) {
        Command::List { html } => app.list(html.as_deref())?,
        Command::Search { query, html } => app.search(&query, html.as_deref())?,
        Command::Show { id } => app.show(&id)?,
        Command::Create {
            title,
            name,
            content,
            profile_pic,
            images,
        } => {
            let form = FormInput {
                title,
                name,
                content,
                profile_picture_file: profile_pic,
                image_files: images,
            };
            app.save(&form)?;
        }
        Command::Edit {
            id,
            title,
            name,
            content,
            profile_pic,
        } => {
            app.begin_edit(&id)?;
            let draft = app.draft();
            let form = FormInput {
                title: title.unwrap_or_else(|| draft.title.clone()),
                name: name.unwrap_or_else(|| draft.name.clone()),
                content: content.unwrap_or_else(|| draft.content.clone()),
                profile_picture_file: profile_pic,
                image_files: Vec::new(),
            };
            app.save(&form)?;
        }
        Command::Delete { id } => app.delete(&id)?,
        Command::Menu => {
            app.run()?;
        }
    }

    Ok(())
}
