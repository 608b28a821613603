//! Prayer card command-line front-end
//!
//! Thin wrapper over prayercards-core. Favorites and the current draft are
//! kept in the user's data directory between runs.
//!
//! ```bash
//! prayercards verses --book John
//! prayercards backgrounds --category Ocean
//! prayercards favorite verse 2
//! prayercards compose --verse 2 --background 4 --font monospace --color '#000000' --size-delta 4
//! prayercards compose --export
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use prayercards_core::{
    Catalog, Config, ContentType, FontColor, HttpImageLoader, JsonFileSink, JsonFileStore,
    Session, Verse,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prayercards")]
#[command(about = "Browse scripture verses and compose shareable prayer cards")]
struct Cli {
    /// Load verses and backgrounds from a JSON corpus instead of the built-in set
    #[arg(long, global = true)]
    corpus: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List verses, optionally from one book
    Verses {
        #[arg(short, long)]
        book: Option<String>,
    },
    /// List the book filter choices
    Books,
    /// Search verse text and references
    Search {
        query: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show a verse by reference, e.g. "John 3:16"
    Lookup { reference: String },
    /// List background images, optionally from one category
    Backgrounds {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List the background category filters
    Categories,
    /// Toggle a favorite
    Favorite {
        #[arg(value_parser = parse_content_type)]
        content_type: ContentType,
        id: String,
    },
    /// List favorites in the order they were added
    Favorites {
        #[arg(value_parser = parse_content_type)]
        content_type: ContentType,
    },
    /// Edit the current draft and print the rendered card
    Compose {
        /// Seed the scripture text from a verse id
        #[arg(long)]
        verse: Option<String>,
        #[arg(long)]
        scripture: Option<String>,
        #[arg(long)]
        message: Option<String>,
        /// Background image id
        #[arg(long, conflicts_with = "background_url")]
        background: Option<String>,
        #[arg(long)]
        background_url: Option<String>,
        /// serif, sans-serif, monospace, or any other family name
        #[arg(long)]
        font: Option<String>,
        /// #RGB or #RRGGBB
        #[arg(long)]
        color: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        size_delta: Option<i32>,
        /// Write the rendered card to the export directory
        #[arg(long)]
        export: bool,
    },
    /// Show or reset the current draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
}

#[derive(Subcommand)]
enum DraftAction {
    Show,
    Reset,
}

fn parse_content_type(s: &str) -> std::result::Result<ContentType, String> {
    ContentType::from_str(s).ok_or_else(|| format!("expected 'verse' or 'background', got '{s}'"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Could not load config, using defaults: {}", e);
        Config::new()
    });

    let mut store = JsonFileStore::open(JsonFileStore::default_path())?;
    debug!(path = %store.path().display(), "opened state store");

    let mut session = Session::with_style(config.default_style_or_stock());
    if let Some(path) = &cli.corpus {
        session.catalog.load_from_json(path).await?;
    }
    session.catalog.restore_favorites(&store)?;
    session.composer.restore_draft(&store)?;

    match cli.command {
        Commands::Verses { book } => list_verses(&session.catalog, book.as_deref()),
        Commands::Books => {
            for book in Catalog::books() {
                println!("{book}");
            }
        }
        Commands::Search { query, limit } => {
            let results = session.catalog.search(&query, limit);
            if results.is_empty() {
                println!("No verses found for '{query}'");
            }
            for verse in results {
                print_verse(&session.catalog, verse);
            }
        }
        Commands::Lookup { reference } => match session.catalog.lookup(&reference)? {
            Some(verse) => print_verse(&session.catalog, verse),
            None => println!("{reference} is not in the catalog"),
        },
        Commands::Backgrounds { category } => list_backgrounds(&session.catalog, category.as_deref()),
        Commands::Categories => {
            for category in Catalog::categories() {
                println!("{category}");
            }
        }
        Commands::Favorite { content_type, id } => {
            let now_favorite = session.catalog.toggle_favorite(content_type, &id);
            session.catalog.save_favorites(&mut store)?;
            let verb = if now_favorite { "Added" } else { "Removed" };
            println!("{verb} {content_type} {id}");
        }
        Commands::Favorites { content_type } => {
            for id in session.catalog.list_favorites(content_type) {
                println!("{id}");
            }
        }
        Commands::Compose {
            verse,
            scripture,
            message,
            background,
            background_url,
            font,
            color,
            size_delta,
            export,
        } => {
            if let Some(id) = verse {
                if !session.pick_verse(&id) {
                    return Err(anyhow!("No verse with id {id}"));
                }
            }
            if let Some(text) = scripture {
                session.composer.set_scripture_text(text);
            }
            if let Some(text) = message {
                session.composer.set_message_text(text);
            }
            if let Some(id) = background {
                if !session.pick_background(&id) {
                    return Err(anyhow!("No background with id {id}"));
                }
            }
            if let Some(url) = background_url {
                session.composer.select_background_url(url);
            }
            if let Some(name) = font {
                session.composer.set_font(name.into());
            }
            if let Some(hex) = color {
                session.composer.set_font_color(FontColor::parse(&hex)?);
            }
            if let Some(delta) = size_delta {
                session.composer.adjust_font_size(delta);
            }
            session.composer.save_draft(&mut store)?;

            if export {
                let mut sink = JsonFileSink::new(config.export_dir());
                // The blocking HTTP client must live and drop off the async workers
                let receipt = tokio::task::block_in_place(|| {
                    session.export(
                        &HttpImageLoader::new(),
                        config.placeholder_background(),
                        &mut sink,
                    )
                })?;
                match receipt.location {
                    Some(location) => println!("Exported card to {location}"),
                    None => println!("Exported card"),
                }
            } else {
                println!("{}", session.render().to_json()?);
            }
        }
        Commands::Draft { action } => match action {
            DraftAction::Show => {
                println!("{}", serde_json::to_string_pretty(session.composer.draft())?);
            }
            DraftAction::Reset => {
                session.composer.reset(config.default_style_or_stock());
                session.composer.save_draft(&mut store)?;
                println!("Draft reset");
            }
        },
    }

    Ok(())
}

fn list_verses(catalog: &Catalog, book: Option<&str>) {
    let verses: Vec<&Verse> = match book {
        Some(book) => catalog.verses_in_book(book),
        None => catalog.list_verses().iter().collect(),
    };

    if verses.is_empty() {
        println!("No verses found");
    }
    for verse in verses {
        print_verse(catalog, verse);
    }
}

fn print_verse(catalog: &Catalog, verse: &Verse) {
    let heart = if catalog.is_favorite(ContentType::Verse, &verse.id) { "♥" } else { " " };
    println!("{heart} [{}] {}", verse.id, verse.reference());
    println!("    {}", verse.text);
}

fn list_backgrounds(catalog: &Catalog, category: Option<&str>) {
    let images = catalog.list_backgrounds(category);
    if images.is_empty() {
        println!("No backgrounds in that category");
    }
    for image in images {
        let heart = if catalog.is_favorite(ContentType::Background, &image.id) { "♥" } else { " " };
        println!("{heart} [{}] {} ({})", image.id, image.title, image.category);
        println!("    {}", image.url);
    }
}
