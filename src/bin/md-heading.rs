use clap::{Parser, Subcommand};
use md_heading::{
    BlockKind, Document, DomRenderer, HeadingSchema, ImportError, MarkdownError,
    MarkdownExporter, MarkdownImporter, RenderError, parse_commonmark, slugify, to_commonmark,
    to_html,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the default heading id for some text
    Slug { text: String },
    /// Reads a markdown file and prints its blocks
    Import {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Reads a markdown file and writes it back out through the document model
    Export { file: PathBuf },
    /// Renders a markdown file as HTML with heading ids
    Render { file: PathBuf },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(command: &Commands) -> Result<(), CliError> {
    let schema = HeadingSchema::default();
    match command {
        Commands::Slug { text } => println!("{}", slugify(text)),
        Commands::Import { file, json } => {
            let doc = load(&schema, file)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_outline(&schema, &doc);
            }
        }
        Commands::Export { file } => {
            let doc = load(&schema, file)?;
            let root = MarkdownExporter::new(&schema).export(&doc)?;
            print!("{}", to_commonmark(&root)?);
        }
        Commands::Render { file } => {
            let doc = load(&schema, file)?;
            for node in DomRenderer::new(&schema).render(&doc) {
                println!("{}", to_html(&[node])?);
            }
        }
    }
    Ok(())
}

fn load(schema: &HeadingSchema, path: &Path) -> Result<Document, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let root = parse_commonmark(&source);
    Ok(MarkdownImporter::new(schema).import(&root)?)
}

fn print_outline(schema: &HeadingSchema, doc: &Document) {
    for block in &doc.blocks {
        match &block.kind {
            BlockKind::Heading(attrs) => println!(
                "{} #{} {}",
                attrs.level.tag(),
                schema.id_for(block),
                block.text_content()
            ),
            BlockKind::Paragraph => println!("p {}", block.text_content()),
        }
    }
}
