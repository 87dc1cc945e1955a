use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use writeflow_config::Config;
use writeflow_engine::{Html, HtmlCatalog, render_blocks};

mod input;
mod page;
mod terminal;
mod viewer;

use terminal::TerminalCatalog;

#[derive(Parser, Debug)]
#[command(
    name = "writeflow",
    version,
    about = "Render Writeflow block trees",
    long_about = "Renders a Writeflow content tree (Notion blocks exported as JSON, either a bare block array or a content entry with a body) to HTML, or shows it in a terminal viewer."
)]
struct Args {
    /// Config file to use instead of ~/.config/writeflow/config.toml
    #[arg(long, global = true, env = "WRITEFLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render blocks to HTML
    Html {
        /// Block tree JSON file, or `-` for stdin
        file: PathBuf,

        #[arg(long, help = "Wrap the output in a complete HTML document")]
        standalone: bool,

        #[arg(long, help = "Document title for standalone output")]
        title: Option<String>,

        #[arg(long, short, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Show blocks in a scrollable terminal viewer
    View {
        /// Block tree JSON file, or `-` for stdin
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Html {
            file,
            standalone,
            title,
            output,
        } => render_html(
            &config,
            &file,
            standalone,
            title.as_deref(),
            output.as_deref(),
        ),
        Command::View { file } => view(&config, &file),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} does not exist", path.display())),
        None => {
            let config = Config::load()?;
            log::debug!("Using config from {}", Config::config_path().display());
            Ok(config)
        }
    }
}

fn render_html(
    config: &Config,
    file: &Path,
    standalone: bool,
    title: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let document = input::read_document(file)?;
    let catalog = HtmlCatalog::new(config.html.clone());
    let nodes = render_blocks(&document.blocks, &catalog, None)
        .with_context(|| format!("Failed to render {}", file.display()))?;
    let body = nodes
        .into_iter()
        .map(Html::into_string)
        .collect::<Vec<_>>()
        .join("\n");

    let html = if standalone || config.output.standalone {
        let title = input::document_title(title, &document, file);
        page::standalone_page(&title, config.output.stylesheet.as_deref(), &body)
    } else {
        body + "\n"
    };

    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => std::io::stdout().lock().write_all(html.as_bytes())?,
    }
    Ok(())
}

fn view(config: &Config, file: &Path) -> Result<()> {
    let document = input::read_document(file)?;
    let catalog = TerminalCatalog::new(
        2,
        config.html.callout_placeholder.clone(),
        config.html.unsupported_label.clone(),
    );
    let nodes = render_blocks(&document.blocks, &catalog, None)
        .with_context(|| format!("Failed to render {}", file.display()))?;

    let title = input::document_title(None, &document, file);
    let mut app = viewer::App::new(title, nodes);
    viewer::run(&mut app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_html_subcommand() {
        let args = Args::parse_from(["writeflow", "html", "-", "--standalone", "-o", "out.html"]);

        match args.command {
            Command::Html {
                file,
                standalone,
                output,
                title,
            } => {
                assert_eq!(file, PathBuf::from("-"));
                assert!(standalone);
                assert_eq!(output, Some(PathBuf::from("out.html")));
                assert_eq!(title, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_render_html_writes_fragment_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("blocks.json");
        let output = temp_dir.path().join("out.html");
        std::fs::write(
            &input,
            r#"[
                {"id": "a", "type": "bulleted_list_item", "bulleted_list_item": {"rich_text": [{"plain_text": "x"}]}},
                {"id": "b", "type": "divider", "divider": {}}
            ]"#,
        )
        .unwrap();

        render_html(
            &Config::default(),
            &input,
            false,
            None,
            Some(output.as_path()),
        )
        .unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert_eq!(html, "<ul><li>x</li></ul>\n<hr>\n");
    }

    #[test]
    fn test_render_html_standalone_uses_document_title() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("post.json");
        let output = temp_dir.path().join("post.html");
        std::fs::write(
            &input,
            r#"{"title": "Release notes", "body": [{"id": "d", "type": "divider", "divider": {}}]}"#,
        )
        .unwrap();

        render_html(
            &Config::default(),
            &input,
            true,
            None,
            Some(output.as_path()),
        )
        .unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Release notes</title>"));
        assert!(html.contains("<hr>"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let err = load_config(Some(missing.as_path())).unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }
}
