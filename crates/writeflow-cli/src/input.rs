use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use writeflow_engine::Document;

/// Read a block tree from `path`, or from stdin when the path is `-`.
pub fn read_document(path: &Path) -> Result<Document> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read blocks from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    let document = Document::from_json(&json)
        .with_context(|| format!("{} is not a valid block tree", path.display()))?;
    log::debug!(
        "Loaded {} top-level blocks from {}",
        document.blocks.len(),
        path.display()
    );
    Ok(document)
}

/// Title for output: explicit flag, then the document's own title, then the file stem.
pub fn document_title(explicit: Option<&str>, document: &Document, path: &Path) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| document.title.clone())
        .or_else(|| {
            path.file_stem()
                .filter(|_| path != Path::new("-"))
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Untitled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_reads_content_envelope_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("post.json");
        std::fs::write(
            &file,
            r#"{"title": "Hello", "body": [{"id": "d", "type": "divider", "divider": {}}]}"#,
        )
        .unwrap();

        let document = read_document(&file).unwrap();

        assert_eq!(document.title.as_deref(), Some("Hello"));
        assert_eq!(document.blocks.len(), 1);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_document(Path::new("/nonexistent/blocks.json")).unwrap_err();

        assert!(err.to_string().contains("/nonexistent/blocks.json"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("broken.json");
        std::fs::write(&file, "{not json").unwrap();

        let err = read_document(&file).unwrap_err();

        assert!(err.to_string().contains("not a valid block tree"));
    }

    #[test]
    fn test_title_precedence() {
        let titled = Document {
            title: Some("From body".to_string()),
            blocks: vec![],
        };
        let untitled = Document::default();
        let path = Path::new("notes/intro.json");

        assert_eq!(document_title(Some("Flag"), &titled, path), "Flag");
        assert_eq!(document_title(None, &titled, path), "From body");
        assert_eq!(document_title(None, &untitled, path), "intro");
        assert_eq!(document_title(None, &untitled, Path::new("-")), "Untitled");
    }
}
