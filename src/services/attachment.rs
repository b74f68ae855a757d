//! Attachment storage.
//!
//! The store only records a filename; bytes live in the upload directory
//! and are served back by the static file service. Filenames are sanitized
//! and uniquely prefixed before writing so uploads cannot collide or escape
//! the directory.

use std::path::Path;

use uuid::Uuid;

/// Extensions accepted for project attachments.
pub const ALLOWED_EXTENSIONS: [&str; 8] = ["pdf", "xlsx", "xls", "docx", "txt", "png", "jpg", "jpeg"];

/// Whether `filename` carries an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
        }
        _ => false,
    }
}

/// Reduce a client-supplied filename to a safe basename: path components
/// stripped, non [A-Za-z0-9._-] characters replaced with underscores,
/// leading dots removed.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Persist attachment bytes under a unique name and return the stored
/// filename for recording on the listing.
pub async fn store_attachment(
    upload_dir: &Path,
    original_filename: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(&stored_name), bytes).await?;
    Ok(stored_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_file("deck.pdf"));
        assert!(allowed_file("model.XLSX"));
        assert!(allowed_file("photo.jpeg"));
        assert!(!allowed_file("script.exe"));
        assert!(!allowed_file("no_extension"));
        assert!(!allowed_file(".pdf"));
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\deck.pdf"), "deck.pdf");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my deck (v2).pdf"), "my_deck__v2_.pdf");
    }

    #[test]
    fn test_sanitize_never_returns_empty() {
        assert_eq!(sanitize_filename("???"), "___");
        assert_eq!(sanitize_filename(""), "file");
    }

    #[tokio::test]
    async fn test_store_attachment_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("capmatch-attach-{}", Uuid::new_v4()));
        let stored = store_attachment(&dir, "deck.pdf", b"%PDF-1.4 test")
            .await
            .unwrap();
        assert!(stored.ends_with("_deck.pdf"));
        let bytes = tokio::fs::read(dir.join(&stored)).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 test");
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
