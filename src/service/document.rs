//! FNOL document decoding (PDF and plain text to raw text)

use std::path::Path;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("Document contains no extractable text")]
    EmptyDocument,

    #[error("Unable to decode document: {0}")]
    CorruptedInput(String),

    #[error("Unsupported file format: {0}. Please upload PDF or TXT files only.")]
    UnsupportedKind(String),
}

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// Resolve the kind from a file name's extension (`claim.pdf`, `notes.TXT`)
    pub fn from_filename(filename: &str) -> Result<Self, DecodeError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "txt" => Ok(DocumentKind::Text),
            "" => Err(DecodeError::UnsupportedKind(filename.to_string())),
            other => Err(DecodeError::UnsupportedKind(other.to_string())),
        }
    }

    /// Resolve the kind from a MIME type, ignoring parameters such as `charset`
    pub fn from_mime(mime: &str) -> Result<Self, DecodeError> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Ok(DocumentKind::Pdf),
            "text/plain" => Ok(DocumentKind::Text),
            _ => Err(DecodeError::UnsupportedKind(essence)),
        }
    }
}

/// Decode document bytes into raw text
pub fn decode(bytes: &[u8], kind: DocumentKind) -> Result<String, DecodeError> {
    let text = match kind {
        DocumentKind::Pdf => decode_pdf(bytes)?,
        DocumentKind::Text => decode_text(bytes),
    };

    if text.trim().is_empty() {
        return Err(DecodeError::EmptyDocument);
    }

    tracing::debug!(kind = ?kind, bytes = bytes.len(), chars = text.len(), "Document decoded");
    Ok(text)
}

/// Text layer of a digital PDF; scanned images yield no text
fn decode_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| DecodeError::CorruptedInput(format!("pdf-extract failed: {e}")))?;

    Ok(pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// UTF-8 first, Latin-1 for legacy files
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            tracing::debug!("Document is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_text() {
        let text = decode(
            "Policy Number: ABC123\nDescription: Dégâts des eaux".as_bytes(),
            DocumentKind::Text,
        )
        .unwrap();

        assert!(text.contains("Dégâts"));
    }

    #[test]
    fn test_decode_latin1_text() {
        // "Café" in Latin-1
        let bytes = [b'C', b'a', b'f', 0xE9];

        let text = decode(&bytes, DocumentKind::Text).unwrap();

        assert_eq!(text, "Café");
    }

    #[test]
    fn test_whitespace_only_is_empty_document() {
        let err = decode(b"  \n\t ", DocumentKind::Text).unwrap_err();

        assert!(matches!(err, DecodeError::EmptyDocument));
    }

    #[test]
    fn test_garbage_pdf_is_corrupted() {
        let err = decode(b"definitely not a pdf", DocumentKind::Pdf).unwrap_err();

        assert!(matches!(err, DecodeError::CorruptedInput(_)));
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("claim.PDF").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("notes.txt").unwrap(), DocumentKind::Text);
        assert!(matches!(
            DocumentKind::from_filename("scan.png"),
            Err(DecodeError::UnsupportedKind(ext)) if ext == "png"
        ));
        assert!(DocumentKind::from_filename("README").is_err());
    }

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8").unwrap(),
            DocumentKind::Text
        );
        assert!(DocumentKind::from_mime("image/jpeg").is_err());
    }
}
