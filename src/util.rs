//! Text decoding and file-name helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<?xml encoding="..."?>`)
/// 3. Falls back to Windows-1252 (common in legacy SPS packages)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract encoding from XML declaration.
///
/// Parses `<?xml ... encoding="..." ?>` in the first 100 bytes and returns the
/// encoding name if found.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = memchr::memmem::find(prefix, b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let (&quote, rest) = after_enc.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = memchr::memchr(quote, rest)?;
    std::str::from_utf8(&rest[..value_end]).ok()
}

// ============================================================================
// Link helpers
// ============================================================================

/// Last path segment of a link (`a/b/fig1.tif` → `fig1.tif`).
pub fn file_name(link: &str) -> &str {
    match memchr::memrchr(b'/', link.as_bytes()) {
        Some(pos) => &link[pos + 1..],
        None => link,
    }
}

/// File extension of a link: the text after the last dot of its final path
/// segment, without the dot.
///
/// `fig.thumbnail.jpg` gives `jpg`. Returns `None` when the file name has no
/// dot or ends with one.
pub fn file_extension(link: &str) -> Option<&str> {
    let name = file_name(link);
    let pos = memchr::memrchr(b'.', name.as_bytes())?;
    let ext = &name[pos + 1..];
    (!ext.is_empty()).then_some(ext)
}

/// Guess the MIME type of an asset from its extension.
///
/// Covers the formats found in SPS packages; anything else is
/// `application/octet-stream`.
pub fn media_type(link: &str) -> &'static str {
    let Some(ext) = file_extension(link) else {
        return "application/octet-stream";
    };
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_passthrough() {
        let text = decode_text("São Paulo".as_bytes(), None);
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "São Paulo");
    }

    #[test]
    fn test_decode_with_hint_and_fallback() {
        // "São" in ISO-8859-1
        let latin1 = [b'S', 0xE3, b'o'];
        assert_eq!(decode_text(&latin1, Some("iso-8859-1")), "São");
        assert_eq!(decode_text(&latin1, None), "São");
    }

    #[test]
    fn test_extract_xml_encoding() {
        assert_eq!(
            extract_xml_encoding(br#"<?xml version="1.0" encoding="ISO-8859-1"?><a/>"#),
            Some("ISO-8859-1")
        );
        assert_eq!(
            extract_xml_encoding(b"<?xml version='1.0' encoding='utf-8'?><a/>"),
            Some("utf-8")
        );
        assert_eq!(extract_xml_encoding(b"<?xml version=\"1.0\"?><a/>"), None);
        assert_eq!(extract_xml_encoding(b"<article/>"), None);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("original.tif"), Some("tif"));
        assert_eq!(file_extension("fig.thumbnail.jpg"), Some("jpg"));
        assert_eq!(file_extension("http://host/a.b/fig1.png"), Some("png"));
        assert_eq!(file_extension("dir.v2/noext"), None);
        assert_eq!(file_extension("trailing."), None);
        assert_eq!(file_extension(""), None);
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type("a.TIF"), "image/tiff");
        assert_eq!(media_type("suppl.pdf"), "application/pdf");
        assert_eq!(media_type("video.mp4"), "video/mp4");
        assert_eq!(media_type("noext"), "application/octet-stream");
    }
}
