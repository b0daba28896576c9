//! PDF text extraction.

/// Extract every page, rendered as `--- Page N ---\n{text}\n\n` (1-based).
pub fn extract_text(bytes: &[u8]) -> Result<String, String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
    Ok(render_pages(&pages))
}

fn render_pages(pages: &[String]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, text)| format!("--- Page {} ---\n{}\n\n", i + 1, text.trim()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_numbered_from_one() {
        let pages = vec!["  first page \n".to_string(), "second".to_string()];
        assert_eq!(
            render_pages(&pages),
            "--- Page 1 ---\nfirst page\n\n--- Page 2 ---\nsecond\n\n"
        );
    }

    #[test]
    fn no_pages_renders_empty() {
        assert_eq!(render_pages(&[]), "");
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(extract_text(b"not a pdf at all").is_err());
    }
}
