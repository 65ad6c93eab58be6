use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;

/// Outcome of opening a document. Failures are recorded here, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    /// Document opened; `text` may still be empty.
    Read,
    /// Document could not be loaded (I/O error, corrupt or unsupported file).
    Unreadable,
}

/// Text pulled from one document, pages joined with `\n` in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub status: ExtractStatus,
    pub pages: usize,
    pub failed_pages: usize,
}

impl Extraction {
    fn unreadable() -> Self {
        Self {
            text: String::new(),
            status: ExtractStatus::Unreadable,
            pages: 0,
            failed_pages: 0,
        }
    }
}

/// Concatenated text of the document at `path`, or an empty string if it can't be read.
#[must_use]
pub fn extract(path: &Path) -> String {
    extract_document(path).text
}

/// Extract every page of `path`. A page that fails contributes an empty string;
/// a document that fails to load (or makes the parser panic) yields empty text.
#[must_use]
pub fn extract_document(path: &Path) -> Extraction {
    // lopdf can panic on some malformed inputs; one bad file must not end the scan.
    match panic::catch_unwind(AssertUnwindSafe(|| load_and_extract(path))) {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(e)) => {
            tracing::debug!(path = %path.display(), error = %e, "unreadable PDF");
            Extraction::unreadable()
        }
        Err(_) => {
            tracing::debug!(path = %path.display(), "PDF parser panicked");
            Extraction::unreadable()
        }
    }
}

fn load_and_extract(path: &Path) -> Result<Extraction, lopdf::Error> {
    let doc = Document::load(path)?;
    let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();

    let mut failed_pages = 0;
    let mut texts = Vec::with_capacity(page_numbers.len());
    for page in &page_numbers {
        match doc.extract_text(&[*page]) {
            Ok(text) => texts.push(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), page, error = %e, "page extraction failed");
                failed_pages += 1;
                texts.push(String::new());
            }
        }
    }

    Ok(Extraction {
        text: texts.join("\n"),
        status: ExtractStatus::Read,
        pages: page_numbers.len(),
        failed_pages,
    })
}
