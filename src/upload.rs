//! Receipt File Validation
//!
//! Type check for a selected receipt file. Runs before any network call:
//! a file that fails here never reaches the store.

/// MIME types the store accepts for receipts
const SUPPORTED_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// File extensions matching the supported types
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Returns true when the selected file is an acceptable receipt image.
///
/// The declared MIME type is checked case-insensitively; when the browser
/// reports no type, the file name's extension decides.
pub fn is_supported_receipt(mime: &str, file_name: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    if !mime.is_empty() {
        return SUPPORTED_TYPES.contains(&mime.as_str());
    }
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_three_image_types() {
        assert!(is_supported_receipt("image/jpeg", "receipt.jpeg"));
        assert!(is_supported_receipt("image/jpg", "receipt.jpg"));
        assert!(is_supported_receipt("image/png", "receipt.png"));
    }

    #[test]
    fn type_check_is_case_insensitive() {
        assert!(is_supported_receipt("IMAGE/PNG", "receipt.PNG"));
        assert!(is_supported_receipt("", "RECEIPT.JPeG"));
    }

    #[test]
    fn rejects_anything_else() {
        assert!(!is_supported_receipt("image/pdf", "imgTest.pdf"));
        assert!(!is_supported_receipt("application/pdf", "facture.pdf"));
        assert!(!is_supported_receipt("image/gif", "anim.gif"));
        assert!(!is_supported_receipt("", "notes.txt"));
        assert!(!is_supported_receipt("", "no-extension"));
    }

    #[test]
    fn extension_alone_does_not_override_a_declared_type() {
        // a pdf renamed to .png still declares image/pdf
        assert!(!is_supported_receipt("image/pdf", "imgTest.png"));
    }
}
