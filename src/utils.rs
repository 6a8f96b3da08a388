//! Naming helpers for archive entries

/// Characters removed from product names before they become file names
pub const FORBIDDEN_NAME_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip characters that are illegal in file names on common filesystems
///
/// Only the characters in [`FORBIDDEN_NAME_CHARS`] are removed; they are deleted,
/// not replaced, and nothing else (whitespace, dots, unicode) is touched.
///
/// # Examples
///
/// ```
/// use product_image_bundler::utils::sanitize_product_name;
///
/// assert_eq!(sanitize_product_name("A/B:C*D"), "ABCD");
/// assert_eq!(sanitize_product_name("Shoe A"), "Shoe A");
/// ```
pub fn sanitize_product_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_NAME_CHARS.contains(c))
        .collect()
}

/// Build the archive entry name for a record
///
/// The position is zero-padded to at least `width` digits so that entries sort
/// lexicographically in input order; wider positions simply grow.
///
/// # Examples
///
/// ```
/// use product_image_bundler::utils::entry_filename;
///
/// assert_eq!(entry_filename(1, "Shoe A", "jpg", 3), "001_Shoe A.jpg");
/// assert_eq!(entry_filename(1234, "Boot", "jpg", 3), "1234_Boot.jpg");
/// ```
pub fn entry_filename(position: usize, safe_name: &str, extension: &str, width: usize) -> String {
    format!("{position:0width$}_{safe_name}.{extension}")
}
