//! Structural parse failures.
//!
//! Any of these means the page shape has drifted (or the page is not the
//! logged-in syllabus). The whole parse fails; partial catalogs are never returned.

/// Error returned by the syllabus parser. Section and item numbers are 1-based.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A built-in selector or pattern failed to compile.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
    /// Section header element has no text.
    #[error("section {section}: header has no text")]
    MissingSectionName { section: usize },
    /// Section header text sanitized down to nothing.
    #[error("section {section}: header {raw:?} has no usable characters")]
    EmptySectionName { section: usize, raw: String },
    /// No element follows the header's parent, so there is no item list.
    #[error("section {section} ({name}): no item list follows the header")]
    MissingItemList { section: usize, name: String },
    /// Item has no anchor carrying the video title.
    #[error("section {section}, item {item}: no titled anchor")]
    MissingVideoName { section: usize, item: usize },
    /// Item has no anchor linking to a media file.
    #[error("section {section}, item {item} ({name}): no media link")]
    MissingMediaLink {
        section: usize,
        item: usize,
        name: String,
    },
}
