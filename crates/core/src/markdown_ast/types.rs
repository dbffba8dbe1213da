/// Information about a heading found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingInfo {
    /// The heading text content
    pub title: String,
    /// The heading level (1-6)
    pub level: u8,
}
