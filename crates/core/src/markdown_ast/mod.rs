//! Structural reads over markdown bodies, backed by comrak.

pub mod comrak;
pub mod types;

pub use self::comrak::{find_headings, prose_lines};
pub use types::HeadingInfo;
