//! The six built-in detectors.

mod add_import;
mod block_comment;
mod getter_setter;
mod indentation;
mod remove_import;
mod trailing_whitespace;

pub use add_import::AddImportDetector;
pub use block_comment::BlockCommentDetector;
pub use getter_setter::GetterSetterDetector;
pub use indentation::IndentationDetector;
pub use remove_import::RemoveUnusedImportDetector;
pub use trailing_whitespace::TrailingWhitespaceDetector;
