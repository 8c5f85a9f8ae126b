/// Configuration subsystem - startup settings
///
/// Handles loading configuration from .wordgridrc files, providing the
/// initial grid shape, navigation mode, and cell display width.

pub mod rc;

// Re-export public interface
pub use rc::{RcConfig, RcLoader};
