pub mod content;
pub mod terminal;
pub mod vm;

pub use content::SlideContent;
pub use terminal::TerminalSurface;
