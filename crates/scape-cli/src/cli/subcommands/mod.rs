mod article;
mod library;
mod report;

pub use article::ArticleCommands;
pub use library::LibraryCommands;
pub use report::ReportCommands;
