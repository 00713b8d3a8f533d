pub mod article;
pub mod dispatch;
pub mod library;
pub mod map;
pub mod page;
pub mod report;
pub mod shared;
pub mod watch;
