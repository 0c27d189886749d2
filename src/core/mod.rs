pub mod catalog;
pub mod export;
pub mod session;
pub mod stats;
pub mod story;
pub mod view;
