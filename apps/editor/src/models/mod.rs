pub mod document;
pub mod samples;
pub mod template;

pub use document::Document;
pub use template::Template;
