pub mod config;
pub mod criteria;
pub mod error;
pub mod export;
pub mod trends;

pub use config::KeyseekConfig;
pub use criteria::{Audience, KeywordResult, SearchCriteria};
pub use error::{KeyseekError, Result};
