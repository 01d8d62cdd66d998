//! Wire types for the Assistants API.

pub mod assistant;
pub mod file;
pub mod message;
pub mod page;
pub mod run;
pub mod step;
pub mod thread;

pub use assistant::*;
pub use file::*;
pub use message::*;
pub use page::*;
pub use run::*;
pub use step::*;
pub use thread::*;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Free-form metadata attached to a resource (string keys and values).
pub type Metadata = HashMap<String, String>;

/// Deletion envelope returned by delete operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deleted {
    pub id: String,
    #[serde(default)]
    pub object: String,
    pub deleted: bool,
}
