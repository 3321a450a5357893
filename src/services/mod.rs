pub mod assistant;

pub use assistant::{ask, AssistantReply};
