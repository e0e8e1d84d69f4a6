mod openai;
mod provider;
mod retrieval;

pub use openai::OpenAIChatProvider;
pub use provider::ChatProvider;
pub use retrieval::{CONTEXT_LIMIT, RetrievalChat};

#[cfg(test)]
pub use provider::MockChatProvider;
