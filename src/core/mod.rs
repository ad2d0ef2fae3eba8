pub mod conversation;
pub mod llm;
pub mod responder;
