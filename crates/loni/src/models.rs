//! The message records that make up a conversation.
//!
//! Messages are kept in a single internal shape. The upstream chat-completions
//! format is only produced at the edge, by the provider, from these structs.
pub mod message;
pub mod role;
