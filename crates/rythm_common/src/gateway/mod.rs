//! Assistant Gateway
//!
//! Forwards a conversation to a completion provider and returns the top
//! completion's text. Failures surface as `GatewayError`; the `Assistant`
//! turns them into tagged fallback replies.

pub mod assistant;
pub mod fallback;
pub mod protocol;
pub mod provider;

pub use assistant::{Assistant, Reply, ReplySource};
pub use fallback::Story;
pub use protocol::{
    parse_conversation, ChatMessage, ChatRole, GatewayFailure, GatewayReply, GatewayRequest,
};
pub use provider::{CompletionProvider, DaemonProvider, FakeProvider, UpstreamProvider};
