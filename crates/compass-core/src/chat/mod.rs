//! Career advisor chat: request construction and the client-side
//! conversation state machine.

pub mod advisor;
pub mod orchestrator;
