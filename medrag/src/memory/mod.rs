//! Per-conversation session memory.
//!
//! [`ConversationMemory`] owns every live [`Session`]. A turn is first staged
//! by [`ConversationMemory::update`], which returns the prospective merged
//! snapshot without changing what [`ConversationMemory::get_session`] sees;
//! [`ConversationMemory::commit`] then applies it together with the
//! assistant's reply.

mod session;
mod store;
mod sweeper;

pub use session::{Interaction, MentionRecord, Session, SessionSnapshot, SessionState};
pub use store::{ConversationMemory, MemoryStats};

use crate::{MedragError, Result};

/// Longest accepted session id.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Check that a session id is non-empty, at most 128 characters and made of
/// `[A-Za-z0-9_.:-]`.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        return Err(MedragError::Validation(
            "session id cannot be empty".to_string(),
        ));
    }
    if session_id.len() > MAX_SESSION_ID_LEN {
        return Err(MedragError::Validation(format!(
            "session id is longer than {} characters",
            MAX_SESSION_ID_LEN
        )));
    }
    if let Some(bad) = session_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-')))
    {
        return Err(MedragError::Validation(format!(
            "session id contains invalid character {:?}",
            bad
        )));
    }
    Ok(())
}
