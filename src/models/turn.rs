use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation transcript. Turns are created on send
/// (user) or on reply receipt (assistant), never mutated afterwards, and
/// live only as long as the session.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub id: i64,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
