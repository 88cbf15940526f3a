use chrono::Utc;

use crate::api::{ApiError, AssistantReply};
use crate::models::{ChatTurn, DetectedPreferences, Listing, Role};

/// Canned opening turn, shown on startup and after every reset.
pub const GREETING: &str = "Bonjour ! Je suis votre assistant voyage IA. \
Dites-moi ce que vous cherchez : budget, intérêts, destination...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pending,
}

/// An accepted outbound message, tagged with the request generation the
/// eventual settle must present to be applied.
#[derive(Debug)]
pub struct PendingSend {
    pub generation: u64,
    pub message: String,
    pub user_turn: ChatTurn,
}

/// What changed when a reply was applied, ready for rendering.
#[derive(Debug)]
pub struct ReplyUpdate {
    pub assistant_turn: ChatTurn,
    pub listings: Vec<Listing>,
    pub preferences: DetectedPreferences,
}

/// Conversation state machine. Owns the transcript and the side-channel
/// snapshots, and enforces the one-request-in-flight policy so headless
/// callers cannot violate it either.
///
/// Phases move `Idle → Pending` on an accepted send and back to `Idle`
/// on every settle path; nothing can leave the session pending forever.
/// Settles carry a generation number so a reply that was in flight when
/// the session was reset (or superseded) is discarded instead of
/// overwriting newer state.
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    listings: Vec<Listing>,
    preferences: DetectedPreferences,
    phase: Phase,
    generation: u64,
    last_turn_id: i64,
}

impl ChatSession {
    pub fn new() -> Self {
        let mut session = Self {
            turns: Vec::new(),
            listings: Vec::new(),
            preferences: DetectedPreferences::default(),
            phase: Phase::Idle,
            generation: 0,
            last_turn_id: 0,
        };
        session.push_turn(Role::Assistant, GREETING.to_string());
        session
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn preferences(&self) -> &DetectedPreferences {
        &self.preferences
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Accept a user message for sending. Returns `None` without any
    /// state change when the trimmed text is empty or another send is
    /// still pending; otherwise the user turn is appended immediately
    /// (optimistic) and the session transitions to pending.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingSend> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.phase == Phase::Pending {
            return None;
        }

        self.phase = Phase::Pending;
        self.generation += 1;
        let user_turn = self.push_turn(Role::User, trimmed.to_string());

        Some(PendingSend {
            generation: self.generation,
            message: trimmed.to_string(),
            user_turn,
        })
    }

    /// Apply a successful reply. The assistant turn is appended and both
    /// side channels are snapshot-replaced: an empty or absent listings
    /// array empties the current offers. Stale generations are dropped.
    pub fn apply_reply(&mut self, generation: u64, reply: AssistantReply) -> Option<ReplyUpdate> {
        if !self.settle(generation) {
            return None;
        }

        let assistant_turn = self.push_turn(Role::Assistant, reply.text);
        self.listings = reply.listings;
        self.preferences = reply.preferences;

        Some(ReplyUpdate {
            assistant_turn,
            listings: self.listings.clone(),
            preferences: self.preferences.clone(),
        })
    }

    /// Apply a failed send: one synthetic assistant turn carrying the
    /// user-facing summary. Listings and preferences are untouched.
    pub fn apply_failure(&mut self, generation: u64, error: &ApiError) -> Option<ChatTurn> {
        if !self.settle(generation) {
            return None;
        }
        Some(self.push_turn(Role::Assistant, error.user_summary()))
    }

    /// Clear the transcript back to the canned greeting and empty both
    /// side channels. Bumping the generation discards whatever may still
    /// be in flight. Returns the new greeting turn.
    pub fn reset(&mut self) -> ChatTurn {
        self.turns.clear();
        self.listings.clear();
        self.preferences = DetectedPreferences::default();
        self.phase = Phase::Idle;
        self.generation += 1;
        self.push_turn(Role::Assistant, GREETING.to_string())
    }

    fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Pending {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }

    fn push_turn(&mut self, role: Role, text: String) -> ChatTurn {
        let turn = ChatTurn {
            id: self.next_turn_id(),
            role,
            text,
            created_at: Utc::now(),
        };
        self.turns.push(turn.clone());
        turn
    }

    /// Ids follow the wall clock but stay strictly increasing even when
    /// several turns land in the same millisecond.
    fn next_turn_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_turn_id + 1);
        self.last_turn_id = id;
        id
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> AssistantReply {
        AssistantReply {
            text: text.to_string(),
            listings: Vec::new(),
            preferences: DetectedPreferences::default(),
        }
    }

    fn offer(name: &str) -> Listing {
        Listing {
            name: name.to_string(),
            price: 150.0,
            rating: 4.2,
            url: "http://example.com/offer".to_string(),
            source: "SiteA".to_string(),
        }
    }

    #[test]
    fn test_new_session_greets() {
        let session = ChatSession::new();
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].role, Role::Assistant);
        assert_eq!(session.turns()[0].text, GREETING);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_successful_rounds_append_two_turns_each() {
        let mut session = ChatSession::new();
        let initial = session.turns().len();

        for i in 0..4 {
            let send = session.begin_send(&format!("message {i}")).unwrap();
            assert!(session.is_pending());
            session.apply_reply(send.generation, reply(&format!("réponse {i}"))).unwrap();
            assert!(!session.is_pending());
        }

        assert_eq!(session.turns().len(), initial + 8);

        // FIFO by send order, alternating user/assistant after the greeting.
        let texts: Vec<&str> = session.turns()[1..].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "message 0", "réponse 0", "message 1", "réponse 1", "message 2", "réponse 2",
                "message 3", "réponse 3"
            ]
        );
    }

    #[test]
    fn test_blank_input_is_a_silent_no_op() {
        let mut session = ChatSession::new();
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t").is_none());
        assert_eq!(session.turns().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_input_is_trimmed_before_sending() {
        let mut session = ChatSession::new();
        let send = session.begin_send("  bonjour  ").unwrap();
        assert_eq!(send.message, "bonjour");
        assert_eq!(send.user_turn.text, "bonjour");
    }

    #[test]
    fn test_one_send_in_flight() {
        let mut session = ChatSession::new();
        let send = session.begin_send("premier").unwrap();
        assert!(session.begin_send("deuxième").is_none());
        assert_eq!(session.turns().len(), 2);

        session.apply_reply(send.generation, reply("ok")).unwrap();
        assert!(session.begin_send("deuxième").is_some());
    }

    #[test]
    fn test_listings_are_replaced_not_merged() {
        let mut session = ChatSession::new();

        let send = session.begin_send("hôtel à Tunis").unwrap();
        let update = session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Voici".to_string(),
                    listings: vec![offer("Hôtel A"), offer("Hôtel B")],
                    preferences: DetectedPreferences::default(),
                },
            )
            .unwrap();
        assert_eq!(update.listings.len(), 2);
        assert_eq!(session.listings().len(), 2);

        let send = session.begin_send("autre chose").unwrap();
        let update = session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Une seule offre".to_string(),
                    listings: vec![offer("Hôtel C")],
                    preferences: DetectedPreferences::default(),
                },
            )
            .unwrap();
        assert_eq!(update.listings.len(), 1);
        assert_eq!(session.listings()[0].name, "Hôtel C");
    }

    #[test]
    fn test_reply_without_listings_empties_the_snapshot() {
        let mut session = ChatSession::new();

        let send = session.begin_send("hôtel à Tunis").unwrap();
        session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Voici".to_string(),
                    listings: vec![offer("Hôtel A")],
                    preferences: DetectedPreferences::default(),
                },
            )
            .unwrap();
        assert_eq!(session.listings().len(), 1);

        let send = session.begin_send("merci").unwrap();
        session.apply_reply(send.generation, reply("De rien !")).unwrap();
        assert!(session.listings().is_empty());
    }

    #[test]
    fn test_preferences_replaced_wholesale() {
        let mut session = ChatSession::new();

        let send = session.begin_send("pas cher, plage").unwrap();
        session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Noté".to_string(),
                    listings: Vec::new(),
                    preferences: DetectedPreferences {
                        budget: Some("economique".to_string()),
                        destination: None,
                        interests: vec!["plage".to_string()],
                    },
                },
            )
            .unwrap();
        assert_eq!(session.preferences().budget.as_deref(), Some("economique"));

        let send = session.begin_send("plutôt Paris").unwrap();
        session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Paris alors".to_string(),
                    listings: Vec::new(),
                    preferences: DetectedPreferences {
                        budget: None,
                        destination: Some("Paris".to_string()),
                        interests: Vec::new(),
                    },
                },
            )
            .unwrap();

        // Full replace: the earlier budget does not survive.
        assert!(session.preferences().budget.is_none());
        assert_eq!(session.preferences().destination.as_deref(), Some("Paris"));
        assert!(session.preferences().interests.is_empty());
    }

    #[test]
    fn test_failure_appends_one_turn_and_keeps_side_state() {
        let mut session = ChatSession::new();

        let send = session.begin_send("hôtel à Tunis").unwrap();
        session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Voici".to_string(),
                    listings: vec![offer("Hôtel A")],
                    preferences: DetectedPreferences {
                        budget: Some("economique".to_string()),
                        destination: None,
                        interests: Vec::new(),
                    },
                },
            )
            .unwrap();
        let len_before = session.turns().len();

        let send = session.begin_send("et ensuite ?").unwrap();
        let error = ApiError::Network("connection refused".to_string());
        let turn = session.apply_failure(send.generation, &error).unwrap();

        assert_eq!(turn.role, Role::Assistant);
        assert!(turn.text.contains("injoignable"));
        // one user turn + one synthetic assistant turn
        assert_eq!(session.turns().len(), len_before + 2);
        assert!(!session.is_pending());

        // The snapshots still reflect the last successful reply.
        assert_eq!(session.listings().len(), 1);
        assert_eq!(session.preferences().budget.as_deref(), Some("economique"));
    }

    #[test]
    fn test_reset_restores_greeting_and_clears_side_state() {
        let mut session = ChatSession::new();

        let send = session.begin_send("hôtel à Tunis").unwrap();
        session
            .apply_reply(
                send.generation,
                AssistantReply {
                    text: "Voici".to_string(),
                    listings: vec![offer("Hôtel A")],
                    preferences: DetectedPreferences {
                        budget: Some("economique".to_string()),
                        destination: None,
                        interests: Vec::new(),
                    },
                },
            )
            .unwrap();

        let greeting = session.reset();
        assert_eq!(greeting.text, GREETING);
        assert_eq!(session.turns().len(), 1);
        assert!(session.listings().is_empty());
        assert!(session.preferences().is_empty());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_reply_in_flight_at_reset_is_discarded() {
        let mut session = ChatSession::new();

        let send = session.begin_send("hôtel à Tunis").unwrap();
        session.reset();

        assert!(session
            .apply_reply(send.generation, reply("réponse tardive"))
            .is_none());
        assert!(session
            .apply_failure(send.generation, &ApiError::Network("late".to_string()))
            .is_none());
        assert_eq!(session.turns().len(), 1);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_settle_is_one_shot() {
        let mut session = ChatSession::new();
        let send = session.begin_send("bonjour").unwrap();
        assert!(session.apply_reply(send.generation, reply("salut")).is_some());
        // A duplicate settle for the same generation does nothing.
        assert!(session.apply_reply(send.generation, reply("salut")).is_none());
    }

    #[test]
    fn test_turn_ids_strictly_increase() {
        let mut session = ChatSession::new();
        for i in 0..20 {
            let send = session.begin_send(&format!("m{i}")).unwrap();
            session.apply_reply(send.generation, reply("ok")).unwrap();
        }
        let ids: Vec<i64> = session.turns().iter().map(|t| t.id).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
