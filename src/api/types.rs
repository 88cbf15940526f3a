use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DetectedPreferences, Listing};

/// Version tag of the conversational contract this client speaks: the
/// prompt is the latest user message only (the backend keeps per-user
/// history), and preference fields are nullable.
pub const CHAT_CONTRACT: &str = "travel-chat/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response came back at all.
    #[error("backend unreachable: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}")]
    Backend { status: u16, detail: Option<String> },

    /// The request could not be built or sent for a local reason.
    #[error("request failed: {0}")]
    Request(String),

    /// A 2xx body that does not match the contract.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// One-line French summary shown to the user, e.g. as a synthetic
    /// assistant turn in the transcript.
    pub fn user_summary(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Le serveur semble injoignable. Vérifiez que le backend est démarré, puis réessayez."
                    .to_string()
            }
            ApiError::Backend {
                status,
                detail: Some(detail),
            } => format!(
                "Désolé, le serveur a répondu une erreur (HTTP {status} : {detail}). Pouvez-vous réessayer ?"
            ),
            ApiError::Backend { status, detail: None } => format!(
                "Désolé, le serveur a répondu une erreur (HTTP {status}). Pouvez-vous réessayer ?"
            ),
            ApiError::Request(reason) | ApiError::Decode(reason) => format!(
                "Désolé, une erreur s'est produite ({reason}). Pouvez-vous réessayer ?"
            ),
        }
    }
}

// --- Request bodies ---

#[derive(Debug, Serialize)]
pub struct ChatPayload<'a> {
    pub message: &'a str,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ResetPayload {
    pub user_id: i64,
}

// --- Response envelopes ---

/// Wire form of one travel offer; the backend speaks French field names.
#[derive(Debug, Deserialize)]
pub struct Annonce {
    pub nom: String,
    pub prix: f64,
    pub note: f64,
    pub lien: String,
    pub source: String,
}

impl From<Annonce> for Listing {
    fn from(wire: Annonce) -> Self {
        Listing {
            name: wire.nom,
            price: wire.prix,
            rating: wire.note,
            url: wire.lien,
            source: wire.source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatEnvelope {
    pub ai_response: String,
    #[serde(default)]
    pub annonces: Vec<Annonce>,
    #[serde(default)]
    pub detected_preferences: DetectedPreferences,
}

/// A settled chat reply, converted out of its wire envelope.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub text: String,
    pub listings: Vec<Listing>,
    pub preferences: DetectedPreferences,
}

impl From<ChatEnvelope> for AssistantReply {
    fn from(envelope: ChatEnvelope) -> Self {
        AssistantReply {
            text: envelope.ai_response,
            listings: envelope.annonces.into_iter().map(Listing::from).collect(),
            preferences: envelope.detected_preferences,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub active_conversations: i64,
}

/// Error bodies are `{"error": "..."}` when the backend provides one.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_envelope_decodes_offers_and_preferences() {
        let json = r#"{
            "ai_response": "Voici quelques idées...",
            "annonces": [
                {"nom": "Hôtel X", "prix": 150, "note": 4.2, "lien": "http://example.com", "source": "SiteA"}
            ],
            "detected_preferences": {"budget": "low", "interests": [], "destination": null}
        }"#;
        let reply = AssistantReply::from(serde_json::from_str::<ChatEnvelope>(json).unwrap());

        assert_eq!(reply.text, "Voici quelques idées...");
        assert_eq!(reply.listings.len(), 1);
        let offer = &reply.listings[0];
        assert_eq!(offer.name, "Hôtel X");
        assert_eq!(offer.price_label(), "150 DT");
        assert_eq!(offer.rating_label(), "4.2");
        assert_eq!(offer.source, "SiteA");
        assert_eq!(reply.preferences.budget.as_deref(), Some("low"));
        assert!(reply.preferences.destination.is_none());
    }

    #[test]
    fn test_chat_envelope_tolerates_missing_side_channels() {
        let reply = AssistantReply::from(
            serde_json::from_str::<ChatEnvelope>(r#"{"ai_response": "Bonjour"}"#).unwrap(),
        );
        assert!(reply.listings.is_empty());
        assert!(reply.preferences.is_empty());
    }

    #[test]
    fn test_health_decodes() {
        let health: HealthStatus = serde_json::from_str(
            r#"{"status": "healthy", "model_loaded": true, "active_conversations": 2}"#,
        )
        .unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.model_loaded);
        assert_eq!(health.active_conversations, 2);
    }

    #[test]
    fn test_user_summary_classifies_failures() {
        let network = ApiError::Network("connection refused".into());
        assert!(network.user_summary().contains("injoignable"));

        let backend = ApiError::Backend {
            status: 500,
            detail: Some("Modele non charge".into()),
        };
        let summary = backend.user_summary();
        assert!(summary.contains("HTTP 500"));
        assert!(summary.contains("Modele non charge"));

        let bare = ApiError::Backend {
            status: 404,
            detail: None,
        };
        assert!(bare.user_summary().contains("HTTP 404"));
    }
}
