//! Chat transcript with the scripted mood companion.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::actions::ActionSuggestion;
use crate::models::{Mood, Timestamp};
use crate::sources::RandomSource;

/// Messages kept in the persisted transcript.
pub const MAX_TRANSCRIPT_MESSAGES: usize = 50;

const GREETINGS: &[&str] = &[
    "Hey there! I'm your mood companion. How are you feeling today?",
    "Hello! I'm here to help boost your mood and suggest activities. What's on your mind?",
    "Hi! I'm your personal wellness assistant. Tell me how you're doing!",
];

const CONFUSED: &[&str] = &[
    "I'm not quite sure what you mean, but I'm here to help! Could you tell me more about how you're feeling?",
    "Help me understand better: are you feeling happy, sad, stressed, or something else?",
    "Let's figure this out together! Can you describe your current mood in a few words?",
];

fn replies_for(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Happy => &[
            "That's wonderful! Your positive energy is contagious! Let's keep this vibe going with some upbeat music!",
            "I love your enthusiasm! How about we celebrate with some feel-good songs or fun activities?",
            "Amazing energy! Let's amplify those good vibes with the perfect playlist!",
        ],
        Mood::Sad => &[
            "I'm sorry you're feeling down. It's okay to feel this way sometimes. Would you like some gentle music or a comforting quote?",
            "Sending you virtual hugs! Sometimes a good song or meditation can help. What sounds good to you?",
            "I hear you. Let's take it one step at a time. Would some calming music or inspirational words help right now?",
        ],
        Mood::Stressed => &[
            "Take a deep breath with me... Stress is tough, but we can work through this together. Want to try some relaxation techniques?",
            "I understand you're feeling overwhelmed. Let's find something to help you unwind, maybe some meditation or peaceful music?",
            "Stress happens to everyone. You're not alone! How about we start with some calming activities?",
        ],
        Mood::Energetic => &[
            "I can feel your energy! Let's channel that power into something amazing! Want some high-energy music or fun challenges?",
            "Your enthusiasm is awesome! Perfect time for some upbeat activities or motivational content!",
            "Love the energy! Let's keep that momentum going with exciting music and activities!",
        ],
        Mood::Tired => &[
            "Sounds like you need some rest and rejuvenation. How about some gentle music or a short meditation to recharge?",
            "Being tired is your body's way of asking for care. Let's find something soothing to help you feel better.",
            "Rest is important! Let me suggest some relaxing activities to help you recharge your batteries.",
        ],
        Mood::Creative => &[
            "I love your creative spirit! Let's fuel that inspiration with some artistic music or creative challenges!",
            "Creativity is flowing! Perfect time to explore some inspiring content or artistic activities!",
            "Your creative energy is beautiful! Let's find the perfect soundtrack for your artistic journey!",
        ],
        Mood::Calm | Mood::Peaceful => &[
            "What a lovely state to be in. Let's protect that calm with some gentle sounds.",
            "Peace looks good on you. Want a mindful moment or some soft music to stay here a while?",
        ],
        Mood::Focused => &[
            "You're in the zone! Let's keep distractions away with some focus music.",
            "Great focus! Want a playlist that helps you stay on task?",
        ],
    }
}

/// Picks a canned reply for a detected mood, or a clarifying question.
pub fn bot_reply(mood: Option<Mood>, rng: &mut dyn RandomSource) -> &'static str {
    let options = match mood {
        Some(mood) => replies_for(mood),
        None => CONFUSED,
    };
    options[rng.pick_index(options.len())]
}

pub fn greeting(rng: &mut dyn RandomSource) -> &'static str {
    GREETINGS[rng.pick_index(GREETINGS.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSuggestion>,
    /// "Switch to X mode" style prompts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ChatMessage {
    pub fn user(content: &str, timestamp: Timestamp) -> Self {
        Self::new(ChatRole::User, content, timestamp)
    }

    pub fn bot(content: &str, timestamp: Timestamp) -> Self {
        Self::new(ChatRole::Bot, content, timestamp)
    }

    fn new(role: ChatRole, content: &str, timestamp: Timestamp) -> Self {
        Self {
            id: format!("msg_{}", Uuid::new_v4()),
            role,
            content: content.to_string(),
            timestamp,
            mood: None,
            actions: vec![],
            suggestions: vec![],
        }
    }
}

/// The most recent chat messages, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > MAX_TRANSCRIPT_MESSAGES {
            let excess = self.messages.len() - MAX_TRANSCRIPT_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FixedPick;
    use chrono::Local;

    #[test]
    fn test_transcript_keeps_last_fifty() {
        let mut transcript = ChatTranscript::new();
        for i in 0..60 {
            transcript.push(ChatMessage::user(&format!("message {}", i), Local::now()));
        }

        assert_eq!(transcript.len(), MAX_TRANSCRIPT_MESSAGES);
        assert_eq!(transcript.messages()[0].content, "message 10");
        assert_eq!(transcript.last().unwrap().content, "message 59");
    }

    #[test]
    fn test_every_mood_has_replies() {
        let mut rng = FixedPick(5);
        for mood in Mood::ALL {
            assert!(!bot_reply(Some(mood), &mut rng).is_empty());
        }
        assert_eq!(bot_reply(None, &mut FixedPick(0)), CONFUSED[0]);
    }

    #[test]
    fn test_message_json_shape() {
        let mut message = ChatMessage::bot("hello", Local::now());
        message.mood = Some(Mood::Calm);

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "bot");
        assert_eq!(json["mood"], "calm");
        assert!(json.get("actions").is_none());
        assert!(json["timestamp"].is_string());

        let back: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }
}
