//! Pre-written replies used whenever the gateway cannot answer.
//!
//! Every assistant feature has its own fallback so the user always sees a
//! coherent, supportive response.

use rand::seq::SliceRandom;

pub struct MoodFallback {
    pub mood: &'static str,
    pub response: &'static str,
    pub tip: &'static str,
}

pub const MOOD_FALLBACKS: &[MoodFallback] = &[
    MoodFallback {
        mood: "happy",
        response: "That's wonderful that you're feeling happy! 😊 This is a great moment to celebrate. Hold onto this feeling and remember what made you feel this way.",
        tip: "Tip: Take a moment to appreciate what brought you joy. Gratitude amplifies happiness!",
    },
    MoodFallback {
        mood: "sad",
        response: "It's okay to feel sad. 💙 Your emotions are valid, and feeling down sometimes is a natural part of being human. You're not alone in this.",
        tip: "Tip: Try the 5-4-3-2-1 grounding technique: Name 5 things you see, 4 you touch, 3 you hear, 2 you smell, 1 you taste.",
    },
    MoodFallback {
        mood: "anxious",
        response: "Anxiety can feel overwhelming, but remember: you've gotten through every difficult moment before. 💪 Let's bring you back to the present.",
        tip: "Tip: Try box breathing - breathe in for 4, hold for 4, out for 4, hold for 4. Repeat 5 times.",
    },
    MoodFallback {
        mood: "angry",
        response: "Anger is telling you something matters to you. 🔥 It's a valid feeling. Take a moment to honor it before deciding your next step.",
        tip: "Tip: Take 5 deep breaths. Write down what made you angry. Sometimes clarity comes with space.",
    },
    MoodFallback {
        mood: "empty",
        response: "That numb, empty feeling can be tough to sit with. 🌙 Know that this feeling isn't permanent. It's your mind's way of processing.",
        tip: "Tip: Do something small that usually brings you comfort: tea, music, a favorite place. Small acts matter.",
    },
];

/// Moods the fallback table knows; anything else is answered as "empty"
pub const DEFAULT_MOOD: &str = "empty";

pub const CHAT_FALLBACKS: &[&str] = &[
    "That sounds really important to you. I'm listening. 💙",
    "I hear you. That must have been challenging. What would help you right now?",
    "You're showing real strength by opening up about this. Keep going. 💪",
    "That's a lot to carry. Have you talked to someone you trust about this?",
    "It makes sense that you feel this way. Your feelings are valid.",
    "What's one small thing that made today a little better?",
    "Remember, you don't have to figure everything out right now. One step at a time.",
    "I'm here for you. Tell me more about what's on your mind.",
];

pub const CRISIS_FALLBACK: &str = "I hear that you're going through something really difficult right now. 💙\n\n\
Please know: You matter, and help is available.\n\n\
**Crisis Resources:**\n\
- National Suicide Prevention Lifeline: 988 (call or text)\n\
- Crisis Text Line: Text HOME to 741741\n\
- International: findahelpline.com\n\n\
You don't have to face this alone. Please reach out to someone you trust or call one of these numbers now.";

pub const REDEMPTION_FALLBACK: &str = "Thank you for being honest with yourself. That takes real courage. 💙\n\n\
What happened doesn't define you. What matters now is that you're thinking about change.\n\n\
**Your action for today:** Do one small thing that aligns with the person you want to be.\n\n\
Transformation happens one choice at a time. You've got this!";

pub const LESSON_MARKER: &str = "**Lesson:**";
pub const ACTION_MARKER: &str = "**Action:**";

const DEFAULT_LESSON: &str = "Reflect on what this story means to you.";
const DEFAULT_ACTION: &str = "How can you apply this lesson today?";

/// Short motivational story with a takeaway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub content: String,
    pub lesson: String,
    pub action: String,
}

impl Story {
    /// Split a story on its `**Lesson:**` / `**Action:**` markers.
    /// Missing sections get a generic reflection prompt.
    pub fn parse(title: &str, text: &str) -> Self {
        let (content, rest) = match text.split_once(LESSON_MARKER) {
            Some((content, rest)) => (content, Some(rest)),
            None => (text, None),
        };

        let (lesson, action) = match rest {
            Some(rest) => match rest.split_once(ACTION_MARKER) {
                Some((lesson, action)) => (lesson.trim(), action.trim()),
                None => (rest.trim(), DEFAULT_ACTION),
            },
            None => (DEFAULT_LESSON, DEFAULT_ACTION),
        };

        Self {
            title: title.to_string(),
            content: content.trim().to_string(),
            lesson: lesson.to_string(),
            action: action.to_string(),
        }
    }

    /// Render with the markers `parse` understands
    pub fn to_text(&self) -> String {
        format!(
            "{}\n\n{} {}\n\n{} {}",
            self.content, LESSON_MARKER, self.lesson, ACTION_MARKER, self.action
        )
    }
}

struct StorySeed {
    title: &'static str,
    content: &'static str,
    lesson: &'static str,
    action: &'static str,
}

const STORIES: &[StorySeed] = &[
    StorySeed {
        title: "The Power of Small Steps",
        content: "Maya felt overwhelmed by her goals. Instead of giving up, she decided to do just one small task each day. Day by day, her small actions compounded. Three months later, she was amazed at how far she'd come. She realized that every big achievement starts with tiny, consistent steps.",
        lesson: "Progress isn't always about giant leaps. Small, consistent actions lead to amazing results.",
        action: "Today: Pick ONE small task related to your goal and complete it.",
    },
    StorySeed {
        title: "Turning Failure into Fuel",
        content: "Jordan failed his first attempt at getting his driving license. Instead of feeling defeated, he studied harder and practiced more. He learned from his mistakes and passed on the second try. Now he realized that failure wasn't the end. It was just feedback.",
        lesson: "Failure is not the opposite of success; it's part of the path to success.",
        action: "Today: Think of a recent setback and identify one lesson you learned.",
    },
    StorySeed {
        title: "Finding Strength in Vulnerability",
        content: "Sierra always tried to be perfect and never showed her struggles. One day, she opened up to her friend about her anxiety. Her friend shared similar feelings. By being vulnerable, Sierra discovered she wasn't alone, and her friendships became deeper and more real.",
        lesson: "It's okay to not be okay. Vulnerability creates genuine connections.",
        action: "Today: Share something real with someone you trust.",
    },
    StorySeed {
        title: "The Gift of Helping Others",
        content: "Alex was struggling with his own problems and felt stuck. He decided to volunteer at a local shelter. Helping others made him feel purposeful and reminded him that he had value. Interestingly, helping others ended up helping him too.",
        lesson: "Giving to others is also giving to yourself. Purpose heals.",
        action: "Today: Do one kind act for someone without expecting anything back.",
    },
];

/// Fallback for a mood check-in: the mood's response and grounding tip
pub fn mood_fallback(mood: &str) -> String {
    let mood = mood.trim().to_lowercase();
    let entry = MOOD_FALLBACKS
        .iter()
        .find(|m| m.mood == mood)
        .or_else(|| MOOD_FALLBACKS.iter().find(|m| m.mood == DEFAULT_MOOD))
        .unwrap_or(&MOOD_FALLBACKS[0]);
    format!("{}\n\n{}", entry.response, entry.tip)
}

pub fn chat_fallback() -> &'static str {
    CHAT_FALLBACKS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CHAT_FALLBACKS[0])
}

/// All pre-written stories
pub fn stories() -> Vec<Story> {
    STORIES
        .iter()
        .map(|s| Story {
            title: s.title.to_string(),
            content: s.content.to_string(),
            lesson: s.lesson.to_string(),
            action: s.action.to_string(),
        })
        .collect()
}

pub fn inspiration_fallback() -> Story {
    let mut all = stories();
    let index = rand::random::<usize>() % all.len();
    all.swap_remove(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_fallback_known_and_unknown() {
        let happy = mood_fallback("Happy");
        assert!(happy.starts_with("That's wonderful"));
        assert!(happy.contains("\n\nTip: Take a moment"));

        let unknown = mood_fallback("bewildered");
        assert_eq!(unknown, mood_fallback("empty"));
    }

    #[test]
    fn test_chat_fallback_from_table() {
        for _ in 0..20 {
            assert!(CHAT_FALLBACKS.contains(&chat_fallback()));
        }
    }

    #[test]
    fn test_story_parse_full() {
        let story = Story::parse(
            "Today",
            "Once upon a time.\n\n**Lesson:** Keep going.\n\n**Action:** Walk outside.",
        );
        assert_eq!(story.content, "Once upon a time.");
        assert_eq!(story.lesson, "Keep going.");
        assert_eq!(story.action, "Walk outside.");
    }

    #[test]
    fn test_story_parse_partial_and_plain() {
        let lesson_only = Story::parse("t", "Text **Lesson:** Be brave.");
        assert_eq!(lesson_only.lesson, "Be brave.");
        assert_eq!(lesson_only.action, DEFAULT_ACTION);

        let plain = Story::parse("t", "  Just a story.  ");
        assert_eq!(plain.content, "Just a story.");
        assert_eq!(plain.lesson, DEFAULT_LESSON);
    }

    #[test]
    fn test_fallback_stories_render_and_parse_back() {
        for story in stories() {
            let parsed = Story::parse(&story.title, &story.to_text());
            assert_eq!(parsed, story);
        }
        assert!(stories()
            .iter()
            .any(|s| s.title == inspiration_fallback().title));
    }
}
