//! Coach - short advisory remarks after each answer
//!
//! Feedback is display-only. It arrives after a deliberate delay and never
//! affects round state; callers tag it with the round number and discard
//! it if the round has moved on.

use std::time::Duration;

use rand::seq::SliceRandom;

const CORRECT_PHRASES: &[&str] = &[
    "Nicely done!",
    "That's the one!",
    "Item slammed!",
    "Clean thinking!",
    "Perfect craft!",
    "No loss there!",
    "Muscle memory!",
    "That's how you climb!",
];

const WRONG_PHRASES: &[&str] = &[
    "Try again.",
    "Not quite.",
    "Mixed up the recipe?",
    "Ouch.",
    "Eighth place incoming?",
    "Slow down, think it over.",
    "A little awkward...",
    "Not that one.",
];

/// Streak length that earns a callout
const STREAK_CALLOUT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Encouraging,
    Neutral,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachFeedback {
    pub message: String,
    pub tone: Tone,
}

/// Produce feedback for an answer after `latency`
///
/// `streak` is the streak after the answer was applied.
pub async fn coach_feedback(
    item_name: &str,
    is_correct: bool,
    streak: u32,
    latency: Duration,
) -> CoachFeedback {
    tokio::time::sleep(latency).await;
    let feedback = compose(is_correct, streak, &mut rand::thread_rng());
    tracing::debug!(item = item_name, tone = ?feedback.tone, "Coach feedback ready");
    feedback
}

fn compose<R: rand::Rng>(is_correct: bool, streak: u32, rng: &mut R) -> CoachFeedback {
    if is_correct {
        let base = CORRECT_PHRASES.choose(rng).copied().unwrap_or("Nice.");
        let message = if streak >= STREAK_CALLOUT {
            format!("Streak {}! {}", streak, base)
        } else {
            base.to_string()
        };
        CoachFeedback {
            message,
            tone: Tone::Encouraging,
        }
    } else {
        CoachFeedback {
            message: WRONG_PHRASES.choose(rng).copied().unwrap_or("Not quite.").to_string(),
            tone: Tone::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_correct_answers_encourage() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let feedback = compose(true, 1, &mut rng);
        assert_eq!(feedback.tone, Tone::Encouraging);
        assert!(CORRECT_PHRASES.contains(&feedback.message.as_str()));
    }

    #[test]
    fn test_streak_callout() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let feedback = compose(true, 4, &mut rng);
        assert!(feedback.message.starts_with("Streak 4! "));
    }

    #[test]
    fn test_wrong_answers_are_critical() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let feedback = compose(false, 0, &mut rng);
        assert_eq!(feedback.tone, Tone::Critical);
        assert!(WRONG_PHRASES.contains(&feedback.message.as_str()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_feedback_waits_for_latency() {
        let started = tokio::time::Instant::now();
        let feedback = coach_feedback("Red Buff", false, 0, Duration::from_millis(400)).await;
        assert!(started.elapsed() >= Duration::from_millis(400));
        assert_eq!(feedback.tone, Tone::Critical);
    }
}
