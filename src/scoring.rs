use crate::models::FinalScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTier {
    Perfect,
    Great,
    Good,
    KeepPracticing,
}

impl MessageTier {
    pub fn message(self) -> &'static str {
        match self {
            MessageTier::Perfect => "Perfect! สุดยอดไปเลย!",
            MessageTier::Great => "Great Job! เก่งมาก!",
            MessageTier::Good => "Good Try! พยายามได้ดี!",
            MessageTier::KeepPracticing => "Keep Practicing! สู้ๆ นะ!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MessageTier::Perfect => "🏆",
            MessageTier::Great => "🌟",
            MessageTier::Good => "👍",
            MessageTier::KeepPracticing => "📚",
        }
    }
}

/// `100 * score / total`; zero when there were no questions.
pub fn percentage(result: FinalScore) -> f64 {
    if result.total == 0 {
        return 0.0;
    }
    100.0 * result.score as f64 / result.total as f64
}

/// Tier for a result. Each tier includes its lower bound, so exactly 80% is
/// `Great` and exactly 50% is `Good`.
pub fn message_tier(result: FinalScore) -> MessageTier {
    let FinalScore { score, total } = result;
    if total == 0 {
        return MessageTier::KeepPracticing;
    }
    // Cross-multiplied to keep the boundaries exact.
    if score >= total {
        MessageTier::Perfect
    } else if score * 100 >= total * 80 {
        MessageTier::Great
    } else if score * 100 >= total * 50 {
        MessageTier::Good
    } else {
        MessageTier::KeepPracticing
    }
}
