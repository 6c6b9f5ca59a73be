/// Position of a request within the note pipeline
///
/// Stages only move forward: `Idle → Receiving → Transcribing → Prompting →
/// Completing → Done`. Any stage except `Prompting` may instead end the run
/// as failed, which is carried by the error rather than by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Idle,
    Receiving,
    Transcribing,
    Prompting,
    Completing,
    Done,
}

impl Stage {
    /// The stage that follows this one on the success path
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Receiving),
            Self::Receiving => Some(Self::Transcribing),
            Self::Transcribing => Some(Self::Prompting),
            Self::Prompting => Some(Self::Completing),
            Self::Completing => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Whether a run can end in failure while in this stage
    pub const fn can_fail(self) -> bool {
        !matches!(self, Self::Prompting | Self::Done)
    }

    /// Whether the run has finished
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}
