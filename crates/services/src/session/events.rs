use std::fmt;

/// A committed change to the session, reported after the fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Submitted,
    Advanced,
    Rewound,
    Branched,
    JumpedToLatest,
    Restored,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Transition::Started => "started",
            Transition::Submitted => "submitted",
            Transition::Advanced => "advanced",
            Transition::Rewound => "rewound",
            Transition::Branched => "branched",
            Transition::JumpedToLatest => "jumped-to-latest",
            Transition::Restored => "restored",
        };
        f.write_str(name)
    }
}

/// Observer of session transitions. Called with the cursor after the change;
/// it has no way to veto or alter it.
pub trait TransitionListener {
    fn on_transition(&self, transition: Transition, cursor: usize);
}

impl<F> TransitionListener for F
where
    F: Fn(Transition, usize),
{
    fn on_transition(&self, transition: Transition, cursor: usize) {
        self(transition, cursor);
    }
}
