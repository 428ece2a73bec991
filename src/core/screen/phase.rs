//=========================================================================
// Screen Phase
//=========================================================================
//
// Closed lifecycle state machine for a single screen.
//
//   TransitioningIn ──(entry done)──> Active
//         │                             │
//         └──────(changed away)─────────┤
//                                       ↓
//   Inactive <──(exit done)── TransitioningOut
//      │
//      └──(reselected)──> TransitioningIn | Active
//
// Dispatcher-driven steps come from `advance()`. Everything else is
// driven externally by the screen manager's change protocol.
//
//=========================================================================

//=== Phase ===============================================================

/// Lifecycle phase deciding which hook a screen receives each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Entry transition running; receives `transition_in_*` hooks.
    TransitioningIn,

    /// Fully visible; receives `update`/`draw`.
    Active,

    /// Exit transition running; receives `transition_out_*` hooks.
    TransitioningOut,

    /// Not dispatched.
    #[default]
    Inactive,
}

impl Phase {
    /// Returns true if a screen may move from `self` to `next`.
    ///
    /// Assigning the current phase again is always permitted and has no
    /// effect.
    pub fn can_become(self, next: Phase) -> bool {
        use Phase::*;

        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (TransitioningIn, Active | TransitioningOut | Inactive)
                | (Active, TransitioningOut | Inactive)
                | (TransitioningOut, Inactive)
                | (Inactive, TransitioningIn | Active)
        )
    }

    /// Successor reached when this phase's transition completes, if any.
    pub fn advance(self) -> Option<Phase> {
        match self {
            Phase::TransitioningIn => Some(Phase::Active),
            Phase::TransitioningOut => Some(Phase::Inactive),
            Phase::Active | Phase::Inactive => None,
        }
    }

    /// True for the phases a current screen occupies once it is showing.
    pub fn is_forward(self) -> bool {
        matches!(self, Phase::TransitioningIn | Phase::Active)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Phase::*;

    const ALL: [Phase; 4] = [TransitioningIn, Active, TransitioningOut, Inactive];

    #[test]
    fn default_is_inactive() {
        assert_eq!(Phase::default(), Inactive);
    }

    #[test]
    fn self_assignment_is_allowed() {
        for phase in ALL {
            assert!(phase.can_become(phase));
        }
    }

    #[test]
    fn transitioning_out_only_ends_inactive() {
        assert!(TransitioningOut.can_become(Inactive));
        assert!(!TransitioningOut.can_become(Active));
        assert!(!TransitioningOut.can_become(TransitioningIn));
    }

    #[test]
    fn inactive_is_left_only_by_reselection() {
        assert!(Inactive.can_become(TransitioningIn));
        assert!(Inactive.can_become(Active));
        assert!(!Inactive.can_become(TransitioningOut));
    }

    #[test]
    fn active_never_reenters_transition_in() {
        assert!(!Active.can_become(TransitioningIn));
        assert!(Active.can_become(TransitioningOut));
        assert!(Active.can_become(Inactive));
    }

    #[test]
    fn advance_follows_transition_completion() {
        assert_eq!(TransitioningIn.advance(), Some(Active));
        assert_eq!(TransitioningOut.advance(), Some(Inactive));
        assert_eq!(Active.advance(), None);
        assert_eq!(Inactive.advance(), None);

        for phase in ALL {
            if let Some(next) = phase.advance() {
                assert!(phase.can_become(next));
            }
        }
    }

    #[test]
    fn forward_phases() {
        assert!(TransitioningIn.is_forward());
        assert!(Active.is_forward());
        assert!(!TransitioningOut.is_forward());
        assert!(!Inactive.is_forward());
    }
}
