//! Thread-local context tracking for crash reports.
//!
//! Records which scoring phase is running and which system is being
//! scored. Each rayon worker has its own context; guards restore the
//! previous context on drop.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<ScoringContext> = const { RefCell::new(ScoringContext::new()) };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringContext {
    pub phase: Option<ScoringPhase>,
    pub current_system: Option<String>,
}

impl ScoringContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_system: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPhase {
    LoadingInput,
    ReplacementWindows,
    InterventionScoring,
    Timeline,
    ImpactEstimate,
    Rendering,
}

impl std::fmt::Display for ScoringPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadingInput => write!(f, "loading_input"),
            Self::ReplacementWindows => write!(f, "replacement_windows"),
            Self::InterventionScoring => write!(f, "intervention_scoring"),
            Self::Timeline => write!(f, "timeline"),
            Self::ImpactEstimate => write!(f, "impact_estimate"),
            Self::Rendering => write!(f, "rendering"),
        }
    }
}

/// RAII guard restoring the previous context when dropped.
#[must_use]
pub struct ContextGuard {
    previous: ScoringContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

pub fn set_phase(phase: ScoringPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

pub fn set_current_system(system_id: &str) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_system = Some(system_id.to_string());
        ContextGuard { previous }
    })
}

pub fn get_current_context() -> ScoringContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_restore_previous_context() {
        assert_eq!(get_current_context(), ScoringContext::new());
        {
            let _phase = set_phase(ScoringPhase::ReplacementWindows);
            {
                let _system = set_current_system("hvac-1");
                let ctx = get_current_context();
                assert_eq!(ctx.phase, Some(ScoringPhase::ReplacementWindows));
                assert_eq!(ctx.current_system.as_deref(), Some("hvac-1"));
            }
            assert_eq!(get_current_context().current_system, None);
        }
        assert_eq!(get_current_context().phase, None);
    }

    #[test]
    fn phase_display_is_snake_case() {
        assert_eq!(ScoringPhase::InterventionScoring.to_string(), "intervention_scoring");
    }
}
