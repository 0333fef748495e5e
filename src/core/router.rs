//! Routing after the critic verdict.

use crate::core::state::{Decision, Verdict};

/// Next stage after critique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Verdict was `Safe`; hand the command to the executor.
    Execute,
    /// Anything else; halt and report the reason.
    Report,
}

/// Map a verdict to the next stage. Pure, no side effects.
pub fn route(verdict: &Verdict) -> Route {
    match verdict.decision {
        Decision::Safe => Route::Execute,
        Decision::Unsafe => Route::Report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_routes_to_execute() {
        let verdict = Verdict {
            decision: Decision::Safe,
            reason: String::new(),
        };
        assert_eq!(route(&verdict), Route::Execute);
    }

    #[test]
    fn unsafe_routes_to_report() {
        let verdict = Verdict::unsafe_with("delete is not an allowed action");
        assert_eq!(route(&verdict), Route::Report);
    }
}
