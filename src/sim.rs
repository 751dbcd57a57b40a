//! RC timing goal: the bulb should stay lit for ~5 seconds, modeled as five
//! time constants of the discovered path's equivalent R and C.

/// Target bulb-on duration in seconds.
pub const TARGET_DURATION: f64 = 5.0;

/// Allowed deviation from [`TARGET_DURATION`].
pub const DURATION_TOLERANCE: f64 = 0.1;

#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// No qualifying capacitor on the path (C == 0).
    NoCapacitor,
    /// Conducting path with zero equivalent resistance.
    ShortCircuit,
    /// Circuit is fine, the RC product just misses the target.
    Timing,
}

#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(FailureReason),
}

/// Result of checking a path's equivalent R and C against the timing goal.
#[derive(serde::Deserialize, serde::Serialize)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub tau: f64,
    pub duration: f64,
    pub outcome: Outcome,
}

/// Classify the timing goal for a total resistance and capacitance (SI base
/// units). Failure reasons are picked in priority order: missing capacitor,
/// then short circuit, then timing.
pub fn evaluate(total_resistance: f64, total_capacitance: f64) -> Evaluation {
    let tau = total_resistance * total_capacitance;
    let duration = 5.0 * tau;

    let on_target = (duration - TARGET_DURATION).abs() < DURATION_TOLERANCE;
    let outcome = if on_target && total_resistance > 0.0 && total_capacitance > 0.0 {
        Outcome::Success
    } else if total_capacitance == 0.0 {
        Outcome::Failed(FailureReason::NoCapacitor)
    } else if total_resistance == 0.0 {
        Outcome::Failed(FailureReason::ShortCircuit)
    } else {
        Outcome::Failed(FailureReason::Timing)
    };

    Evaluation {
        tau,
        duration,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_ohms_half_farad_hits_five_seconds() {
        let eval = evaluate(2.0, 0.5);
        assert_eq!(eval.tau, 1.0);
        assert_eq!(eval.duration, 5.0);
        assert_eq!(eval.outcome, Outcome::Success);
    }

    #[test]
    fn tolerance_is_a_tenth_of_a_second() {
        assert_eq!(evaluate(2.02, 0.5).outcome, Outcome::Success);
        assert_eq!(
            evaluate(2.2, 0.5).outcome,
            Outcome::Failed(FailureReason::Timing)
        );
    }

    #[test]
    fn missing_capacitor_wins_over_short_circuit() {
        assert_eq!(
            evaluate(0.0, 0.0).outcome,
            Outcome::Failed(FailureReason::NoCapacitor)
        );
        assert_eq!(
            evaluate(4.0, 0.0).outcome,
            Outcome::Failed(FailureReason::NoCapacitor)
        );
    }

    #[test]
    fn zero_resistance_is_a_short_circuit() {
        assert_eq!(
            evaluate(0.0, 0.5).outcome,
            Outcome::Failed(FailureReason::ShortCircuit)
        );
    }
}
