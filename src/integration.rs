use crate::value::Value;

/// Discretization rule for the integral term.
///
/// The rule is a property of the whole bank, fixed at the type level when
/// [`PidBank`](crate::PidBank) is instantiated; every controller in a bank
/// integrates the same way. It enters in three places: deriving the I
/// coefficient from either parameter form, inverting that derivation in
/// the getters, and producing the per-tick accumulator increment.
pub trait Integration {
    /// I coefficient from the time-constant form, `tn` nonzero.
    fn coeff_from_reset_time<V: Value>(kr: V, ts: V, tn: V) -> V;

    /// I coefficient from the gain form.
    fn coeff_from_gain<V: Value>(ki: V, ts: V) -> V;

    /// Integral reset time recovered from a nonzero I coefficient.
    fn reset_time_from_coeff<V: Value>(cp: V, ts: V, ci: V) -> V;

    /// Integral gain recovered from the I coefficient.
    fn gain_from_coeff<V: Value>(ci: V, ts: V) -> V;

    /// Accumulator increment for one tick, already rescaled.
    fn increment<V: Value>(ci: V, e_now: V, e_prev: V) -> V;
}

/// Rectangular (backward Euler) approximation of the integral: each tick
/// contributes the previous error sample over one full sample interval.
#[derive(Clone, Copy, Debug)]
pub enum Rectangular {}

impl Integration for Rectangular {
    fn coeff_from_reset_time<V: Value>(kr: V, ts: V, tn: V) -> V {
        (kr * ts) / tn
    }

    fn coeff_from_gain<V: Value>(ki: V, ts: V) -> V {
        ki * ts
    }

    fn reset_time_from_coeff<V: Value>(cp: V, ts: V, ci: V) -> V {
        (cp * ts) / ci
    }

    fn gain_from_coeff<V: Value>(ci: V, ts: V) -> V {
        ci / ts
    }

    fn increment<V: Value>(ci: V, _e_now: V, e_prev: V) -> V {
        (ci * e_prev).rescale()
    }
}

/// Trapezoidal (Tustin) approximation of the integral: each tick
/// contributes the mean of the two most recent error samples.
#[derive(Clone, Copy, Debug)]
pub enum Trapezoidal {}

impl Integration for Trapezoidal {
    fn coeff_from_reset_time<V: Value>(kr: V, ts: V, tn: V) -> V {
        (kr * ts) / (tn + tn)
    }

    fn coeff_from_gain<V: Value>(ki: V, ts: V) -> V {
        ki * ts / (V::one() + V::one())
    }

    fn reset_time_from_coeff<V: Value>(cp: V, ts: V, ci: V) -> V {
        (cp * ts) / (ci + ci)
    }

    fn gain_from_coeff<V: Value>(ci: V, ts: V) -> V {
        (ci + ci) / ts
    }

    fn increment<V: Value>(ci: V, e_now: V, e_prev: V) -> V {
        (ci * (e_now + e_prev)).rescale()
    }
}
