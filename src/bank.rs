use core::marker::PhantomData;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::error::PidResult;
#[cfg(not(feature = "unchecked"))]
use crate::error::PidError;
use crate::integration::{Integration, Trapezoidal};
use crate::value::Value;

/// Controller parameters in time-constant form.
///
/// Equivalent to [`Gains`] through `Kp = Kr`, `Ki = Kr/Tn`, `Kd = Kr*Tv`;
/// both forms derive the same internal coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeConstants<V> {
    /// Controller gain `Kr`.
    pub kr: V,
    /// Integral reset time `Tn`; zero disables integral action.
    pub tn: V,
    /// Derivative time `Tv`.
    pub tv: V,
    /// Derivative filter time constant `Tf`; zero disables filtering.
    pub tf: V,
    /// Sample time `Ts`, strictly positive.
    pub t_sample: V,
}

impl<V: Value> Default for TimeConstants<V> {
    fn default() -> Self {
        Self {
            kr: V::zero(),
            tn: V::zero(),
            tv: V::zero(),
            tf: V::zero(),
            t_sample: V::one(),
        }
    }
}

/// Controller parameters in gain form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gains<V> {
    /// Proportional gain `Kp`.
    pub kp: V,
    /// Integral gain `Ki`.
    pub ki: V,
    /// Derivative gain `Kd`.
    pub kd: V,
    /// Derivative filter time constant `Tf`; zero disables filtering.
    pub tf: V,
    /// Sample time `Ts`, strictly positive.
    pub t_sample: V,
}

impl<V: Value> Default for Gains<V> {
    fn default() -> Self {
        Self {
            kp: V::zero(),
            ki: V::zero(),
            kd: V::zero(),
            tf: V::zero(),
            t_sample: V::one(),
        }
    }
}

/// The three control-action contributions most recently computed by
/// [`PidBank::step`]. The integral and derivative parts persist across
/// ticks as accumulator state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Terms<V> {
    /// Proportional contribution.
    pub p: V,
    /// Integral accumulator.
    pub i: V,
    /// Derivative contribution.
    pub d: V,
}

/// Two-deep history of one tracked signal.
#[derive(Clone, Copy, Debug)]
struct History<V> {
    current: V,
    previous: V,
}

impl<V: Value> History<V> {
    fn zeroed() -> Self {
        Self {
            current: V::zero(),
            previous: V::zero(),
        }
    }

    /// Retires the current sample and records a new one.
    fn push(&mut self, value: V) {
        self.previous = self.current;
        self.current = value;
    }

    /// Retires the current sample; `current` is overwritten later in the
    /// same tick.
    fn shift(&mut self) {
        self.previous = self.current;
    }
}

/// One controller slot: the derived difference-equation coefficients plus
/// the short signal history they operate on.
#[derive(Clone, Copy, Debug)]
struct Controller<V> {
    /// Proportional coefficient (`Kp`).
    cp: V,
    /// Integral coefficient (`Ki*Ts`, halved under the trapezoidal rule).
    ci: V,
    /// Derivative coefficient without filtering (`Kd/Ts`).
    cd: V,
    /// Derivative coefficient with filtering (`Kd/Tf`).
    cdf: V,
    /// Filter pole, the retained fraction of the previous derivative term.
    cf: V,
    t_sample: V,
    y_min: V,
    y_max: V,
    anti_windup: bool,
    error: History<V>,
    output: History<V>,
    p: V,
    i: V,
    d: V,
}

impl<V: Value> Controller<V> {
    /// The post-initialization state: zero coefficients, unit sample time,
    /// anti-windup off, zeroed history and terms, limits at the numeric
    /// type's extremes.
    fn pristine() -> Self {
        Self {
            cp: V::zero(),
            ci: V::zero(),
            cd: V::zero(),
            cdf: V::zero(),
            cf: V::zero(),
            t_sample: V::one(),
            y_min: V::min_value(),
            y_max: V::max_value(),
            anti_windup: false,
            error: History::zeroed(),
            output: History::zeroed(),
            p: V::zero(),
            i: V::zero(),
            d: V::zero(),
        }
    }

    /// Zeroes terms and history; configuration stays untouched.
    fn clear_transients(&mut self) {
        self.p = V::zero();
        self.i = V::zero();
        self.d = V::zero();
        self.error = History::zeroed();
        self.output = History::zeroed();
    }
}

/// A bank of independently parameterized PID controllers sharing one
/// numeric representation `V` and one integration rule `R`.
///
/// Slots are allocated once at construction and live for the bank's
/// lifetime; lifecycle is reset-in-place. The bank holds no locks and
/// performs no I/O; callers needing concurrent access to distinct slots
/// synchronize externally.
#[derive(Clone, Debug)]
pub struct PidBank<V, R = Trapezoidal> {
    slots: Vec<Controller<V>>,
    _rule: PhantomData<R>,
}

impl<V: Value, R: Integration> PidBank<V, R> {
    /// Creates a bank of `slots` controllers, each in its pristine state:
    /// zero coefficients, unit sample time, anti-windup off, zeroed history
    /// and terms, output limits at the representation's extremes. An
    /// unparameterized slot steps to output zero for any error.
    pub fn new(slots: usize) -> Self {
        Self {
            slots: (0..slots).map(|_| Controller::pristine()).collect(),
            _rule: PhantomData,
        }
    }

    /// Number of controller slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bank holds no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns every slot to the pristine post-construction state,
    /// configuration included. Idempotent.
    pub fn reinitialize(&mut self) {
        for slot in &mut self.slots {
            *slot = Controller::pristine();
        }
    }

    #[cfg(not(feature = "unchecked"))]
    fn check_index(&self, index: usize) -> PidResult<()> {
        if index >= self.slots.len() {
            return Err(PidError::InvalidIndex {
                index,
                len: self.slots.len(),
            });
        }
        Ok(())
    }

    #[cfg(not(feature = "unchecked"))]
    fn check_timing(tf: V, t_sample: V) -> PidResult<()> {
        if tf != V::zero() && tf < t_sample {
            return Err(PidError::InvalidFilterTime);
        }
        if t_sample <= V::zero() {
            return Err(PidError::InvalidSampleTime);
        }
        Ok(())
    }

    fn slot(&self, index: usize) -> PidResult<&Controller<V>> {
        #[cfg(not(feature = "unchecked"))]
        self.check_index(index)?;
        Ok(&self.slots[index])
    }

    fn slot_mut(&mut self, index: usize) -> PidResult<&mut Controller<V>> {
        #[cfg(not(feature = "unchecked"))]
        self.check_index(index)?;
        Ok(&mut self.slots[index])
    }

    /// Parameterizes slot `index` from the time-constant form, overwriting
    /// its coefficients and sample time. History, terms, limits and the
    /// anti-windup mode are not touched, so a running controller can be
    /// retuned in place.
    ///
    /// Fails without mutating anything if the index is out of range,
    /// `t_sample` is not positive, `tn` or `tv` is negative, or a nonzero
    /// `tf` is shorter than `t_sample`.
    pub fn set_time_constants(&mut self, index: usize, params: &TimeConstants<V>) -> PidResult<()> {
        #[cfg(not(feature = "unchecked"))]
        {
            self.check_index(index)?;
            Self::check_timing(params.tf, params.t_sample)?;
            if params.tn < V::zero() {
                return Err(PidError::InvalidIntegralTime);
            }
            if params.tv < V::zero() {
                return Err(PidError::InvalidDerivativeTime);
            }
        }

        let slot = &mut self.slots[index];
        slot.t_sample = params.t_sample;
        slot.cp = params.kr;
        slot.ci = if params.tn == V::zero() {
            V::zero()
        } else {
            R::coeff_from_reset_time(params.kr, params.t_sample, params.tn)
        };
        slot.cd = (params.kr * params.tv) / params.t_sample;
        if params.tf == V::zero() {
            slot.cf = V::zero();
            slot.cdf = V::zero();
        } else {
            slot.cf = V::filter_pole(params.tf, params.t_sample);
            slot.cdf = (params.kr * params.tv) / params.tf;
        }
        Ok(())
    }

    /// Parameterizes slot `index` from the gain form. Same overwrite and
    /// validation behavior as [`set_time_constants`](Self::set_time_constants),
    /// minus the reset/derivative-time sign checks which do not apply.
    pub fn set_gains(&mut self, index: usize, params: &Gains<V>) -> PidResult<()> {
        #[cfg(not(feature = "unchecked"))]
        {
            self.check_index(index)?;
            Self::check_timing(params.tf, params.t_sample)?;
        }

        let slot = &mut self.slots[index];
        slot.t_sample = params.t_sample;
        slot.cp = params.kp;
        slot.ci = R::coeff_from_gain(params.ki, params.t_sample);
        slot.cd = params.kd / params.t_sample;
        if params.tf == V::zero() {
            slot.cf = V::zero();
            slot.cdf = V::zero();
        } else {
            slot.cf = V::filter_pole(params.tf, params.t_sample);
            slot.cdf = params.kd / params.tf;
        }
        Ok(())
    }

    /// Reconstructs the time-constant form from the stored coefficients.
    ///
    /// `tn` is zero when integral action is disabled, `tf` is zero when
    /// filtering is disabled, and `tv` is zero when the proportional
    /// coefficient is zero (the derivative time is then undefined).
    pub fn time_constants(&self, index: usize) -> PidResult<TimeConstants<V>> {
        let slot = self.slot(index)?;
        let tn = if slot.ci == V::zero() {
            V::zero()
        } else {
            R::reset_time_from_coeff(slot.cp, slot.t_sample, slot.ci)
        };
        let tv = if slot.cp == V::zero() {
            V::zero()
        } else {
            (slot.cd * slot.t_sample) / slot.cp
        };
        let tf = if slot.cdf == V::zero() {
            V::zero()
        } else {
            (slot.cd * slot.t_sample) / slot.cdf
        };
        Ok(TimeConstants {
            kr: slot.cp,
            tn,
            tv,
            tf,
            t_sample: slot.t_sample,
        })
    }

    /// Reconstructs the gain form from the stored coefficients. `tf` is
    /// zero when filtering is disabled.
    pub fn gains(&self, index: usize) -> PidResult<Gains<V>> {
        let slot = self.slot(index)?;
        let tf = if slot.cdf == V::zero() {
            V::zero()
        } else {
            (slot.cd * slot.t_sample) / slot.cdf
        };
        Ok(Gains {
            kp: slot.cp,
            ki: R::gain_from_coeff(slot.ci, slot.t_sample),
            kd: slot.cd * slot.t_sample,
            tf,
            t_sample: slot.t_sample,
        })
    }

    /// Overwrites the output saturation limits. Ordering is the caller's
    /// responsibility; no validation is performed here.
    pub fn set_limits(&mut self, index: usize, min: V, max: V) -> PidResult<()> {
        let slot = self.slot_mut(index)?;
        slot.y_min = min;
        slot.y_max = max;
        Ok(())
    }

    /// Enables or disables anti-windup for one slot.
    pub fn set_anti_windup(&mut self, index: usize, enabled: bool) -> PidResult<()> {
        self.slot_mut(index)?.anti_windup = enabled;
        Ok(())
    }

    /// Advances slot `index` by one sample tick with the given control
    /// error and returns the saturated output.
    ///
    /// The proportional term is recomputed from the new error, the integral
    /// accumulator gains one increment under the bank's integration rule,
    /// and the derivative term is a backward difference, low-pass filtered
    /// through the pole `cf` when a filter time constant is configured.
    /// The sum is clamped to the slot's limits. With anti-windup enabled,
    /// a tick whose clamped output sits at either limit keeps the integral
    /// accumulator at its pre-tick value, freezing windup while the
    /// actuator is saturated.
    pub fn step(&mut self, index: usize, error: V) -> PidResult<V> {
        let slot = self.slot_mut(index)?;

        slot.error.push(error);
        slot.output.shift();

        slot.p = (slot.cp * error).rescale();

        let i_retained = slot.i;
        slot.i = slot.i + R::increment(slot.ci, slot.error.current, slot.error.previous);

        let delta = slot.error.current - slot.error.previous;
        slot.d = if slot.cf == V::zero() {
            (slot.cd * delta).rescale()
        } else {
            // One rescale over the whole sum: both products carry the
            // scale twice, and the pole keeps its fractional digits.
            (slot.cdf * delta + slot.cf * slot.d).rescale()
        };

        let mut y = slot.p + slot.i + slot.d;
        if y > slot.y_max {
            y = slot.y_max;
        } else if y < slot.y_min {
            y = slot.y_min;
        }

        if slot.anti_windup && (y == slot.y_max || y == slot.y_min) {
            slot.i = i_retained;
        }

        slot.output.current = y;
        Ok(y)
    }

    /// Overwrites the integral accumulator directly, bypassing the
    /// recurrence. Used to seed or bump controller state, e.g. for a
    /// bumpless transfer after switching control modes.
    pub fn set_integral(&mut self, index: usize, value: V) -> PidResult<()> {
        self.slot_mut(index)?.i = value;
        Ok(())
    }

    /// Zeroes the slot's terms and history. Coefficients, sample time,
    /// limits and the anti-windup mode survive, so the next tick behaves
    /// like the first tick after construction under the same tuning.
    pub fn reset(&mut self, index: usize) -> PidResult<()> {
        self.slot_mut(index)?.clear_transients();
        Ok(())
    }

    /// The three control-action contributions from the most recent tick.
    pub fn terms(&self, index: usize) -> PidResult<Terms<V>> {
        let slot = self.slot(index)?;
        Ok(Terms {
            p: slot.p,
            i: slot.i,
            d: slot.d,
        })
    }

    /// The saturated output of the most recent tick.
    pub fn output(&self, index: usize) -> PidResult<V> {
        Ok(self.slot(index)?.output.current)
    }
}
