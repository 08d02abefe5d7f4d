#![cfg_attr(not(feature = "std"), no_std)]

//! # pid-bank - a bank of discrete PID controllers
//!
//! This crate maintains a fixed-size bank of independently parameterized
//! PID controllers for embedded and near-real-time control loops. Each
//! sample tick the caller feeds a control error into a slot and receives
//! a bounded control output computed by a discretized difference equation.
//!
//! ## Features
//!
//! - Two equivalent parameterizations per controller: time-constant form
//!   (`Kr`, `Tn`, `Tv`) and gain form (`Kp`, `Ki`, `Kd`), both with an
//!   optional derivative low-pass filter time constant and both fully
//!   invertible through the parameter getters
//! - Rectangular or trapezoidal integral discretization, selected once at
//!   the type level via [`Rectangular`] / [`Trapezoidal`]
//! - One numeric model for the whole computation, chosen at instantiation:
//!   native floats (`f32`, `f64`) or decimal fixed point over a signed
//!   integer ([`Scaled`]), abstracted by the [`Value`] trait
//! - Output saturation with optional anti-windup freeze of the integral
//!   accumulator while the output sits at a limit
//!
//! ## Cargo features
//!
//! - **std** (default): standard library support. Disable for `no_std`
//!   targets; the bank then allocates its slots through `alloc`.
//! - **unchecked**: compiles out every index and parameter validation for
//!   tight inner loops. This is an explicit opt-out: with it enabled an
//!   out-of-range slot index panics on access and invalid parameters are
//!   accepted unchecked.
//!
//! ## Example
//!
//! ```
//! use pid_bank::{Gains, PidBank};
//!
//! // Three controllers computing in f32, trapezoidal integration.
//! let mut bank: PidBank<f32> = PidBank::new(3);
//! bank.set_gains(
//!     0,
//!     &Gains {
//!         kp: 2.0,
//!         ki: 0.0,
//!         kd: 0.0,
//!         tf: 0.0,
//!         t_sample: 0.5,
//!     },
//! )?;
//!
//! assert_eq!(bank.step(0, 1.0)?, 2.0);
//! assert_eq!(bank.step(0, -1.0)?, -2.0);
//! # Ok::<(), pid_bank::PidError>(())
//! ```
//!
//! On the fixed-point path all quantities are scaled integers and the
//! caller scales physical units before passing them in, e.g. a sample time
//! of 0.5 s becomes 5 when times are counted in tenths of a second:
//!
//! ```
//! use pid_bank::{Fixed64, Gains, PidBank};
//!
//! // Four decimal digits after the point, so 2.0 is stored as 20000.
//! type Q4 = Fixed64<4>;
//!
//! let mut bank: PidBank<Q4> = PidBank::new(1);
//! bank.set_gains(
//!     0,
//!     &Gains {
//!         kp: Q4::from_whole(2),
//!         ki: Q4::new(0),
//!         kd: Q4::new(0),
//!         tf: Q4::new(0),
//!         t_sample: Q4::new(5),
//!     },
//! )?;
//!
//! assert_eq!(bank.step(0, Q4::from_whole(1))?, Q4::from_whole(2));
//! # Ok::<(), pid_bank::PidError>(())
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

mod bank;
mod error;
mod integration;
mod value;

pub use bank::{Gains, PidBank, Terms, TimeConstants};
pub use error::{PidError, PidResult};
pub use integration::{Integration, Rectangular, Trapezoidal};
pub use value::{Fixed16, Fixed32, Fixed64, Fixed8, Scaled, Value};
