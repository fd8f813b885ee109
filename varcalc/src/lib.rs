//! varcalc evaluates arithmetic expressions with variables and keeps the variables of each
//! session between calls.
//!
//! ```
//! use varcalc::prelude::*;
//!
//! let store = SessionStore::new();
//! store.evaluate(None, "a = 5; b = a * 2").unwrap();
//! assert_eq!(store.evaluate(None, "b + 1").unwrap(), 11.0);
//! ```

pub mod session;

pub mod prelude {
    pub use crate::session::{Command, Request, Response, SessionStore, DEFAULT_SESSION};
    pub use varcalc_lib::calc_error::{error_kind, is_specific_calc_error};
    pub use varcalc_lib::{evaluate, Bindings, CalcError, ErrorKind};
}
