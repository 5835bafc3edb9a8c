//! Deferred expressions built from placeholders and symbolic operations.
//!
//! Expressions are assembled by sending operation names to lambdas through
//! [`Runtime::send`] and only run when [`Lambda::call`] is invoked. During a
//! call, [`fill`] decides per operand whether a nested lambda is invoked or
//! passed through: protected lambdas are passed through and lose one layer
//! of protection.
//!
//! ```
//! use deferred::{Runtime, Value, protect};
//!
//! let rt = Runtime::new();
//! let x = rt.var("arg0", &[]).unwrap();
//! let inc = rt.send(&x, "+", vec![Value::int(1)]).unwrap();
//! assert_eq!(inc.as_lambda().unwrap().call(&[Value::int(41)]).unwrap(), Value::int(42));
//!
//! // A protected operand survives one call and yields a new function.
//! let add = rt.send(&protect(x), "+", vec![rt.var("arg1", &[]).unwrap()]).unwrap();
//! let add_two = add.as_lambda().unwrap().call(&[Value::Nil, Value::int(2)]).unwrap();
//! assert_eq!(add_two.as_lambda().unwrap().call(&[Value::int(5)]).unwrap(), Value::int(7));
//! ```

pub mod bind;
pub mod coerce;
pub mod conditional;
pub mod config;
pub mod error;
pub mod lambda;
pub mod ops;
pub mod placeholder;
pub mod protect;
pub mod runtime;
pub mod value;

pub use bind::fill;
pub use coerce::to_lambda;
pub use conditional::{if_, BranchTable, Branches};
pub use config::{PlaceholderConvention, RuntimeConfig};
pub use error::{Error, Result};
pub use lambda::{Invocable, Lambda, NativeFn};
pub use ops::{Operation, Operations};
pub use placeholder::Placeholder;
pub use protect::{
    is_bound, is_lambda, is_protected, protect, protection_level, unprotect, Protectable,
    ProtectionCounter,
};
pub use runtime::Runtime;
pub use value::Value;
