//! Populate annotated structs from environment variables.
//!
//! ```rust
//! use envbind::{EnvRecord, unmarshal_with};
//! use std::collections::HashMap;
//!
//! #[derive(Debug, Default, EnvRecord)]
//! struct Config {
//!     #[field(env = "PORT")]
//!     port: u16,
//!     #[field(env = "DB_CONNECTION", required)]
//!     db_conn_string: String,
//! }
//!
//! let env = HashMap::from([
//!     ("PORT".to_string(), "80".to_string()),
//!     ("DB_CONNECTION".to_string(), "postgres://localhost/db".to_string()),
//! ]);
//!
//! let mut config = Config { port: 3000, ..Default::default() };
//! unmarshal_with(&mut config, &env).unwrap();
//! assert_eq!(config.port, 80);
//! ```

extern crate self as envbind;

pub mod bindable;
pub mod binder;
pub mod coerce;
pub mod docs;
pub mod error;
pub mod field;
pub mod lookup;

// Re-export main types
pub use bindable::Bindable;
pub use binder::{BindOptions, Binder, OptionalPolicy, unmarshal, unmarshal_with};
pub use coerce::{SEQUENCE_SEPARATOR, parse_friendly_bool};
pub use error::{BindError, format_bind_error};
pub use field::{
    FieldDescriptor, FieldKind, FloatWidth, IntWidth, LeafSlot, OptionalSlot, Record, Shape, Slot,
};
pub use lookup::{FnLookup, Lookup, ProcessEnv, lookup_fn};

#[doc(hidden)]
pub use field::{NestedRecord, assert_nested};

// Re-export macro
pub use envbind_macros::EnvRecord;

/// Construct a record from its `Default` value and populate it from the environment
pub trait FromEnv: Sized {
    /// Load from the process environment, panicking on the first bind error
    fn load() -> Self;

    /// Load from the process environment, returning the first bind error
    fn from_env() -> Result<Self, BindError>;

    /// Load from an explicit lookup
    fn from_lookup<L: Lookup>(lookup: L) -> Result<Self, BindError>;
}

impl<T: Record + Bindable + Default> FromEnv for T {
    fn load() -> Self {
        match Self::from_env() {
            Ok(record) => record,
            Err(e) => panic!("{}", format_bind_error(T::describe().name, &e)),
        }
    }

    fn from_env() -> Result<Self, BindError> {
        Self::from_lookup(ProcessEnv)
    }

    fn from_lookup<L: Lookup>(lookup: L) -> Result<Self, BindError> {
        let mut record = T::default();
        Binder::new(lookup).bind(&mut record)?;
        Ok(record)
    }
}
