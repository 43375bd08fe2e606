//! ad-core: data model shared across the additives dashboard.
//!
//! Contains:
//! - compartment (environmental media and the user-selectable subset)
//! - polymer (polymer-type vocabulary)
//! - record (one dataset row + column naming)
//! - table (immutable row collection)
//! - error (shared error types)

pub mod compartment;
pub mod error;
pub mod polymer;
pub mod record;
pub mod table;

pub use compartment::{Compartment, CompartmentChoice};
pub use error::{CoreError, CoreResult};
pub use polymer::PolymerType;
pub use record::{CellValue, Field, Record};
pub use table::Table;
