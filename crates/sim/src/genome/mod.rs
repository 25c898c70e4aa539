//! Individual records and the lineage graph connecting them.

mod individual;
pub mod lineage;

pub use individual::{Individual, IndividualId};
pub use lineage::{Lineage, LineageNode};
