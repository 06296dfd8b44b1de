//! Domain model for pair rotations
//!
//! - `Person` / `Roster`: the fixed set of people being scheduled
//! - `Task` / `Category` / `TaskRegistry`: chores grouped by category
//! - `Pair`: an unordered, canonically ordered 2-combination of people
//! - `Schedule` / `Period`: the solved rotation

mod pair;
mod person;
mod registry;
mod schedule;
mod task;


pub use pair::{all_pairs, Pair};
pub use person::{Person, PersonId, Roster};
pub use registry::TaskRegistry;
pub use schedule::{Period, Schedule};
pub use task::{Category, PeriodUnit, Task, TaskId};
