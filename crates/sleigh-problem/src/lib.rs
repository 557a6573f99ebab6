//! `sleigh-problem` — static problem definitions: gifts, acceleration bands,
//! and the text file format they are loaded from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`gift`]      | `Gift`, `GiftCatalog` (name-keyed, insertion-ordered)     |
//! | [`band`]      | `AccelerationRange`, band construction and validation     |
//! | [`problem`]   | `Problem` — time limit, range, bands, catalog             |
//! | [`loader`]    | `load_problem`, `load_problem_reader`, `write_problem`    |
//! | [`generator`] | `GeneratorConfig`, `generate_problem`                     |
//! | [`error`]     | `ProblemError`, `ProblemResult<T>`                        |
//!
//! Everything here is read-only once loaded.  Gift identity is the gift's
//! name, so name uniqueness is enforced when the catalog is built rather
//! than during simulation.

pub mod band;
pub mod error;
pub mod generator;
pub mod gift;
pub mod loader;
pub mod problem;


pub use band::{AccelerationRange, ranges_from_limits, validate_ranges};
pub use error::{ProblemError, ProblemResult};
pub use generator::{GeneratorConfig, generate_problem};
pub use gift::{Gift, GiftCatalog};
pub use loader::{load_problem, load_problem_reader, write_problem};
pub use problem::Problem;
