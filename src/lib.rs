//! compdoc — extract documentation metadata from a type-checked program's
//! exported symbols.
//!
//! The engine turns exports with a "properties object" shape (props plus an
//! optional callable surface) into deterministic [`EntityDoc`] records:
//! display name, merged doc comment, typed properties, and public-tagged
//! methods. It consumes a narrow [`Checker`] interface instead of a concrete
//! compiler, so front ends and test doubles are interchangeable; see
//! [`fixture::FixtureProgram`] for the snapshot-backed implementation.
//!
//! ```no_run
//! use compdoc::{ExtractOptions, Extractor, FixtureProgram};
//!
//! let program = FixtureProgram::from_path("snapshot.json".as_ref())?;
//! let modules = program.module_names();
//! let docs = Extractor::new(&program).extract(&modules);
//! # Ok::<(), compdoc::FixtureError>(())
//! ```

pub mod checker;
pub mod extract;
pub mod fixture;
pub mod jsdoc;
pub mod model;
pub mod names;

pub use checker::{Checker, DeclKind, DocTag, SourceFile, SymbolId, TypeId};
pub use extract::{ExtractOptions, Extractor, NameResolver};
pub use fixture::{FixtureError, FixtureProgram};
pub use model::{EntityDoc, MethodDoc, PropDoc, PropMap, TypeRef};
