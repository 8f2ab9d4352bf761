//! AAS ProtoBuf Synchronization Pipeline
//!
//! Keeps the generated `aas_core3_protobuf` binding package in step with the
//! canonical schema and the meta-model-driven generator, and gates releases
//! on consistent version metadata.
//!
//! ## Stages
//!
//! - **Fetch**: download `types.proto` from a revision of the upstream
//!   schema repository and stamp it with a provenance header
//! - **Compile**: run `protoc` over the stored schema to regenerate the
//!   low-level binding code
//! - **Generate**: run `aas-core-codegen` to regenerate the pbization layer
//!   that converts between the domain model and the binding types
//! - **Check**: verify that the package's `__version__` attribute and the
//!   distribution metadata declare the same version
//!
//! Each stage is a single-shot command; a release process runs them in
//! sequence and re-triggers on failure. Nothing is retried here.
//!
//! ## Project tree
//!
//! ```text
//! <root>/
//! ├── proto/
//! │   └── types.proto          fetched schema, provenance header prepended
//! ├── snippets/                hand-written fragments merged by the generator
//! ├── aas_core3_protobuf/      bindings + pbization layer (generated)
//! │   └── __init__.py          declares __version__
//! └── pyproject.toml           distribution metadata
//! ```

pub mod error;
pub mod fetch;
pub mod generate;
pub mod layout;
pub mod protoc;
pub mod tool;
pub mod version_check;

pub use error::{PipelineError, Result};
pub use fetch::fetch_schema;
pub use generate::{GenerateConfig, GeneratorEngine, Target};
pub use layout::ProjectLayout;
pub use tool::{ProcessRunner, ToolInvocation, ToolRunner};
