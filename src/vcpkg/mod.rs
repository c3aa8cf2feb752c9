//! vcpkg package-metadata resolution.
//!
//! A purl such as `pkg:vcpkg/zlib@1.3.1` is resolved in three requests
//! against the registry's GitHub repository:
//!
//! 1. `versions/<z>-/zlib.json` gives the git tree of each published version;
//! 2. the git tree of the matching version lists the port's files;
//! 3. the `vcpkg.json` (or legacy `CONTROL`) blob holds the metadata.

pub mod control;
pub mod model;
pub mod purl;
pub mod service;

pub use model::{
    find_metadata_file, find_version_entry, EntryKind, GitTree, Metadata, Resolution,
    Step1Result, Step2Result, Step3Result, TreeEntry, VersionEntry, VersionsFile,
};
pub use purl::{parse_package_url, ParsedPurl};
pub use service::{parse_metadata, RegistrySettings, VcpkgService};
