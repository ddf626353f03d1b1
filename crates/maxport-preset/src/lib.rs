//! Codec for Ableton device preset containers.
//!
//! Live device presets (`.adv`) and device groups (`.adg`) are XML documents,
//! usually wrapped in a single-member gzip stream but occasionally stored as
//! plain text. This crate detects the wrapper, parses the XML into a mutable
//! node tree, and serializes the tree back out under a chosen compression
//! policy.
//!
//! # Example
//!
//! ```no_run
//! use maxport_preset::PresetDocument;
//!
//! let raw = std::fs::read("Choker.adv")?;
//! let doc = PresetDocument::decode(&raw)?;
//!
//! println!("root element: {}", doc.root.tag);
//!
//! // Re-encode in the same envelope the file arrived in.
//! let bytes = doc.encode(doc.envelope.is_gzip())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod node;
mod parse;
mod write;

pub use document::{Envelope, PresetDocument};
pub use error::{Error, Result};
pub use node::PresetNode;
