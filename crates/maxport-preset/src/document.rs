//! Preset container decode/encode.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::{parse, write, Error, PresetNode, Result};

/// Compression wrapper detected on a preset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// Single-member gzip stream wrapping the XML text.
    Gzip,
    /// Plain XML text.
    Plain,
}

impl Envelope {
    /// Whether this envelope is the gzip variant.
    pub fn is_gzip(self) -> bool {
        matches!(self, Envelope::Gzip)
    }
}

/// A decoded preset: the element tree plus the envelope it arrived in.
///
/// The tree is mutated in place by the rewriter and then consumed by
/// [`PresetDocument::encode`].
#[derive(Debug, Clone)]
pub struct PresetDocument {
    /// Root element of the document.
    pub root: PresetNode,
    /// Envelope the raw bytes were wrapped in, so encode can default to
    /// matching the input format.
    pub envelope: Envelope,
}

impl PresetDocument {
    /// Check for the gzip magic bytes.
    pub fn is_gzip(data: &[u8]) -> bool {
        data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
    }

    /// Decode raw preset bytes of unknown compression state.
    ///
    /// A gzip decompression is attempted first; when the bytes are not a
    /// valid gzip stream they are treated as already-decompressed text. The
    /// result is then parsed as XML.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedDocument`] when the content is not well-formed XML
    /// after the decompression attempt.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let (text_bytes, envelope) = match try_gunzip(raw) {
            Some(decompressed) => (decompressed, Envelope::Gzip),
            None => (raw.to_vec(), Envelope::Plain),
        };

        let text = std::str::from_utf8(&text_bytes)?;
        let root = parse::parse_xml(text)?;

        Ok(Self { root, envelope })
    }

    /// Serialize the tree, gzip-wrapping the text when `compress` is true.
    ///
    /// The compression decision is explicit rather than inferred; callers
    /// typically pass `self.envelope.is_gzip()` unless a policy overrides it.
    pub fn encode(&self, compress: bool) -> Result<Vec<u8>> {
        let xml = write::write_xml(&self.root)?;

        if compress {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&xml)?;
            Ok(encoder.finish()?)
        } else {
            Ok(xml)
        }
    }
}

/// Decompress a single-member gzip stream, or `None` if the bytes are not one.
fn try_gunzip(data: &[u8]) -> Option<Vec<u8>> {
    if !PresetDocument::is_gzip(data) {
        return None;
    }

    let mut decoder = GzDecoder::new(data);
    let mut output = Vec::new();
    match decoder.read_to_end(&mut output) {
        Ok(_) => Some(output),
        // Structurally broken stream: fall back to treating input as text.
        Err(_) => None,
    }
}
