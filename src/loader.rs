//! Locates the car-control block among engine configuration sources.
//!
//! Sources are scanned in order and the first one carrying a non-empty
//! `aace.carControl` value wins. Every scanned source is rewound to its start
//! whether it matched, missed, or failed to parse, because the engine reads
//! the same streams after us. Sources that are not valid JSON are skipped and
//! reported rather than aborting the scan.

use crate::config::{CAR_CONTROL_KEY, CarControlConfig};
use crate::schema::{SchemaError, validate_block};
use serde::Deserialize;
use serde_json::Value;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("rewinding configuration source {index}: {source}")]
    Rewind { index: usize, source: io::Error },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("car-control block does not match the configuration model: {0}")]
    Model(#[source] serde_json::Error),
    #[error(transparent)]
    Index(#[from] crate::registry::IndexError),
    #[error("generating the fallback configuration: {0}")]
    Generate(#[from] crate::config::BuildError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Check the found block against the embedded JSON Schema before indexing.
    pub validate_schema: bool,
}

/// A source that could not be parsed as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct SourceScan {
    /// Index of the matching source and the block it carried.
    pub found: Option<(usize, Value)>,
    pub skipped: Vec<SkippedSource>,
}

/// Scan `sources` for the first non-empty car-control block.
///
/// Sources after the match are left untouched. The only hard failure is a
/// source that cannot be rewound.
pub fn scan_sources<I, S>(sources: I) -> Result<SourceScan, LoadError>
where
    I: IntoIterator<Item = S>,
    S: Read + Seek,
{
    let mut scan = SourceScan::default();
    for (index, mut source) in sources.into_iter().enumerate() {
        let parsed: Result<Value, serde_json::Error> = {
            let reader = BufReader::new(&mut source);
            serde_json::from_reader(reader)
        };
        source
            .seek(SeekFrom::Start(0))
            .map_err(|source| LoadError::Rewind { index, source })?;

        let value = match parsed {
            Ok(value) => value,
            Err(err) => {
                warn!(index, error = %err, "skipping configuration source that is not valid JSON");
                scan.skipped.push(SkippedSource {
                    index,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let block = match value {
            Value::Object(mut map) => map.remove(CAR_CONTROL_KEY),
            _ => {
                warn!(index, "skipping configuration source whose top level is not an object");
                scan.skipped.push(SkippedSource {
                    index,
                    reason: "top-level value is not a JSON object".to_string(),
                });
                continue;
            }
        };
        match block {
            Some(block) if !is_empty_block(&block) => {
                debug!(index, "found car-control block");
                scan.found = Some((index, block));
                break;
            }
            Some(_) => debug!(index, "car-control block is empty; continuing"),
            None => debug!(index, "no car-control block"),
        }
    }
    Ok(scan)
}

/// Deserialize a found block, optionally validating it against the schema first.
pub fn parse_block(block: &Value, options: LoadOptions) -> Result<CarControlConfig, LoadError> {
    if options.validate_schema {
        validate_block(block)?;
    }
    CarControlConfig::deserialize(block).map_err(LoadError::Model)
}

fn is_empty_block(block: &Value) -> bool {
    match block {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[test]
    fn first_matching_source_wins_and_later_sources_are_untouched() {
        let mut sources = vec![
            source(r#"{"aace.vehicle": {}}"#),
            source(r#"{"aace.carControl": {"endpoints": []}}"#),
            source(r#"{"aace.carControl": {"endpoints": [{"endpointId": "late"}]}}"#),
        ];
        sources[2].set_position(4);

        let scan = scan_sources(sources.iter_mut()).unwrap();
        let (index, block) = scan.found.unwrap();
        assert_eq!(index, 1);
        assert_eq!(block["endpoints"], serde_json::json!([]));
        assert_eq!(sources[0].position(), 0);
        assert_eq!(sources[1].position(), 0);
        assert_eq!(sources[2].position(), 4);
    }

    #[test]
    fn malformed_source_is_skipped_and_rewound() {
        let mut sources = vec![source("{not json"), source(r#"[1, 2]"#)];
        let scan = scan_sources(sources.iter_mut()).unwrap();
        assert!(scan.found.is_none());
        let skipped: Vec<usize> = scan.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![0, 1]);
        assert!(sources.iter().all(|s| s.position() == 0));
    }

    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        reads: usize,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            self.inner.read(buf)
        }
    }

    impl Seek for CountingReader {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn sources_are_read_in_buffered_chunks() {
        let text = r#"{"aace.carControl": {"endpoints": [{"endpointId": "car", "capabilities": []}]}}"#;
        let mut counting = CountingReader {
            inner: source(text),
            reads: 0,
        };
        let scan = scan_sources([&mut counting]).unwrap();

        assert_eq!(scan.found.map(|(index, _)| index), Some(0));
        assert!(counting.reads <= 3, "{} reads for {} bytes", counting.reads, text.len());
        assert_eq!(counting.inner.position(), 0);
    }

    #[test]
    fn empty_block_does_not_stop_the_scan() {
        let mut sources = vec![
            source(r#"{"aace.carControl": {}}"#),
            source(r#"{"aace.carControl": null}"#),
            source(r#"{"aace.carControl": {"endpoints": []}}"#),
        ];
        let scan = scan_sources(sources.iter_mut()).unwrap();
        assert_eq!(scan.found.map(|(index, _)| index), Some(2));
    }

    #[test]
    fn parse_block_reports_model_mismatch() {
        let block = serde_json::json!({"endpoints": [{"capabilities": []}]});
        assert!(matches!(
            parse_block(&block, LoadOptions::default()),
            Err(LoadError::Model(_))
        ));
    }

    #[test]
    fn parse_block_validates_when_requested() {
        let block = serde_json::json!({"endpoints": "none"});
        let options = LoadOptions {
            validate_schema: true,
        };
        assert!(matches!(
            parse_block(&block, options),
            Err(LoadError::Schema(SchemaError::Violations(_)))
        ));
    }
}
