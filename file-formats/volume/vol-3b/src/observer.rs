//! Injectable tracing for the chunk walk
//!
//! The parser reports what it sees through a [`ParseObserver`] instead of
//! printing. [`LogObserver`] forwards to the `log` facade; any
//! `FnMut(&ParseEvent)` closure works as an observer too.

use log::{debug, trace, warn};

use crate::chunk::ChunkRecord;
use crate::header::HeaderCheck;
use crate::parser::VolumeInfo;

/// Something the parser encountered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseEvent<'a> {
    /// The header was read and checked
    Header(&'a HeaderCheck),
    /// A chunk header was read
    Chunk(&'a ChunkRecord),
    /// The volume chunk version was decoded
    Volume(&'a VolumeInfo),
    /// Iteration ended without error
    Finished {
        /// Number of chunk records produced
        chunks: usize,
        /// Final cursor position
        offset: usize,
    },
}

/// Receives [`ParseEvent`]s during a parse
pub trait ParseObserver {
    /// Called once per event, in file order
    fn observe(&mut self, event: &ParseEvent<'_>);
}

impl<F> ParseObserver for F
where
    F: FnMut(&ParseEvent<'_>),
{
    fn observe(&mut self, event: &ParseEvent<'_>) {
        self(event);
    }
}

/// Forwards events to the `log` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ParseObserver for LogObserver {
    fn observe(&mut self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::Header(check) => {
                if !check.magic_ok {
                    warn!("Header magic mismatch: found {:?}", check.magic);
                }
                if !check.sanity_ok {
                    warn!("Header sanity marker mismatch: found {}", check.sanity);
                }
                debug!(
                    "Header: magic_ok={} sanity_ok={}",
                    check.magic_ok, check.sanity_ok
                );
            }
            ParseEvent::Chunk(record) => trace!(
                "Chunk {} at 0x{:08X}, size {}",
                record.tag, record.offset, record.declared_size
            ),
            ParseEvent::Volume(volume) => debug!("Volume chunk version {}", volume.version),
            ParseEvent::Finished { chunks, offset } => {
                debug!("Finished after {} chunks at offset {}", chunks, offset);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {
    fn observe(&mut self, _event: &ParseEvent<'_>) {}
}
