//! Validation functions for parsed 3b files

use crate::error::{Result, ThreeBError};
use crate::parser::{ParseResult, VOLUME_VERSION_SIZE};

/// Validates a parse result for header correctness and volume presence
pub fn validate_parse_result(result: &ParseResult) -> Result<()> {
    validate_header(result)?;
    validate_volume(result)?;
    Ok(())
}

fn validate_header(result: &ParseResult) -> Result<()> {
    if !result.header_magic_ok {
        return Err(ThreeBError::ValidationError(
            "Header magic does not match".to_string(),
        ));
    }
    if !result.header_sanity_ok {
        return Err(ThreeBError::ValidationError(
            "Header sanity marker is not 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_volume(result: &ParseResult) -> Result<()> {
    if result.chunks.is_empty() {
        return Err(ThreeBError::ValidationError(
            "File contains no chunks".to_string(),
        ));
    }

    let Some(volume) = result.volume else {
        return Err(ThreeBError::ValidationError(format!(
            "No VOL3 chunk among {} chunks",
            result.chunks.len()
        )));
    };

    // The size field has to cover at least the version
    if (volume.declared_size as usize) < VOLUME_VERSION_SIZE {
        return Err(ThreeBError::ValidationError(format!(
            "VOL3 chunk at 0x{:08X} declares {} bytes, less than its version field",
            volume.offset, volume.declared_size
        )));
    }

    Ok(())
}
