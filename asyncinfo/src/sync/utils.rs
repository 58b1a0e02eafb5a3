//! sync utils

use crate::error::Result;

/// converts git2 byte names, invalid utf8 is an error
pub fn bytes2string(bytes: &[u8]) -> Result<String> {
	Ok(String::from_utf8(bytes.to_vec())?)
}
