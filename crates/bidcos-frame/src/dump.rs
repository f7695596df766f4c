use std::fmt::Write as _;

/// Sink for raw frame dumps.
///
/// The reader hands every non-empty assembled buffer to the sink, including
/// frames that ran out of buffer space before completing.
pub trait FrameDump {
    fn dump(&mut self, raw: &[u8]);
}

/// Dumps raw frames as hex through `tracing` at DEBUG level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceDump;

impl FrameDump for TraceDump {
    fn dump(&mut self, raw: &[u8]) {
        tracing::debug!(len = raw.len(), bytes = %hex_line(raw), "frame dump");
    }
}

/// Format raw frame bytes as one line of spaced lowercase hex pairs.
pub fn hex_line(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len() * 3);
    for (i, byte) in raw.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formats_spaced_pairs() {
        assert_eq!(hex_line(&[0xFD, 0x00, 0x0C]), "fd 00 0c");
        assert_eq!(hex_line(&[0x0A]), "0a");
        assert_eq!(hex_line(&[]), "");
    }
}
