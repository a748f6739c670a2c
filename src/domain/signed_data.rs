const SEPARATOR: u8 = b'.';

/// Reproduces the bytes a sender signed: `id.timestamp.payload`.
///
/// The payload is appended verbatim. Dots inside `id` or `timestamp` are not
/// escaped; the layout is positional and only ever rebuilt, never parsed.
pub fn build_signed_data(id: &str, timestamp: &str, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(id.len() + timestamp.len() + payload.len() + 2);
    data.extend_from_slice(id.as_bytes());
    data.push(SEPARATOR);
    data.extend_from_slice(timestamp.as_bytes());
    data.push(SEPARATOR);
    data.extend_from_slice(payload);
    data
}
