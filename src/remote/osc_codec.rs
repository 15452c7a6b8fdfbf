/// OSC type tag for a message carrying exactly one string argument.
pub const STRING_TYPE_TAG: &str = ",s";

/// NUL-terminate `input` and pad with further NULs up to the next multiple of 4.
/// The input is taken verbatim, including empty strings and embedded NULs.
pub fn pad(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let extra = (4 - (bytes.len() + 1) % 4) % 4;
    let mut out = Vec::with_capacity(bytes.len() + 1 + extra);
    out.extend_from_slice(bytes);
    out.resize(bytes.len() + 1 + extra, 0);
    out
}

/// Build an OSC 1.0 message with a single string argument:
/// `pad(address) ++ pad(",s") ++ pad(argument)`.
///
/// The address is not validated; a path without a leading `/` is passed through.
pub fn build_packet(address: &str, argument: &str) -> Vec<u8> {
    let mut packet = pad(address);
    packet.extend(pad(STRING_TYPE_TAG));
    packet.extend(pad(argument));
    packet
}
