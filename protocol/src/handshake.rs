/// Candidate frames that switch the controller into input reporting mode.
///
/// Collected from several reverse-engineered drivers. Not every firmware
/// revision needs (or accepts) all of them, so they are sent in order as
/// independent probes and the only confirmation is input reports starting
/// to arrive.
pub const HANDSHAKE_FRAMES: &[&[u8]] = &[
    &[0x05, 0x20, 0x00, 0x01, 0x00],
    &[0x01, 0x20],
    &[0x05, 0x20, 0x01, 0x00, 0x00],
];
