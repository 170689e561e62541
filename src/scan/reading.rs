//! Emitter identities and signal readings

/// Stable integer key of an access point
pub type EmitterId = i32;

/// Signed signal strength, typically negative dBm
pub type Level = i32;

/// Marks an absent level in exported and saved tables
pub const LEVEL_SENTINEL: Level = i32::MIN;

/// One access point heard at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reading {
    /// Access point identity
    pub emitter: EmitterId,
    /// Signal strength of that access point
    pub level: Level,
}

impl Reading {
    /// Create a reading
    pub const fn new(emitter: EmitterId, level: Level) -> Self {
        Self { emitter, level }
    }
}

impl From<(EmitterId, Level)> for Reading {
    fn from((emitter, level): (EmitterId, Level)) -> Self {
        Self::new(emitter, level)
    }
}

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Derive an emitter key from a hardware identifier such as a BSSID
///
/// Only ASCII alphanumerics take part, case-folded, so `"AA:BB:CC:00:11:22"`
/// and `"aa-bb-cc-00-11-22"` map to the same key. The hash is 32-bit FNV-1a
/// and stays stable across runs and platforms.
pub fn emitter_id(hardware_id: &str) -> EmitterId {
    let hash = hardware_id
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|byte| byte.to_ascii_lowercase())
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
        });
    hash as EmitterId
}
