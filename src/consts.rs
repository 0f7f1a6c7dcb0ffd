//! Shared numeric constants.

// ── Hit-testing ─────────────────────────────────────────────────

/// Canvas-space hit slop in pixels for endpoints, corners, and thin segments.
pub const HIT_TOLERANCE_PX: f64 = 5.0;

/// Fraction of the normalized diamond metric reserved for the border band.
pub const DIAMOND_BORDER_TOLERANCE: f64 = 0.1;

// ── Text ────────────────────────────────────────────────────────

/// Base font size for text elements, in canvas pixels at zoom 1.0.
pub const FONT_SIZE_PX: f64 = 24.0;

// ── Sync ────────────────────────────────────────────────────────

/// Bounded capacity of each connection's outbound broadcast channel.
pub const CLIENT_CHANNEL_CAPACITY: usize = 256;

/// Length of server-minted room identifiers.
pub const ROOM_ID_LEN: usize = 8;
