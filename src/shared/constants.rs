/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Fixed page size of the public UMKM directory grid
pub const UMKM_PAGE_SIZE: i64 = 9;

/// Number of featured items shown on the home page per section
pub const HOME_FEATURED_LIMIT: usize = 6;

// =============================================================================
// PAYMENT
// =============================================================================

/// Seconds the success page waits before redirecting to the ticket
pub const SUCCESS_REDIRECT_SECS: u64 = 10;

/// Text shown once a pending payment passed its expiry time
pub const EXPIRED_TEXT: &str = "Expired";

// =============================================================================
// UPLOADS
// =============================================================================

/// Maximum accepted image size (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image content types
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

// =============================================================================
// CHAT
// =============================================================================

/// Maximum characters of a single chat message
pub const MAX_CHAT_MESSAGE_CHARS: u64 = 2000;

/// Number of most recent turns forwarded to the chat backend
pub const MAX_CHAT_HISTORY: usize = 20;

// =============================================================================
// AUTH
// =============================================================================

/// Minimum password length for registration and user management
pub const MIN_PASSWORD_LENGTH: u64 = 6;
