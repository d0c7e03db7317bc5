//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

/// 30 days, matching the lifetime of both halves of a token pair.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 2_592_000;
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 2_592_000;

pub const BCRYPT_COST: u32 = 10;

/// Western Indonesia Time (WIB).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 10;
pub const FILE_ROUTE_PREFIX: &str = "/api/file";
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";
pub const DEFAULT_SKILLS: &[&str] = &[
    "#KebersihanLingkungan",
    "#DistribusiBantuan",
    "#PendampingLansia",
    "#PendidikanAnak",
    "#Evakuasi",
    "#PenggalanganDana",
    "#Komunikasi",
    "#KesehatanDasar",
];
