//! Per-vendor pixel id formats.

use pixelgate_types::PixelType;
use regex::Regex;
use std::sync::LazyLock;

static YANDEX_METRICA: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{5,10}$"));
static VK: LazyLock<Regex> = LazyLock::new(|| compile(r"^VK-RTRG-[0-9]+-[A-Za-z0-9]+$"));
static VK_ADS: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{5,10}$"));
static FACEBOOK: LazyLock<Regex> = LazyLock::new(|| compile(r"^[0-9]{15,16}$"));
static GA4: LazyLock<Regex> = LazyLock::new(|| compile(r"^G-[A-Z0-9]{6,12}$"));
static GOOGLE_ADS: LazyLock<Regex> = LazyLock::new(|| compile(r"^AW-[0-9]{9,11}$"));
static TIKTOK: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Z0-9]{20}$"));

fn compile(pattern: &str) -> Regex {
    // Patterns are literals above; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pixel id pattern {pattern}: {e}"))
}

/// The regex a vendor's pixel id must match.
pub fn pixel_id_pattern(pixel_type: PixelType) -> &'static Regex {
    match pixel_type {
        PixelType::YandexMetrica => &YANDEX_METRICA,
        PixelType::Vk => &VK,
        PixelType::VkAds => &VK_ADS,
        PixelType::Facebook => &FACEBOOK,
        PixelType::Ga4 => &GA4,
        PixelType::GoogleAds => &GOOGLE_ADS,
        PixelType::Tiktok => &TIKTOK,
    }
}

/// Returns true if `pixel_id` is well-formed for `pixel_type`.
pub fn is_valid_pixel_id(pixel_type: PixelType, pixel_id: &str) -> bool {
    pixel_id_pattern(pixel_type).is_match(pixel_id)
}
