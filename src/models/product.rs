use serde::{Deserialize, Serialize};

/// Retail platforms the comparison engine covers.
///
/// The serialized identifiers (`taobao`, `jd`, `pdd`, `1688`) are part of the
/// API contract and double as the TEXT values stored in `search_results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Taobao,
    Jd,
    Pdd,
    #[serde(rename = "1688")]
    Alibaba1688,
}

impl Platform {
    /// Stable identifier used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Taobao => "taobao",
            Platform::Jd => "jd",
            Platform::Pdd => "pdd",
            Platform::Alibaba1688 => "1688",
        }
    }

    /// Prefix for generated product ids, e.g. `tb_1718000000000`.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Platform::Taobao => "tb",
            Platform::Jd => "jd",
            Platform::Pdd => "pdd",
            Platform::Alibaba1688 => "1688",
        }
    }
}

/// A single product hit returned by an image search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMatch {
    /// Platform the listing was found on.
    pub platform: Platform,
    /// Platform-scoped product identifier, freshly stamped per search.
    pub product_id: String,
    /// Listing title.
    pub title: String,
    /// Current price.
    pub price: f64,
    /// Pre-discount price, when the listing advertises one.
    pub original_price: Option<f64>,
    /// Listing thumbnail.
    pub image_url: String,
    /// Link to the listing.
    pub product_url: String,
    /// Units sold, as reported by the platform.
    pub sales: i64,
    /// Storefront name.
    pub shop_name: String,
    /// Storefront rating out of 5, when available.
    pub shop_rating: Option<f64>,
    /// How closely the listing matches the query image, 0..=100.
    pub similarity_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serialization() {
        assert_eq!(
            serde_json::to_string(&Platform::Taobao).unwrap(),
            "\"taobao\""
        );
        assert_eq!(
            serde_json::to_string(&Platform::Alibaba1688).unwrap(),
            "\"1688\""
        );

        let parsed: Platform = serde_json::from_str("\"pdd\"").unwrap();
        assert_eq!(parsed, Platform::Pdd);
    }

    #[test]
    fn test_platform_str_roundtrip_with_serde() {
        for platform in [
            Platform::Taobao,
            Platform::Jd,
            Platform::Pdd,
            Platform::Alibaba1688,
        ] {
            let json = serde_json::to_string(&platform).unwrap();
            assert_eq!(json, format!("\"{}\"", platform.as_str()));
        }
    }
}
