//! Static product catalog backing the image search.
//!
//! Until platform search APIs are wired in, every search is answered from
//! this fixed set of listings, filtered by the requested platforms and
//! re-stamped with fresh product ids.

use chrono::Utc;

use crate::models::{Platform, ProductMatch};

/// Platforms a search runs against when the caller does not narrow them.
pub const DEFAULT_PLATFORMS: [Platform; 3] = [Platform::Taobao, Platform::Jd, Platform::Pdd];

struct CatalogItem {
    platform: Platform,
    title: &'static str,
    price: f64,
    original_price: Option<f64>,
    image_url: &'static str,
    product_url: &'static str,
    sales: i64,
    shop_name: &'static str,
    shop_rating: f64,
    similarity_score: i32,
}

impl CatalogItem {
    fn stamped(&self, stamp: i64) -> ProductMatch {
        ProductMatch {
            platform: self.platform,
            product_id: format!("{}_{}", self.platform.id_prefix(), stamp),
            title: self.title.to_string(),
            price: self.price,
            original_price: self.original_price,
            image_url: self.image_url.to_string(),
            product_url: self.product_url.to_string(),
            sales: self.sales,
            shop_name: self.shop_name.to_string(),
            shop_rating: Some(self.shop_rating),
            similarity_score: self.similarity_score,
        }
    }
}

// TODO: replace the static catalog with live image-search calls to the
// platform APIs once partner access is arranged.
const CATALOG: &[CatalogItem] = &[
    CatalogItem {
        platform: Platform::Jd,
        title: "Apple iPhone 15 Pro Max 256GB Space Black, dual-SIM 5G",
        price: 8999.0,
        original_price: Some(9999.0),
        image_url: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=400&h=400&fit=crop",
        product_url: "https://item.jd.com/100012345678.html",
        sales: 50000,
        shop_name: "Apple JD self-operated flagship",
        shop_rating: 4.9,
        similarity_score: 98,
    },
    CatalogItem {
        platform: Platform::Taobao,
        title: "Apple iPhone 15 Pro Max 256GB Space Black, carrier-unlocked",
        price: 8799.0,
        original_price: Some(9999.0),
        image_url: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=400&h=400&fit=crop",
        product_url: "https://item.taobao.com/item.htm?id=123456789",
        sales: 30000,
        shop_name: "Apple official flagship store",
        shop_rating: 4.8,
        similarity_score: 96,
    },
    CatalogItem {
        platform: Platform::Taobao,
        title: "Fashion casual sneakers, breathable cushioned running shoes",
        price: 299.0,
        original_price: Some(599.0),
        image_url: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
        product_url: "https://taobao.com/item/123456",
        sales: 15234,
        shop_name: "Official flagship store",
        shop_rating: 4.9,
        similarity_score: 95,
    },
    CatalogItem {
        platform: Platform::Pdd,
        title: "Apple iPhone 15 Pro Max 256GB Space Black, billion subsidy",
        price: 8599.0,
        original_price: None,
        image_url: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=400&h=400&fit=crop",
        product_url: "https://mobile.yangkeduo.com/goods.html?goods_id=123456",
        sales: 80000,
        shop_name: "Pinduoduo billion subsidy",
        shop_rating: 4.7,
        similarity_score: 94,
    },
    CatalogItem {
        platform: Platform::Jd,
        title: "Apple iPhone 15 Pro Max 256GB Natural Titanium, dual-SIM 5G",
        price: 9199.0,
        original_price: Some(9999.0),
        image_url: "https://images.unsplash.com/photo-1696446702094-b0f39473d8dc?w=400&h=400&fit=crop",
        product_url: "https://item.jd.com/100012345679.html",
        sales: 45000,
        shop_name: "Apple JD self-operated flagship",
        shop_rating: 4.9,
        similarity_score: 92,
    },
    CatalogItem {
        platform: Platform::Jd,
        title: "Unisex sports shoes, lightweight and breathable",
        price: 279.0,
        original_price: Some(499.0),
        image_url: "https://images.unsplash.com/photo-1549298916-b41d501d3772?w=400",
        product_url: "https://jd.com/item/789012",
        sales: 8932,
        shop_name: "JD self-operated",
        shop_rating: 4.8,
        similarity_score: 92,
    },
    CatalogItem {
        platform: Platform::Taobao,
        title: "Apple iPhone 15 Pro 128GB Space Black, nationwide warranty",
        price: 7299.0,
        original_price: Some(7999.0),
        image_url: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=400&h=400&fit=crop",
        product_url: "https://item.taobao.com/item.htm?id=123456790",
        sales: 25000,
        shop_name: "Apple official flagship store",
        shop_rating: 4.8,
        similarity_score: 88,
    },
    CatalogItem {
        platform: Platform::Pdd,
        title: "Casual running sneakers, billion subsidy deal",
        price: 189.0,
        original_price: Some(399.0),
        image_url: "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a?w=400",
        product_url: "https://pinduoduo.com/item/345678",
        sales: 23456,
        shop_name: "Brand direct store",
        shop_rating: 4.7,
        similarity_score: 88,
    },
    CatalogItem {
        platform: Platform::Alibaba1688,
        title: "Apple iPhone 15 Pro Max 256GB Space Black, bulk lots verified",
        price: 8299.0,
        original_price: None,
        image_url: "https://images.unsplash.com/photo-1695048133142-1a20484d2569?w=400&h=400&fit=crop",
        product_url: "https://detail.1688.com/offer/123456.html",
        sales: 5000,
        shop_name: "Shenzhen Huaqiangbei digital wholesale",
        shop_rating: 4.5,
        similarity_score: 85,
    },
];

/// Returns the catalog listings for the given platforms, best match first.
///
/// Product ids are stamped with the current time so repeated searches hand
/// out distinct ids, matching how live platform lookups would behave.
pub fn search_matches(platforms: &[Platform]) -> Vec<ProductMatch> {
    let stamp = Utc::now().timestamp_millis();
    let mut matches: Vec<ProductMatch> = CATALOG
        .iter()
        .filter(|item| platforms.contains(&item.platform))
        .map(|item| item.stamped(stamp))
        .collect();
    matches.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));
    matches
}
