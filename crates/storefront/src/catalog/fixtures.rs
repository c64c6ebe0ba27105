//! Shared catalog fixture for query and store tests.
//!
//! Twenty products across three categories, with enough variety in
//! brand, price, rating, and deal flags to exercise every filter.

use sunstone_core::{CategoryId, Price, ProductId};

use crate::models::{Category, Product};

use super::Catalog;

pub(crate) const MICROPHONES: i64 = 1;
pub(crate) const SMART_HOME: i64 = 2;
pub(crate) const HEADPHONES: i64 = 3;

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    cents: i64,
    category: i64,
    brand: Option<&str>,
    rating: f64,
    reviews: u32,
    flash: bool,
    limited: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        image: format!("products/{id}.jpg"),
        category_id: CategoryId::new(category),
        brand: brand.map(str::to_string),
        description: Some(format!("{name} - studio-grade gear.")),
        rating,
        reviews,
        stock: if limited { 3 } else { 50 },
        is_flash_deal: flash,
        is_limited_stock: limited,
        discount: flash.then_some(20),
        original_price: None,
        flash_deal_end: None,
    }
}

pub(crate) fn catalog() -> Catalog {
    let categories = vec![
        Category {
            id: CategoryId::new(MICROPHONES),
            name: "Microphones".into(),
        },
        Category {
            id: CategoryId::new(SMART_HOME),
            name: "Smart Home".into(),
        },
        Category {
            id: CategoryId::new(HEADPHONES),
            name: "Headphones".into(),
        },
    ];

    let products = vec![
        product(1, "Wave Desk Mic", 4999, MICROPHONES, Some("Wavecraft"), 4.5, 120, false, false),
        product(2, "Podcast Mic Pro", 12999, MICROPHONES, Some("SonicPro"), 4.8, 310, true, false),
        product(3, "Streamer Mic Lite", 2999, MICROPHONES, Some("SonicPro"), 3.9, 85, false, true),
        product(4, "Studio Condenser Mic", 19999, MICROPHONES, Some("Wavecraft"), 4.7, 52, false, false),
        product(5, "Lapel Mic Duo", 1999, MICROPHONES, None, 3.2, 14, false, false),
        product(6, "Shotgun Mic X", 8999, MICROPHONES, Some("Fieldline"), 4.1, 67, true, false),
        product(7, "Smart Bulb Quad", 3499, SMART_HOME, Some("Lumabrick"), 4.0, 220, false, false),
        product(8, "Smart Plug Mini", 1499, SMART_HOME, Some("Lumabrick"), 3.8, 95, true, false),
        product(9, "Doorbell Cam", 9999, SMART_HOME, Some("Fieldline"), 4.3, 178, false, false),
        product(10, "Thermostat Dial", 14999, SMART_HOME, None, 4.6, 44, false, true),
        product(11, "Motion Sensor Pair", 2499, SMART_HOME, Some("Lumabrick"), 3.5, 31, false, false),
        product(12, "Smart Lock Bolt", 17999, SMART_HOME, Some("Fieldline"), 4.2, 89, false, false),
        product(13, "Wave Buds", 7999, HEADPHONES, Some("Wavecraft"), 4.4, 402, true, false),
        product(14, "Studio Cans MK2", 24999, HEADPHONES, Some("SonicPro"), 4.9, 510, false, false),
        product(15, "Commute ANC", 15999, HEADPHONES, Some("SonicPro"), 4.3, 267, false, false),
        product(16, "Gym Clips", 4999, HEADPHONES, None, 3.6, 58, false, true),
        product(17, "Kids Band", 2999, HEADPHONES, Some("Lumabrick"), 3.1, 22, false, false),
        product(18, "Open-Back Reference", 32999, HEADPHONES, Some("Wavecraft"), 4.8, 96, false, false),
        product(19, "Gamer Set 7.1", 10999, HEADPHONES, Some("Fieldline"), 4.0, 143, true, false),
        product(20, "Sleep Buds Soft", 8999, HEADPHONES, None, 3.7, 76, false, true),
    ];

    Catalog::from_parts(products, categories)
}
