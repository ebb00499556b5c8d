//! Seed command implementation.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::json;

use catalog::storage::DynamoDbRepository;
use catalog_core::item::{Item, CATEGORY_ATTRIBUTE};
use catalog_core::storage::{ItemRepository, StoreAck};

use super::error::Result;

const ADJECTIVES: [&str; 8] = [
    "Compact", "Deluxe", "Heavy-Duty", "Portable", "Classic", "Smart", "Rugged", "Mini",
];

const CATALOG: [(&str, &[&str]); 5] = [
    ("tools", &["Hammer", "Wrench", "Screwdriver Set", "Drill", "Tape Measure"]),
    ("kitchen", &["Kettle", "Chef Knife", "Cutting Board", "Blender"]),
    ("garden", &["Hose", "Pruning Shears", "Watering Can", "Rake"]),
    ("electronics", &["Headphones", "Charger", "Speaker", "Power Bank"]),
    ("office", &["Desk Lamp", "Notebook", "Stapler", "Monitor Stand"]),
];

/// Generate `count` sample products without ids.
///
/// Ids are assigned at insert time, the same way the create route does.
pub fn generate_products<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let (category, names) = CATALOG[i as usize % CATALOG.len()];
            let name = names.choose(rng).copied().unwrap_or("Widget");
            let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("Classic");
            let cents: u32 = rng.random_range(199..=19999);

            let mut item = Item::new();
            item.insert("name", json!(format!("{adjective} {name}")));
            item.insert(CATEGORY_ATTRIBUTE, json!(category));
            item.insert("price", json!(f64::from(cents) / 100.0));
            item.insert("stock", json!(rng.random_range(0..=250u32)));
            item
        })
        .collect()
}

/// Short description of a product for the preview listing.
pub fn describe_product(item: &Item) -> String {
    let field = |name: &str| {
        item.get(name)
            .map(|value| {
                value
                    .as_str()
                    .map_or_else(|| value.to_string(), str::to_string)
            })
            .unwrap_or_default()
    };

    format!(
        "{} [{}] ${}",
        field("name"),
        field(CATEGORY_ATTRIBUTE),
        field("price")
    )
}

/// Insert products one at a time, each with a fresh id.
pub async fn seed_products(repo: &DynamoDbRepository, products: &[Item]) -> Result<Vec<StoreAck>> {
    let mut acks = Vec::with_capacity(products.len());

    for product in products {
        let mut item = product.clone();
        item.assign_new_id();
        acks.push(repo.put_item(&item).await?);
    }

    Ok(acks)
}
