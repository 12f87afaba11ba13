//! # Menu Catalog
//!
//! The static menu reference data. The billing state machine treats this
//! as read-only external data: carts copy what they need (snapshot rule)
//! and nothing here is ever mutated at runtime.
//!
//! Prices are stored in paise; the menu itself is whole-rupee priced.

use crate::types::MenuItem;

/// (id, name, price in paise, category)
const MENU: &[(u32, &str, i64, &str)] = &[
    // Nashta (Breakfast)
    (1, "Pohe", 4000, "Nashta (Breakfast)"),
    (2, "Kanda Pohe", 4500, "Nashta (Breakfast)"),
    (3, "Batata Pohe", 4500, "Nashta (Breakfast)"),
    (4, "Upma", 4000, "Nashta (Breakfast)"),
    (5, "Sheera", 5000, "Nashta (Breakfast)"),
    (6, "Misal Pav", 8000, "Nashta (Breakfast)"),
    (7, "Usal Pav", 7000, "Nashta (Breakfast)"),
    (8, "Vada Pav", 2000, "Nashta (Breakfast)"),
    (9, "Samosa", 2500, "Nashta (Breakfast)"),
    (10, "Thalipeeth", 6000, "Nashta (Breakfast)"),
    (11, "Sabudana Khichadi", 5500, "Nashta (Breakfast)"),
    (12, "Idli", 4000, "Nashta (Breakfast)"),
    (13, "Medu Vada", 5000, "Nashta (Breakfast)"),
    (14, "Dosa", 7000, "Nashta (Breakfast)"),
    // Bhaji (Vegetable Items)
    (15, "Kanda Bhaji", 5000, "Bhaji (Vegetable Items)"),
    (16, "Batata Bhaji", 5000, "Bhaji (Vegetable Items)"),
    (17, "Aloo Gobi", 12000, "Bhaji (Vegetable Items)"),
    (18, "Bhendi Fry", 11000, "Bhaji (Vegetable Items)"),
    (19, "Matki Usal", 10000, "Bhaji (Vegetable Items)"),
    (20, "Chawli Usal", 10000, "Bhaji (Vegetable Items)"),
    (21, "Vangyachi Bhaji", 12000, "Bhaji (Vegetable Items)"),
    (22, "Bharli Vangi", 14000, "Bhaji (Vegetable Items)"),
    (23, "Gajar Batata Bhaji", 11000, "Bhaji (Vegetable Items)"),
    (24, "Kobi Bhaji", 10000, "Bhaji (Vegetable Items)"),
    // Amti / Dal
    (25, "Varan", 8000, "Amti / Dal"),
    (26, "Dal Tadka", 10000, "Amti / Dal"),
    (27, "Amti", 9000, "Amti / Dal"),
    (28, "Toor Dal", 9000, "Amti / Dal"),
    (29, "Masoor Dal", 9000, "Amti / Dal"),
    // Bhat / Rice Items
    (30, "Sadhya Bhat", 6000, "Bhat / Rice Items"),
    (31, "Jeera Rice", 8000, "Bhat / Rice Items"),
    (32, "Masala Bhat", 10000, "Bhat / Rice Items"),
    (33, "Vangi Bhat", 11000, "Bhat / Rice Items"),
    (34, "Dal Khichadi", 12000, "Bhat / Rice Items"),
    (35, "Pulav", 13000, "Bhat / Rice Items"),
    // Non-Veg (If Required)
    (36, "Chicken Curry", 22000, "Non-Veg (If Required)"),
    (37, "Chicken Sukka", 25000, "Non-Veg (If Required)"),
    (38, "Anda Curry", 15000, "Non-Veg (If Required)"),
    (39, "Egg Bhurji", 12000, "Non-Veg (If Required)"),
    (40, "Mutton Curry", 30000, "Non-Veg (If Required)"),
    (41, "Fish Fry", 28000, "Non-Veg (If Required)"),
    (42, "Fish Curry", 26000, "Non-Veg (If Required)"),
    // Bhakri / Poli
    (43, "Chapati", 1500, "Bhakri / Poli"),
    (44, "Tandoor Roti", 2000, "Bhakri / Poli"),
    (45, "Jowar Bhakri", 2500, "Bhakri / Poli"),
    (46, "Bajra Bhakri", 2500, "Bhakri / Poli"),
    (47, "Tandoor Naan", 4000, "Bhakri / Poli"),
    (48, "Butter Naan", 5000, "Bhakri / Poli"),
    // Side Items
    (49, "Koshimbir", 3000, "Side Items"),
    (50, "Solkadhi", 4000, "Side Items"),
    (51, "Papad", 1500, "Side Items"),
    (52, "Loncha (Thecha / Lime)", 2000, "Side Items"),
    (53, "Tak (Buttermilk)", 2500, "Side Items"),
    (54, "Dahi", 3000, "Side Items"),
    // God Padarth (Sweets)
    (55, "Gulab Jamun", 4000, "God Padarth (Sweets)"),
    (56, "Shrikhand", 6000, "God Padarth (Sweets)"),
    (57, "Amrakhand", 7000, "God Padarth (Sweets)"),
    (58, "Puran Poli", 8000, "God Padarth (Sweets)"),
    (59, "Sheera", 5000, "God Padarth (Sweets)"),
];

/// Returns the full menu.
pub fn default_menu() -> Vec<MenuItem> {
    MENU.iter()
        .map(|&(id, name, price_paise, category)| MenuItem {
            id,
            name: name.to_string(),
            price_paise,
            category: category.to_string(),
        })
        .collect()
}

/// Looks up one menu item by catalog id.
pub fn find_item(id: u32) -> Option<MenuItem> {
    MENU.iter()
        .find(|&&(item_id, ..)| item_id == id)
        .map(|&(id, name, price_paise, category)| MenuItem {
            id,
            name: name.to_string(),
            price_paise,
            category: category.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_menu_size_and_unique_ids() {
        let menu = default_menu();
        assert_eq!(menu.len(), 59);

        let ids: HashSet<u32> = menu.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 59);
    }

    #[test]
    fn test_prices_are_positive_whole_rupees() {
        for item in default_menu() {
            assert!(item.price_paise > 0, "{} has no price", item.name);
            assert_eq!(item.price_paise % 100, 0, "{} not whole-rupee", item.name);
        }
    }

    #[test]
    fn test_find_item() {
        let pohe = find_item(1).unwrap();
        assert_eq!(pohe.name, "Pohe");
        assert_eq!(pohe.price().paise(), 4000);

        assert!(find_item(999).is_none());
    }
}
