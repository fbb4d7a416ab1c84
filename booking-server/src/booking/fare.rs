//! Fare Calculator
//!
//! Pure computation over catalog data, deterministic for a given
//! package/menu snapshot. The wizard calls this for the on-screen
//! quote; the booking writer calls it again at write time with fresh
//! catalog data, so a client-supplied total is never trusted.

use shared::models::{FareQuote, Menu, MenuSelection, Package};

use crate::utils::{AppError, AppResult};

/// Per-guest price applied when a selected item ID has no matching
/// item or the item carries no price.
pub const DEFAULT_ITEM_PRICE: f64 = 10.0;

/// Compute base fare and overage charges.
///
/// `base_fare = base_price * guest_count`. For each selected menu, the
/// entries of the selection list beyond the menu's `free_limit`
/// (selection order, not sorted) are billed per guest at the item's
/// price, falling back to [`DEFAULT_ITEM_PRICE`] when the item or its
/// price is missing.
///
/// Selections referencing a menu the package does not own are
/// rejected; a selection list may be empty (extra_charges = 0).
pub fn calculate_fare(
    package: &Package,
    menus: &[Menu],
    guest_count: i64,
    selections: &[MenuSelection],
) -> AppResult<FareQuote> {
    if guest_count < 1 {
        return Err(AppError::validation(format!(
            "guest_count must be at least 1, got {guest_count}"
        )));
    }

    let guests = guest_count as f64;
    let base_fare = package.base_price * guests;
    let mut extra_charges = 0.0;

    for selection in selections {
        let menu = menus
            .iter()
            .find(|m| m.id == selection.menu_id)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Menu {} does not belong to package {}",
                    selection.menu_id, package.id
                ))
            })?;

        if menu.free_limit > menu.items.len() as i64 {
            // Tolerated configuration; nothing to bill differently, but
            // worth surfacing to the admin via the log.
            tracing::warn!(
                menu_id = menu.id,
                free_limit = menu.free_limit,
                item_count = menu.items.len(),
                "Menu free_limit exceeds item count"
            );
        }

        let free = menu.free_limit.max(0) as usize;
        for item_id in selection.items.iter().skip(free) {
            let unit_price = menu
                .items
                .iter()
                .find(|i| i.id == *item_id)
                .and_then(|i| i.price)
                .unwrap_or(DEFAULT_ITEM_PRICE);
            extra_charges += unit_price * guests;
        }
    }

    Ok(FareQuote {
        base_fare,
        extra_charges,
        total_fare: base_fare + extra_charges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuItem;

    fn package(base_price: f64) -> Package {
        Package {
            id: 1,
            name: "Gold".into(),
            base_price,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn menu(id: i64, free_limit: i64, prices: &[Option<f64>]) -> Menu {
        Menu {
            id,
            package_id: 1,
            name: format!("Menu {id}"),
            items: prices
                .iter()
                .enumerate()
                .map(|(i, price)| MenuItem {
                    id: 100 + i as i64,
                    name: format!("Item {i}"),
                    price: *price,
                })
                .collect(),
            free_limit,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn select(menu_id: i64, items: &[i64]) -> MenuSelection {
        MenuSelection {
            menu_id,
            items: items.to_vec(),
        }
    }

    #[test]
    fn worked_example_from_the_pricing_sheet() {
        // base_price=1000, guests=50, free_limit=2,
        // items priced 50/60/70, all three selected
        let pkg = package(1000.0);
        let menus = vec![menu(9, 2, &[Some(50.0), Some(60.0), Some(70.0)])];
        let quote =
            calculate_fare(&pkg, &menus, 50, &[select(9, &[100, 101, 102])]).unwrap();

        assert_eq!(quote.base_fare, 50_000.0);
        assert_eq!(quote.extra_charges, 3_500.0); // 70 * 50
        assert_eq!(quote.total_fare, 53_500.0);
    }

    #[test]
    fn free_limit_boundary() {
        let pkg = package(100.0);
        let menus = vec![menu(9, 3, &[Some(5.0), Some(6.0), Some(7.0), Some(8.0)])];

        // Exactly free_limit selections: nothing extra
        let quote = calculate_fare(&pkg, &menus, 10, &[select(9, &[100, 101, 102])]).unwrap();
        assert_eq!(quote.extra_charges, 0.0);

        // One past the limit: exactly price * guests
        let quote =
            calculate_fare(&pkg, &menus, 10, &[select(9, &[100, 101, 102, 103])]).unwrap();
        assert_eq!(quote.extra_charges, 80.0); // 8 * 10
    }

    #[test]
    fn free_limit_zero_bills_everything() {
        let pkg = package(100.0);
        let menus = vec![menu(9, 0, &[Some(5.0), Some(6.0)])];
        let quote = calculate_fare(&pkg, &menus, 2, &[select(9, &[100, 101])]).unwrap();
        assert_eq!(quote.extra_charges, 22.0); // (5 + 6) * 2
    }

    #[test]
    fn missing_item_or_price_uses_default() {
        let pkg = package(100.0);
        let menus = vec![menu(9, 0, &[None])];

        // Item exists but has no price
        let quote = calculate_fare(&pkg, &menus, 3, &[select(9, &[100])]).unwrap();
        assert_eq!(quote.extra_charges, DEFAULT_ITEM_PRICE * 3.0);

        // Item ID matches nothing on the menu
        let quote = calculate_fare(&pkg, &menus, 3, &[select(9, &[999])]).unwrap();
        assert_eq!(quote.extra_charges, DEFAULT_ITEM_PRICE * 3.0);
    }

    #[test]
    fn empty_selection_has_no_extras() {
        let pkg = package(250.0);
        let menus = vec![menu(9, 2, &[Some(5.0)])];
        let quote = calculate_fare(&pkg, &menus, 4, &[]).unwrap();
        assert_eq!(quote.base_fare, 1_000.0);
        assert_eq!(quote.extra_charges, 0.0);
        assert_eq!(quote.total_fare, 1_000.0);
    }

    #[test]
    fn is_deterministic() {
        let pkg = package(1000.0);
        let menus = vec![menu(9, 1, &[Some(50.0), Some(60.0)])];
        let selections = vec![select(9, &[100, 101])];

        let a = calculate_fare(&pkg, &menus, 50, &selections).unwrap();
        let b = calculate_fare(&pkg, &menus, 50, &selections).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_foreign_menu_and_bad_guest_count() {
        let pkg = package(1000.0);
        let menus = vec![menu(9, 1, &[Some(50.0)])];

        assert!(calculate_fare(&pkg, &menus, 50, &[select(8, &[100])]).is_err());
        assert!(calculate_fare(&pkg, &menus, 0, &[]).is_err());
    }
}
