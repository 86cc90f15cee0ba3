//! Database query functions (Data Access Objects).
//!
//! Read-only lookups over the loaded projections.

use super::{models::ShoppingListWithItems, Database};

impl Database {
    pub fn shopping_list_with_items(&self, id: &str) -> Option<ShoppingListWithItems> {
        self.lists.get(id).cloned()
    }

    /// True iff `user_id` belongs to `household_id`, as recorded in any of the
    /// household's lists.
    pub fn is_household_member(&self, household_id: &str, user_id: &str) -> bool {
        self.lists
            .values()
            .filter(|list| list.list.household_id == household_id)
            .any(|list| list.member_role(user_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Role;

    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/lists.json");

    fn database() -> Database {
        let lists: Vec<ShoppingListWithItems> = serde_json::from_str(FIXTURE).unwrap();
        Database::from_lists(lists)
    }

    #[test]
    fn looks_lists_up_by_id() {
        let db = database();

        let list = db.shopping_list_with_items("list-weekly").unwrap();
        assert_eq!(list.list.name, "Weekly groceries");
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.user.id, "user-ada");

        assert!(db.shopping_list_with_items("missing").is_none());
    }

    #[test]
    fn member_roles_come_from_the_household() {
        let list = database().shopping_list_with_items("list-weekly").unwrap();

        assert_eq!(list.member_role("user-ada"), Some(Role::Admin));
        assert_eq!(list.member_role("user-grace"), Some(Role::Member));
        assert_eq!(list.member_role("user-eve"), None);
    }

    #[test]
    fn membership_is_scoped_to_the_household() {
        let db = database();

        assert!(db.is_household_member("household-home", "user-ada"));
        assert!(db.is_household_member("household-home", "user-grace"));
        assert!(!db.is_household_member("household-home", "user-eve"));
        assert!(db.is_household_member("household-office", "user-eve"));
        assert!(!db.is_household_member("household-office", "user-grace"));
        assert!(!db.is_household_member("household-missing", "user-ada"));
    }

    #[test]
    fn projection_serializes_flattened_camel_case() {
        let list = database().shopping_list_with_items("list-weekly").unwrap();
        let json = serde_json::to_value(&list).unwrap();

        assert_eq!(json["householdId"], "household-home");
        assert_eq!(json["household"]["name"], "Home");
        assert_eq!(json["household"]["members"][0]["role"], "admin");
        assert_eq!(json["items"][1]["checked"], true);
    }
}
