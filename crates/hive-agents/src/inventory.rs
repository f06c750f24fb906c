//! Inventory operations for agents.
//!
//! Inventories always carry all four resource keys; a depleted resource is
//! kept at zero rather than removed. All arithmetic is checked.

use std::collections::BTreeMap;

use hive_types::ResourceType;

use crate::error::AgentError;

/// Add `amount` units of `resource` to the inventory.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the count would overflow.
pub fn add_resource(
    inventory: &mut BTreeMap<ResourceType, u32>,
    resource: ResourceType,
    amount: u32,
) -> Result<(), AgentError> {
    let entry = inventory.entry(resource).or_insert(0);
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: format!("adding {amount} {resource}"),
        })?;
    Ok(())
}

/// Remove `amount` units of `resource` from the inventory.
///
/// The key stays present with a zero count when fully depleted.
///
/// # Errors
///
/// Returns [`AgentError::InsufficientResource`] if the agent holds less
/// than `amount`.
pub fn remove_resource(
    inventory: &mut BTreeMap<ResourceType, u32>,
    resource: ResourceType,
    amount: u32,
) -> Result<(), AgentError> {
    let current = inventory.get(&resource).copied().unwrap_or(0);
    let remaining = current
        .checked_sub(amount)
        .ok_or(AgentError::InsufficientResource {
            resource,
            requested: amount,
            available: current,
        })?;
    inventory.insert(resource, remaining);
    Ok(())
}

/// The resource the agent holds most of, with its count.
///
/// Ties go to the resource that comes first in [`ResourceType::ALL`]
/// (food, material, knowledge, energy). An empty inventory yields
/// `(Food, 0)`.
pub fn top_resource(inventory: &BTreeMap<ResourceType, u32>) -> (ResourceType, u32) {
    let mut best = (ResourceType::Food, 0);
    for resource in ResourceType::ALL {
        let count = inventory.get(&resource).copied().unwrap_or(0);
        if count > best.1 {
            best = (resource, count);
        }
    }
    best
}

/// Sum of all held units. Returns `None` on overflow.
pub fn total_units(inventory: &BTreeMap<ResourceType, u32>) -> Option<u32> {
    inventory
        .values()
        .try_fold(0_u32, |acc, n| acc.checked_add(*n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::empty_inventory;

    #[test]
    fn add_then_remove() {
        let mut inv = empty_inventory();
        assert!(add_resource(&mut inv, ResourceType::Food, 5).is_ok());
        assert!(remove_resource(&mut inv, ResourceType::Food, 3).is_ok());
        assert_eq!(inv.get(&ResourceType::Food).copied(), Some(2));
    }

    #[test]
    fn depleted_key_stays_present() {
        let mut inv = empty_inventory();
        assert!(add_resource(&mut inv, ResourceType::Knowledge, 2).is_ok());
        assert!(remove_resource(&mut inv, ResourceType::Knowledge, 2).is_ok());
        assert_eq!(inv.get(&ResourceType::Knowledge).copied(), Some(0));
        assert_eq!(inv.len(), 4);
    }

    #[test]
    fn remove_more_than_held_fails() {
        let mut inv = empty_inventory();
        let result = remove_resource(&mut inv, ResourceType::Energy, 1);
        assert!(matches!(
            result,
            Err(AgentError::InsufficientResource { available: 0, .. })
        ));
    }

    #[test]
    fn top_resource_prefers_canonical_order_on_ties() {
        let mut inv = empty_inventory();
        assert!(add_resource(&mut inv, ResourceType::Energy, 4).is_ok());
        assert!(add_resource(&mut inv, ResourceType::Material, 4).is_ok());
        assert_eq!(top_resource(&inv), (ResourceType::Material, 4));
    }

    #[test]
    fn top_resource_of_empty_inventory_is_food_zero() {
        assert_eq!(top_resource(&empty_inventory()), (ResourceType::Food, 0));
        assert_eq!(top_resource(&BTreeMap::new()), (ResourceType::Food, 0));
    }

    #[test]
    fn total_units_sums_everything() {
        let mut inv = empty_inventory();
        assert!(add_resource(&mut inv, ResourceType::Food, 3).is_ok());
        assert!(add_resource(&mut inv, ResourceType::Energy, 2).is_ok());
        assert_eq!(total_units(&inv), Some(5));
    }
}
