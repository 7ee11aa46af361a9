//! Delivery zones.

use serde::{Deserialize, Serialize};

/// Where an order ships, which decides the delivery charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryZone {
    InsideDhaka,
    OutsideDhaka,
}

impl DeliveryZone {
    /// Classify a free-text shipping address.
    ///
    /// Any address mentioning Dhaka, in English (any case) or Bangla, is
    /// inside the city.
    ///
    /// ```
    /// use royal_trust_core::DeliveryZone;
    ///
    /// assert_eq!(DeliveryZone::from_address("House 12, Mirpur, DHAKA"), DeliveryZone::InsideDhaka);
    /// assert_eq!(DeliveryZone::from_address("Agrabad, Chattogram"), DeliveryZone::OutsideDhaka);
    /// ```
    #[must_use]
    pub fn from_address(address: &str) -> Self {
        if address.to_lowercase().contains("dhaka") || address.contains("ঢাকা") {
            Self::InsideDhaka
        } else {
            Self::OutsideDhaka
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_dhaka() {
        assert_eq!(DeliveryZone::from_address("dhanmondi, dhaka-1209"), DeliveryZone::InsideDhaka);
        assert_eq!(DeliveryZone::from_address("মিরপুর ১০, ঢাকা"), DeliveryZone::InsideDhaka);
    }

    #[test]
    fn test_outside_dhaka() {
        assert_eq!(DeliveryZone::from_address("Sylhet Sadar"), DeliveryZone::OutsideDhaka);
        assert_eq!(DeliveryZone::from_address(""), DeliveryZone::OutsideDhaka);
    }
}
