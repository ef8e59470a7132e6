use std::collections::HashMap;

/// Legacy customer number to destination `AddressId`.
///
/// Filled by the address phase and read by the order phase. A missing key is
/// not an error here; callers decide to skip the dependent row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMapper {
    addresses: HashMap<i64, i64>,
}

impl KeyMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the address created for a legacy customer, replacing any earlier entry.
    pub fn insert(&mut self, cust_no: i64, address_id: i64) -> Option<i64> {
        self.addresses.insert(cust_no, address_id)
    }

    pub fn address_for(&self, cust_no: i64) -> Option<i64> {
        self.addresses.get(&cust_no).copied()
    }

    pub fn contains(&self, cust_no: i64) -> bool {
        self.addresses.contains_key(&cust_no)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl FromIterator<(i64, i64)> for KeyMapper {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}
