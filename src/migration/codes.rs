//! Codes generated for migrated rows.

pub fn shipper_code(cust_no: i64) -> String {
    format!("SHIP{:04}", cust_no)
}

pub fn consignee_code(cust_no: i64) -> String {
    format!("CONS{:04}", cust_no)
}

pub fn product_code(product_id: i64) -> String {
    format!("PROD{:04}", product_id)
}

pub fn order_number(order_id: i64) -> String {
    format!("ORD{:08}", order_id)
}

/// Legacy alternate code when present, else `STORE` + the numeric id.
pub fn store_code(legacy_id: i64, alternate: Option<&str>) -> String {
    match non_blank(alternate) {
        Some(code) => code.to_string(),
        None => format!("STORE{}", legacy_id),
    }
}

/// Legacy name when present, else the configured placeholder.
pub fn store_name(name: Option<&str>, placeholder: &str) -> String {
    non_blank(name).unwrap_or(placeholder).to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
