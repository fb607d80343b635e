//! Organization department catalog and display formatting.

/// The fixed set of departments an incident, change request, or user can
/// belong to. The server stores these codes verbatim.
pub const DEPARTMENTS: &[&str] = &[
    "OPERATIONS_TEAM",
    "COMPLIANCE_TEAM",
    "FINANCE_TEAM",
    "TECH_TEAM",
    "GENERAL",
    "VENDOR_MANAGEMENT",
    "SECURITY_TEAM",
    "PRODUCT_TEAM",
    "CUSTOMER_SUPPORT",
];

/// Whether a department code is part of the catalog.
pub fn is_known(code: &str) -> bool {
    DEPARTMENTS.contains(&code)
}

/// Human-readable label for a department code: underscores become spaces
/// and each word is title-cased (`"VENDOR_MANAGEMENT"` -> `"Vendor
/// Management"`). Unknown codes are formatted the same way rather than
/// rejected, since older records may carry free-form department names.
pub fn display_name(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_ascii_lowercase();
            let mut out = String::with_capacity(lower.len());
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
