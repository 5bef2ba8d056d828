/// Refundable deposit charged on every booking.
pub(crate) const DEPOSIT_FIXED: f64 = 1000.0;
/// Flat platform fee charged on every booking.
pub(crate) const PLATFORM_FIXED: f64 = 299.0;

/// Amount shown for a room before booking: one month of rent plus fixed fees.
pub(crate) fn total_price(monthly_rent: f64) -> f64 {
    monthly_rent + DEPOSIT_FIXED + PLATFORM_FIXED
}

/// Rupee amount, whole numbers without decimals.
pub(crate) fn money(amount: Option<f64>) -> String {
    let n = amount.filter(|n| n.is_finite()).unwrap_or(0.0);
    if n.fract() == 0.0 {
        format!("₹{}", n as i64)
    } else {
        format!("₹{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_adds_deposit_and_platform_fee() {
        assert_eq!(total_price(5000.0), 6299.0);
        assert_eq!(total_price(0.0), 1299.0);
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(Some(6299.0)), "₹6299");
        assert_eq!(money(Some(99.5)), "₹99.5");
        assert_eq!(money(None), "₹0");
    }
}
