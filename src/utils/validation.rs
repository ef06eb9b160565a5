use chrono::{NaiveDate, Utc};
use validator::Validate;

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

pub fn is_future_date(date: NaiveDate) -> bool {
    date > Utc::now().date_naive()
}

/// National ID numbers are exactly 12 characters.
pub fn is_valid_cccd(cccd: &str) -> bool {
    cccd.chars().count() == 12
}

/// Phone numbers are exactly 10 digits.
pub fn is_valid_phone_number(phone_number: &str) -> bool {
    phone_number.len() == 10 && phone_number.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn future_dates() {
        let today = Utc::now().date_naive();
        assert!(!is_future_date(today));
        assert!(is_future_date(today + Duration::days(1)));
    }

    #[test]
    fn identifier_lengths() {
        assert!(is_valid_cccd("001203004567"));
        assert!(!is_valid_cccd("00120300456"));
        assert!(is_valid_phone_number("0912345678"));
        assert!(!is_valid_phone_number("091234567"));
        assert!(!is_valid_phone_number("09123456ab"));
    }
}
