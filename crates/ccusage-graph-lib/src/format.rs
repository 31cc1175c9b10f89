use chrono::{Datelike, NaiveDate};

/// Groups digits in threes: `1234567` -> `1,234,567`.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

/// Threshold amounts drop the cents when they are whole dollars.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${}", amount as u64)
    } else {
        format_cost(amount)
    }
}

/// `MM/DD`, zero padded.
pub fn date_label(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_amounts() {
        assert_eq!(format_cost(5.0), "$5.00");
        assert_eq!(format_cost(12.346), "$12.35");
        assert_eq!(format_amount(20.0), "$20");
        assert_eq!(format_amount(20.5), "$20.50");
    }

    #[test]
    fn test_date_label() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(date_label(date), "03/07");
    }
}
