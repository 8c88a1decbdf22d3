//! Salary amount extraction for query hints and posting salary strings

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

lazy_static! {
    /// Currency-prefixed amount: `RM 1,500`, `rm1500`, `$3k`, `$ 2.5k`
    static ref CURRENCY_AMOUNT: Regex =
        Regex::new(r"(?i)(?:\brm|\$)\s?(\d+(?:,\d{3})*(?:\.\d+)?)\s?(k\b)?").expect("valid salary regex");
    /// Currency-prefixed amount, optionally followed by the other end of a range: `RM 1,800 - 2,500`
    static ref CURRENCY_RANGE: Regex = Regex::new(
        r"(?i)(?:\brm|\$)\s?(\d+(?:,\d{3})*(?:\.\d+)?)\s?(k\b)?(?:\s*(?:-|to)\s*(?:rm|\$)?\s?(\d+(?:,\d{3})*(?:\.\d+)?)\s?(k\b)?)?"
    )
    .expect("valid salary range regex");
    /// Any amount, used on posting salary strings without a currency marker
    static ref BARE_AMOUNT: Regex =
        Regex::new(r"(?i)(\d+(?:,\d{3})*(?:\.\d+)?)\s?(k\b)?").expect("valid amount regex");
}

/// A salary floor found in free text, with the byte span it came from
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryHint {
    pub amount: f64,
    pub span: Range<usize>,
}

/// Find the first currency-marked amount in query text
pub fn find_salary_hint(text: &str) -> Option<SalaryHint> {
    let caps = CURRENCY_AMOUNT.captures(text)?;
    let whole = caps.get(0)?;
    let amount = to_amount(caps.get(1)?.as_str(), caps.get(2).is_some())?;

    Some(SalaryHint {
        amount,
        span: whole.range(),
    })
}

/// Amounts in a posting's salary string, e.g. "RM 1,800 - 2,500 / month".
/// Currency-marked amounts win over `k` amounts, which win over bare numbers.
pub fn parse_salary_amounts(salary: &str) -> Vec<f64> {
    let marked: Vec<f64> = CURRENCY_RANGE
        .captures_iter(salary)
        .flat_map(|caps| {
            let low = caps.get(1).and_then(|m| to_amount(m.as_str(), caps.get(2).is_some()));
            let high = caps.get(3).and_then(|m| to_amount(m.as_str(), caps.get(4).is_some()));
            low.into_iter().chain(high)
        })
        .collect();
    if !marked.is_empty() {
        return marked;
    }

    let bare: Vec<(f64, bool)> = BARE_AMOUNT
        .captures_iter(salary)
        .filter_map(|caps| {
            let thousands = caps.get(2).is_some();
            to_amount(caps.get(1)?.as_str(), thousands).map(|amount| (amount, thousands))
        })
        .collect();

    let any_thousands = bare.iter().any(|(_, thousands)| *thousands);
    bare.into_iter()
        .filter(|(_, thousands)| *thousands || !any_thousands)
        .map(|(amount, _)| amount)
        .collect()
}

/// Highest amount a posting advertises, if any can be read
pub fn salary_ceiling(salary: &str) -> Option<f64> {
    parse_salary_amounts(salary)
        .into_iter()
        .fold(None, |best, amount| match best {
            Some(current) if current >= amount => Some(current),
            _ => Some(amount),
        })
}

fn to_amount(digits: &str, thousands: bool) -> Option<f64> {
    let value: f64 = digits.replace(',', "").parse().ok()?;
    Some(if thousands { value * 1000.0 } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ringgit_hint() {
        let hint = find_salary_hint("waiter job paying at least RM 1,800 a month").unwrap();
        assert_eq!(hint.amount, 1800.0);

        let hint = find_salary_hint("rm2000").unwrap();
        assert_eq!(hint.amount, 2000.0);
    }

    #[test]
    fn test_dollar_thousands_hint() {
        let hint = find_salary_hint("remote dev role $3k+").unwrap();
        assert_eq!(hint.amount, 3000.0);
        assert_eq!(&"remote dev role $3k+"[hint.span], "$3k");
    }

    #[test]
    fn test_no_hint_without_currency() {
        assert!(find_salary_hint("need 2 waiters for 5 days").is_none());
        assert!(find_salary_hint("farm work").is_none());
    }

    #[test]
    fn test_posting_salary_ceiling() {
        assert_eq!(salary_ceiling("RM 1,800 - RM 2,500 / month"), Some(2500.0));
        assert_eq!(salary_ceiling("RM12/hour"), Some(12.0));
        assert_eq!(salary_ceiling("Negotiable"), None);
        assert_eq!(salary_ceiling("RM 1,800 - 2,500"), Some(2500.0));
        assert_eq!(salary_ceiling("$3k to $4.5k"), Some(4500.0));
        assert_eq!(salary_ceiling("1500 - 2000"), Some(2000.0));
    }

    #[test]
    fn test_stray_numbers_ignored() {
        assert_eq!(salary_ceiling("2024 rate: RM 10/hour"), Some(10.0));
        assert_eq!(parse_salary_amounts("Shift 2, RM 9/hour"), vec![9.0]);
        assert_eq!(salary_ceiling("3k-4k, 5 days a week"), Some(4000.0));
    }
}
